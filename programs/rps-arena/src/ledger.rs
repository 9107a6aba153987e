//! Lamport-backed stake ledger
//!
//! Deposits move lamports from the signer into the match account through the
//! system program. Payouts debit the match account directly, which the
//! program may do because it owns that account.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use rps_engine::{StakeLedger, TransferFailure};

/// Reason reported when the signer cannot cover a deposit
pub const SHORTFALL_REASON: &str = "insufficient lamport balance";

/// Reason reported when a payout would cut into the rent-exempt minimum
pub const RENT_FLOOR_REASON: &str = "payout would leave match account below rent exemption";

pub struct LamportLedger<'info> {
    pub payer: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    /// Lamports the vault must keep to stay rent exempt
    pub rent_floor: u64,
}

impl<'info> StakeLedger<Pubkey> for LamportLedger<'info> {
    fn transfer_from(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> std::result::Result<(), TransferFailure> {
        if from != self.payer.key || to != self.vault.key {
            return Err(TransferFailure::new("deposit must go from signer to match account"));
        }
        check_payer_covers(self.payer.lamports(), amount)?;
        if amount == 0 {
            return Ok(());
        }

        system_program::transfer(
            CpiContext::new(
                self.system_program.clone(),
                system_program::Transfer {
                    from: self.payer.clone(),
                    to: self.vault.clone(),
                },
            ),
            amount,
        )
        .map_err(|err| TransferFailure::new(err.to_string()))
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> std::result::Result<(), TransferFailure> {
        if to != self.payer.key {
            return Err(TransferFailure::new("payout must go to the signer"));
        }
        let remaining = vault_after_payout(self.vault.lamports(), amount, self.rent_floor)?;
        let received = self
            .payer
            .lamports()
            .checked_add(amount)
            .ok_or_else(|| TransferFailure::new("payout overflows recipient balance"))?;

        **self
            .vault
            .try_borrow_mut_lamports()
            .map_err(|err| TransferFailure::new(err.to_string()))? = remaining;
        **self
            .payer
            .try_borrow_mut_lamports()
            .map_err(|err| TransferFailure::new(err.to_string()))? = received;
        Ok(())
    }
}

fn check_payer_covers(available: u64, amount: u64) -> std::result::Result<(), TransferFailure> {
    if available < amount {
        return Err(TransferFailure::new(SHORTFALL_REASON));
    }
    Ok(())
}

/// Vault lamports left after paying `amount`, never below `rent_floor`
fn vault_after_payout(
    vault: u64,
    amount: u64,
    rent_floor: u64,
) -> std::result::Result<u64, TransferFailure> {
    vault
        .checked_sub(amount)
        .filter(|left| *left >= rent_floor)
        .ok_or_else(|| TransferFailure::new(RENT_FLOOR_REASON))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_engine::{deposit_error, payout_error, MatchError};

    #[test]
    fn test_shortfall_reports_insufficient_tokens() {
        let failure = check_payer_covers(99, 100).unwrap_err();
        assert_eq!(failure.reason, SHORTFALL_REASON);
        assert_eq!(deposit_error(&failure), MatchError::InsufficientTokens);
        assert!(check_payer_covers(100, 100).is_ok());
    }

    #[test]
    fn test_payout_keeps_rent_floor() {
        assert_eq!(vault_after_payout(1_500, 500, 1_000).unwrap(), 1_000);

        let failure = vault_after_payout(1_500, 501, 1_000).unwrap_err();
        assert_eq!(
            payout_error(failure),
            MatchError::TransferFailed(RENT_FLOOR_REASON.to_string())
        );
        assert!(vault_after_payout(100, 200, 0).is_err());
    }
}
