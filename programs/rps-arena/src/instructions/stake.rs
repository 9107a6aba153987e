//! Stake instructions

use anchor_lang::prelude::*;

use super::PlayMatch;
use crate::error::ArenaError;
use crate::ledger::LamportLedger;
use crate::state::MatchAccount;

fn lamport_ledger<'info>(accounts: &PlayMatch<'info>) -> Result<LamportLedger<'info>> {
    let rent_floor = Rent::get()?.minimum_balance(MatchAccount::LEN);
    Ok(LamportLedger {
        payer: accounts.player.to_account_info(),
        vault: accounts.match_account.to_account_info(),
        system_program: accounts.system_program.to_account_info(),
        rent_floor,
    })
}

/// Move `amount` lamports from the signer into the match account
pub fn bet(ctx: Context<PlayMatch>, opponent: Pubkey, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    let vault = ctx.accounts.match_account.key();
    let bump = ctx.bumps.match_account;
    let mut ledger = lamport_ledger(&ctx.accounts)?;

    let mut game = ctx.accounts.match_account.load(player, opponent)?;
    let balance = game
        .deposit(&player, &vault, amount, None, &mut ledger)
        .map_err(ArenaError::from)?;
    ctx.accounts.match_account.store(&game, bump);

    msg!("Player {} bet {} lamports, balance {}", player, amount, balance);

    Ok(())
}

/// Pay `amount` lamports of the signer's bet balance back to the signer
pub fn withdraw(ctx: Context<PlayMatch>, opponent: Pubkey, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    let bump = ctx.bumps.match_account;
    let mut ledger = lamport_ledger(&ctx.accounts)?;

    let mut game = ctx.accounts.match_account.load(player, opponent)?;
    let balance = game
        .payout(&player, amount, &mut ledger)
        .map_err(ArenaError::from)?;
    ctx.accounts.match_account.store(&game, bump);

    msg!("Player {} withdrew {} lamports, balance {}", player, amount, balance);

    Ok(())
}
