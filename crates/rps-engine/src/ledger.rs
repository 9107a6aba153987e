//! Stake ledger boundary
//!
//! The engine never keeps token balances of its own; it asks a ledger to
//! move value in (`transfer_from`) and out (`transfer`). Ledgers report
//! failure as free-form text, which the deposit path folds into a fixed
//! taxonomy through [`DEPOSIT_FAILURE_TABLE`].

use thiserror::Error;

use crate::error::MatchError;

/// A failed ledger transfer, carrying the ledger's own reason
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TransferFailure {
    pub reason: String,
}

impl TransferFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Fungible-token-like service holding the staked value
pub trait StakeLedger<Id> {
    /// Move `amount` from `from` to `to` on behalf of the engine.
    fn transfer_from(&mut self, from: &Id, to: &Id, amount: u64) -> Result<(), TransferFailure>;

    /// Pay `amount` out of the engine's custody to `to`.
    fn transfer(&mut self, to: &Id, amount: u64) -> Result<(), TransferFailure>;
}

/// Stable kinds a failed deposit is reported as
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepositFailure {
    InsufficientTokens,
    InsufficientAllowance,
    Unknown,
}

/// Reason fragments, matched case-insensitively in order; first hit wins.
pub const DEPOSIT_FAILURE_TABLE: &[(&str, DepositFailure)] = &[
    ("balance", DepositFailure::InsufficientTokens),
    ("allowance", DepositFailure::InsufficientAllowance),
];

/// Fold a ledger's deposit failure reason into a [`DepositFailure`].
pub fn classify_deposit_failure(reason: &str) -> DepositFailure {
    let reason = reason.to_ascii_lowercase();
    DEPOSIT_FAILURE_TABLE
        .iter()
        .find(|(fragment, _)| reason.contains(fragment))
        .map(|(_, kind)| *kind)
        .unwrap_or(DepositFailure::Unknown)
}

impl From<DepositFailure> for MatchError {
    fn from(kind: DepositFailure) -> Self {
        match kind {
            DepositFailure::InsufficientTokens => MatchError::InsufficientTokens,
            DepositFailure::InsufficientAllowance => MatchError::InsufficientAllowance,
            DepositFailure::Unknown => MatchError::UnknownTransferError,
        }
    }
}

/// Deposit path: the raw reason never reaches the caller.
pub fn deposit_error(failure: &TransferFailure) -> MatchError {
    classify_deposit_failure(&failure.reason).into()
}

/// Payout path: the reason is passed through untouched.
pub fn payout_error(failure: TransferFailure) -> MatchError {
    MatchError::TransferFailed(failure.reason)
}
