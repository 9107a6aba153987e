//! Scripted in-memory ledger for tests and local hosting

use crate::ledger::{StakeLedger, TransferFailure};

/// A call the engine made against the ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerCall<Id> {
    TransferFrom { from: Id, to: Id, amount: u64 },
    Transfer { to: Id, amount: u64 },
}

/// Ledger that succeeds unless told otherwise and records what it accepted.
///
/// Failure reasons stick until cleared, the way a mocked token contract
/// keeps reverting with the configured reason.
#[derive(Clone, Debug)]
pub struct ScriptedLedger<Id> {
    calls: Vec<LedgerCall<Id>>,
    transfer_from_failure: Option<String>,
    transfer_failure: Option<String>,
}

impl<Id> Default for ScriptedLedger<Id> {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            transfer_from_failure: None,
            transfer_failure: None,
        }
    }
}

impl<Id: Clone> ScriptedLedger<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `transfer_from` fail with `reason`.
    pub fn fail_deposits_with(&mut self, reason: impl Into<String>) {
        self.transfer_from_failure = Some(reason.into());
    }

    /// Make every `transfer` fail with `reason`.
    pub fn fail_payouts_with(&mut self, reason: impl Into<String>) {
        self.transfer_failure = Some(reason.into());
    }

    /// Successful calls, in order
    pub fn calls(&self) -> &[LedgerCall<Id>] {
        &self.calls
    }

    /// Net value taken into custody by successful calls
    pub fn net_custody(&self) -> i128 {
        self.calls
            .iter()
            .map(|call| match call {
                LedgerCall::TransferFrom { amount, .. } => *amount as i128,
                LedgerCall::Transfer { amount, .. } => -(*amount as i128),
            })
            .sum()
    }
}

impl<Id: Clone> StakeLedger<Id> for ScriptedLedger<Id> {
    fn transfer_from(&mut self, from: &Id, to: &Id, amount: u64) -> Result<(), TransferFailure> {
        if let Some(reason) = &self.transfer_from_failure {
            return Err(TransferFailure::new(reason.clone()));
        }
        self.calls.push(LedgerCall::TransferFrom {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }

    fn transfer(&mut self, to: &Id, amount: u64) -> Result<(), TransferFailure> {
        if let Some(reason) = &self.transfer_failure {
            return Err(TransferFailure::new(reason.clone()));
        }
        self.calls.push(LedgerCall::Transfer {
            to: to.clone(),
            amount,
        });
        Ok(())
    }
}
