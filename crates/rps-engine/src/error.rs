//! Domain errors raised by the match engine

use thiserror::Error;

/// Every way a match operation can be refused.
///
/// Ledger failures on the deposit path are folded into a fixed taxonomy
/// (`InsufficientTokens`, `InsufficientAllowance`, `UnknownTransferError`);
/// payout failures keep the ledger's own reason.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("you can't play against yourself")]
    SelfPlay,

    #[error("game already started")]
    AlreadyStarted,

    #[error("somebody should start the game first")]
    NotStarted,

    #[error("incorrect move")]
    InvalidMove,

    #[error("not enough tokens")]
    InsufficientTokens,

    #[error("increase your allowance for the game")]
    InsufficientAllowance,

    #[error("unknown token transfer error")]
    UnknownTransferError,

    #[error("token transfer failed: {0}")]
    TransferFailed(String),

    #[error("both moves are already in; the match is resolved")]
    AlreadyResolved,

    #[error("move already submitted, waiting for the opponent")]
    MoveAlreadySubmitted,

    #[error("withdrawal of {requested} exceeds bet balance {available}")]
    InsufficientBetBalance { requested: u64, available: u64 },

    #[error("bet balance would overflow")]
    BalanceOverflow,
}

impl MatchError {
    /// Stable machine-readable code for hosts that cannot carry the enum
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::SelfPlay => "self_play",
            MatchError::AlreadyStarted => "already_started",
            MatchError::NotStarted => "not_started",
            MatchError::InvalidMove => "invalid_move",
            MatchError::InsufficientTokens => "insufficient_tokens",
            MatchError::InsufficientAllowance => "insufficient_allowance",
            MatchError::UnknownTransferError => "unknown_transfer_error",
            MatchError::TransferFailed(_) => "transfer_failed",
            MatchError::AlreadyResolved => "already_resolved",
            MatchError::MoveAlreadySubmitted => "move_already_submitted",
            MatchError::InsufficientBetBalance { .. } => "insufficient_bet_balance",
            MatchError::BalanceOverflow => "balance_overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_failed_keeps_reason() {
        let err = MatchError::TransferFailed("invoked".to_string());
        assert_eq!(err.to_string(), "token transfer failed: invoked");
        assert_eq!(err.code(), "transfer_failed");
    }

    #[test]
    fn test_codes_are_distinct() {
        let all = [
            MatchError::SelfPlay,
            MatchError::AlreadyStarted,
            MatchError::NotStarted,
            MatchError::InvalidMove,
            MatchError::InsufficientTokens,
            MatchError::InsufficientAllowance,
            MatchError::UnknownTransferError,
            MatchError::TransferFailed(String::new()),
            MatchError::AlreadyResolved,
            MatchError::MoveAlreadySubmitted,
            MatchError::InsufficientBetBalance { requested: 1, available: 0 },
            MatchError::BalanceOverflow,
        ];
        let codes: std::collections::HashSet<_> = all.iter().map(MatchError::code).collect();
        assert_eq!(codes.len(), all.len());
    }
}
