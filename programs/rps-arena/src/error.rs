//! Program error codes, one per core refusal

use anchor_lang::prelude::*;
use rps_engine::MatchError;

#[error_code]
pub enum ArenaError {
    #[msg("You can't play against yourself")]
    SelfPlay = 6000,

    #[msg("Game already started")]
    AlreadyStarted = 6001,

    #[msg("Somebody should start the game first")]
    NotStarted = 6002,

    #[msg("Incorrect move")]
    InvalidMove = 6003,

    #[msg("Not enough tokens")]
    InsufficientTokens = 6004,

    #[msg("Increase your allowance for the game")]
    InsufficientAllowance = 6005,

    #[msg("Unknown token transfer error")]
    UnknownTransferError = 6006,

    #[msg("Token transfer failed")]
    TransferFailed = 6007,

    #[msg("Match already resolved")]
    AlreadyResolved = 6008,

    #[msg("Move already submitted")]
    MoveAlreadySubmitted = 6009,

    #[msg("Withdrawal exceeds bet balance")]
    InsufficientBetBalance = 6010,

    #[msg("Arithmetic overflow")]
    Overflow = 6011,

    #[msg("Match account data is corrupt")]
    CorruptMatch = 6012,
}

impl From<MatchError> for ArenaError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::SelfPlay => ArenaError::SelfPlay,
            MatchError::AlreadyStarted => ArenaError::AlreadyStarted,
            MatchError::NotStarted => ArenaError::NotStarted,
            MatchError::InvalidMove => ArenaError::InvalidMove,
            MatchError::InsufficientTokens => ArenaError::InsufficientTokens,
            MatchError::InsufficientAllowance => ArenaError::InsufficientAllowance,
            MatchError::UnknownTransferError => ArenaError::UnknownTransferError,
            MatchError::TransferFailed(reason) => {
                msg!("Payout refused: {}", reason);
                ArenaError::TransferFailed
            }
            MatchError::AlreadyResolved => ArenaError::AlreadyResolved,
            MatchError::MoveAlreadySubmitted => ArenaError::MoveAlreadySubmitted,
            MatchError::InsufficientBetBalance { requested, available } => {
                msg!("Requested {} but bet balance is {}", requested, available);
                ArenaError::InsufficientBetBalance
            }
            MatchError::BalanceOverflow => ArenaError::Overflow,
        }
    }
}
