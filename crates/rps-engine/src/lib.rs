//! Match Engine for RPS Arena
//!
//! Two participants pair off, stake tokens, each submit one move, and the
//! engine resolves the round and settles the smaller stake from loser to
//! winner. Value movement is delegated to a [`StakeLedger`].
//! This crate is used:
//! - In-process, through [`MatchEngine`] and any ledger implementation
//! - On-chain, where the arena program drives [`Match`] records directly

mod config;
mod engine;
mod error;
mod events;
mod game;
mod ledger;
mod moves;
mod pairing;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{EngineConfig, PostResolution};
pub use engine::{MatchEngine, MatchView};
pub use error::MatchError;
pub use events::MatchEvent;
pub use game::{credit, debit, Match, MoveReceipt, Settlement, Side, StakeTransfer};
pub use ledger::{
    classify_deposit_failure, deposit_error, payout_error, DepositFailure, StakeLedger,
    TransferFailure, DEPOSIT_FAILURE_TABLE,
};
pub use moves::{Move, Outcome, Role};
pub use pairing::{canonical_order, PairKey, HIGH_SLOT, LOW_SLOT};

/// Resolve a round from the first and second player's moves
pub fn resolve(first: Move, second: Move) -> Outcome {
    if !first.is_played() || !second.is_played() {
        return Outcome::NotEnded;
    }
    if first == second {
        Outcome::Draw
    } else if first.beats(second) {
        Outcome::FirstPlayerWin
    } else {
        Outcome::SecondPlayerWin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_matrix() {
        assert_eq!(resolve(Move::Rock, Move::Rock), Outcome::Draw);
        assert_eq!(resolve(Move::Rock, Move::Paper), Outcome::SecondPlayerWin);
        assert_eq!(resolve(Move::Rock, Move::Scissors), Outcome::FirstPlayerWin);
        assert_eq!(resolve(Move::Paper, Move::Rock), Outcome::FirstPlayerWin);
        assert_eq!(resolve(Move::Paper, Move::Paper), Outcome::Draw);
        assert_eq!(resolve(Move::Paper, Move::Scissors), Outcome::SecondPlayerWin);
        assert_eq!(resolve(Move::Scissors, Move::Rock), Outcome::SecondPlayerWin);
        assert_eq!(resolve(Move::Scissors, Move::Paper), Outcome::FirstPlayerWin);
        assert_eq!(resolve(Move::Scissors, Move::Scissors), Outcome::Draw);
    }

    #[test]
    fn test_single_mover_not_ended() {
        for mv in [Move::Rock, Move::Paper, Move::Scissors] {
            assert_eq!(resolve(mv, Move::NoMove), Outcome::NotEnded);
            assert_eq!(resolve(Move::NoMove, mv), Outcome::NotEnded);
        }
        assert_eq!(resolve(Move::NoMove, Move::NoMove), Outcome::NotEnded);
    }
}
