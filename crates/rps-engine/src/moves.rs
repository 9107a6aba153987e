//! Moves, roles and outcomes

use serde::{Deserialize, Serialize};

/// A move in rock-paper-scissors
///
/// `NoMove` doubles as the "not yet moved" sentinel and is never a valid
/// submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Move {
    #[default]
    NoMove = 0,
    Rock = 1,
    Paper = 2,
    Scissors = 3,
}

impl Move {
    /// Map a wire index (0–3) to the corresponding move.
    pub fn from_index(index: u8) -> Option<Move> {
        match index {
            0 => Some(Move::NoMove),
            1 => Some(Move::Rock),
            2 => Some(Move::Paper),
            3 => Some(Move::Scissors),
            _ => None,
        }
    }

    pub fn is_played(self) -> bool {
        self != Move::NoMove
    }

    /// Rock beats Scissors, Scissors beats Paper, Paper beats Rock
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Scissors, Move::Paper)
                | (Move::Paper, Move::Rock)
        )
    }
}

/// Role of one side within a started match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Role {
    #[default]
    NoRole = 0,
    FirstPlayer = 1,
    SecondPlayer = 2,
}

impl Role {
    pub fn from_index(index: u8) -> Option<Role> {
        match index {
            0 => Some(Role::NoRole),
            1 => Some(Role::FirstPlayer),
            2 => Some(Role::SecondPlayer),
            _ => None,
        }
    }
}

/// Outcome of a match, derived from the two recorded moves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Outcome {
    #[default]
    NotEnded = 0,
    FirstPlayerWin = 1,
    SecondPlayerWin = 2,
    Draw = 3,
}

impl Outcome {
    pub fn from_index(index: u8) -> Option<Outcome> {
        match index {
            0 => Some(Outcome::NotEnded),
            1 => Some(Outcome::FirstPlayerWin),
            2 => Some(Outcome::SecondPlayerWin),
            3 => Some(Outcome::Draw),
            _ => None,
        }
    }

    /// Role of the winning side, if any
    pub fn winner(self) -> Option<Role> {
        match self {
            Outcome::FirstPlayerWin => Some(Role::FirstPlayer),
            Outcome::SecondPlayerWin => Some(Role::SecondPlayer),
            Outcome::NotEnded | Outcome::Draw => None,
        }
    }

    pub fn is_final(self) -> bool {
        self != Outcome::NotEnded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYED: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    #[test]
    fn test_move_index_roundtrip() {
        for index in 0..=3u8 {
            let mv = Move::from_index(index).unwrap();
            assert_eq!(mv as u8, index);
        }
        assert_eq!(Move::from_index(4), None);
        assert_eq!(Move::from_index(u8::MAX), None);
    }

    #[test]
    fn test_role_and_outcome_indices() {
        assert_eq!(Role::from_index(1), Some(Role::FirstPlayer));
        assert_eq!(Role::from_index(3), None);
        assert_eq!(Outcome::from_index(3), Some(Outcome::Draw));
        assert_eq!(Outcome::from_index(4), None);
    }

    #[test]
    fn test_beats_is_a_cycle() {
        for a in PLAYED {
            // exactly one move beats `a`, exactly one is beaten by it
            assert_eq!(PLAYED.iter().filter(|b| b.beats(a)).count(), 1);
            assert_eq!(PLAYED.iter().filter(|b| a.beats(**b)).count(), 1);
            assert!(!a.beats(a));
            assert!(!a.beats(Move::NoMove));
            assert!(!Move::NoMove.beats(a));
        }
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(Outcome::FirstPlayerWin.winner(), Some(Role::FirstPlayer));
        assert_eq!(Outcome::SecondPlayerWin.winner(), Some(Role::SecondPlayer));
        assert_eq!(Outcome::Draw.winner(), None);
        assert!(!Outcome::NotEnded.is_final());
        assert!(Outcome::Draw.is_final());
    }
}
