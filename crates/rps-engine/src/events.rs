//! Journal of successful match mutations

use serde::{Deserialize, Serialize};

use crate::game::Settlement;

/// One successful state change. Refused calls never produce an event.
///
/// Moves are not journaled until the pair resolves; `MoveSubmitted` only
/// says that a side has committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchEvent<Id> {
    Started {
        first: Id,
        second: Id,
    },
    BetPlaced {
        player: Id,
        opponent: Id,
        amount: u64,
        balance: u64,
    },
    MoveSubmitted {
        player: Id,
        opponent: Id,
    },
    Settled {
        first: Id,
        second: Id,
        settlement: Settlement<Id>,
    },
    Withdrawn {
        player: Id,
        opponent: Id,
        amount: u64,
        balance: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::StakeTransfer;
    use crate::moves::{Move, Outcome};

    #[test]
    fn test_tagged_json() {
        let event = MatchEvent::BetPlaced {
            player: "alice".to_string(),
            opponent: "bob".to_string(),
            amount: 100,
            balance: 100,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "bet_placed");
        assert_eq!(json["amount"], 100);
    }

    #[test]
    fn test_settled_roundtrip() {
        let event = MatchEvent::Settled {
            first: 1u32,
            second: 2u32,
            settlement: Settlement {
                outcome: Outcome::FirstPlayerWin,
                first_move: Move::Paper,
                second_move: Move::Rock,
                transfer: Some(StakeTransfer { from: 2, to: 1, amount: 40 }),
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: MatchEvent<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
