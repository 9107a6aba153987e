//! Match record and settlement
//!
//! A [`Match`] holds both side records for one pair. Every mutation is
//! computed in full before anything is written, so a refused call leaves the
//! record untouched.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::PostResolution;
use crate::error::MatchError;
use crate::ledger::{deposit_error, payout_error, StakeLedger};
use crate::moves::{Move, Outcome, Role};
use crate::pairing::{PairKey, HIGH_SLOT, LOW_SLOT};
use crate::resolve;

/// One participant's portion of a match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    pub role: Role,
    pub mv: Move,
    pub bet_balance: u64,
}

/// Stake moved from loser to winner when a match resolves decisively
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeTransfer<Id> {
    pub from: Id,
    pub to: Id,
    pub amount: u64,
}

/// Result of resolving a completed move pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement<Id> {
    pub outcome: Outcome,
    pub first_move: Move,
    pub second_move: Move,
    /// `None` on a draw
    pub transfer: Option<StakeTransfer<Id>>,
}

/// What a successful `make_move` did
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReceipt<Id> {
    pub outcome: Outcome,
    /// Present only on the call that completed the move pair
    pub settlement: Option<Settlement<Id>>,
    /// The call arrived after resolution and was dropped
    pub ignored: bool,
}

/// State for one unordered pair of participants
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match<Id> {
    key: PairKey<Id>,
    started: bool,
    sides: [Side; 2],
    last_settlement: Option<Settlement<Id>>,
}

impl<Id: Clone + Ord> Match<Id> {
    pub fn new(key: PairKey<Id>) -> Self {
        Self {
            key,
            started: false,
            sides: [Side::default(); 2],
            last_settlement: None,
        }
    }

    /// Rebuild a record from stored parts (hosts that persist sides themselves).
    pub fn from_parts(key: PairKey<Id>, started: bool, sides: [Side; 2]) -> Self {
        Self {
            key,
            started,
            sides,
            last_settlement: None,
        }
    }

    pub fn key(&self) -> &PairKey<Id> {
        &self.key
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Both sides, low identity first
    pub fn sides(&self) -> &[Side; 2] {
        &self.sides
    }

    pub fn side(&self, id: &Id) -> Option<&Side> {
        self.key.slot_of(id).map(|slot| &self.sides[slot])
    }

    pub fn role_of(&self, id: &Id) -> Role {
        if !self.started {
            return Role::NoRole;
        }
        self.side(id).map(|side| side.role).unwrap_or_default()
    }

    pub fn bet_balance_of(&self, id: &Id) -> u64 {
        self.side(id).map(|side| side.bet_balance).unwrap_or(0)
    }

    pub fn last_settlement(&self) -> Option<&Settlement<Id>> {
        self.last_settlement.as_ref()
    }

    /// Identity holding `role`, once started
    pub fn player_with(&self, role: Role) -> Option<&Id> {
        if !self.started || role == Role::NoRole {
            return None;
        }
        self.slot_with(role).map(|slot| self.key.member(slot))
    }

    /// Outcome recomputed from the recorded moves
    pub fn outcome(&self) -> Outcome {
        match (self.slot_with(Role::FirstPlayer), self.slot_with(Role::SecondPlayer)) {
            (Some(first), Some(second)) if self.started => {
                resolve(self.sides[first].mv, self.sides[second].mv)
            }
            _ => Outcome::NotEnded,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.started && self.sides.iter().all(|side| side.mv.is_played())
    }

    /// Assign roles: `caller` opens as first player, the other side second.
    pub fn start(&mut self, caller: &Id) -> Result<(), MatchError> {
        if self.started {
            return Err(MatchError::AlreadyStarted);
        }
        let first = self.key.slot_of(caller).ok_or(MatchError::SelfPlay)?;
        let second = other_slot(first);

        self.sides[first].role = Role::FirstPlayer;
        self.sides[second].role = Role::SecondPlayer;
        self.started = true;
        Ok(())
    }

    /// Record `mv` for `caller` and settle if it completes the pair.
    pub fn submit_move(
        &mut self,
        caller: &Id,
        mv: Move,
        policy: PostResolution,
    ) -> Result<MoveReceipt<Id>, MatchError> {
        if !self.started {
            return Err(MatchError::NotStarted);
        }
        if !mv.is_played() {
            return Err(MatchError::InvalidMove);
        }
        let slot = self.key.slot_of(caller).ok_or(MatchError::SelfPlay)?;

        if self.is_resolved() {
            return match policy {
                PostResolution::Reject => Err(MatchError::AlreadyResolved),
                PostResolution::Ignore => Ok(MoveReceipt {
                    outcome: self.outcome(),
                    settlement: None,
                    ignored: true,
                }),
            };
        }
        if self.sides[slot].mv.is_played() {
            return Err(MatchError::MoveAlreadySubmitted);
        }

        let mut next = self.sides;
        next[slot].mv = mv;

        let settlement = if next.iter().all(|side| side.mv.is_played()) {
            Some(self.settle(&mut next)?)
        } else {
            None
        };

        self.sides = next;
        if settlement.is_some() {
            self.last_settlement = settlement.clone();
        }
        Ok(MoveReceipt {
            outcome: self.outcome(),
            settlement,
            ignored: false,
        })
    }

    /// Move `min(first, second)` stake from loser to winner inside `sides`.
    fn settle(&self, sides: &mut [Side; 2]) -> Result<Settlement<Id>, MatchError> {
        let first = self.slot_with(Role::FirstPlayer).ok_or(MatchError::NotStarted)?;
        let second = other_slot(first);
        let outcome = resolve(sides[first].mv, sides[second].mv);

        let winner = match outcome.winner() {
            Some(Role::FirstPlayer) => Some(first),
            Some(Role::SecondPlayer) => Some(second),
            _ => None,
        };

        let transfer = match winner {
            Some(winner) => {
                let loser = other_slot(winner);
                let amount = sides[first].bet_balance.min(sides[second].bet_balance);
                let won = sides[winner]
                    .bet_balance
                    .checked_add(amount)
                    .ok_or(MatchError::BalanceOverflow)?;
                let lost = sides[loser]
                    .bet_balance
                    .checked_sub(amount)
                    .ok_or(MatchError::BalanceOverflow)?;
                sides[winner].bet_balance = won;
                sides[loser].bet_balance = lost;
                Some(StakeTransfer {
                    from: self.key.member(loser).clone(),
                    to: self.key.member(winner).clone(),
                    amount,
                })
            }
            None => None,
        };

        Ok(Settlement {
            outcome,
            first_move: sides[first].mv,
            second_move: sides[second].mv,
            transfer,
        })
    }

    /// Pull `amount` from `caller` into `custody` and credit the caller's side.
    ///
    /// Refused before the ledger is called if the pair's combined stake would
    /// no longer fit in a `u64`, so settlement can always credit the winner.
    /// The balance is written only after the ledger accepts the transfer.
    pub fn deposit<L: StakeLedger<Id>>(
        &mut self,
        caller: &Id,
        custody: &Id,
        amount: u64,
        cap: Option<u64>,
        ledger: &mut L,
    ) -> Result<u64, MatchError>
    where
        Id: core::fmt::Debug,
    {
        let slot = self.key.slot_of(caller).ok_or(MatchError::SelfPlay)?;
        let balance = credit(self.sides[slot].bet_balance, amount, cap)?;
        balance
            .checked_add(self.sides[other_slot(slot)].bet_balance)
            .ok_or(MatchError::BalanceOverflow)?;

        if let Err(failure) = ledger.transfer_from(caller, custody, amount) {
            let err = deposit_error(&failure);
            warn!(player = ?caller, amount, reason = %failure, code = err.code(), "deposit refused by ledger");
            return Err(err);
        }

        self.sides[slot].bet_balance = balance;
        Ok(balance)
    }

    /// Pay `amount` of the caller's bet balance out through `ledger`.
    pub fn payout<L: StakeLedger<Id>>(
        &mut self,
        caller: &Id,
        amount: u64,
        ledger: &mut L,
    ) -> Result<u64, MatchError>
    where
        Id: core::fmt::Debug,
    {
        let slot = self.key.slot_of(caller).ok_or(MatchError::SelfPlay)?;
        let balance = debit(self.sides[slot].bet_balance, amount)?;

        if let Err(failure) = ledger.transfer(caller, amount) {
            warn!(player = ?caller, amount, reason = %failure, "payout refused by ledger");
            return Err(payout_error(failure));
        }

        self.sides[slot].bet_balance = balance;
        Ok(balance)
    }

    fn slot_with(&self, role: Role) -> Option<usize> {
        [LOW_SLOT, HIGH_SLOT]
            .into_iter()
            .find(|slot| self.sides[*slot].role == role)
    }
}

fn other_slot(slot: usize) -> usize {
    if slot == LOW_SLOT {
        HIGH_SLOT
    } else {
        LOW_SLOT
    }
}

/// Balance after depositing `amount`, refusing overflow and the optional cap.
pub fn credit(balance: u64, amount: u64, cap: Option<u64>) -> Result<u64, MatchError> {
    let next = balance.checked_add(amount).ok_or(MatchError::BalanceOverflow)?;
    match cap {
        Some(cap) if next > cap => Err(MatchError::BalanceOverflow),
        _ => Ok(next),
    }
}

/// Balance after withdrawing `amount`; never wraps.
pub fn debit(balance: u64, amount: u64) -> Result<u64, MatchError> {
    balance
        .checked_sub(amount)
        .ok_or(MatchError::InsufficientBetBalance {
            requested: amount,
            available: balance,
        })
}
