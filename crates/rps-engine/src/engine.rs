//! Match engine: the owned store of all matches plus the stake ledger
//!
//! Every operation is addressed by `(caller, opponent)`. Both orderings of
//! a pair reach the same [`Match`] through its [`PairKey`].
//!
//! Ledger calls happen before any write, and a record is only written once
//! the ledger has accepted the transfer. Mutating operations take
//! `&mut self` and the engine owns its ledger, so a ledger cannot reach back
//! into the engine while one of its calls is outstanding.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::MatchError;
use crate::events::MatchEvent;
use crate::game::{Match, MoveReceipt};
use crate::ledger::StakeLedger;
use crate::moves::{Move, Outcome, Role};
use crate::pairing::PairKey;

/// Caller-perspective snapshot of one match
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchView<Id> {
    pub player: Id,
    pub opponent: Id,
    pub started: bool,
    pub role: Role,
    pub opponent_role: Role,
    pub own_move: Move,
    /// Hidden until both moves are in
    pub opponent_move: Option<Move>,
    pub opponent_has_moved: bool,
    pub bet_balance: u64,
    pub opponent_bet_balance: u64,
    pub outcome: Outcome,
}

pub struct MatchEngine<Id, L> {
    /// Account the ledger credits deposits to
    custody: Id,
    ledger: L,
    config: EngineConfig,
    matches: HashMap<PairKey<Id>, Match<Id>>,
    events: Vec<MatchEvent<Id>>,
}

impl<Id, L> MatchEngine<Id, L>
where
    Id: Clone + Ord + Hash + Debug,
    L: StakeLedger<Id>,
{
    pub fn new(custody: Id, ledger: L) -> Self {
        Self::with_config(custody, ledger, EngineConfig::standard())
    }

    pub fn with_config(custody: Id, ledger: L, config: EngineConfig) -> Self {
        Self {
            custody,
            ledger,
            config,
            matches: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    // ── Pairing ──────────────────────────────────────────────────────

    /// Open the match: `caller` becomes first player, `opponent` second.
    pub fn start_game(&mut self, caller: &Id, opponent: &Id) -> Result<(), MatchError> {
        let key = pair(caller, opponent)?;
        let game = self.record_mut(key);
        game.start(caller)?;

        info!(first = ?caller, second = ?opponent, "match started");
        self.journal(MatchEvent::Started {
            first: caller.clone(),
            second: opponent.clone(),
        });
        Ok(())
    }

    /// `caller`'s role against `opponent`; `NoRole` until started.
    pub fn role(&self, caller: &Id, opponent: &Id) -> Role {
        self.lookup(caller, opponent)
            .map(|game| game.role_of(caller))
            .unwrap_or_default()
    }

    // ── Stakes ───────────────────────────────────────────────────────

    /// Deposit `amount` from `caller` into custody and credit it to the
    /// caller's side of the match. The match need not be started.
    pub fn bet(&mut self, caller: &Id, opponent: &Id, amount: u64) -> Result<(), MatchError> {
        let key = pair(caller, opponent)?;
        let mut game = self.snapshot(&key);
        let balance = game.deposit(
            caller,
            &self.custody,
            amount,
            self.config.max_bet_balance,
            &mut self.ledger,
        )?;
        self.matches.insert(key, game);

        info!(player = ?caller, opponent = ?opponent, amount, balance, "bet placed");
        self.journal(MatchEvent::BetPlaced {
            player: caller.clone(),
            opponent: opponent.clone(),
            amount,
            balance,
        });
        Ok(())
    }

    /// Pay `amount` of `caller`'s bet balance back out through the ledger.
    pub fn withdraw(&mut self, caller: &Id, opponent: &Id, amount: u64) -> Result<(), MatchError> {
        let key = pair(caller, opponent)?;
        let mut game = self.snapshot(&key);
        let balance = game.payout(caller, amount, &mut self.ledger)?;
        self.matches.insert(key, game);

        info!(player = ?caller, opponent = ?opponent, amount, balance, "stake withdrawn");
        self.journal(MatchEvent::Withdrawn {
            player: caller.clone(),
            opponent: opponent.clone(),
            amount,
            balance,
        });
        Ok(())
    }

    pub fn bet_balance(&self, caller: &Id, opponent: &Id) -> u64 {
        self.lookup(caller, opponent)
            .map(|game| game.bet_balance_of(caller))
            .unwrap_or(0)
    }

    // ── Moves ────────────────────────────────────────────────────────

    /// Submit `caller`'s move. Completing the pair resolves and settles it.
    pub fn make_move(
        &mut self,
        caller: &Id,
        opponent: &Id,
        mv: Move,
    ) -> Result<MoveReceipt<Id>, MatchError> {
        let key = pair(caller, opponent)?;
        let policy = self.config.post_resolution;
        let game = self.matches.get_mut(&key).ok_or(MatchError::NotStarted)?;
        let receipt = game.submit_move(caller, mv, policy)?;

        if receipt.ignored {
            debug!(player = ?caller, "move after resolution ignored");
            return Ok(receipt);
        }

        info!(player = ?caller, opponent = ?opponent, "move submitted");
        self.journal(MatchEvent::MoveSubmitted {
            player: caller.clone(),
            opponent: opponent.clone(),
        });

        if let Some(settlement) = &receipt.settlement {
            let (first, second) = match self.matches.get(&key) {
                Some(game) => (
                    game.player_with(Role::FirstPlayer).cloned(),
                    game.player_with(Role::SecondPlayer).cloned(),
                ),
                None => (None, None),
            };
            info!(
                outcome = ?settlement.outcome,
                stake = settlement.transfer.as_ref().map(|t| t.amount).unwrap_or(0),
                "match resolved"
            );
            if let (Some(first), Some(second)) = (first, second) {
                self.journal(MatchEvent::Settled {
                    first,
                    second,
                    settlement: settlement.clone(),
                });
            }
        }
        Ok(receipt)
    }

    /// Outcome recomputed from the stored moves.
    pub fn result(&self, caller: &Id, opponent: &Id) -> Outcome {
        self.lookup(caller, opponent)
            .map(Match::outcome)
            .unwrap_or_default()
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn match_view(&self, caller: &Id, opponent: &Id) -> Option<MatchView<Id>> {
        let game = self.lookup(caller, opponent)?;
        let own = game.side(caller)?;
        let theirs = game.side(opponent)?;
        let outcome = game.outcome();

        Some(MatchView {
            player: caller.clone(),
            opponent: opponent.clone(),
            started: game.started(),
            role: game.role_of(caller),
            opponent_role: game.role_of(opponent),
            own_move: own.mv,
            opponent_move: outcome.is_final().then_some(theirs.mv),
            opponent_has_moved: theirs.mv.is_played(),
            bet_balance: own.bet_balance,
            opponent_bet_balance: theirs.bet_balance,
            outcome,
        })
    }

    /// Sum of every side's bet balance; equals what the ledger holds for us.
    pub fn custody_total(&self) -> u128 {
        self.matches
            .values()
            .flat_map(|game| game.sides().iter())
            .map(|side| side.bet_balance as u128)
            .sum()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn events(&self) -> &[MatchEvent<Id>] {
        &self.events
    }

    // ── Internals ────────────────────────────────────────────────────

    fn lookup(&self, caller: &Id, opponent: &Id) -> Option<&Match<Id>> {
        let key = PairKey::new(caller.clone(), opponent.clone())?;
        self.matches.get(&key)
    }

    /// Working copy of a record; written back only when the operation succeeds.
    fn snapshot(&self, key: &PairKey<Id>) -> Match<Id> {
        self.matches
            .get(key)
            .cloned()
            .unwrap_or_else(|| Match::new(key.clone()))
    }

    fn record_mut(&mut self, key: PairKey<Id>) -> &mut Match<Id> {
        self.matches.entry(key).or_insert_with_key(|key| {
            debug!(low = ?key.low(), high = ?key.high(), "match record created");
            Match::new(key.clone())
        })
    }

    fn journal(&mut self, event: MatchEvent<Id>) {
        if self.config.record_events {
            self.events.push(event);
        }
    }
}

impl<Id: Serialize, L> MatchEngine<Id, L> {
    /// Export the journal as a JSON array.
    pub fn events_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.events)
    }
}

fn pair<Id: Clone + Ord>(caller: &Id, opponent: &Id) -> Result<PairKey<Id>, MatchError> {
    PairKey::new(caller.clone(), opponent.clone()).ok_or(MatchError::SelfPlay)
}
