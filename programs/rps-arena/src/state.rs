//! Account state definitions

use anchor_lang::prelude::*;
use rps_engine::{canonical_order, Match, Move, PairKey, Role, Side};

use crate::error::ArenaError;

/// PDA seed prefix for match accounts
pub const MATCH_SEED: &[u8] = b"match";

/// One side of a match as stored on-chain
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SideState {
    /// Role index (0 = none, 1 = first, 2 = second)
    pub role: u8,
    /// Move index (0 = none, 1 = rock, 2 = paper, 3 = scissors)
    pub mv: u8,
    /// Lamports staked by this side
    pub bet_balance: u64,
}

/// Match between two players, keyed by the ordered pair
#[account]
#[derive(Default)]
pub struct MatchAccount {
    /// Lower key first
    pub players: [Pubkey; 2],
    pub started: bool,
    /// Indexed like `players`
    pub sides: [SideState; 2],
    /// PDA bump seed
    pub bump: u8,
}

impl MatchAccount {
    pub const LEN: usize = 8 + // discriminator
        64 +  // players
        1 +   // started
        20 +  // sides (2 x role, mv, bet_balance)
        1 +   // bump
        16;   // padding

    /// Decode into the core record for `player` vs `opponent`.
    pub fn load(&self, player: Pubkey, opponent: Pubkey) -> Result<Match<Pubkey>> {
        let key = PairKey::new(player, opponent).ok_or(ArenaError::SelfPlay)?;
        let sides = [decode_side(&self.sides[0])?, decode_side(&self.sides[1])?];
        Ok(Match::from_parts(key, self.started, sides))
    }

    /// Write the core record back, keeping the canonical player order.
    pub fn store(&mut self, game: &Match<Pubkey>, bump: u8) {
        self.players = [*game.key().low(), *game.key().high()];
        self.started = game.started();
        for (stored, side) in self.sides.iter_mut().zip(game.sides()) {
            *stored = SideState {
                role: side.role as u8,
                mv: side.mv as u8,
                bet_balance: side.bet_balance,
            };
        }
        self.bump = bump;
    }
}

/// Lower of the two keys, first seed component
pub fn pair_low(a: &Pubkey, b: &Pubkey) -> Pubkey {
    canonical_order(*a, *b).0
}

/// Higher of the two keys, second seed component
pub fn pair_high(a: &Pubkey, b: &Pubkey) -> Pubkey {
    canonical_order(*a, *b).1
}

fn decode_side(stored: &SideState) -> Result<Side> {
    let role = Role::from_index(stored.role).ok_or(ArenaError::CorruptMatch)?;
    let mv = Move::from_index(stored.mv).ok_or(ArenaError::CorruptMatch)?;
    Ok(Side {
        role,
        mv,
        bet_balance: stored.bet_balance,
    })
}
