//! RPS Arena - staked rock-paper-scissors
//!
//! A Solana program hosting the match engine: each pair of players shares
//! one match account, stakes lamports into it, and settles the smaller stake
//! to the winner once both moves are in.

use anchor_lang::prelude::*;

mod error;
mod instructions;
mod ledger;
mod state;

use instructions::*;
pub use state::{MatchAccount, SideState};

declare_id!("2G2fXmNKVMD2HkZtUc64btpHFDGVdcx8FeKk6VXVVain");

#[program]
pub mod rps_arena {
    use super::*;

    /// Open the match against `opponent`; the signer plays first
    pub fn start_game(ctx: Context<PlayMatch>, opponent: Pubkey) -> Result<()> {
        instructions::game::start_game(ctx, opponent)
    }

    /// Stake lamports into the match account
    pub fn bet(ctx: Context<PlayMatch>, opponent: Pubkey, amount: u64) -> Result<()> {
        instructions::stake::bet(ctx, opponent, amount)
    }

    /// Submit a move (1 = Rock, 2 = Paper, 3 = Scissors)
    pub fn make_move(ctx: Context<PlayMatch>, opponent: Pubkey, mv: u8) -> Result<()> {
        instructions::game::make_move(ctx, opponent, mv)
    }

    /// Withdraw lamports from the signer's bet balance
    pub fn withdraw(ctx: Context<PlayMatch>, opponent: Pubkey, amount: u64) -> Result<()> {
        instructions::stake::withdraw(ctx, opponent, amount)
    }
}
