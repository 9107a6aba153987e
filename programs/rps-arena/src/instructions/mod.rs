//! Instruction handlers

use anchor_lang::prelude::*;

use crate::state::{pair_high, pair_low, MatchAccount, MATCH_SEED};

pub mod game;
pub mod stake;

/// Accounts shared by every match instruction: the signer, and the match
/// account for the signer and `opponent`, created on first use.
#[derive(Accounts)]
#[instruction(opponent: Pubkey)]
pub struct PlayMatch<'info> {
    #[account(
        init_if_needed,
        payer = player,
        space = MatchAccount::LEN,
        seeds = [
            MATCH_SEED,
            pair_low(&player.key(), &opponent).as_ref(),
            pair_high(&player.key(), &opponent).as_ref(),
        ],
        bump
    )]
    pub match_account: Account<'info, MatchAccount>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}
