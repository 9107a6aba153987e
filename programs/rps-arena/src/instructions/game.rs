//! Match lifecycle instructions

use anchor_lang::prelude::*;
use rps_engine::{Move, PostResolution};

use super::PlayMatch;
use crate::error::ArenaError;

/// Open the match; the signer becomes the first player
pub fn start_game(ctx: Context<PlayMatch>, opponent: Pubkey) -> Result<()> {
    let player = ctx.accounts.player.key();
    let bump = ctx.bumps.match_account;
    let match_account = &mut ctx.accounts.match_account;

    let mut game = match_account.load(player, opponent)?;
    game.start(&player).map_err(ArenaError::from)?;
    match_account.store(&game, bump);

    msg!("Match {} started: {} vs {}", match_account.key(), player, opponent);

    Ok(())
}

/// Record the signer's move; settles the stakes when it completes the pair
pub fn make_move(ctx: Context<PlayMatch>, opponent: Pubkey, mv: u8) -> Result<()> {
    let player = ctx.accounts.player.key();
    let bump = ctx.bumps.match_account;
    let match_account = &mut ctx.accounts.match_account;

    let mut game = match_account.load(player, opponent)?;
    // Out-of-range indices fall through to the core's own move check
    let mv = Move::from_index(mv).unwrap_or(Move::NoMove);
    let receipt = game
        .submit_move(&player, mv, PostResolution::Reject)
        .map_err(ArenaError::from)?;
    match_account.store(&game, bump);

    match receipt.settlement {
        Some(settlement) => {
            msg!(
                "Match {} resolved: {:?} ({:?} vs {:?})",
                match_account.key(),
                settlement.outcome,
                settlement.first_move,
                settlement.second_move,
            );
            if let Some(transfer) = settlement.transfer {
                msg!("{} lamports of stake moved {} -> {}", transfer.amount, transfer.from, transfer.to);
            }
        }
        None => msg!("Player {} committed a move", player),
    }

    Ok(())
}
