// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Random games, played by picking uniformly among the pieces that can move and then among their moves.

use rand::{seq::SliceRandom, Rng};

use crate::board::{Board, BoardError};
use crate::core::{Piece, Square, SquareSet};
use crate::movegen;

#[derive(Clone, Debug)]
pub struct Playout {
    pub board: Board,
    pub moves: Vec<(Square, Square)>,
}

/// Every piece of the player to move that has at least one available move, with those moves.
pub fn movable_pieces(board: &Board) -> Vec<(Piece, SquareSet)> {
    let us = board.current_player();
    board
        .pieces()
        .filter(|(_, piece)| piece.player() == us)
        .map(|(square, piece)| (*piece, movegen::available_moves(board, square)))
        .filter(|(_, moves)| !moves.is_empty())
        .collect()
}

/// Plays up to `plies` random moves from `board`. The game stops early if the player to move has nothing to move;
/// capturing a king does not end it.
pub fn play_random_game<R: Rng + ?Sized>(
    mut board: Board,
    plies: u32,
    rng: &mut R,
) -> Result<Playout, BoardError> {
    let _span = tracing::info_span!("playout", plies).entered();
    let mut moves = Vec::new();
    for ply in 0..plies {
        let candidates = movable_pieces(&board);
        let (piece, targets) = match candidates.choose(rng) {
            Some(choice) => *choice,
            None => {
                tracing::info!(ply, player = %board.current_player(), "no pieces can move");
                break;
            }
        };

        let targets: Vec<Square> = targets.into_iter().collect();
        let to = match targets.choose(rng) {
            Some(&to) => to,
            None => break,
        };
        let from = board.find_piece(piece.id())?;
        let outcome = piece.move_to(&mut board, to)?;
        debug_assert!(outcome.is_applied());
        tracing::debug!(ply, %from, %to, "played");
        moves.push((from, to));
    }

    Ok(Playout { board, moves })
}
