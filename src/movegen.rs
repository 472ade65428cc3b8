// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Candidate move generation. Moves are pseudo-legal in the loosest sense: nothing here knows about check, and
//! there is no castling, en-passant, or promotion.

use crate::board::{Board, BoardError, MoveOutcome};
use crate::core::*;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-2, 1),
    (-2, -1),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Returns every square the piece standing on `from` may move to. An empty square has no moves.
pub fn available_moves(board: &Board, from: Square) -> SquareSet {
    let piece = match board.get_piece(from) {
        Some(piece) => piece,
        None => return SquareSet::empty(),
    };

    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, from, piece),
        PieceKind::Knight => step_moves(board, from, piece.player(), &KNIGHT_OFFSETS),
        PieceKind::King => step_moves(board, from, piece.player(), &KING_OFFSETS),
        PieceKind::Bishop => slide_moves(board, from, piece.player(), &Direction::DIAGONAL),
        PieceKind::Rook => slide_moves(board, from, piece.player(), &Direction::LATERAL),
        PieceKind::Queen => {
            slide_moves(board, from, piece.player(), &Direction::DIAGONAL)
                | slide_moves(board, from, piece.player(), &Direction::LATERAL)
        }
    }
}

fn pawn_moves(board: &Board, from: Square, pawn: &Piece) -> SquareSet {
    let us = pawn.player();
    let up = us.forward();
    let mut moves = SquareSet::empty();

    // Pushes, which never capture.
    let single = from.offset(up, 0);
    if is_empty(board, single) {
        moves.insert(single);
        let double = from.offset(2 * up, 0);
        if !pawn.has_moved() && is_empty(board, double) {
            moves.insert(double);
        }
    }

    // Diagonals, which only capture.
    for dc in [1, -1] {
        let target = from.offset(up, dc);
        if target.is_on_board() && holds_opponent(board, target, us) {
            moves.insert(target);
        }
    }

    moves
}

/// Moves for pieces that jump by fixed offsets: the destination must be on the board and not hold a friendly piece.
fn step_moves(board: &Board, from: Square, us: Player, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&target| is_free_or_capturable(board, target, us))
        .collect()
}

fn slide_moves(board: &Board, from: Square, us: Player, directions: &[Direction]) -> SquareSet {
    directions
        .iter()
        .fold(SquareSet::empty(), |moves, &dir| moves | ray(board, from, us, dir))
}

/// Walks from `from` in direction `dir`, collecting empty squares until the edge of the board or the first
/// occupied square. An opponent's square ends the ray and is included; a friendly square ends it and is not.
pub fn ray(board: &Board, from: Square, us: Player, dir: Direction) -> SquareSet {
    let mut moves = SquareSet::empty();
    let mut next = from.towards(dir);
    while next.is_on_board() {
        match board.get_piece(next) {
            None => moves.insert(next),
            Some(piece) => {
                if piece.player() != us {
                    moves.insert(next);
                }
                break;
            }
        }

        next = next.towards(dir);
    }

    moves
}

fn is_empty(board: &Board, square: Square) -> bool {
    square.is_on_board() && board.get_piece(square).is_none()
}

fn holds_opponent(board: &Board, square: Square, us: Player) -> bool {
    board
        .get_piece(square)
        .map_or(false, |piece| piece.player() != us)
}

fn is_free_or_capturable(board: &Board, square: Square, us: Player) -> bool {
    square.is_on_board() && board.get_piece(square).map_or(true, |piece| piece.player() != us)
}

impl Piece {
    /// Gets every square this piece is allowed to move to, after locating it on the board.
    pub fn available_moves(&self, board: &Board) -> Result<SquareSet, BoardError> {
        let location = board.find_piece(self.id())?;
        Ok(available_moves(board, location))
    }

    /// Moves this piece to `destination`. The board decides whether the move happens; see [`Board::move_piece`].
    pub fn move_to(&self, board: &mut Board, destination: Square) -> Result<MoveOutcome, BoardError> {
        let location = board.find_piece(self.id())?;
        Ok(board.move_piece(location, destination))
    }
}
