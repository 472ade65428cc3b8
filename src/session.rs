// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Headless selection logic for an interactive board: the first click picks up a piece and highlights where it can
//! go, the second click puts it down.

use crate::board::{Board, BoardError, MoveOutcome};
use crate::core::{Square, SquareSet};
use crate::movegen;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A piece of the player to move was selected; `targets` are its available moves.
    Selected { square: Square, targets: SquareSet },
    /// The selected piece was moved onto one of its targets.
    Moved {
        from: Square,
        to: Square,
        outcome: MoveOutcome,
    },
    /// The click did not land on a target or on a piece of the player to move.
    Cleared,
}

#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    selected: Option<Square>,
    targets: SquareSet,
}

impl Session {
    pub fn new(board: Board) -> Session {
        Session {
            board,
            selected: None,
            targets: SquareSet::empty(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the board. Any selection is dropped since it may no longer be valid.
    pub fn board_mut(&mut self) -> &mut Board {
        self.clear_selection();
        &mut self.board
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn targets(&self) -> SquareSet {
        self.targets
    }

    pub fn reset(&mut self, board: Board) {
        self.board = board;
        self.clear_selection();
    }

    /// Handles a click on `square`, which must be on the board.
    pub fn click(&mut self, square: Square) -> Result<ClickOutcome, BoardError> {
        if let Some(from) = self.selected.filter(|_| self.targets.contains(square)) {
            if let Some(&piece) = self.board.get_piece(from) {
                let outcome = piece.move_to(&mut self.board, square)?;
                tracing::debug!(%from, to = %square, applied = outcome.is_applied(), "moved selected piece");
                self.clear_selection();
                return Ok(ClickOutcome::Moved {
                    from,
                    to: square,
                    outcome,
                });
            }
        }

        match self.board.get_piece(square) {
            Some(piece) if piece.player() == self.board.current_player() => {
                let targets = movegen::available_moves(&self.board, square);
                tracing::debug!(%square, targets = targets.len(), "selected piece");
                self.selected = Some(square);
                self.targets = targets;
                Ok(ClickOutcome::Selected { square, targets })
            }
            _ => {
                if self.selected.is_some() {
                    tracing::debug!(%square, "cleared selection");
                }
                self.clear_selection();
                Ok(ClickOutcome::Cleared)
            }
        }
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.targets = SquareSet::empty();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Board::at_starting_position())
    }
}
