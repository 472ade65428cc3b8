// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Serializable snapshots of a board, for renderers that live outside this crate.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{PieceKind, Player, Square, BOARD_SIZE};
use crate::session::Session;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub player: Player,
}

/// Everything needed to draw the board: which piece sits where, whose turn it is, and which squares are
/// highlighted. `rows[0]` is White's back rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub current_player: Player,
    pub rows: Vec<Vec<Option<PieceView>>>,
    pub selected: Option<Square>,
    pub targets: Vec<Square>,
}

impl BoardView {
    pub fn of_board(board: &Board) -> BoardView {
        let rows = (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|column| {
                        board
                            .get_piece(Square::new(row, column))
                            .map(|piece| PieceView {
                                kind: piece.kind(),
                                player: piece.player(),
                            })
                    })
                    .collect()
            })
            .collect();

        BoardView {
            current_player: board.current_player(),
            rows,
            selected: None,
            targets: vec![],
        }
    }

    pub fn of_session(session: &Session) -> BoardView {
        BoardView {
            selected: session.selected(),
            targets: session.targets().into_iter().collect(),
            ..BoardView::of_board(session.board())
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceView> {
        if !square.is_on_board() {
            return None;
        }

        self.rows[square.row() as usize][square.column() as usize]
    }
}
