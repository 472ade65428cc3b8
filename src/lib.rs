// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `chessington` answers two questions about a chess position: where can this piece go, and what does the board look
//! like after it goes there.
//!
//! The rules are deliberately small. Pieces move by their usual geometry, sliding pieces stop at the first piece in
//! their way, and pawns step once or twice forward and capture diagonally. There is no check detection, castling,
//! en-passant, or promotion, and the board only refuses a move when the piece being moved does not belong to the
//! player whose turn it is.

pub mod board;
pub mod core;
pub mod logging;
pub mod movegen;
pub mod playout;
pub mod protocol;
pub mod session;
pub mod view;

pub use board::Board;
