// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    convert::TryFrom,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
    sync::atomic::{AtomicU32, Ordering},
};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The width and height of the board.
pub const BOARD_SIZE: i8 = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("expected a file and a rank, got {0:?}")]
    InvalidLength(String),
    #[error("invalid file: {0}")]
    InvalidFile(char),
    #[error("invalid rank: {0}")]
    InvalidRank(char),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PieceParseError {
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

/// A square on the chessboard, addressed by row and column.
///
/// Row 0 is White's back rank and column 0 is the a-file. Squares off the board can be constructed freely; it is
/// up to whoever indexes the board to check [`Square::is_on_board`] first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square {
    row: i8,
    column: i8,
}

impl Square {
    pub const fn new(row: i8, column: i8) -> Square {
        Square { row, column }
    }

    pub const fn row(self) -> i8 {
        self.row
    }

    pub const fn column(self) -> i8 {
        self.column
    }

    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.column >= 0 && self.column < BOARD_SIZE
    }

    /// Returns the square `dr` rows and `dc` columns away from this one. The result may be off the board.
    pub const fn offset(self, dr: i8, dc: i8) -> Square {
        Square::new(self.row + dr, self.column + dc)
    }

    /// Returns the adjacent square in the given direction. The result may be off the board.
    pub const fn towards(self, dir: Direction) -> Square {
        let (dr, dc) = dir.as_vector();
        self.offset(dr, dc)
    }

    /// Row-major index of this square, for on-board squares only.
    pub(crate) fn index(self) -> usize {
        debug_assert!(self.is_on_board(), "square {} is off the board", self);
        (self.row * BOARD_SIZE + self.column) as usize
    }

    pub(crate) fn from_index(index: usize) -> Square {
        debug_assert!(index < 64);
        Square::new((index / 8) as i8, (index % 8) as i8)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(SquareParseError::InvalidLength(s.to_owned())),
        };

        let column = match file {
            'a'..='h' => (file as u8 - b'a') as i8,
            c => return Err(SquareParseError::InvalidFile(c)),
        };
        let row = match rank {
            '1'..='8' => (rank as u8 - b'1') as i8,
            c => return Err(SquareParseError::InvalidRank(c)),
        };

        Ok(Square::new(row, column))
    }
}

impl TryFrom<&str> for Square {
    type Error = SquareParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> String {
        square.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            let file = (b'a' + self.column as u8) as char;
            let rank = (b'1' + self.row as u8) as char;
            write!(f, "{}{}", file, rank)
        } else {
            write!(f, "({}, {})", self.row, self.column)
        }
    }
}

/// One of the two sides of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Player {
    pub const fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// The row delta of a single pawn step for this player. White advances towards increasing rows.
    pub const fn forward(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        write!(f, "{}", c)
    }
}

static NEXT_PIECE_ID: AtomicU32 = AtomicU32::new(0);

/// Stable identity of a piece, shared by every copy of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "#{}", _0)]
pub struct PieceId(u32);

impl PieceId {
    fn next() -> PieceId {
        PieceId(NEXT_PIECE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A chess piece. Pieces compare equal when they are copies of the same piece, regardless of kind, owner, or whether
/// the copy has seen the piece move; two pawns of the same color are still two different pieces.
#[derive(Copy, Clone, Debug)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    player: Player,
    has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, player: Player) -> Piece {
        Piece {
            id: PieceId::next(),
            kind,
            player,
            has_moved: false,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Whether this piece has made a move on the board. Only the board's own copy of a piece is kept up to date.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub(crate) fn mark_moved(&mut self) {
        self.has_moved = true;
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Piece) -> bool {
        self.id == other.id
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let player = if value.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let kind = match value.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(PieceParseError::InvalidChar(value)),
        };

        Ok(Piece::new(kind, player))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.kind.to_string();
        match self.player {
            Player::White => write!(f, "{}", c.to_ascii_uppercase()),
            Player::Black => write!(f, "{}", c),
        }
    }
}

/// A compass direction on the board, with north pointing from White's side towards Black's.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const LATERAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::NorthWest,
        Direction::SouthEast,
    ];

    /// The `(row, column)` step of this direction.
    pub const fn as_vector(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }

    pub const fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// Iterates over every square of the board in row-major order.
pub fn squares() -> impl DoubleEndedIterator<Item = Square> {
    (0..64).map(Square::from_index)
}
