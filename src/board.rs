// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    convert::TryFrom,
    fmt::{self, Write},
};

use derive_more::Display;
use thiserror::Error;

use crate::core::{self, Piece, PieceId, PieceKind, Player, Square, BOARD_SIZE};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("piece {0} is not on the board")]
    PieceNotOnBoard(PieceId),
}

/// Why [`Board::move_piece`] declined to move anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum RejectReason {
    #[display(fmt = "no piece on the source square")]
    EmptySource,
    #[display(fmt = "the piece on the source square belongs to {}", _0)]
    NotYourPiece(Player),
}

/// The result of asking the board to move a piece. A rejected move leaves the board exactly as it was.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied { captured: Option<Piece> },
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }
}

/// An 8x8 chessboard holding at most one piece per square, along with the player whose turn it is.
///
/// The board owns every piece placed on it. Placing a piece on an occupied square drops whatever was there, which is
/// also how captures happen.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    current_player: Player,
}

impl Board {
    /// A board with no pieces on it and White to move.
    pub fn empty() -> Board {
        Board {
            cells: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            current_player: Player::White,
        }
    }

    /// A board with the standard starting layout and White to move. White occupies rows 0 and 1.
    pub fn at_starting_position() -> Board {
        let mut board = Board::empty();
        for (column, &kind) in BACK_RANK.iter().enumerate() {
            let column = column as i8;
            board.set_piece(Square::new(0, column), Some(Piece::new(kind, Player::White)));
            board.set_piece(
                Square::new(1, column),
                Some(Piece::new(PieceKind::Pawn, Player::White)),
            );
            board.set_piece(
                Square::new(6, column),
                Some(Piece::new(PieceKind::Pawn, Player::Black)),
            );
            board.set_piece(Square::new(7, column), Some(Piece::new(kind, Player::Black)));
        }

        board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    /// Places a piece on the given square, or clears the square if `piece` is `None`.
    ///
    /// # Panics
    /// Panics if `square` is off the board.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        *self.cell_mut(square) = piece;
    }

    /// Retrieves the piece on the given square.
    ///
    /// # Panics
    /// Panics if `square` is off the board.
    pub fn get_piece(&self, square: Square) -> Option<&Piece> {
        self.cell(square).as_ref()
    }

    /// Searches the board for the given piece and returns its square.
    ///
    /// This is a linear scan over all 64 squares in row-major order, paid on every lookup.
    pub fn find_piece(&self, id: PieceId) -> Result<Square, BoardError> {
        self.pieces()
            .find(|(_, piece)| piece.id() == id)
            .map(|(square, _)| square)
            .ok_or(BoardError::PieceNotOnBoard(id))
    }

    /// Moves the piece on `from` to `to`, capturing anything on `to`, and passes the turn to the opponent.
    ///
    /// The only check made is that `from` holds a piece belonging to the player to move; nothing about the
    /// destination is validated. If the check fails the board is left untouched. Moving a piece onto its own square
    /// leaves it where it is, but still counts as its move.
    ///
    /// # Panics
    /// Panics if either square is off the board.
    pub fn move_piece(&mut self, from: Square, to: Square) -> MoveOutcome {
        assert!(to.is_on_board(), "square {} is off the board", to);
        let mut moving_piece = match *self.cell(from) {
            Some(piece) => piece,
            None => {
                tracing::trace!(%from, %to, "rejected move: empty source square");
                return MoveOutcome::Rejected(RejectReason::EmptySource);
            }
        };

        if moving_piece.player() != self.current_player {
            tracing::trace!(%from, %to, owner = %moving_piece.player(), "rejected move: not this player's turn");
            return MoveOutcome::Rejected(RejectReason::NotYourPiece(moving_piece.player()));
        }

        moving_piece.mark_moved();
        *self.cell_mut(from) = None;
        let captured = self.cell_mut(to).replace(moving_piece);
        tracing::debug!(
            %from,
            %to,
            piece = %moving_piece,
            player = %self.current_player,
            captured = captured.is_some(),
            "applied move"
        );
        self.current_player = self.current_player.opponent();
        MoveOutcome::Applied { captured }
    }

    /// Iterates over every occupied square and its piece, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        core::squares().filter_map(move |square| self.get_piece(square).map(|piece| (square, piece)))
    }

    fn cell(&self, square: Square) -> &Option<Piece> {
        assert!(square.is_on_board(), "square {} is off the board", square);
        &self.cells[square.row() as usize][square.column() as usize]
    }

    fn cell_mut(&mut self, square: Square) -> &mut Option<Piece> {
        assert!(square.is_on_board(), "square {} is off the board", square);
        &mut self.cells[square.row() as usize][square.column() as usize]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementParseError {
    #[error("unexpected char: {0}")]
    UnexpectedChar(char),
    #[error("unexpected end of placement string")]
    UnexpectedEnd,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("invalid digit")]
    InvalidDigit,
    #[error("row does not sum to 8")]
    RowDoesNotSumToEight,
    #[error("invalid side to move")]
    InvalidSideToMove,
}

impl Board {
    /// Constructs a board from the first two fields of a FEN string: the piece placement, listed from row 7 down to
    /// row 0, and the side to move. Any further FEN fields are ignored. Every parsed piece starts out unmoved.
    pub fn from_placement(placement: impl AsRef<str>) -> Result<Board, PlacementParseError> {
        use std::{iter::Peekable, str::Chars};

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream<'_>, expected: char) -> Result<(), PlacementParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(PlacementParseError::UnexpectedChar(c)),
                None => Err(PlacementParseError::UnexpectedEnd),
            }
        }

        fn peek(iter: &mut Stream<'_>) -> Result<char, PlacementParseError> {
            iter.peek().copied().ok_or(PlacementParseError::UnexpectedEnd)
        }

        let mut board = Board::empty();
        let iter = &mut placement.as_ref().chars().peekable();
        for row in (0..BOARD_SIZE).rev() {
            let mut column = 0;
            while column < BOARD_SIZE {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_ascii_digit() {
                    if !('1'..='8').contains(&c) {
                        return Err(PlacementParseError::InvalidDigit);
                    }

                    column += (c as u8 - b'0') as i8;
                    if column > BOARD_SIZE {
                        return Err(PlacementParseError::RowDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                if c == '/' || c == ' ' {
                    return Err(PlacementParseError::RowDoesNotSumToEight);
                }

                let piece = Piece::try_from(c).map_err(|_| PlacementParseError::UnknownPiece(c))?;
                board.set_piece(Square::new(row, column), Some(piece));
                iter.next();
                column += 1;
            }

            if row != 0 {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        board.current_player = match iter.next() {
            Some('w') => Player::White,
            Some('b') => Player::Black,
            Some(_) => return Err(PlacementParseError::InvalidSideToMove),
            None => return Err(PlacementParseError::UnexpectedEnd),
        };

        match iter.next() {
            None | Some(' ') => Ok(board),
            Some(c) => Err(PlacementParseError::UnexpectedChar(c)),
        }
    }

    pub fn as_placement(&self) -> String {
        let mut buf = String::new();
        for row in (0..BOARD_SIZE).rev() {
            let mut empty_squares = 0;
            for column in 0..BOARD_SIZE {
                if let Some(piece) = self.get_piece(Square::new(row, column)) {
                    if empty_squares != 0 {
                        let _ = write!(&mut buf, "{}", empty_squares);
                    }
                    let _ = write!(&mut buf, "{}", piece);
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                let _ = write!(&mut buf, "{}", empty_squares);
            }

            if row != 0 {
                buf.push('/');
            }
        }

        buf.push(' ');
        match self.current_player {
            Player::White => buf.push('w'),
            Player::Black => buf.push('b'),
        }
        buf
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            for column in 0..BOARD_SIZE {
                if let Some(piece) = self.get_piece(Square::new(row, column)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", row + 1)?;
        }

        for _ in 0..BOARD_SIZE {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for column in 0..BOARD_SIZE {
            write!(f, " {} ", (b'a' + column as u8) as char)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

#[cfg(test)]
mod tests {
    mod layout {
        use crate::board::Board;
        use crate::core::*;

        #[test]
        fn new_board_has_white_pieces_at_bottom() {
            let board = Board::at_starting_position();
            let piece = board.get_piece(Square::new(0, 0)).unwrap();
            assert_eq!(Player::White, piece.player());
            assert_eq!(PieceKind::Rook, piece.kind());
        }

        #[test]
        fn new_board_has_black_pieces_at_top() {
            let board = Board::at_starting_position();
            let piece = board.get_piece(Square::new(7, 0)).unwrap();
            assert_eq!(Player::Black, piece.player());
            assert_eq!(PieceKind::Rook, piece.kind());
        }

        #[test]
        fn starting_position() {
            let board = Board::at_starting_position();
            assert_eq!(Player::White, board.current_player());
            assert_eq!(32, board.pieces().count());
            assert_eq!(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
                board.as_placement()
            );

            let king = board.get_piece(Square::new(0, 4)).unwrap();
            assert_eq!(PieceKind::King, king.kind());
            let queen = board.get_piece(Square::new(7, 3)).unwrap();
            assert_eq!(PieceKind::Queen, queen.kind());
            assert_eq!(Player::Black, queen.player());
            for column in 0..8 {
                for row in 2..6 {
                    assert!(board.get_piece(Square::new(row, column)).is_none());
                }
            }
        }

        #[test]
        fn empty_board() {
            let board = Board::empty();
            assert_eq!(Player::White, board.current_player());
            assert_eq!(0, board.pieces().count());
        }

        #[test]
        #[should_panic(expected = "off the board")]
        fn get_piece_off_board_panics() {
            let board = Board::empty();
            board.get_piece(Square::new(8, 0));
        }

        #[test]
        #[should_panic(expected = "off the board")]
        fn set_piece_off_board_panics() {
            let mut board = Board::empty();
            board.set_piece(
                Square::new(0, -1),
                Some(Piece::new(PieceKind::King, Player::White)),
            );
        }
    }

    mod find {
        use crate::board::{Board, BoardError};
        use crate::core::*;

        #[test]
        fn finds_placed_piece() {
            let mut board = Board::empty();
            let rook = Piece::new(PieceKind::Rook, Player::Black);
            board.set_piece(Square::new(5, 2), Some(rook));
            assert_eq!(Ok(Square::new(5, 2)), board.find_piece(rook.id()));
        }

        #[test]
        fn distinguishes_identical_looking_pieces() {
            let mut board = Board::empty();
            let first = Piece::new(PieceKind::Pawn, Player::White);
            let second = Piece::new(PieceKind::Pawn, Player::White);
            board.set_piece(Square::new(1, 0), Some(first));
            board.set_piece(Square::new(1, 1), Some(second));
            assert_eq!(Ok(Square::new(1, 1)), board.find_piece(second.id()));
        }

        #[test]
        fn missing_piece() {
            let board = Board::at_starting_position();
            let stray = Piece::new(PieceKind::Queen, Player::White);
            assert_eq!(
                Err(BoardError::PieceNotOnBoard(stray.id())),
                board.find_piece(stray.id())
            );
        }

        #[test]
        fn overwritten_piece_is_gone() {
            let mut board = Board::empty();
            let knight = Piece::new(PieceKind::Knight, Player::White);
            board.set_piece(Square::new(3, 3), Some(knight));
            board.set_piece(Square::new(3, 3), None);
            assert!(board.find_piece(knight.id()).is_err());
        }
    }

    mod moves {
        use crate::board::{Board, MoveOutcome, RejectReason};
        use crate::core::*;

        #[test]
        fn pieces_can_be_moved_on_the_board() {
            let mut board = Board::at_starting_position();
            let from = Square::new(1, 0);
            let to = Square::new(3, 0);
            let piece = *board.get_piece(from).unwrap();

            let outcome = board.move_piece(from, to);

            assert_eq!(MoveOutcome::Applied { captured: None }, outcome);
            assert!(board.get_piece(from).is_none());
            assert_eq!(Some(&piece), board.get_piece(to));
            assert_eq!(Player::Black, board.current_player());
        }

        #[test]
        fn applied_move_marks_piece_moved() {
            let mut board = Board::at_starting_position();
            board.move_piece(Square::new(0, 1), Square::new(2, 2));
            assert!(board.get_piece(Square::new(2, 2)).unwrap().has_moved());
        }

        #[test]
        fn empty_source_is_rejected() {
            let mut board = Board::at_starting_position();
            let before = board.as_placement();
            let outcome = board.move_piece(Square::new(3, 3), Square::new(4, 3));
            assert_eq!(MoveOutcome::Rejected(RejectReason::EmptySource), outcome);
            assert_eq!(before, board.as_placement());
            assert_eq!(Player::White, board.current_player());
        }

        #[test]
        fn moving_opponent_piece_is_rejected() {
            let mut board = Board::at_starting_position();
            let before = board.as_placement();
            let outcome = board.move_piece(Square::new(6, 4), Square::new(4, 4));
            assert_eq!(
                MoveOutcome::Rejected(RejectReason::NotYourPiece(Player::Black)),
                outcome
            );
            assert_eq!(before, board.as_placement());
            assert_eq!(Player::White, board.current_player());
            assert!(!board.get_piece(Square::new(6, 4)).unwrap().has_moved());
        }

        #[test]
        fn capture_overwrites_destination() {
            let mut board = Board::empty();
            let rook = Piece::new(PieceKind::Rook, Player::White);
            let pawn = Piece::new(PieceKind::Pawn, Player::Black);
            board.set_piece(Square::new(0, 0), Some(rook));
            board.set_piece(Square::new(6, 0), Some(pawn));

            let outcome = board.move_piece(Square::new(0, 0), Square::new(6, 0));

            assert_eq!(MoveOutcome::Applied { captured: Some(pawn) }, outcome);
            assert_eq!(Some(&rook), board.get_piece(Square::new(6, 0)));
            assert!(board.find_piece(pawn.id()).is_err());
        }

        #[test]
        fn destination_is_not_validated() {
            // The board trusts its caller: a friendly piece on the destination is simply replaced.
            let mut board = Board::at_starting_position();
            let outcome = board.move_piece(Square::new(0, 0), Square::new(1, 0));
            assert!(outcome.is_applied());
            assert_eq!(
                PieceKind::Rook,
                board.get_piece(Square::new(1, 0)).unwrap().kind()
            );
        }

        #[test]
        fn moving_to_own_square_keeps_the_piece() {
            let mut board = Board::empty();
            let rook = Piece::new(PieceKind::Rook, Player::White);
            board.set_piece(Square::new(3, 3), Some(rook));

            let outcome = board.move_piece(Square::new(3, 3), Square::new(3, 3));

            assert_eq!(MoveOutcome::Applied { captured: None }, outcome);
            let after = board.get_piece(Square::new(3, 3)).unwrap();
            assert_eq!(&rook, after);
            assert!(after.has_moved());
            assert_eq!(Player::Black, board.current_player());
        }

        #[test]
        fn turns_alternate() {
            let mut board = Board::at_starting_position();
            assert!(board
                .move_piece(Square::new(1, 4), Square::new(3, 4))
                .is_applied());
            assert!(!board
                .move_piece(Square::new(1, 3), Square::new(3, 3))
                .is_applied());
            assert!(board
                .move_piece(Square::new(6, 4), Square::new(4, 4))
                .is_applied());
            assert_eq!(Player::White, board.current_player());
        }
    }

    mod placement {
        use crate::board::{Board, PlacementParseError};
        use crate::core::*;

        #[test]
        fn smoke() {
            let board = Board::from_placement("8/8/8/3k4/8/8/4P3/8 b").unwrap();
            assert_eq!(Player::Black, board.current_player());
            let king = board.get_piece(Square::new(4, 3)).unwrap();
            assert_eq!(PieceKind::King, king.kind());
            assert_eq!(Player::Black, king.player());
            let pawn = board.get_piece(Square::new(1, 4)).unwrap();
            assert_eq!(Player::White, pawn.player());
            assert!(!pawn.has_moved());
        }

        #[test]
        fn ignores_trailing_fen_fields() {
            let board =
                Board::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                    .unwrap();
            assert_eq!(
                Board::at_starting_position().as_placement(),
                board.as_placement()
            );
        }

        #[test]
        fn roundtrip() {
            let str = "r3k2r/p1pp1pb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b";
            assert_eq!(str, Board::from_placement(str).unwrap().as_placement());
        }

        #[test]
        fn empty() {
            let err = Board::from_placement("").unwrap_err();
            assert_eq!(PlacementParseError::UnexpectedEnd, err);
        }

        #[test]
        fn unknown_piece() {
            let err = Board::from_placement("z7/8/8/8/8/8/8/8 w").unwrap_err();
            assert_eq!(PlacementParseError::UnknownPiece('z'), err);
        }

        #[test]
        fn invalid_digit() {
            let err = Board::from_placement("9/8/8/8/8/8/8/8 w").unwrap_err();
            assert_eq!(PlacementParseError::InvalidDigit, err);
        }

        #[test]
        fn not_sum_to_8() {
            let err = Board::from_placement("pppp5/8/8/8/8/8/8/8 w").unwrap_err();
            assert_eq!(PlacementParseError::RowDoesNotSumToEight, err);
        }

        #[test]
        fn short_row() {
            let err = Board::from_placement("7/8/8/8/8/8/8/8 w").unwrap_err();
            assert_eq!(PlacementParseError::RowDoesNotSumToEight, err);
        }

        #[test]
        fn short_last_row() {
            let err = Board::from_placement("8/8/8/8/8/8/8/4K2 w").unwrap_err();
            assert_eq!(PlacementParseError::RowDoesNotSumToEight, err);
        }

        #[test]
        fn bad_side_to_move() {
            let err = Board::from_placement("8/8/8/8/8/8/8/8 c").unwrap_err();
            assert_eq!(PlacementParseError::InvalidSideToMove, err);
        }

        #[test]
        fn missing_side_to_move() {
            let err = Board::from_placement("8/8/8/8/8/8/8/8").unwrap_err();
            assert_eq!(PlacementParseError::UnexpectedEnd, err);
        }
    }
}
