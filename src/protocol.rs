// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented text protocol for driving a [`Session`] from a terminal or from another process.
//!
//! Each line is one command; squares are written algebraically (`e2`), with the a-file as column 0 and rank 1 as
//! row 0. Every command answers with one or more lines. Malformed commands answer `invalid command: <reason>` and
//! leave the session untouched.

use std::{
    convert::TryFrom,
    io::{self, BufRead, Write},
};

use anyhow::{anyhow, bail};

use crate::board::{Board, MoveOutcome};
use crate::core::{Piece, Square};
use crate::movegen;
use crate::session::{ClickOutcome, Session};
use crate::view::BoardView;

pub fn run(session: Session) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(session, stdin.lock(), stdout.lock())
}

/// Reads commands from `input` until it ends or `quit` is received, writing responses to `output`.
pub fn serve<R: BufRead, W: Write>(mut session: Session, input: R, mut output: W) -> io::Result<()> {
    let _span = tracing::info_span!("protocol").entered();
    for maybe_line in input.lines() {
        let line = maybe_line?;
        let components: Vec<_> = line.split_whitespace().collect();
        let (&command, arguments) = components.split_first().unwrap_or((&"", &[]));
        if command == "quit" {
            break;
        }

        match handle(&mut session, command, arguments) {
            Ok(response) => write!(output, "{}", response)?,
            Err(e) => {
                tracing::warn!("invalid command {:?}: {}", line, e);
                writeln!(output, "invalid command: {}", e)?
            }
        }
        output.flush()?;
    }

    Ok(())
}

fn handle(session: &mut Session, command: &str, arguments: &[&str]) -> anyhow::Result<String> {
    let response = match (command, arguments) {
        ("", []) => String::new(),
        ("new", []) => {
            session.reset(Board::at_starting_position());
            "ok\n".to_owned()
        }
        ("empty", []) => {
            session.reset(Board::empty());
            "ok\n".to_owned()
        }
        ("show", []) => session.board().to_string(),
        ("turn", []) => format!("{}\n", session.board().current_player()),
        ("get", [square]) => {
            let square = parse_square(square)?;
            match session.board().get_piece(square) {
                Some(piece) => format!("{} {} {}\n", piece, piece.player(), piece.kind()),
                None => "none\n".to_owned(),
            }
        }
        ("place", [square, piece]) => {
            let square = parse_square(square)?;
            let piece = parse_piece(piece)?;
            session.board_mut().set_piece(square, Some(piece));
            "ok\n".to_owned()
        }
        ("clear", [square]) => {
            let square = parse_square(square)?;
            session.board_mut().set_piece(square, None);
            "ok\n".to_owned()
        }
        ("moves", [square]) => {
            let square = parse_square(square)?;
            let moves: Vec<String> = movegen::available_moves(session.board(), square)
                .into_iter()
                .map(|sq| sq.to_string())
                .collect();
            format!("{}\n", moves.join(" "))
        }
        ("move", [from, to]) => {
            let from = parse_square(from)?;
            let to = parse_square(to)?;
            format_outcome(&session.board_mut().move_piece(from, to))
        }
        ("click", [square]) => {
            let square = parse_square(square)?;
            match session.click(square)? {
                ClickOutcome::Selected { square, targets } => {
                    let targets: Vec<String> = targets.into_iter().map(|sq| sq.to_string()).collect();
                    format!("selected {} {}\n", square, targets.join(" "))
                }
                ClickOutcome::Moved { outcome, .. } => format_outcome(&outcome),
                ClickOutcome::Cleared => "cleared\n".to_owned(),
            }
        }
        ("position", [placement, side]) => {
            let board = Board::from_placement(format!("{} {}", placement, side))?;
            session.reset(board);
            "ok\n".to_owned()
        }
        ("view", []) => {
            let view = BoardView::of_session(session);
            format!("{}\n", serde_json::to_string(&view)?)
        }
        _ => bail!("unrecognized command: {} {:?}", command, arguments),
    };

    Ok(response)
}

fn parse_square(text: &str) -> anyhow::Result<Square> {
    Ok(text.parse::<Square>()?)
}

fn parse_piece(text: &str) -> anyhow::Result<Piece> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Piece::try_from(c)?),
        _ => Err(anyhow!("expected a single piece character, got {:?}", text)),
    }
}

fn format_outcome(outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Applied {
            captured: Some(piece),
        } => format!("moved captured {}\n", piece),
        MoveOutcome::Applied { captured: None } => "moved\n".to_owned(),
        MoveOutcome::Rejected(reason) => format!("rejected: {}\n", reason),
    }
}
