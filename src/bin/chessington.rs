// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chessington::{logging, protocol, session::Session, Board};
use structopt::StructOpt;

/// Drives a chessboard over stdin, one command per line.
#[derive(Debug, StructOpt)]
struct Options {
    /// Start from an empty board instead of the starting position.
    #[structopt(long)]
    empty: bool,

    /// Log applied moves and selection changes.
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Options::from_args();
    logging::init(args.verbose)?;

    let board = if args.empty {
        Board::empty()
    } else {
        Board::at_starting_position()
    };
    protocol::run(Session::new(board))?;
    Ok(())
}
