// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chessington::{logging, playout, view::BoardView, Board};
use rand::{rngs::SmallRng, SeedableRng};
use structopt::StructOpt;

/// Plays a game of random moves from the starting position and prints where it ended up.
#[derive(Debug, StructOpt)]
struct Options {
    /// Number of moves to play, counting both sides.
    #[structopt(short, long, default_value = "40")]
    plies: u32,
    /// Seed for the move picker. Games with the same seed are identical.
    #[structopt(short, long)]
    seed: Option<u64>,
    /// Print the final position as JSON instead of a diagram.
    #[structopt(long)]
    json: bool,
    /// Log every move as it is played.
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Options::from_args();
    logging::init(args.verbose)?;
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let result = playout::play_random_game(Board::at_starting_position(), args.plies, &mut rng)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&BoardView::of_board(&result.board))?);
        return Ok(());
    }

    for (i, (from, to)) in result.moves.iter().enumerate() {
        println!("{:>3}. {}{}", i + 1, from, to);
    }
    println!("===========================");
    print!("{}", result.board);
    println!("===========================");
    println!("{:<15} {}", "To Move:", result.board.current_player());
    println!("{:<15} {}", "Placement:", result.board.as_placement());
    Ok(())
}
