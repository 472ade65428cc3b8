use structopt::StructOpt;

use chessington::core::Square;
use chessington::movegen;
use chessington::Board;

#[derive(Debug, StructOpt)]
struct Options {
    /// Piece placement, as in the first field of a FEN string.
    #[structopt(name = "PLACEMENT")]
    placement: String,

    /// Side to move, `w` or `b`.
    #[structopt(name = "SIDE")]
    side: String,

    /// Square of the piece whose moves to list, e.g. `e2`.
    #[structopt(name = "SQUARE")]
    square: Square,
}

fn main() -> anyhow::Result<()> {
    let ops = Options::from_args();
    let board = Board::from_placement(format!("{} {}", ops.placement, ops.side))?;
    for target in movegen::available_moves(&board, ops.square) {
        println!("{}", target);
    }
    Ok(())
}
