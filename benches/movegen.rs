// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chessington::core::Square;
use chessington::{movegen, playout, Board};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("start-position-movegen-all", |b| {
        let board = Board::at_starting_position();
        b.iter(|| playout::movable_pieces(black_box(&board)));
    });

    c.bench_function("open-queen-movegen", |b| {
        let board = Board::from_placement("8/8/8/8/3Q4/8/8/8 w").unwrap();
        b.iter(|| movegen::available_moves(black_box(&board), black_box(Square::new(3, 3))));
    });

    c.bench_function("find-piece-worst-case", |b| {
        let board = Board::at_starting_position();
        let rook = *board.get_piece(Square::new(7, 7)).unwrap();
        b.iter(|| rook.available_moves(black_box(&board)).unwrap());
    });

    c.bench_function("move-clonemake", |b| {
        let board = Board::at_starting_position();
        b.iter(|| {
            let mut board = black_box(&board).clone();
            board.move_piece(black_box(Square::new(1, 4)), black_box(Square::new(3, 4)))
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
