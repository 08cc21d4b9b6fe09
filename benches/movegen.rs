use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion};

use pilotfish::{gen_legal_moves, perft, MoveList, Position};

const PERFT_BENCHMARK_FENS_AND_DEPTHS: &[(&str, usize, &str)] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        4,
        "starting position",
    ),
    (
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        3,
        "middlegame",
    ),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4, "endgame"),
];

pub fn benchmark_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(15);

    for (fen, depth, position_name) in PERFT_BENCHMARK_FENS_AND_DEPTHS.iter() {
        let pos = Position::from_fen(fen).unwrap();
        let bench_name = format!("perft {}", position_name);

        group.bench_function(bench_name.clone(), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                let mut total_nodes = 0;

                for _ in 0..iters {
                    let (_, nodes) = perft(&pos, *depth);
                    total_nodes += nodes;
                }

                let elapsed = start.elapsed();
                let nps = total_nodes as f64 / elapsed.as_secs_f64();
                println!("{} (depth {}): {:.0} nodes/second", &bench_name, depth, nps);

                elapsed
            })
        });
    }
    group.finish();
}

pub fn benchmark_gen_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_legal_moves");

    for (fen, _, position_name) in PERFT_BENCHMARK_FENS_AND_DEPTHS.iter() {
        let pos = Position::from_fen(fen).unwrap();

        group.bench_function(format!("gen {}", position_name), |b| {
            b.iter(|| {
                let mut list = MoveList::new();
                gen_legal_moves(&pos, &mut list);
                list.len()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_perft, benchmark_gen_legal_moves);
criterion_main!(benches);
