//! Perft: exhaustive legal-move-tree leaf counting, the standard oracle for
//! move-generator correctness. `perft` returns a per-root-move divide map;
//! `perft_full` additionally categorises every counted move.

use std::collections::HashMap;
use std::fmt::Display;
use std::time::{Duration, Instant};

use tabled::{Table, Tabled};
use tracing::{debug, info};

use crate::move_gen::{gen_legal_moves, MoveList};
use crate::position::{Move, Position};

pub fn perft(position: &Position, depth: usize) -> (HashMap<Move, u64>, u64) {
    debug_assert!(depth >= 1);

    let mut per_move = HashMap::new();
    let mut total = 0;

    let mut list = MoveList::new();
    gen_legal_moves(position, &mut list);

    for &mve in &list {
        let mut child = position.clone();
        child.make_move(mve).unwrap();
        let nodes = if depth == 1 {
            1
        } else {
            perft_nodes(&child, depth - 1)
        };
        per_move.insert(mve, nodes);
        total += nodes;
    }

    (per_move, total)
}

fn perft_nodes(position: &Position, depth: usize) -> u64 {
    let mut list = MoveList::new();
    gen_legal_moves(position, &mut list);

    if depth == 1 {
        return list.len() as u64;
    }

    let mut nodes = 0;
    for &mve in &list {
        let mut child = position.clone();
        child.make_move(mve).unwrap();
        nodes += perft_nodes(&child, depth - 1);
    }
    nodes
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Tabled)]
pub struct PerftDepthResult {
    pub tot: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub discovery_checks: u64,
    pub double_checks: u64,
    pub checkmates: u64,
}

impl PerftDepthResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tot: u64,
        captures: u64,
        en_passants: u64,
        castles: u64,
        promotions: u64,
        checks: u64,
        discovery_checks: u64,
        double_checks: u64,
        checkmates: u64,
    ) -> Self {
        PerftDepthResult {
            tot,
            captures,
            en_passants,
            castles,
            promotions,
            checks,
            discovery_checks,
            double_checks,
            checkmates,
        }
    }

    pub fn empty() -> PerftDepthResult {
        PerftDepthResult::new(0, 0, 0, 0, 0, 0, 0, 0, 0)
    }
}

pub struct PerftResult {
    pub depth_results: Vec<PerftDepthResult>,
    pub tot_nodes: u64,
    pub time_elapsed: Duration,
    pub nodes_per_second: f64,
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "total nodes: {}", self.tot_nodes)?;
        writeln!(f, "time elapsed: {}", self.time_elapsed.as_secs_f32())?;
        writeln!(f, "nodes/s: {}", self.nodes_per_second)?;
        writeln!(f, "{}", Table::new(&self.depth_results))?;
        Ok(())
    }
}

pub fn perft_full(position: &Position, depth: usize) -> PerftResult {
    let mut depth_results = vec![PerftDepthResult::empty(); depth];

    let start = Instant::now();
    perft_full_helper(&mut depth_results, position, depth, 0);
    let time_elapsed = start.elapsed();

    let tot_nodes = depth_results.iter().map(|res| res.tot).sum();
    let nodes_per_second = tot_nodes as f64 / time_elapsed.as_secs_f64();

    info!(
        tot_nodes,
        elapsed_s = time_elapsed.as_secs_f32(),
        nodes_per_second,
        "perft complete"
    );

    PerftResult {
        depth_results,
        tot_nodes,
        time_elapsed,
        nodes_per_second,
    }
}

fn perft_full_helper(
    depth_results: &mut [PerftDepthResult],
    position: &Position,
    max_depth: usize,
    curr_depth: usize,
) {
    // Generate before the depth cutoff so leaves can be recognised as mates.
    let mut moves = MoveList::new();
    gen_legal_moves(position, &mut moves);

    if moves.is_empty() {
        if curr_depth > 0 && position.is_check() {
            depth_results[curr_depth - 1].checkmates += 1;
        }
        return;
    }

    if curr_depth == max_depth {
        return;
    }

    let opp_pieces = position.pieces_of_color(position.side_to_move().opposite());

    let res = &mut depth_results[curr_depth];
    res.tot += moves.len() as u64;

    for &mve in moves.iter() {
        if opp_pieces.is_square_set(mve.dest()) || mve.is_en_passant() {
            res.captures += 1;
        }
        if mve.is_en_passant() {
            res.en_passants += 1;
        }
        if mve.is_castle() {
            res.castles += 1;
        }
        if mve.promotion_piece().is_some() {
            res.promotions += 1;
        }
    }

    let mut checks = 0;
    let mut discovery_checks = 0;
    let mut double_checks = 0;

    for &mve in moves.iter() {
        let mut child = position.clone();
        child.make_move(mve).unwrap();

        let mut checkers = child.checkers();
        if !checkers.is_empty() {
            checks += 1;
            if checkers.count() > 1 {
                double_checks += 1;
            } else {
                checkers.clear_square(mve.dest());
                if !checkers.is_empty() {
                    discovery_checks += 1;
                }
            }
        }

        perft_full_helper(depth_results, &child, max_depth, curr_depth + 1);
    }

    debug!(curr_depth, checks, "perft depth level done");

    let res = &mut depth_results[curr_depth];
    res.checks += checks;
    res.discovery_checks += discovery_checks;
    res.double_checks += double_checks;
}
