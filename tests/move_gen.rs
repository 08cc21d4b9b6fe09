use std::collections::HashSet;

use pilotfish::Square::*;
use pilotfish::{
    gen_captures, gen_evasions, gen_legal_moves, gen_noncaptures, Move, MoveList, Position,
};

use test_case::test_case;
use testresult::TestResult;

fn legal(pos: &Position) -> Vec<Move> {
    let mut list = MoveList::new();
    gen_legal_moves(pos, &mut list);
    list.into_iter().collect()
}

#[test]
fn test_startpos_has_twenty_moves_and_no_captures() {
    let pos = Position::start();
    assert_eq!(legal(&pos).len(), 20);

    let mut captures = MoveList::new();
    assert_eq!(gen_captures(&pos, &mut captures), 0);
}

/// With the rook checking along the first rank, d1 and f1 only look safe if
/// the king is left in the occupancy to shadow the ray. The legal evasions
/// are the three rank-two steps.
#[test]
fn test_king_cannot_shelter_behind_itself() -> TestResult {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1")?;
    let got: HashSet<Move> = legal(&pos).into_iter().collect();
    let want = HashSet::from([Move::new(E1, D2), Move::new(E1, E2), Move::new(E1, F2)]);
    assert_eq!(got, want);
    Ok(())
}

/// Legal generation must agree with the evasion generator whenever the side
/// to move is in check.
#[test_case("4k3/8/8/8/8/8/8/r3K3 w - - 0 1" ; "rank check")]
#[test_case("8/8/4k3/6N1/8/4R3/3b4/7K b - - 0 1" ; "double check")]
#[test_case("8/8/8/2k5/3Pp3/8/8/7K b - d3 0 1" ; "pawn check with ep")]
#[test_case("rnbqkbnr/ppp1pppp/8/1B1p4/4P3/8/PPPP1PPP/RNBQK1NR b KQkq - 1 2" ; "opening check")]
fn test_legal_equals_evasions_in_check(fen: &str) -> TestResult {
    let pos = Position::from_fen(fen)?;
    assert!(pos.is_check());

    let mut evasions = MoveList::new();
    gen_evasions(&pos, &mut evasions);

    let legal: HashSet<Move> = legal(&pos).into_iter().collect();
    let evasions: HashSet<Move> = evasions.into_iter().collect();
    assert_eq!(legal, evasions);
    Ok(())
}

/// Every legal move must leave the mover's king unattacked after it is
/// played out on the board.
#[test_case("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" ; "kiwipete")]
#[test_case("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1" ; "position four")]
#[test_case("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" ; "position three")]
#[test_case("8/8/8/2k5/3Pp3/8/8/7K b - d3 0 1" ; "in check")]
fn test_legal_moves_leave_king_safe(fen: &str) -> TestResult {
    let pos = Position::from_fen(fen)?;
    let us = pos.side_to_move();
    for mve in legal(&pos) {
        let mut child = pos.clone();
        child.make_move(mve)?;
        assert!(
            !child.square_is_attacked(child.king_square(us), child.side_to_move()),
            "{fen}: {mve:?} leaves the king attacked"
        );
    }
    Ok(())
}

/// Captures and non-captures partition the pseudo-legal moves; the legal
/// list is exactly the legality-filtered union.
#[test_case("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" ; "kiwipete")]
#[test_case("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8" ; "position five")]
fn test_legal_is_subset_of_pseudo_legal(fen: &str) -> TestResult {
    let pos = Position::from_fen(fen)?;

    let mut pseudo = MoveList::new();
    gen_captures(&pos, &mut pseudo);
    gen_noncaptures(&pos, &mut pseudo);
    let pseudo: HashSet<Move> = pseudo.into_iter().collect();

    for mve in legal(&pos) {
        assert!(pseudo.contains(&mve), "{fen}: {mve:?} missing from pseudo-legal set");
    }
    Ok(())
}

/// Identical inputs produce identical output, byte for byte.
#[test]
fn test_generation_is_deterministic() -> TestResult {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")?;

    let mut first = MoveList::new();
    gen_captures(&pos, &mut first);
    gen_noncaptures(&pos, &mut first);

    let mut second = MoveList::new();
    gen_captures(&pos, &mut second);
    gen_noncaptures(&pos, &mut second);

    assert_eq!(first.as_slice(), second.as_slice());
    Ok(())
}
