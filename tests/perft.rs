use std::collections::HashMap;

use pilotfish::Square::*;
use pilotfish::{perft, perft_full, Move, PerftDepthResult, Position};

use test_case::test_case;
use testresult::TestResult;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

#[test_case(Position::start(), 1, 20 ; "startpos 1")]
#[test_case(Position::start(), 2, 400 ; "startpos 2")]
#[test_case(Position::start(), 3, 8_902 ; "startpos 3")]
#[test_case(Position::start(), 4, 197_281 ; "startpos 4")]
#[test_case(Position::from_fen(KIWIPETE).unwrap(), 1, 48 ; "kiwipete 1")]
#[test_case(Position::from_fen(KIWIPETE).unwrap(), 2, 2_039 ; "kiwipete 2")]
#[test_case(Position::from_fen(KIWIPETE).unwrap(), 3, 97_862 ; "kiwipete 3")]
#[test_case(Position::from_fen(POSITION_3).unwrap(), 1, 14 ; "position3 1")]
#[test_case(Position::from_fen(POSITION_3).unwrap(), 2, 191 ; "position3 2")]
#[test_case(Position::from_fen(POSITION_3).unwrap(), 3, 2_812 ; "position3 3")]
#[test_case(Position::from_fen(POSITION_3).unwrap(), 4, 43_238 ; "position3 4")]
#[test_case(Position::from_fen(POSITION_3).unwrap(), 5, 674_624 ; "position3 5")]
#[test_case(Position::from_fen(POSITION_4).unwrap(), 1, 6 ; "position4 1")]
#[test_case(Position::from_fen(POSITION_4).unwrap(), 2, 264 ; "position4 2")]
#[test_case(Position::from_fen(POSITION_4).unwrap(), 3, 9_467 ; "position4 3")]
#[test_case(Position::from_fen(POSITION_4).unwrap(), 4, 422_333 ; "position4 4")]
#[test_case(Position::from_fen(POSITION_5).unwrap(), 1, 44 ; "position5 1")]
#[test_case(Position::from_fen(POSITION_5).unwrap(), 2, 1_486 ; "position5 2")]
#[test_case(Position::from_fen(POSITION_5).unwrap(), 3, 62_379 ; "position5 3")]
fn test_perft(position: Position, depth: usize, want: u64) {
    let (_, total) = perft(&position, depth);
    assert_eq!(total, want);
}

// The published deep counts. Expensive: run with `cargo test -- --ignored`.
#[test_case(Position::start(), 5, 4_865_609 ; "startpos 5")]
#[test_case(Position::start(), 6, 119_060_324 ; "startpos 6")]
#[test_case(Position::from_fen(KIWIPETE).unwrap(), 4, 4_085_603 ; "kiwipete 4")]
#[test_case(Position::from_fen(POSITION_3).unwrap(), 6, 11_030_083 ; "position3 6")]
#[test_case(Position::from_fen(POSITION_4).unwrap(), 5, 15_833_292 ; "position4 5")]
#[test_case(Position::from_fen(POSITION_5).unwrap(), 4, 2_103_487 ; "position5 4")]
#[ignore]
fn test_perft_deep(position: Position, depth: usize, want: u64) {
    let (_, total) = perft(&position, depth);
    assert_eq!(total, want);
}

#[test]
fn test_perft_divide_startpos() {
    let want: HashMap<Move, u64> = [
        (Move::new(A2, A3), 380),
        (Move::new(B2, B3), 420),
        (Move::new(C2, C3), 420),
        (Move::new(D2, D3), 539),
        (Move::new(E2, E3), 599),
        (Move::new(F2, F3), 380),
        (Move::new(G2, G3), 420),
        (Move::new(H2, H3), 380),
        (Move::new(A2, A4), 420),
        (Move::new(B2, B4), 421),
        (Move::new(C2, C4), 441),
        (Move::new(D2, D4), 560),
        (Move::new(E2, E4), 600),
        (Move::new(F2, F4), 401),
        (Move::new(G2, G4), 421),
        (Move::new(H2, H4), 420),
        (Move::new(B1, A3), 400),
        (Move::new(B1, C3), 440),
        (Move::new(G1, F3), 440),
        (Move::new(G1, H3), 400),
    ]
    .into_iter()
    .collect();

    let (divide, total) = perft(&Position::start(), 3);
    assert_eq!(total, 8_902);
    assert_eq!(divide, want);
}

#[test]
fn test_perft_full_kiwipete() -> TestResult {
    let pos = Position::from_fen(KIWIPETE)?;
    let res = perft_full(&pos, 3);
    assert_eq!(res.depth_results.len(), 3);
    assert_eq!(
        res.depth_results[2],
        PerftDepthResult::new(97_862, 17_102, 45, 3_162, 0, 993, 0, 0, 1)
    );
    Ok(())
}

#[test]
#[ignore]
fn test_perft_full_position3() -> TestResult {
    let pos = Position::from_fen(POSITION_3)?;
    let res = perft_full(&pos, 5);
    assert_eq!(
        res.depth_results[4],
        PerftDepthResult::new(674_624, 52_051, 1_165, 0, 0, 52_950, 1_292, 3, 0)
    );
    Ok(())
}
