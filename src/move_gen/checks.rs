//! Generation of non-capturing, non-promoting checking moves. Each piece
//! class splits into discovered checks (candidates in `dc` move off their
//! masked line) and direct checks (everything else moves onto a square that
//! attacks the enemy king).

use crate::bitboard::Square::*;
use crate::bitboard::{self, BitBoard, Square};
use crate::position::{Move, MoveKind, Position};

use super::hyperbola_quintessence as sliding;
use super::{castle_moves, pawns, MoveList};

/// Appends pseudo-legal quiet checking moves. `dc` must be the side to
/// move's discovered-check candidates. Requires the side to move not to be
/// in check.
pub fn gen_checks(pos: &Position, dc: BitBoard, list: &mut MoveList) -> usize {
    debug_assert!(pos.is_ok());
    debug_assert!(!pos.is_check());
    debug_assert_eq!(dc, pos.discovered_check_candidates(pos.side_to_move()));

    let start = list.len();
    let us = pos.side_to_move();
    let them = us.opposite();
    let ksq = pos.king_square(them);
    let empty = pos.empty_squares();
    let setup = pawns::setup(us);

    // Pawn pushes never capture, so a pawn on the enemy king's file can
    // stay there forever without discovering anything.
    let pawns_off_king_file = pos.pawns(us) & !bitboard::file_bb(ksq);

    // Discovered pawn checks: any push off the line works, except promotions
    // (not this generator's job).
    let dc_singles = (pawns_off_king_file & dc).shift(setup.up) & !setup.promotion_rank & empty;
    let mut targets = dc_singles;
    while !targets.is_empty() {
        let to = targets.pop_lsb();
        list.push(Move::new(pawns::push_origin(to, setup.up), to));
    }
    let mut targets = (dc_singles & setup.third_rank).shift(setup.up) & empty;
    while !targets.is_empty() {
        let to = targets.pop_lsb();
        list.push(Move::new(pawns::double_push_origin(to, setup.up), to));
    }

    // Direct pawn checks come only from the files next to the enemy king.
    let direct_pawns = pawns_off_king_file & !dc & bitboard::neighboring_files(ksq);
    let check_sqs = pos.pawn_attacks(them, ksq);
    let singles = direct_pawns.shift(setup.up) & empty;
    let mut targets = singles & check_sqs;
    while !targets.is_empty() {
        let to = targets.pop_lsb();
        list.push(Move::new(pawns::push_origin(to, setup.up), to));
    }
    let mut targets = (singles & setup.third_rank).shift(setup.up) & empty & check_sqs;
    while !targets.is_empty() {
        let to = targets.pop_lsb();
        list.push(Move::new(pawns::double_push_origin(to, setup.up), to));
    }

    // Knights
    let knights = pos.knights(us);
    let mut discoverers = knights & dc;
    while !discoverers.is_empty() {
        let from = discoverers.pop_lsb();
        // A knight move never stays on or re-enters a slider line.
        let mut targets = pos.knight_attacks(from) & empty;
        while !targets.is_empty() {
            list.push(Move::new(from, targets.pop_lsb()));
        }
    }
    let check_sqs = pos.knight_attacks(ksq) & empty;
    let mut direct = knights & !dc;
    while !direct.is_empty() {
        let from = direct.pop_lsb();
        let mut targets = pos.knight_attacks(from) & check_sqs;
        while !targets.is_empty() {
            list.push(Move::new(from, targets.pop_lsb()));
        }
    }

    // Bishops
    let bishops = pos.bishops(us);
    let mut discoverers = bishops & dc;
    while !discoverers.is_empty() {
        let from = discoverers.pop_lsb();
        // A candidate bishop sits on a rook line; every diagonal step leaves it.
        let mut targets = pos.bishop_attacks(from) & empty;
        while !targets.is_empty() {
            list.push(Move::new(from, targets.pop_lsb()));
        }
    }
    let check_sqs = pos.bishop_attacks(ksq) & empty;
    let mut direct = bishops & !dc;
    while !direct.is_empty() {
        let from = direct.pop_lsb();
        let mut targets = pos.bishop_attacks(from) & check_sqs;
        while !targets.is_empty() {
            list.push(Move::new(from, targets.pop_lsb()));
        }
    }

    // Rooks
    let rooks = pos.rooks(us);
    let mut discoverers = rooks & dc;
    while !discoverers.is_empty() {
        let from = discoverers.pop_lsb();
        let mut targets = pos.rook_attacks(from) & empty;
        while !targets.is_empty() {
            list.push(Move::new(from, targets.pop_lsb()));
        }
    }
    let check_sqs = pos.rook_attacks(ksq) & empty;
    let mut direct = rooks & !dc;
    while !direct.is_empty() {
        let from = direct.pop_lsb();
        let mut targets = pos.rook_attacks(from) & check_sqs;
        while !targets.is_empty() {
            list.push(Move::new(from, targets.pop_lsb()));
        }
    }

    // Queens give direct checks only: a queen shielding a slider from the
    // enemy king would already be attacking the king itself.
    let check_sqs = pos.queen_attacks(ksq) & empty;
    let mut queens = pos.queens(us);
    while !queens.is_empty() {
        let from = queens.pop_lsb();
        let mut targets = pos.queen_attacks(from) & check_sqs;
        while !targets.is_empty() {
            list.push(Move::new(from, targets.pop_lsb()));
        }
    }

    // King: stepping anywhere the uncovered slider does not pseudo-reach.
    let kfrom = pos.king_square(us);
    if dc.is_square_set(kfrom) {
        let mut targets =
            pos.king_attacks(kfrom) & empty & !sliding::queen_pseudo_attacks(ksq);
        while !targets.is_empty() {
            list.push(Move::new(kfrom, targets.pop_lsb()));
        }
    }

    // Castles where the rook arrives attacking the enemy king.
    let castle_start = list.len();
    castle_moves(pos, us, list);
    let mut idx = castle_start;
    while idx < list.len() {
        if castle_gives_check(pos, list[idx], ksq) {
            idx += 1;
        } else {
            list.swap_remove(idx);
        }
    }

    list.len() - start
}

fn castle_gives_check(pos: &Position, mve: Move, enemy_ksq: Square) -> bool {
    let us = pos.side_to_move();
    let (kend, rend) = match mve.kind() {
        MoveKind::ShortCastle => (us.relative_square(G1), us.relative_square(F1)),
        MoveKind::LongCastle => (us.relative_square(C1), us.relative_square(D1)),
        _ => panic!("castle check test on non-castle move {mve:?}"),
    };

    let mut occ = pos.occupied_squares();
    occ.clear_square(mve.src());
    occ.clear_square(mve.dest());
    occ.set_square(kend);
    occ.set_square(rend);
    sliding::rook_attacks_bb(rend, occ).is_square_set(enemy_ksq)
}
