//! Legal check-evasion generation: king escapes, and against a single
//! checker also captures of it, interpositions, and the en-passant capture
//! of a checking pawn. Unlike the other generators, everything appended here
//! is already legal.

use crate::bitboard;
use crate::position::{Move, Piece, Position};

use super::hyperbola_quintessence as sliding;
use super::{pawns, MoveList};

/// Appends every legal move for a side in check. Requires `pos.is_check()`.
pub fn gen_evasions(pos: &Position, list: &mut MoveList) -> usize {
    debug_assert!(pos.is_ok());
    debug_assert!(pos.is_check());

    let start = list.len();
    let us = pos.side_to_move();
    let them = us.opposite();
    let ksq = pos.king_square(us);
    let checkers = pos.checkers();

    // King escapes. The attack probe runs over the occupancy with the king
    // lifted off: left in place it would shadow the very ray it flees along.
    let mut occ_without_king = pos.occupied_squares();
    occ_without_king.clear_square(ksq);

    let mut king_targets = pos.king_attacks(ksq) & !pos.pieces_of_color(us);
    while !king_targets.is_empty() {
        let to = king_targets.pop_lsb();
        if pos.attackers_with_occ(to, them, occ_without_king).is_empty() {
            list.push(Move::new(ksq, to));
        }
    }

    // Against two checkers only the king can move.
    if checkers.count() > 1 {
        return list.len() - start;
    }

    let checksq = checkers.get_lsb();
    let pinned = pos.pinned_pieces(us);
    let setup = pawns::setup(us);

    // Captures of the checker. Pinned pieces sit on a ray through our king
    // that never crosses the checker's square, so they are excluded wholesale.
    let mut froms = pos.pawn_attacks(them, checksq) & pos.pawns(us) & !pinned;
    let promoting = setup.promotion_rank.is_square_set(checksq);
    while !froms.is_empty() {
        let from = froms.pop_lsb();
        if promoting {
            for promoted in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
                list.push(Move::promotion(from, checksq, promoted));
            }
        } else {
            list.push(Move::new(from, checksq));
        }
    }

    let mut froms = pos.knight_attacks(checksq) & pos.knights(us) & !pinned;
    while !froms.is_empty() {
        list.push(Move::new(froms.pop_lsb(), checksq));
    }

    let mut froms = pos.bishop_attacks(checksq) & pos.bishops_and_queens(us) & !pinned;
    while !froms.is_empty() {
        list.push(Move::new(froms.pop_lsb(), checksq));
    }

    let mut froms = pos.rook_attacks(checksq) & pos.rooks_and_queens(us) & !pinned;
    while !froms.is_empty() {
        list.push(Move::new(froms.pop_lsb(), checksq));
    }

    // Interpositions exist only against a sliding checker.
    if !(checkers & pos.sliders()).is_empty() {
        let block_squares = bitboard::squares_between(checksq, ksq);
        debug_assert!((pos.occupied_squares() & block_squares).is_empty());

        // Pawn pushes onto a blocking square. The landing square is known
        // empty; only a double push's intermediate square needs testing.
        let singles = (pos.pawns(us) & !pinned).shift(setup.up);

        let mut targets = singles & block_squares;
        while !targets.is_empty() {
            let to = targets.pop_lsb();
            let from = pawns::push_origin(to, setup.up);
            if setup.promotion_rank.is_square_set(to) {
                for promoted in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
                    list.push(Move::promotion(from, to, promoted));
                }
            } else {
                list.push(Move::new(from, to));
            }
        }

        let mut targets =
            (singles & pos.empty_squares() & setup.third_rank).shift(setup.up) & block_squares;
        while !targets.is_empty() {
            let to = targets.pop_lsb();
            list.push(Move::new(pawns::double_push_origin(to, setup.up), to));
        }

        let mut froms = pos.knights(us) & !pinned;
        while !froms.is_empty() {
            let from = froms.pop_lsb();
            let mut targets = pos.knight_attacks(from) & block_squares;
            while !targets.is_empty() {
                list.push(Move::new(from, targets.pop_lsb()));
            }
        }

        let mut froms = pos.bishops(us) & !pinned;
        while !froms.is_empty() {
            let from = froms.pop_lsb();
            let mut targets = pos.bishop_attacks(from) & block_squares;
            while !targets.is_empty() {
                list.push(Move::new(from, targets.pop_lsb()));
            }
        }

        let mut froms = pos.rooks(us) & !pinned;
        while !froms.is_empty() {
            let from = froms.pop_lsb();
            let mut targets = pos.rook_attacks(from) & block_squares;
            while !targets.is_empty() {
                list.push(Move::new(from, targets.pop_lsb()));
            }
        }

        let mut froms = pos.queens(us) & !pinned;
        while !froms.is_empty() {
            let from = froms.pop_lsb();
            let mut targets = pos.queen_attacks(from) & block_squares;
            while !targets.is_empty() {
                list.push(Move::new(from, targets.pop_lsb()));
            }
        }
    }

    // En passant can only evade when the checker is the pawn that just
    // double-pushed. Both pawns vanish from their ranks at once, so the
    // king's rays are probed over the two-removal occupancy before the move
    // is believed.
    if let Some(ep_square) = pos.ep_square() {
        if !(checkers & pos.pawns(them)).is_empty() {
            let mut froms = pos.pawn_attacks(them, ep_square) & pos.pawns(us) & !pinned;
            while !froms.is_empty() {
                let from = froms.pop_lsb();

                let mut occ = pos.occupied_squares();
                occ.clear_square(from);
                occ.clear_square(checksq);
                let safe = (sliding::bishop_attacks_bb(ksq, occ)
                    & pos.bishops_and_queens(them))
                .is_empty()
                    && (sliding::rook_attacks_bb(ksq, occ) & pos.rooks_and_queens(them))
                        .is_empty();
                if safe {
                    list.push(Move::en_passant(from, ep_square));
                }
            }
        }
    }

    list.len() - start
}
