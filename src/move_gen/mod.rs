//! Move generation over an immutable [`Position`]. Every entry point appends
//! to a caller-owned [`MoveList`] and returns the number of moves written;
//! output order is the bit-scan order of the underlying bitboards.
//!
//! `gen_captures`, `gen_noncaptures` and `gen_checks` produce pseudo-legal
//! moves and require the side to move not to be in check; `gen_evasions`
//! requires check and produces legal moves only. `gen_legal_moves` composes
//! the above, and `gen_move_if_legal` screens a single arbitrary move.

mod checks;
mod evasions;
pub(crate) mod hyperbola_quintessence;
pub(crate) mod leaping_pieces;
mod masks;
mod pawns;

use arrayvec::ArrayVec;

use crate::bitboard::Square::*;
use crate::bitboard::{BitBoard, Square};
use crate::position::{Move, MoveKind, Piece, Position, Side};

pub use checks::gen_checks;
pub use evasions::gen_evasions;

/// 256 comfortably exceeds the most pseudo-legal moves any reachable
/// position admits.
pub type MoveList = ArrayVec<Move, 256>;

/// Pseudo-legal captures plus queen promotions (capturing and quiet).
pub fn gen_captures(pos: &Position, list: &mut MoveList) -> usize {
    debug_assert!(pos.is_ok());
    debug_assert!(!pos.is_check());

    let start = list.len();
    let us = pos.side_to_move();
    let target = pos.pieces_of_color(us.opposite());

    pawns::captures(pos, us, list);
    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        piece_moves(pos, piece, us, target, list);
    }
    king_moves(pos, pos.king_square(us), target, list);

    list.len() - start
}

/// Pseudo-legal quiet moves, under-promotions (capturing ones included) and
/// castles.
pub fn gen_noncaptures(pos: &Position, list: &mut MoveList) -> usize {
    debug_assert!(pos.is_ok());
    debug_assert!(!pos.is_check());

    let start = list.len();
    let us = pos.side_to_move();
    let target = pos.empty_squares();

    pawns::noncaptures(pos, us, list);
    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        piece_moves(pos, piece, us, target, list);
    }
    king_moves(pos, pos.king_square(us), target, list);
    castle_moves(pos, us, list);

    list.len() - start
}

/// All legal moves: evasions when in check, otherwise the pseudo-legal
/// captures and non-captures compacted through the pin-aware legality test.
pub fn gen_legal_moves(pos: &Position, list: &mut MoveList) -> usize {
    debug_assert!(pos.is_ok());

    if pos.is_check() {
        return gen_evasions(pos, list);
    }

    let start = list.len();
    gen_captures(pos, list);
    gen_noncaptures(pos, list);

    let pinned = pos.pinned_pieces(pos.side_to_move());
    let mut idx = start;
    while idx < list.len() {
        if pos.move_is_legal(list[idx], pinned) {
            idx += 1;
        } else {
            list.swap_remove(idx);
        }
    }

    list.len() - start
}

/// Screens one externally supplied move (hash probe, UCI input) without
/// generating the full move list: `Some(mve)` iff `mve` is legal here. Must
/// not be called while in check.
pub fn gen_move_if_legal(pos: &Position, mve: Move, pinned: BitBoard) -> Option<Move> {
    debug_assert!(pos.is_ok());
    debug_assert!(!pos.is_check());

    let us = pos.side_to_move();
    let them = us.opposite();

    let (piece, side) = pos.piece_at(mve.src())?;
    if side != us {
        return None;
    }

    match mve.kind() {
        MoveKind::EnPassant => {
            if piece != Piece::Pawn
                || pos.ep_square() != Some(mve.dest())
                || !pos.pawn_attacks(us, mve.src()).is_square_set(mve.dest())
            {
                return None;
            }
            pos.move_is_legal(mve, pinned).then_some(mve)
        }
        MoveKind::ShortCastle => {
            if piece != Piece::King
                || !pos.can_castle_kingside(us)
                || mve.src() != pos.king_square(us)
                || mve.dest() != pos.initial_kingside_rook_square(us)
            {
                return None;
            }
            let kend = us.relative_square(G1);
            let rend = us.relative_square(F1);
            castle_path_ok(pos, them, mve.src(), mve.dest(), kend, rend).then_some(mve)
        }
        MoveKind::LongCastle => {
            if piece != Piece::King
                || !pos.can_castle_queenside(us)
                || mve.src() != pos.king_square(us)
                || mve.dest() != pos.initial_queenside_rook_square(us)
            {
                return None;
            }
            let kend = us.relative_square(C1);
            let rend = us.relative_square(D1);
            (castle_path_ok(pos, them, mve.src(), mve.dest(), kend, rend)
                && !queenside_corner_blocked(pos, us, mve.dest()))
            .then_some(mve)
        }
        MoveKind::Normal | MoveKind::Promotion(_) => {
            if let Some((_, dest_side)) = pos.piece_at(mve.dest()) {
                if dest_side == us {
                    return None;
                }
            }

            if piece == Piece::Pawn {
                return pawn_move_if_pseudo_legal(pos, mve, us)
                    .filter(|&mve| pos.move_is_legal(mve, pinned));
            }

            if mve.promotion_piece().is_some() {
                return None;
            }
            (pos.piece_attacks_square(mve.src(), mve.dest()) && pos.move_is_legal(mve, pinned))
                .then_some(mve)
        }
    }
}

/// The pawn arm of the legality probe: validate the from/to delta against
/// this side's push and capture geometry, and the promotion flag against the
/// destination rank.
fn pawn_move_if_pseudo_legal(pos: &Position, mve: Move, us: Side) -> Option<Move> {
    let last_rank = match us {
        Side::White => 7,
        Side::Black => 0,
    };
    if (mve.dest().rank() == last_rank) != mve.promotion_piece().is_some() {
        return None;
    }

    let setup = pawns::setup(us);
    let delta = mve.dest() as i16 - mve.src() as i16;

    if delta == i16::from(setup.up_east.delta()) || delta == i16::from(setup.up_west.delta()) {
        // Capture: the attack-set test also rules out deltas that would wrap
        // around a board edge.
        if !pos.pawn_attacks(us, mve.src()).is_square_set(mve.dest()) {
            return None;
        }
        match pos.piece_at(mve.dest()) {
            Some((_, side)) if side != us => Some(mve),
            _ => None,
        }
    } else if delta == i16::from(setup.up.delta()) {
        pos.square_is_empty(mve.dest()).then_some(mve)
    } else if delta == 2 * i16::from(setup.up.delta()) {
        let double_push_rank = match us {
            Side::White => 3,
            Side::Black => 4,
        };
        let intermediate = pawns::push_origin(mve.dest(), setup.up);
        (mve.dest().rank() == double_push_rank
            && pos.square_is_empty(mve.dest())
            && pos.square_is_empty(intermediate))
        .then_some(mve)
    } else {
        None
    }
}

/// Moves of one piece type onto the target set, pieces and destinations both
/// in bit-scan order.
fn piece_moves(pos: &Position, piece: Piece, side: Side, target: BitBoard, list: &mut MoveList) {
    let mut pieces = pos.piece_bb(piece, side);
    while !pieces.is_empty() {
        let from = pieces.pop_lsb();
        let attacks = match piece {
            Piece::Knight => pos.knight_attacks(from),
            Piece::Bishop => pos.bishop_attacks(from),
            Piece::Rook => pos.rook_attacks(from),
            Piece::Queen => pos.queen_attacks(from),
            _ => panic!("piece moves: want [knight, bishop, rook, queen], got {piece}"),
        };
        let mut targets = attacks & target;
        while !targets.is_empty() {
            list.push(Move::new(from, targets.pop_lsb()));
        }
    }
}

fn king_moves(pos: &Position, from: Square, target: BitBoard, list: &mut MoveList) {
    let mut targets = pos.king_attacks(from) & target;
    while !targets.is_empty() {
        list.push(Move::new(from, targets.pop_lsb()));
    }
}

/// Castles whose king path is clear and unattacked and whose rook path is
/// clear, per castling right still held. Works for any rook start file.
fn castle_moves(pos: &Position, us: Side, list: &mut MoveList) {
    if !pos.can_castle(us) {
        return;
    }
    let them = us.opposite();
    let ksq = pos.king_square(us);

    if pos.can_castle_kingside(us) {
        let rsq = pos.initial_kingside_rook_square(us);
        let kend = us.relative_square(G1);
        let rend = us.relative_square(F1);
        if castle_path_ok(pos, them, ksq, rsq, kend, rend) {
            list.push(Move::castle(ksq, rsq));
        }
    }

    if pos.can_castle_queenside(us) {
        let rsq = pos.initial_queenside_rook_square(us);
        let kend = us.relative_square(C1);
        let rend = us.relative_square(D1);
        if castle_path_ok(pos, them, ksq, rsq, kend, rend)
            && !queenside_corner_blocked(pos, us, rsq)
        {
            list.push(Move::castle(ksq, rsq));
        }
    }
}

/// Every square the king crosses (endpoints included) must be empty apart
/// from the king and rook themselves, and unattacked; every square the rook
/// crosses must be empty apart from the two of them.
fn castle_path_ok(
    pos: &Position,
    them: Side,
    ksq: Square,
    rsq: Square,
    kend: Square,
    rend: Square,
) -> bool {
    for sq in square_span(ksq, kend) {
        if (sq != ksq && sq != rsq && !pos.square_is_empty(sq)) || pos.square_is_attacked(sq, them)
        {
            return false;
        }
    }
    for sq in square_span(rsq, rend) {
        if sq != ksq && sq != rsq && !pos.square_is_empty(sq) {
            return false;
        }
    }
    true
}

/// A rook starting on the b-file leaves its corner square uncovered; castling
/// with an enemy rook or queen sitting there would land the king in a
/// discovered check down the back rank.
fn queenside_corner_blocked(pos: &Position, us: Side, rsq: Square) -> bool {
    if rsq.file() != 1 {
        return false;
    }
    matches!(
        pos.piece_at(rsq.shifted(-1)),
        Some((Piece::Rook | Piece::Queen, side)) if side != us
    )
}

/// Closed interval of squares between two squares on one rank.
fn square_span(a: Square, b: Square) -> impl Iterator<Item = Square> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (lo as u8..=hi as u8).map(Square::from_u8)
}
