//! Pawn move generation. One routine per category, parameterised over the
//! side to move: the signed shifts of `BitBoard::shift` stand in for the
//! mirrored per-colour code a raw `u64 <<`/`>>` split would force.

use crate::bitboard::Direction::*;
use crate::bitboard::{BitBoard, Direction, Square, RANKS};
use crate::position::{Move, Piece, Position, Side};

use super::MoveList;

pub(super) struct PawnSetup {
    pub(super) up: Direction,
    pub(super) up_east: Direction,
    pub(super) up_west: Direction,
    /// Rank a pawn promotes on.
    pub(super) promotion_rank: BitBoard,
    /// Rank a single push from the start rank lands on; pushing on from here
    /// completes a double push.
    pub(super) third_rank: BitBoard,
}

pub(super) const fn setup(side: Side) -> PawnSetup {
    match side {
        Side::White => PawnSetup {
            up: North,
            up_east: NorthEast,
            up_west: NorthWest,
            promotion_rank: RANKS[7],
            third_rank: RANKS[2],
        },
        Side::Black => PawnSetup {
            up: South,
            up_east: SouthEast,
            up_west: SouthWest,
            promotion_rank: RANKS[0],
            third_rank: RANKS[5],
        },
    }
}

/// The square a pawn moved from, given where it landed.
pub(super) fn push_origin(to: Square, dir: Direction) -> Square {
    to.shifted(-dir.delta())
}

pub(super) fn double_push_origin(to: Square, up: Direction) -> Square {
    to.shifted(-2 * up.delta())
}

/// Pawn captures, queen promotions (capturing and quiet) and en passant.
pub(super) fn captures(pos: &Position, us: Side, list: &mut MoveList) {
    let setup = setup(us);
    let pawns = pos.pawns(us);
    let enemy_pieces = pos.pieces_of_color(us.opposite());

    for dir in [setup.up_east, setup.up_west] {
        let atks = pawns.shift(dir) & enemy_pieces;

        let mut promotions = atks & setup.promotion_rank;
        while !promotions.is_empty() {
            let to = promotions.pop_lsb();
            list.push(Move::promotion(push_origin(to, dir), to, Piece::Queen));
        }

        let mut plain = atks & !setup.promotion_rank;
        while !plain.is_empty() {
            let to = plain.pop_lsb();
            list.push(Move::new(push_origin(to, dir), to));
        }
    }

    // Quiet queen promotions
    let mut promotions = pawns.shift(setup.up) & pos.empty_squares() & setup.promotion_rank;
    while !promotions.is_empty() {
        let to = promotions.pop_lsb();
        list.push(Move::promotion(push_origin(to, setup.up), to, Piece::Queen));
    }

    if let Some(ep_square) = pos.ep_square() {
        let mut froms = pos.pawn_attacks(us.opposite(), ep_square) & pawns;
        while !froms.is_empty() {
            list.push(Move::en_passant(froms.pop_lsb(), ep_square));
        }
    }
}

/// Pawn pushes, double pushes and every under-promotion (the capturing ones
/// included; only queen promotions travel with the captures).
pub(super) fn noncaptures(pos: &Position, us: Side, list: &mut MoveList) {
    let setup = setup(us);
    let pawns = pos.pawns(us);
    let enemy_pieces = pos.pieces_of_color(us.opposite());
    let empty_squares = pos.empty_squares();

    for dir in [setup.up_east, setup.up_west] {
        let mut underpromotions = pawns.shift(dir) & enemy_pieces & setup.promotion_rank;
        while !underpromotions.is_empty() {
            let to = underpromotions.pop_lsb();
            let from = push_origin(to, dir);
            for promoted in [Piece::Rook, Piece::Bishop, Piece::Knight] {
                list.push(Move::promotion(from, to, promoted));
            }
        }
    }

    let pushes = pawns.shift(setup.up) & empty_squares;

    let mut underpromotions = pushes & setup.promotion_rank;
    while !underpromotions.is_empty() {
        let to = underpromotions.pop_lsb();
        let from = push_origin(to, setup.up);
        for promoted in [Piece::Rook, Piece::Bishop, Piece::Knight] {
            list.push(Move::promotion(from, to, promoted));
        }
    }

    let mut plain = pushes & !setup.promotion_rank;
    while !plain.is_empty() {
        let to = plain.pop_lsb();
        list.push(Move::new(push_origin(to, setup.up), to));
    }

    let mut doubles = (pushes & setup.third_rank).shift(setup.up) & empty_squares;
    while !doubles.is_empty() {
        let to = doubles.pop_lsb();
        list.push(Move::new(double_push_origin(to, setup.up), to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::Square::*;
    use std::collections::HashSet;
    use test_case::test_case;
    use testresult::TestResult;

    fn collect(fen: &str, gen: fn(&Position, Side, &mut MoveList)) -> HashSet<Move> {
        let pos = Position::from_fen(fen).unwrap();
        let mut list = MoveList::new();
        gen(&pos, pos.side_to_move(), &mut list);
        list.into_iter().collect()
    }

    #[test]
    fn test_captures_both_diagonals() -> TestResult {
        let got = collect("4k3/8/8/3p1p2/4P3/8/8/4K3 w - - 0 1", captures);
        let want = HashSet::from([Move::new(E4, D5), Move::new(E4, F5)]);
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn test_captures_promotion_is_queen_only() -> TestResult {
        let got = collect("1n2k3/2P5/8/8/8/8/8/4K3 w - - 0 1", captures);
        let want = HashSet::from([
            Move::promotion(C7, B8, Piece::Queen),
            Move::promotion(C7, C8, Piece::Queen),
        ]);
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn test_captures_en_passant_both_pawns() -> TestResult {
        let got = collect("4k3/8/8/3PpP2/8/8/8/4K3 w - e6 0 1", captures);
        let want = HashSet::from([Move::en_passant(D5, E6), Move::en_passant(F5, E6)]);
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn test_noncaptures_underpromotions() -> TestResult {
        let got = collect("1n2k3/2P5/8/8/8/8/8/4K3 w - - 0 1", noncaptures);
        let want = HashSet::from([
            Move::promotion(C7, B8, Piece::Rook),
            Move::promotion(C7, B8, Piece::Bishop),
            Move::promotion(C7, B8, Piece::Knight),
            Move::promotion(C7, C8, Piece::Rook),
            Move::promotion(C7, C8, Piece::Bishop),
            Move::promotion(C7, C8, Piece::Knight),
        ]);
        assert_eq!(got, want);
        Ok(())
    }

    #[test_case("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", HashSet::from([
        Move::new(E2, E3), Move::new(E2, E4),
    ]) ; "double push open")]
    #[test_case("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", HashSet::from([
        Move::new(E2, E3),
    ]) ; "double push blocked at landing")]
    #[test_case("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", HashSet::<Move>::new() ; "push blocked")]
    #[test_case("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1", HashSet::from([
        Move::new(E7, E6), Move::new(E7, E5),
    ]) ; "black double push")]
    fn test_noncaptures_pushes(fen: &str, want: HashSet<Move>) {
        assert_eq!(collect(fen, noncaptures), want);
    }

    #[test]
    fn test_no_wrap_around_files() -> TestResult {
        // A naive +7/+9 shift would let the h4 pawn "capture" the rook on a6
        // across the board edge.
        let got = collect("4k3/8/r7/6r1/P6P/8/8/4K3 w - - 0 1", captures);
        let want = HashSet::from([Move::new(H4, G5)]);
        assert_eq!(got, want);
        Ok(())
    }
}
