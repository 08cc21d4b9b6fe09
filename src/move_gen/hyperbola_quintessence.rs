//! Occupancy-parameterised sliding-piece attacks via hyperbola quintessence:
//! the o^(o-2r) fill along the file/diagonal masks, plus a precomputed
//! first-rank attack table for rank moves.

use crate::bitboard::{BitBoard, Square};

use super::masks::MASKS_LIST;
use super::masks::RANK_ATKS;

pub(crate) fn bishop_attacks_bb(square: Square, occupancy: BitBoard) -> BitBoard {
    let masks = MASKS_LIST.get(square);
    hyperbola(occupancy, masks.diag, masks.bit) | hyperbola(occupancy, masks.anti_diag, masks.bit)
}

pub(crate) fn rook_attacks_bb(square: Square, occupancy: BitBoard) -> BitBoard {
    let masks = MASKS_LIST.get(square);
    hyperbola(occupancy, masks.file, masks.bit) | rank_attacks(occupancy, square)
}

pub(crate) fn queen_attacks_bb(square: Square, occupancy: BitBoard) -> BitBoard {
    bishop_attacks_bb(square, occupancy) | rook_attacks_bb(square, occupancy)
}

/// Queen attacks on an empty board: the four full lines through the square.
pub(crate) fn queen_pseudo_attacks(square: Square) -> BitBoard {
    let masks = MASKS_LIST.get(square);
    masks.file | masks.rank | masks.diag | masks.anti_diag
}

fn hyperbola(occupancy: BitBoard, mask: BitBoard, bit_mask: BitBoard) -> BitBoard {
    let mut forward = occupancy & mask;
    let mut reverse = forward.swap_bytes();
    forward -= bit_mask;
    reverse -= bit_mask.swap_bytes();
    forward ^= reverse.swap_bytes();
    forward &= mask;
    forward
}

fn rank_attacks(occupancy: BitBoard, square: Square) -> BitBoard {
    let occ_val = (occupancy & !BitBoard::from_square(square)).to_val();
    let sq_idx = square as u8;

    let file = usize::from(sq_idx & 7);
    let rank_x8 = sq_idx & 56;

    // Twice the inner six occupancy bits, used as the table row.
    let rank_occ_x2 = ((occ_val >> rank_x8) & (2 * 63)) as usize;
    let atks: u64 = RANK_ATKS[4 * rank_occ_x2 + file].into();

    BitBoard::from_val(atks << rank_x8)
}

#[cfg(test)]
mod tests {
    use super::Square::*;
    use super::*;
    use test_case::test_case;

    #[test_case(H4, BitBoard::from_squares(&[]), BitBoard::from_squares(&[A4, B4, C4, D4, E4, F4, G4]) ; "empty")]
    #[test_case(D4, BitBoard::from_squares(&[B4]), BitBoard::from_squares(&[B4, C4, E4, F4, G4, H4]) ; "one side")]
    #[test_case(D4, BitBoard::from_squares(&[A4, B4]), BitBoard::from_squares(&[B4, C4, E4, F4, G4, H4]) ; "shadowed blocker")]
    #[test_case(D4, BitBoard::from_squares(&[A4, F4]), BitBoard::from_squares(&[A4, B4, C4, E4, F4]) ; "both sides")]
    #[test_case(D4, BitBoard::from_squares(&[C4, E4]), BitBoard::from_squares(&[C4, E4]) ; "adjacent blockers")]
    fn test_rank_attacks(square: Square, occupancy: BitBoard, want: BitBoard) {
        assert_eq!(rank_attacks(occupancy, square), want);
    }

    #[test_case(D4, BitBoard::from_squares(&[]), BitBoard::from_squares(&[A1, B2, C3, E5, F6, G7, H8, C5, B6, A7, E3, F2, G1]) ; "no blockers")]
    #[test_case(D4, BitBoard::from_squares(&[B2, A7, E5]), BitBoard::from_squares(&[B2, C3, E5, C5, B6, A7, E3, F2, G1]) ; "blockers")]
    #[test_case(D4, BitBoard::from_squares(&[B2, A7, E5, A1, B1, F8, G6, C4]), BitBoard::from_squares(&[B2, C3, E5, C5, B6, A7, E3, F2, G1]) ; "shadowed blockers")]
    fn test_bishop_attacks(square: Square, occupancy: BitBoard, want: BitBoard) {
        assert_eq!(bishop_attacks_bb(square, occupancy), want);
    }

    #[test_case(D4, BitBoard::from_squares(&[]), BitBoard::from_squares(&[D1, D2, D3, D5, D6, D7, D8, A4, B4, C4, E4, F4, G4, H4]) ; "no blockers")]
    #[test_case(D4, BitBoard::from_squares(&[A4, D7, F4, D3]), BitBoard::from_squares(&[D3, D5, D6, D7, A4, B4, C4, E4, F4]) ; "blockers")]
    #[test_case(D4, BitBoard::from_squares(&[A4, D7, D8, F4, D3, D2, D1]), BitBoard::from_squares(&[D3, D5, D6, D7, A4, B4, C4, E4, F4]) ; "shadowed blockers")]
    #[test_case(E3, BitBoard::from_squares(&[E3]), BitBoard::from_squares(&[E1, E2, E4, E5, E6, E7, E8, A3, B3, C3, D3, F3, G3, H3]) ; "self occupancy ignored")]
    fn test_rook_attacks(square: Square, occupancy: BitBoard, want: BitBoard) {
        assert_eq!(rook_attacks_bb(square, occupancy), want);
    }

    #[test_case(D4, BitBoard::from_squares(&[D5, B2, H4]), BitBoard::from_squares(&[B2, C3, E5, F6, G7, H8, C5, B6, A7, E3, F2, G1, D1, D2, D3, D5, A4, B4, C4, E4, F4, G4, H4]) ; "blockers")]
    fn test_queen_attacks(square: Square, occupancy: BitBoard, want: BitBoard) {
        assert_eq!(queen_attacks_bb(square, occupancy), want);
    }

    #[test]
    fn test_queen_pseudo_attacks_match_empty_board() {
        for square in [A1, D4, H8, B7, E1] {
            assert_eq!(
                queen_pseudo_attacks(square),
                queen_attacks_bb(square, BitBoard::empty())
            );
        }
    }
}
