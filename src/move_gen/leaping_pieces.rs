//! Knight, king and pawn attack tables, filled once on first use.

use static_init::dynamic;
use strum::IntoEnumIterator;

use crate::bitboard::Direction::{self, *};
use crate::bitboard::{BitBoard, Square};
use crate::position::Side;

struct SquareToAttackTable([BitBoard; 64]);

impl SquareToAttackTable {
    fn get(&self, square: Square) -> BitBoard {
        self.0[square as usize]
    }
}

struct ColoredSquareToAttackTable {
    white: SquareToAttackTable,
    black: SquareToAttackTable,
}

impl ColoredSquareToAttackTable {
    fn get(&self, side: Side) -> &SquareToAttackTable {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }
}

#[dynamic]
static PAWN_ATKS: ColoredSquareToAttackTable = calc_pawn_atks();

#[dynamic]
static KNIGHT_ATKS: SquareToAttackTable = calc_knight_atks();

#[dynamic]
static KING_ATKS: SquareToAttackTable = calc_king_atks();

pub(crate) fn pawn_attacks(side: Side, square: Square) -> BitBoard {
    PAWN_ATKS.get(side).get(square)
}

pub(crate) fn knight_attacks(square: Square) -> BitBoard {
    KNIGHT_ATKS.get(square)
}

pub(crate) fn king_attacks(square: Square) -> BitBoard {
    KING_ATKS.get(square)
}

fn table_from_shifts(shift_chains: &[&[Direction]]) -> SquareToAttackTable {
    let bbs: [BitBoard; 64] = Square::iter()
        .map(|sq| BitBoard::from_square_shifts(sq, shift_chains))
        .collect::<Vec<BitBoard>>()
        .try_into()
        .unwrap();
    SquareToAttackTable(bbs)
}

fn calc_knight_atks() -> SquareToAttackTable {
    table_from_shifts(&[
        &[North, NorthEast],
        &[North, NorthWest],
        &[South, SouthEast],
        &[South, SouthWest],
        &[East, NorthEast],
        &[East, SouthEast],
        &[West, NorthWest],
        &[West, SouthWest],
    ])
}

fn calc_king_atks() -> SquareToAttackTable {
    table_from_shifts(&[
        &[North],
        &[NorthEast],
        &[East],
        &[SouthEast],
        &[South],
        &[SouthWest],
        &[West],
        &[NorthWest],
    ])
}

// Attack squares are kept for every rank, including ranks no pawn can stand
// on: reverse lookups from a back-rank king square rely on them.
fn calc_pawn_atks() -> ColoredSquareToAttackTable {
    ColoredSquareToAttackTable {
        white: table_from_shifts(&[&[NorthEast], &[NorthWest]]),
        black: table_from_shifts(&[&[SouthEast], &[SouthWest]]),
    }
}
