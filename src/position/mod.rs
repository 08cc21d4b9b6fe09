use std::fmt;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::bitboard::Square::*;
use crate::bitboard::{self, BitBoard, Square};
use crate::move_gen::{hyperbola_quintessence as sliding, leaping_pieces as leaping};

mod fen;
pub use fen::FenParseError;

#[derive(thiserror::Error, Debug)]
pub enum PositionError {
    #[error("no piece at {0}")]
    MoveNoPiece(String),

    #[error("{0} is not to move, for move {1}")]
    MoveNotToMove(String, String),
}

#[derive(Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Maps a white-perspective square to this side's perspective.
    pub(crate) fn relative_square(self, sq: Square) -> Square {
        match self {
            Side::White => sq,
            Side::Black => sq.flip_rank(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    pub(crate) fn is_slider(&self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> char {
        match piece {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = FenParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'p' => Ok(Piece::Pawn),
            'n' => Ok(Piece::Knight),
            'b' => Ok(Piece::Bishop),
            'r' => Ok(Piece::Rook),
            'q' => Ok(Piece::Queen),
            'k' => Ok(Piece::King),
            _ => Err(FenParseError::FromCharPiece(value)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    EnPassant,
    ShortCastle,
    LongCastle,
    Promotion(Piece),
}

/// A move in from/to/kind form. The encoding is private; use the
/// constructors and accessors. Castle moves encode king square -> rook
/// square, which keeps them unambiguous for any rook start file.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    src: Square,
    dest: Square,
    kind: MoveKind,
}

impl Move {
    pub fn new(src: Square, dest: Square) -> Move {
        Self {
            src,
            dest,
            kind: MoveKind::Normal,
        }
    }

    pub fn promotion(src: Square, dest: Square, promoted: Piece) -> Move {
        debug_assert!(
            matches!(
                promoted,
                Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen
            ),
            "cannot promote to {}",
            promoted
        );
        Self {
            src,
            dest,
            kind: MoveKind::Promotion(promoted),
        }
    }

    pub fn en_passant(src: Square, dest: Square) -> Move {
        Self {
            src,
            dest,
            kind: MoveKind::EnPassant,
        }
    }

    pub fn castle(king_sq: Square, rook_sq: Square) -> Move {
        let kind = if rook_sq.file() > king_sq.file() {
            MoveKind::ShortCastle
        } else {
            MoveKind::LongCastle
        };
        Self {
            src: king_sq,
            dest: rook_sq,
            kind,
        }
    }

    pub fn src(&self) -> Square {
        self.src
    }

    pub fn dest(&self) -> Square {
        self.dest
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn promotion_piece(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Promotion(piece) => Some(piece),
            _ => None,
        }
    }

    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::ShortCastle | MoveKind::LongCastle)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dest)?;
        match self.kind {
            MoveKind::Normal => Ok(()),
            MoveKind::EnPassant => write!(f, " (ep)"),
            MoveKind::ShortCastle => write!(f, " (O-O)"),
            MoveKind::LongCastle => write!(f, " (O-O-O)"),
            MoveKind::Promotion(piece) => write!(f, " ({})", piece),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let src = self.src.to_string().to_ascii_lowercase();
        let dest = self.dest.to_string().to_ascii_lowercase();
        match self.kind {
            MoveKind::Promotion(piece) => {
                write!(f, "{}{}{}", src, dest, <Piece as Into<char>>::into(piece))
            }
            _ => write!(f, "{}{}", src, dest),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Sides {
    white: BitBoard,
    black: BitBoard,
}

impl Sides {
    fn new() -> Self {
        Self {
            white: BitBoard::empty(),
            black: BitBoard::empty(),
        }
    }

    fn start() -> Self {
        Self {
            white: BitBoard::from_squares(&[
                A1, B1, C1, D1, E1, F1, G1, H1, A2, B2, C2, D2, E2, F2, G2, H2,
            ]),
            black: BitBoard::from_squares(&[
                A7, B7, C7, D7, E7, F7, G7, H7, A8, B8, C8, D8, E8, F8, G8, H8,
            ]),
        }
    }

    pub(crate) fn get(&self, side: Side) -> BitBoard {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut BitBoard {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Pieces {
    pawns: Sides,
    knights: Sides,
    bishops: Sides,
    rooks: Sides,
    queens: Sides,
    kings: Sides,
}

impl Pieces {
    fn new() -> Self {
        Self {
            pawns: Sides::new(),
            knights: Sides::new(),
            bishops: Sides::new(),
            rooks: Sides::new(),
            queens: Sides::new(),
            kings: Sides::new(),
        }
    }

    fn start() -> Self {
        Self {
            pawns: Sides {
                white: BitBoard::from_squares(&[A2, B2, C2, D2, E2, F2, G2, H2]),
                black: BitBoard::from_squares(&[A7, B7, C7, D7, E7, F7, G7, H7]),
            },
            knights: Sides {
                white: BitBoard::from_squares(&[B1, G1]),
                black: BitBoard::from_squares(&[B8, G8]),
            },
            bishops: Sides {
                white: BitBoard::from_squares(&[C1, F1]),
                black: BitBoard::from_squares(&[C8, F8]),
            },
            rooks: Sides {
                white: BitBoard::from_squares(&[A1, H1]),
                black: BitBoard::from_squares(&[A8, H8]),
            },
            queens: Sides {
                white: BitBoard::from_squares(&[D1]),
                black: BitBoard::from_squares(&[D8]),
            },
            kings: Sides {
                white: BitBoard::from_squares(&[E1]),
                black: BitBoard::from_squares(&[E8]),
            },
        }
    }

    pub(crate) fn get(&self, piece: Piece) -> &Sides {
        match piece {
            Piece::Pawn => &self.pawns,
            Piece::Knight => &self.knights,
            Piece::Bishop => &self.bishops,
            Piece::Rook => &self.rooks,
            Piece::Queen => &self.queens,
            Piece::King => &self.kings,
        }
    }

    fn get_mut(&mut self, piece: Piece) -> &mut Sides {
        match piece {
            Piece::Pawn => &mut self.pawns,
            Piece::Knight => &mut self.knights,
            Piece::Bishop => &mut self.bishops,
            Piece::Rook => &mut self.rooks,
            Piece::Queen => &mut self.queens,
            Piece::King => &mut self.kings,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    fn start() -> Self {
        Self::new(true, true, true, true)
    }

    pub(crate) fn new(
        white_king_side: bool,
        white_queen_side: bool,
        black_king_side: bool,
        black_queen_side: bool,
    ) -> Self {
        Self {
            white_king_side,
            white_queen_side,
            black_king_side,
            black_queen_side,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub to_move: Side,
    pub half_move_clock: u8,
    pub en_passant_target: Option<Square>,
    pub castling_rights: CastlingRights,
    pub full_move_counter: u16,
}

impl State {
    fn start() -> Self {
        Self {
            to_move: Side::White,
            half_move_clock: 0,
            en_passant_target: None,
            castling_rights: CastlingRights::start(),
            full_move_counter: 1,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    pub state: State,
    pub(crate) sides: Sides,
    pub(crate) pieces: Pieces,
}

impl Position {
    pub fn start() -> Self {
        Self {
            state: State::start(),
            sides: Sides::start(),
            pieces: Pieces::start(),
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.state.to_move
    }

    pub fn pieces_of_color(&self, side: Side) -> BitBoard {
        self.sides.get(side)
    }

    pub(crate) fn piece_bb(&self, piece: Piece, side: Side) -> BitBoard {
        self.pieces.get(piece).get(side)
    }

    pub fn pawns(&self, side: Side) -> BitBoard {
        self.piece_bb(Piece::Pawn, side)
    }

    pub fn knights(&self, side: Side) -> BitBoard {
        self.piece_bb(Piece::Knight, side)
    }

    pub fn bishops(&self, side: Side) -> BitBoard {
        self.piece_bb(Piece::Bishop, side)
    }

    pub fn rooks(&self, side: Side) -> BitBoard {
        self.piece_bb(Piece::Rook, side)
    }

    pub fn queens(&self, side: Side) -> BitBoard {
        self.piece_bb(Piece::Queen, side)
    }

    pub fn kings(&self, side: Side) -> BitBoard {
        self.piece_bb(Piece::King, side)
    }

    pub(crate) fn bishops_and_queens(&self, side: Side) -> BitBoard {
        self.bishops(side) | self.queens(side)
    }

    pub(crate) fn rooks_and_queens(&self, side: Side) -> BitBoard {
        self.rooks(side) | self.queens(side)
    }

    /// All sliding pieces of both colors.
    pub(crate) fn sliders(&self) -> BitBoard {
        self.bishops_and_queens(Side::White)
            | self.rooks_and_queens(Side::White)
            | self.bishops_and_queens(Side::Black)
            | self.rooks_and_queens(Side::Black)
    }

    pub fn occupied_squares(&self) -> BitBoard {
        self.sides.get(Side::White) | self.sides.get(Side::Black)
    }

    pub fn empty_squares(&self) -> BitBoard {
        !self.occupied_squares()
    }

    pub fn square_is_empty(&self, sq: Square) -> bool {
        !self.occupied_squares().is_square_set(sq)
    }

    pub fn piece_at(&self, square: Square) -> Option<(Piece, Side)> {
        for piece in Piece::iter() {
            let sides = self.pieces.get(piece);
            if sides.get(Side::White).is_square_set(square) {
                return Some((piece, Side::White));
            } else if sides.get(Side::Black).is_square_set(square) {
                return Some((piece, Side::Black));
            }
        }
        None
    }

    pub fn king_square(&self, side: Side) -> Square {
        self.kings(side).get_lsb()
    }

    pub fn ep_square(&self) -> Option<Square> {
        self.state.en_passant_target
    }

    pub fn can_castle(&self, side: Side) -> bool {
        self.can_castle_kingside(side) || self.can_castle_queenside(side)
    }

    pub fn can_castle_kingside(&self, side: Side) -> bool {
        match side {
            Side::White => self.state.castling_rights.white_king_side,
            Side::Black => self.state.castling_rights.black_king_side,
        }
    }

    pub fn can_castle_queenside(&self, side: Side) -> bool {
        match side {
            Side::White => self.state.castling_rights.white_queen_side,
            Side::Black => self.state.castling_rights.black_queen_side,
        }
    }

    pub(crate) fn initial_kingside_rook_square(&self, side: Side) -> Square {
        side.relative_square(H1)
    }

    pub(crate) fn initial_queenside_rook_square(&self, side: Side) -> Square {
        side.relative_square(A1)
    }

    pub(crate) fn pawn_attacks(&self, side: Side, sq: Square) -> BitBoard {
        leaping::pawn_attacks(side, sq)
    }

    pub(crate) fn knight_attacks(&self, sq: Square) -> BitBoard {
        leaping::knight_attacks(sq)
    }

    pub(crate) fn king_attacks(&self, sq: Square) -> BitBoard {
        leaping::king_attacks(sq)
    }

    pub(crate) fn bishop_attacks(&self, sq: Square) -> BitBoard {
        sliding::bishop_attacks_bb(sq, self.occupied_squares())
    }

    pub(crate) fn rook_attacks(&self, sq: Square) -> BitBoard {
        sliding::rook_attacks_bb(sq, self.occupied_squares())
    }

    pub(crate) fn queen_attacks(&self, sq: Square) -> BitBoard {
        sliding::queen_attacks_bb(sq, self.occupied_squares())
    }

    /// Whether the piece on `from` attacks `to` under the current occupancy.
    pub(crate) fn piece_attacks_square(&self, from: Square, to: Square) -> bool {
        match self.piece_at(from) {
            Some((Piece::Pawn, side)) => self.pawn_attacks(side, from).is_square_set(to),
            Some((Piece::Knight, _)) => self.knight_attacks(from).is_square_set(to),
            Some((Piece::Bishop, _)) => self.bishop_attacks(from).is_square_set(to),
            Some((Piece::Rook, _)) => self.rook_attacks(from).is_square_set(to),
            Some((Piece::Queen, _)) => self.queen_attacks(from).is_square_set(to),
            Some((Piece::King, _)) => self.king_attacks(from).is_square_set(to),
            None => false,
        }
    }

    /// Pieces of `by` attacking `sq`, computed over the given occupancy.
    /// Passing a modified occupancy lets callers ask "attacked once the king
    /// steps away" or "attacked after these pieces vanish".
    pub(crate) fn attackers_with_occ(&self, sq: Square, by: Side, occ: BitBoard) -> BitBoard {
        (self.pawn_attacks(by.opposite(), sq) & self.pawns(by))
            | (self.knight_attacks(sq) & self.knights(by))
            | (self.king_attacks(sq) & self.kings(by))
            | (sliding::bishop_attacks_bb(sq, occ) & self.bishops_and_queens(by))
            | (sliding::rook_attacks_bb(sq, occ) & self.rooks_and_queens(by))
    }

    pub fn square_is_attacked(&self, sq: Square, by: Side) -> bool {
        !self
            .attackers_with_occ(sq, by, self.occupied_squares())
            .is_empty()
    }

    /// Enemy pieces currently giving check to the side to move.
    pub fn checkers(&self) -> BitBoard {
        let us = self.state.to_move;
        self.attackers_with_occ(
            self.king_square(us),
            us.opposite(),
            self.occupied_squares(),
        )
    }

    pub fn is_check(&self) -> bool {
        !self.checkers().is_empty()
    }

    /// Own pieces of `side` that shield `side`'s king from an enemy slider.
    pub fn pinned_pieces(&self, side: Side) -> BitBoard {
        self.hidden_blockers(self.king_square(side), side.opposite(), side)
    }

    /// Own pieces of `side` whose departure would uncover a slider check on
    /// the enemy king. The king itself can be a candidate.
    pub fn discovered_check_candidates(&self, side: Side) -> BitBoard {
        self.hidden_blockers(self.king_square(side.opposite()), side, side)
    }

    /// Pieces of `blocker_side` that are the sole piece between `target` and
    /// a slider of `slider_side`.
    fn hidden_blockers(&self, target: Square, slider_side: Side, blocker_side: Side) -> BitBoard {
        let occupied = self.occupied_squares();
        let mut blockers = BitBoard::empty();

        let mut snipers = (sliding::bishop_attacks_bb(target, BitBoard::empty())
            & self.bishops_and_queens(slider_side))
            | (sliding::rook_attacks_bb(target, BitBoard::empty())
                & self.rooks_and_queens(slider_side));

        while !snipers.is_empty() {
            let sniper = snipers.pop_lsb();
            let between = bitboard::squares_between(sniper, target) & occupied;
            if between.count() == 1 {
                blockers |= between & self.pieces_of_color(blocker_side);
            }
        }
        blockers
    }

    /// Whether a pseudo-legal move leaves the mover's king safe. Requires the
    /// side to move not to be in check; evasion generation enforces legality
    /// itself.
    pub fn move_is_legal(&self, mve: Move, pinned: BitBoard) -> bool {
        let us = self.state.to_move;
        let them = us.opposite();
        let ksq = self.king_square(us);

        // Castle paths are verified attack-free at generation time.
        if mve.is_castle() {
            return true;
        }

        if mve.is_en_passant() {
            // Both the capturing and the captured pawn leave their squares;
            // test the king's rays over the resulting occupancy.
            let captured_sq = mve
                .dest()
                .shifted(if us == Side::White { -8 } else { 8 });
            let mut occ = self.occupied_squares();
            occ.clear_square(mve.src());
            occ.clear_square(captured_sq);
            occ.set_square(mve.dest());
            return (sliding::bishop_attacks_bb(ksq, occ) & self.bishops_and_queens(them))
                .is_empty()
                && (sliding::rook_attacks_bb(ksq, occ) & self.rooks_and_queens(them)).is_empty();
        }

        if mve.src() == ksq {
            // The king must be lifted off the board, or a slider ray it is
            // stepping along would appear blocked by the king itself.
            let mut occ = self.occupied_squares();
            occ.clear_square(ksq);
            return self.attackers_with_occ(mve.dest(), them, occ).is_empty();
        }

        !pinned.is_square_set(mve.src()) || bitboard::aligned(mve.src(), mve.dest(), ksq)
    }

    pub fn make_move(&mut self, mve: Move) -> Result<(), PositionError> {
        let (piece, side) = self
            .piece_at(mve.src())
            .ok_or_else(|| PositionError::MoveNoPiece(mve.src().to_string()))?;

        if side != self.state.to_move {
            return Err(PositionError::MoveNotToMove(
                side.to_string(),
                mve.to_string(),
            ));
        }
        let them = side.opposite();

        if side == Side::Black {
            self.state.full_move_counter += 1;
        }

        match mve.kind() {
            MoveKind::ShortCastle | MoveKind::LongCastle => {
                let (kend, rend) = if mve.kind() == MoveKind::ShortCastle {
                    (side.relative_square(G1), side.relative_square(F1))
                } else {
                    (side.relative_square(C1), side.relative_square(D1))
                };
                let (ksq, rsq) = (mve.src(), mve.dest());

                // Clear both before placing: king and rook may cross.
                self.sides.get_mut(side).clear_square(ksq);
                self.sides.get_mut(side).clear_square(rsq);
                self.pieces
                    .get_mut(Piece::King)
                    .get_mut(side)
                    .clear_square(ksq);
                self.pieces
                    .get_mut(Piece::Rook)
                    .get_mut(side)
                    .clear_square(rsq);
                self.sides.get_mut(side).set_square(kend);
                self.sides.get_mut(side).set_square(rend);
                self.pieces
                    .get_mut(Piece::King)
                    .get_mut(side)
                    .set_square(kend);
                self.pieces
                    .get_mut(Piece::Rook)
                    .get_mut(side)
                    .set_square(rend);

                self.clear_castling_rights(side);
                self.state.en_passant_target = None;
                self.state.half_move_clock = self.state.half_move_clock.saturating_add(1);
            }
            MoveKind::EnPassant => {
                let captured_sq = mve
                    .dest()
                    .shifted(if side == Side::White { -8 } else { 8 });
                self.sides.get_mut(them).clear_square(captured_sq);
                self.pieces
                    .get_mut(Piece::Pawn)
                    .get_mut(them)
                    .clear_square(captured_sq);
                self.sides.get_mut(side).move_piece(mve.src(), mve.dest());
                self.pieces
                    .get_mut(Piece::Pawn)
                    .get_mut(side)
                    .move_piece(mve.src(), mve.dest());

                self.state.en_passant_target = None;
                self.state.half_move_clock = 0;
            }
            MoveKind::Promotion(promoted) => {
                if let Some((captured, _)) = self.piece_at(mve.dest()) {
                    self.remove_captured(mve.dest(), captured, them);
                }
                self.sides.get_mut(side).move_piece(mve.src(), mve.dest());
                self.pieces
                    .get_mut(Piece::Pawn)
                    .get_mut(side)
                    .clear_square(mve.src());
                self.pieces
                    .get_mut(promoted)
                    .get_mut(side)
                    .set_square(mve.dest());

                self.state.en_passant_target = None;
                self.state.half_move_clock = 0;
            }
            MoveKind::Normal => {
                let captured = self.piece_at(mve.dest()).map(|(captured, _)| captured);
                if let Some(captured) = captured {
                    self.remove_captured(mve.dest(), captured, them);
                }
                self.sides.get_mut(side).move_piece(mve.src(), mve.dest());
                self.pieces
                    .get_mut(piece)
                    .get_mut(side)
                    .move_piece(mve.src(), mve.dest());

                match piece {
                    Piece::King => self.clear_castling_rights(side),
                    Piece::Rook => {
                        if mve.src() == self.initial_kingside_rook_square(side) {
                            self.clear_kingside_right(side);
                        } else if mve.src() == self.initial_queenside_rook_square(side) {
                            self.clear_queenside_right(side);
                        }
                    }
                    _ => (),
                }

                if piece == Piece::Pawn && mve.src().abs_diff(mve.dest()) == 16 {
                    let behind = mve
                        .src()
                        .shifted(if side == Side::White { 8 } else { -8 });
                    self.state.en_passant_target = Some(behind);
                } else {
                    self.state.en_passant_target = None;
                }

                if piece == Piece::Pawn || captured.is_some() {
                    self.state.half_move_clock = 0;
                } else {
                    self.state.half_move_clock = self.state.half_move_clock.saturating_add(1);
                }
            }
        }

        self.state.to_move = them;

        debug_assert!(
            !self.kings(Side::White).is_empty() && !self.kings(Side::Black).is_empty(),
            "a king left the board:\n{:?}",
            self
        );
        Ok(())
    }

    fn remove_captured(&mut self, sq: Square, piece: Piece, them: Side) {
        self.sides.get_mut(them).clear_square(sq);
        self.pieces.get_mut(piece).get_mut(them).clear_square(sq);

        if piece == Piece::Rook {
            if sq == self.initial_kingside_rook_square(them) {
                self.clear_kingside_right(them);
            } else if sq == self.initial_queenside_rook_square(them) {
                self.clear_queenside_right(them);
            }
        }
    }

    fn clear_castling_rights(&mut self, side: Side) {
        self.clear_kingside_right(side);
        self.clear_queenside_right(side);
    }

    fn clear_kingside_right(&mut self, side: Side) {
        match side {
            Side::White => self.state.castling_rights.white_king_side = false,
            Side::Black => self.state.castling_rights.black_king_side = false,
        }
    }

    fn clear_queenside_right(&mut self, side: Side) {
        match side {
            Side::White => self.state.castling_rights.white_queen_side = false,
            Side::Black => self.state.castling_rights.black_queen_side = false,
        }
    }

    /// Structural consistency: disjoint sides, piece boards covering exactly
    /// the side boards, one king each.
    pub(crate) fn is_ok(&self) -> bool {
        let white = self.sides.get(Side::White);
        let black = self.sides.get(Side::Black);
        if !(white & black).is_empty() {
            return false;
        }

        let mut all_pieces = BitBoard::empty();
        for piece in Piece::iter() {
            for side in Side::iter() {
                all_pieces |= self.piece_bb(piece, side);
            }
        }
        if all_pieces != (white | black) {
            return false;
        }

        self.kings(Side::White).count() == 1 && self.kings(Side::Black).count() == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(64 + 7);
        for rank in (0..8).rev() {
            for file in 0..8 {
                let square = Square::from_u8(rank * 8 + file);
                let ch = match self.piece_at(square) {
                    Some((piece, Side::White)) => {
                        <Piece as Into<char>>::into(piece).to_ascii_uppercase()
                    }
                    Some((piece, Side::Black)) => piece.into(),
                    None => '.',
                };
                board_str.push(ch);
            }
            if rank != 0 {
                board_str.push('\n');
            }
        }
        writeln!(f, "{}", board_str)?;
        writeln!(
            f,
            "to_move={}, half_move={}, full_move={}, en_passant={:?}, castling_rights={:?}",
            self.state.to_move,
            self.state.half_move_clock,
            self.state.full_move_counter,
            self.state.en_passant_target,
            self.state.castling_rights
        )?;
        Ok(())
    }
}
