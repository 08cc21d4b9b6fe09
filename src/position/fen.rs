use std::str::FromStr;

use crate::bitboard::Square::*;
use crate::bitboard::Square;

use super::{CastlingRights, Piece, Pieces, Position, Side, Sides, State};

#[derive(thiserror::Error, Debug)]
pub enum FenParseError {
    #[error("num fields: want 6 got {0}")]
    NumFields(usize),

    #[error("piece placement: got {0}, err at {1}")]
    PiecePlacement(String, usize),

    #[error("char -> piece: got {0}")]
    FromCharPiece(char),

    #[error("side to move: want 'w'|'b' got {0}")]
    SideToMove(String),

    #[error("castling rights: got {0}, err at idx {1}")]
    CastlingRights(String, usize),

    #[error("en passant target: got {0}")]
    EnPassantTarget(String),

    #[error("halfmove clock: got {0}")]
    HalfmoveClock(String),

    #[error("full move counter: got {0}")]
    FullMoveCounter(String),
}

const FEN_SQUARE_ORDER: [Square; 64] = [
    A8, B8, C8, D8, E8, F8, G8, H8, A7, B7, C7, D7, E7, F7, G7, H7, A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5, A4, B4, C4, D4, E4, F4, G4, H4, A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2, A1, B1, C1, D1, E1, F1, G1, H1,
];

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let fields = fen.split(' ').collect::<Vec<&str>>();

        if fields.len() != 6 {
            Err(FenParseError::NumFields(fields.len()))?
        }

        let (sides, pieces) = pieces_from_fen(fields[0])?;

        let to_move = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            _ => Err(FenParseError::SideToMove(String::from(fields[1])))?,
        };

        let half_move_clock = fields[4]
            .parse::<u8>()
            .map_err(|_| FenParseError::HalfmoveClock(fields[4].to_string()))?;

        let full_move_counter = fields[5]
            .parse()
            .map_err(|_| FenParseError::FullMoveCounter(fields[5].to_string()))?;

        let state = State {
            castling_rights: castling_rights_from_fen(fields[2])?,
            en_passant_target: en_passant_target_from_fen(fields[3])?,
            half_move_clock,
            to_move,
            full_move_counter,
        };

        Ok(Position {
            sides,
            pieces,
            state,
        })
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::with_capacity(64);
        let mut curr_empty_count = 0;

        for (idx, &sq) in FEN_SQUARE_ORDER.iter().enumerate() {
            if let Some((piece, side)) = self.piece_at(sq) {
                if curr_empty_count != 0 {
                    placement += &curr_empty_count.to_string();
                    curr_empty_count = 0;
                }
                let piece_char: char = if side == Side::White {
                    <Piece as Into<char>>::into(piece).to_ascii_uppercase()
                } else {
                    piece.into()
                };
                placement.push(piece_char);
            } else {
                curr_empty_count += 1;
            }
            if (idx + 1) % 8 == 0 {
                if curr_empty_count != 0 {
                    placement += &curr_empty_count.to_string();
                    curr_empty_count = 0;
                }
                if idx != 63 {
                    placement += "/";
                }
            }
        }

        let to_move = if self.state.to_move == Side::White {
            'w'
        } else {
            'b'
        };

        let mut castling = String::with_capacity(4);
        if self.state.castling_rights.white_king_side {
            castling += "K";
        }
        if self.state.castling_rights.white_queen_side {
            castling += "Q";
        }
        if self.state.castling_rights.black_king_side {
            castling += "k";
        }
        if self.state.castling_rights.black_queen_side {
            castling += "q";
        }
        if castling.is_empty() {
            castling += "-";
        }

        let en_passant = match self.state.en_passant_target {
            Some(ep_target) => ep_target.to_string().to_ascii_lowercase(),
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            placement,
            to_move,
            castling,
            en_passant,
            self.state.half_move_clock,
            self.state.full_move_counter
        )
    }
}

fn pieces_from_fen(placement: &str) -> Result<(Sides, Pieces), FenParseError> {
    let mut sides = Sides::new();
    let mut pieces = Pieces::new();
    let mut sq_idx = 0;

    for (ch_idx, ch) in placement.chars().enumerate() {
        if let Ok(piece) = Piece::try_from(ch.to_ascii_lowercase()) {
            let &square = FEN_SQUARE_ORDER.get(sq_idx).ok_or_else(|| {
                FenParseError::PiecePlacement(placement.to_string(), ch_idx)
            })?;
            let side = if ch.is_uppercase() {
                Side::White
            } else {
                Side::Black
            };

            sides.get_mut(side).set_square(square);
            pieces.get_mut(piece).get_mut(side).set_square(square);

            sq_idx += 1;
        } else if let Some(digit) = ch.to_digit(10) {
            sq_idx += digit as usize;
        } else if ch != '/' {
            Err(FenParseError::PiecePlacement(
                placement.to_string(),
                ch_idx,
            ))?
        }
    }

    Ok((sides, pieces))
}

fn castling_rights_from_fen(castling_str: &str) -> Result<CastlingRights, FenParseError> {
    if castling_str.is_empty() || castling_str == "-" {
        return Ok(CastlingRights::new(false, false, false, false));
    }

    let mut rights = CastlingRights::new(false, false, false, false);

    for (idx, ch) in castling_str.chars().enumerate() {
        let flag = match ch {
            'K' => &mut rights.white_king_side,
            'Q' => &mut rights.white_queen_side,
            'k' => &mut rights.black_king_side,
            'q' => &mut rights.black_queen_side,
            _ => {
                return Err(FenParseError::CastlingRights(castling_str.to_string(), idx));
            }
        };
        if *flag {
            return Err(FenParseError::CastlingRights(castling_str.to_string(), idx));
        }
        *flag = true;
    }

    Ok(rights)
}

fn en_passant_target_from_fen(ep_str: &str) -> Result<Option<Square>, FenParseError> {
    if ep_str == "-" {
        return Ok(None);
    }

    // FEN uses lowercase square names, Square's FromStr wants uppercase
    Square::from_str(&ep_str.to_uppercase())
        .map_err(|_| FenParseError::EnPassantTarget(ep_str.to_string()))
        .map(Some)
}
