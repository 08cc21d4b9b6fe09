pub mod bitboard;
pub mod move_gen;
pub mod perft;
pub mod position;

pub use bitboard::{BitBoard, Square};
pub use move_gen::{
    gen_captures, gen_checks, gen_evasions, gen_legal_moves, gen_move_if_legal, gen_noncaptures,
    MoveList,
};
pub use perft::{perft, perft_full, PerftDepthResult, PerftResult};
pub use position::{FenParseError, Move, MoveKind, Piece, Position, PositionError, Side};
