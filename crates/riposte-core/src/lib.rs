//! Core chess types: board representation, attack tables, move application
//! and move generation.

pub mod attacks;
mod apply;
mod bitboard;
mod board;
mod castling;
mod chess_move;
mod error;
mod fen;
pub mod movegen;
mod piece;
mod square;

pub use bitboard::Bitboard;
pub use board::{Board, PrettyBoard};
pub use castling::{CastleRights, CastleSide, CastlingPath};
pub use chess_move::{MAX_MOVES, Move, MoveKind, MoveList, PromotionPiece};
pub use error::{BoardError, FenError};
pub use fen::STARTING_FEN;
pub use movegen::{generate_legal_moves, generate_pseudo_moves};
pub use piece::{Color, Piece, PieceKind};
pub use square::Square;
