//! FEN string parsing and serialization for [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castling::CastleRights;
use crate::error::FenError;
use crate::piece::{Color, Piece};
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    /// Parse a FEN string. The two move counters may be omitted and then
    /// default to `0 1`.
    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let mut board = Board::empty();
        parse_placement(&mut board, fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidColor { found: other.to_string() }),
        };
        board.set_side_to_move(side_to_move);
        board.set_castling(CastleRights::from_fen(fields[2])?);

        let en_passant = match fields[3] {
            "-" => None,
            field => Some(
                Square::from_algebraic(field)
                    .ok_or_else(|| FenError::InvalidEnPassant { found: field.to_string() })?,
            ),
        };
        board.set_en_passant(en_passant);

        let halfmove_clock = parse_counter(fields.get(4), "halfmove clock", 0)?;
        let fullmove_number = parse_counter(fields.get(5), "fullmove number", 1)?;
        board.set_clocks(halfmove_clock, fullmove_number);

        board.validate()?;
        Ok(board)
    }
}

fn parse_placement(board: &mut Board, field: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    // FEN lists rank 8 first.
    for (rank, text) in (0u8..8).rev().zip(ranks) {
        let mut file: u8 = 0;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file += skip as u8;
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            let sq = Square::from_coords(file, rank).ok_or(FenError::BadRankLength {
                rank: rank + 1,
                length: file as usize + 1,
            })?;
            board.put(sq, piece);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankLength { rank: rank + 1, length: file as usize });
        }
    }
    Ok(())
}

fn parse_counter(field: Option<&&str>, name: &'static str, default: u16) -> Result<u16, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text
            .parse::<u16>()
            .map_err(|_| FenError::InvalidMoveCounter { field: name, found: text.to_string() }),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty = 0u8;
            for file in 0u8..8 {
                match Square::from_coords(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => f.write_str(" -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::board::Board;
    use crate::error::FenError;
    use crate::piece::Color;
    use crate::square::Square;

    fn roundtrip(fen: &str) {
        let board: Board = fen.parse().unwrap();
        let output = board.to_string();
        assert_eq!(output, fen, "FEN roundtrip failed");
        let again: Board = output.parse().unwrap();
        assert_eq!(board, again);
    }

    #[test]
    fn roundtrip_positions() {
        roundtrip(STARTING_FEN);
        roundtrip("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2");
        roundtrip("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        roundtrip("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
        roundtrip("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn counters_are_optional() {
        let board: Board = "4k3/8/8/8/8/8/8/4K3 b - -".parse().unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.to_string(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");

        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 17".parse().unwrap();
        assert_eq!(board.halfmove_clock(), 17);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn parsed_fields() {
        let board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 3 40".parse().unwrap();
        assert_eq!(board.en_passant(), Some(Square::D6));
        assert_eq!(board.halfmove_clock(), 3);
        assert_eq!(board.fullmove_number(), 40);
        assert_eq!(board.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn error_wrong_field_count() {
        assert_eq!("e4 e5".parse::<Board>().unwrap_err(), FenError::WrongFieldCount { found: 2 });
        let seven = format!("{STARTING_FEN} extra");
        assert_eq!(seven.parse::<Board>().unwrap_err(), FenError::WrongFieldCount { found: 7 });
    }

    #[test]
    fn error_wrong_rank_count() {
        let result = "rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>();
        assert_eq!(result.unwrap_err(), FenError::WrongRankCount { found: 7 });
    }

    #[test]
    fn error_invalid_piece_char() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>();
        assert_eq!(result.unwrap_err(), FenError::InvalidPieceChar { character: 'X' });
        let result = "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>();
        assert!(result.is_err());
    }

    #[test]
    fn error_bad_rank_length() {
        let result = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>();
        assert_eq!(result.unwrap_err(), FenError::BadRankLength { rank: 7, length: 7 });
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1".parse::<Board>();
        assert_eq!(result.unwrap_err(), FenError::BadRankLength { rank: 1, length: 9 });
    }

    #[test]
    fn error_invalid_color() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1".parse::<Board>();
        assert!(matches!(result, Err(FenError::InvalidColor { .. })));
    }

    #[test]
    fn error_invalid_castling() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1".parse::<Board>();
        assert_eq!(result.unwrap_err(), FenError::InvalidCastlingChar { character: 'X' });
    }

    #[test]
    fn error_invalid_en_passant() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1".parse::<Board>();
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn error_invalid_move_counter() {
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - abc 1".parse::<Board>();
        assert_eq!(
            result.unwrap_err(),
            FenError::InvalidMoveCounter { field: "halfmove clock", found: "abc".to_string() }
        );
    }
}
