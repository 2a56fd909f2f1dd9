//! FEN 解析和生成
//!
//! 标准 FEN 格式：`<棋盘> <走棋方> <易位权> <过路兵目标格> [半回合数] [回合数]`
//!
//! 棋盘符号：
//! - 白方：P N B R Q K
//! - 黑方：p n b r q k
//! - 空格：数字 (1-8)
//!
//! 半回合数和回合数字段接受但忽略（引擎不跟踪回合计数）。

use crate::board::{Board, QueenPromotion};
use crate::types::{code_side, piece_code, Move, PieceType, Side, Square};

/// FEN 解析后的状态
#[derive(Debug, Clone)]
pub struct FenState {
    pub squares: [[i8; 8]; 8],
    pub turn: Side,
    pub white_castling: [bool; 2],
    pub black_castling: [bool; 2],
    pub white_en_passant: [bool; 8],
    pub black_en_passant: [bool; 8],
}

/// 解析 FEN 字符串
pub fn parse_fen(fen: &str) -> Result<FenState, String> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(format!(
            "Invalid FEN format: expected '<board> <turn> <castling> <en-passant>', got: {}",
            fen
        ));
    }

    let squares = parse_board(parts[0])?;
    let turn = Side::from_fen_char(parts[1].chars().next().unwrap_or(' '))
        .ok_or_else(|| format!("Invalid turn: {}", parts[1]))?;
    let (white_castling, black_castling) = parse_castling(parts[2])?;
    let (white_en_passant, black_en_passant) = parse_en_passant(parts[3])?;

    Ok(FenState {
        squares,
        turn,
        white_castling,
        black_castling,
        white_en_passant,
        black_en_passant,
    })
}

/// 解析棋盘字符串
fn parse_board(board_str: &str) -> Result<[[i8; 8]; 8], String> {
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != 8 {
        return Err(format!(
            "Invalid board: expected 8 rows, got {}",
            rows.len()
        ));
    }

    let mut squares = [[0i8; 8]; 8];

    // FEN 从上往下是 row 0（第 8 横线）到 row 7（第 1 横线）
    for (row, row_str) in rows.iter().enumerate() {
        let mut col: usize = 0;

        for ch in row_str.chars() {
            if col >= 8 {
                return Err(format!("Row {} has too many columns", 8 - row));
            }

            if ch.is_ascii_digit() {
                col += ch.to_digit(10).unwrap_or(0) as usize;
            } else {
                let piece_type = PieceType::from_fen_char(ch)
                    .ok_or_else(|| format!("Invalid piece char: {}", ch))?;
                let side = if ch.is_ascii_uppercase() {
                    Side::White
                } else {
                    Side::Black
                };
                squares[row][col] = piece_code(side, piece_type);
                col += 1;
            }
        }

        if col != 8 {
            return Err(format!("Row {} has {} columns, expected 8", 8 - row, col));
        }
    }

    Ok(squares)
}

/// 解析易位权字符串
fn parse_castling(castling_str: &str) -> Result<([bool; 2], [bool; 2]), String> {
    let mut white = [false; 2];
    let mut black = [false; 2];

    if castling_str != "-" {
        for ch in castling_str.chars() {
            match ch {
                'K' => white[1] = true,
                'Q' => white[0] = true,
                'k' => black[1] = true,
                'q' => black[0] = true,
                _ => return Err(format!("Invalid castling char: {}", ch)),
            }
        }
    }

    Ok((white, black))
}

/// 解析过路兵目标格
///
/// 第 3 横线的目标格表示白兵刚走了两格，第 6 横线表示黑兵。
fn parse_en_passant(ep_str: &str) -> Result<([bool; 8], [bool; 8]), String> {
    let mut white = [false; 8];
    let mut black = [false; 8];

    if ep_str != "-" {
        let sq = Square::from_fen_str(ep_str)
            .ok_or_else(|| format!("Invalid en passant square: {}", ep_str))?;
        match sq.row {
            5 => white[sq.col as usize] = true,
            2 => black[sq.col as usize] = true,
            _ => return Err(format!("Invalid en passant square: {}", ep_str)),
        }
    }

    Ok((white, black))
}

/// 从棋盘生成 FEN 字符串
pub fn board_to_fen(board: &Board) -> String {
    let grid = board.grid();
    let mut rows = Vec::with_capacity(8);

    for row in grid.iter() {
        let mut row_str = String::new();
        let mut empty_count = 0;

        for &code in row.iter() {
            if code == 0 {
                empty_count += 1;
                continue;
            }
            if empty_count > 0 {
                row_str.push_str(&empty_count.to_string());
                empty_count = 0;
            }
            let ch = PieceType::from_code(code)
                .map(|pt| pt.to_fen_char())
                .unwrap_or('?');
            match code_side(code) {
                Some(Side::White) => row_str.push(ch.to_ascii_uppercase()),
                _ => row_str.push(ch),
            }
        }

        if empty_count > 0 {
            row_str.push_str(&empty_count.to_string());
        }

        rows.push(row_str);
    }

    let board_str = rows.join("/");

    let mut castling = String::new();
    if board.castling_rights(Side::White)[1] {
        castling.push('K');
    }
    if board.castling_rights(Side::White)[0] {
        castling.push('Q');
    }
    if board.castling_rights(Side::Black)[1] {
        castling.push('k');
    }
    if board.castling_rights(Side::Black)[0] {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = en_passant_target(board);

    format!(
        "{} {} {} {} 0 1",
        board_str,
        board.side_to_move().to_fen_char(),
        castling,
        en_passant
    )
}

/// 当前有效的过路兵目标格
fn en_passant_target(board: &Board) -> String {
    for (col, &flag) in board.en_passant_flags(Side::White).iter().enumerate() {
        if flag {
            return Square::new(5, col as i8).to_fen_str();
        }
    }
    for (col, &flag) in board.en_passant_flags(Side::Black).iter().enumerate() {
        if flag {
            return Square::new(2, col as i8).to_fen_str();
        }
    }
    "-".to_string()
}

/// 在 FEN 上执行一个紧凑走法，返回新的 FEN
pub fn apply_move_to_fen(fen: &str, move_str: &str) -> Result<String, String> {
    let mut board = Board::from_fen(fen)?;
    let mv =
        Move::from_fen_str(move_str).ok_or_else(|| format!("Invalid move string: {}", move_str))?;

    if board.try_move(&mv, &QueenPromotion).is_empty() {
        return Err(format!("Illegal move: {}", move_str));
    }

    Ok(board.to_fen())
}

/// 在 FEN 上重放一串空白分隔的紧凑走法
pub fn apply_moves_to_fen(fen: &str, moves_str: &str) -> Result<String, String> {
    let mut board = Board::from_fen(fen)?;

    for token in moves_str.split_whitespace() {
        let mv = Move::from_fen_str(token)
            .ok_or_else(|| format!("Invalid move string: {}", token))?;
        if board.try_move(&mv, &QueenPromotion).is_empty() {
            return Err(format!("Illegal move: {}", token));
        }
    }

    Ok(board.to_fen())
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_parse_initial_fen() {
        let state = parse_fen(START_FEN).unwrap();
        assert_eq!(state.turn, Side::White);
        assert_eq!(state.white_castling, [true, true]);
        assert_eq!(state.black_castling, [true, true]);
        assert_eq!(state.squares[7][4], 6);
        assert_eq!(state.squares[0][4], -6);
        assert_eq!(state.squares[6], [1; 8]);
        assert_eq!(state.squares[1], [-1; 8]);
    }

    #[test]
    fn test_parse_en_passant_square() {
        // e3 表示白兵刚走 e2e4
        let state = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
        assert!(state.white_en_passant[4]);
        assert!(state.black_en_passant.iter().all(|&f| !f));

        // d6 表示黑兵刚走 d7d5
        let state = parse_fen("rnbqkbnr/ppp1pppp/8/3p4/8/8/PPPPPPPP/RNBQKBNR w KQkq d6 0 2")
            .unwrap();
        assert!(state.black_en_passant[3]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_fen("rnbqkbnr/pppppppp w KQkq -").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e5 0 1").is_err());
    }

    #[test]
    fn test_fen_roundtrip() {
        let board = Board::from_fen(START_FEN).unwrap();
        assert_eq!(board.to_fen(), START_FEN);
    }

    #[test]
    fn test_apply_move() {
        let new_fen = apply_move_to_fen(START_FEN, "e2e4").unwrap();
        assert_eq!(
            new_fen,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn test_apply_moves_sequence() {
        let new_fen = apply_moves_to_fen(START_FEN, "e2e4 e7e5 g1f3").unwrap();
        assert_eq!(
            new_fen,
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 1"
        );
    }

    #[test]
    fn test_apply_illegal_move() {
        assert!(apply_move_to_fen(START_FEN, "e2e5").is_err());
        assert!(apply_move_to_fen(START_FEN, "e2").is_err());
    }

    #[test]
    fn test_promotion_replay() {
        let fen = "8/P6k/8/8/8/8/8/4K3 w - - 0 1";
        let new_fen = apply_move_to_fen(fen, "a7a8r").unwrap();
        assert!(new_fen.starts_with("R7/"));
    }
}
