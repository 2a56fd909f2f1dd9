//! 走法记谱生成
//!
//! 在走法执行前的局面上生成记谱字符串：
//! 易位输出固定符号 O-O / O-O-O，其余走法输出
//! `[棋子字母][兵吃子时的起点线][x][目标格]`，
//! 走后对方被将军追加 `+`，被将杀追加 `#`。

use crate::board::Board;
use crate::types::{code_side, Move, PieceType};

/// 生成一步走法的记谱字符串
///
/// `board` 必须是执行该走法之前的局面，走法已通过合法性检查。
pub fn move_notation(board: &Board, mv: &Move) -> String {
    let code = board.piece(mv.from);
    let side = match code_side(code) {
        Some(s) => s,
        None => return String::new(),
    };
    let piece_type = match PieceType::from_code(code) {
        Some(pt) => pt,
        None => return String::new(),
    };

    let mut notation = String::new();

    // 易位符号
    if piece_type == PieceType::King && mv.from.col == 4 {
        if mv.to.col == 6 {
            notation.push_str("O-O");
        } else if mv.to.col == 2 {
            notation.push_str("O-O-O");
        }
    }

    if notation.is_empty() {
        // 吃过路兵的目标格为空，也算吃子
        let is_en_passant =
            piece_type == PieceType::Pawn && mv.to.col != mv.from.col && board.piece(mv.to) == 0;
        let is_capture = board.piece(mv.to) != 0 || is_en_passant;

        if let Some(letter) = piece_type.notation_letter() {
            notation.push(letter);
        }

        // 兵吃子时标出起点线
        if piece_type == PieceType::Pawn && is_capture {
            notation.push((b'a' + mv.from.col as u8) as char);
        }

        if is_capture {
            notation.push('x');
        }

        notation.push_str(&mv.to.to_fen_str());
    }

    // 在副本上执行走法判断将军/将杀
    let mut scratch = board.clone();
    scratch.apply_move(mv);

    let opponent = side.opposite();
    if scratch.is_in_check(opponent) {
        if scratch.is_checkmate(opponent) {
            notation.push('#');
        } else {
            notation.push('+');
        }
    }

    notation
}
