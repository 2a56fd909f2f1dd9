//! 国际象棋核心类型定义
//!
//! 定义引擎中所有基础数据类型

use std::fmt;

/// 棋子阵营
///
/// White 先行。棋盘编码中 White 为正数，Black 为负数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opposite(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 棋盘编码符号：White = +1，Black = -1
    #[inline]
    pub fn sign(&self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    /// 兵的前进方向（行增量）：White 向 row 0 走，Black 向 row 7 走
    #[inline]
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// 兵的起始行
    #[inline]
    pub fn pawn_home_row(&self) -> i8 {
        match self {
            Side::White => 6,
            Side::Black => 1,
        }
    }

    /// 升变行（兵到达即升变）
    #[inline]
    pub fn promotion_row(&self) -> i8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// 底线行（王车所在的初始行）
    #[inline]
    pub fn back_row(&self) -> i8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// 棋子类型
///
/// 编码值 1-6 对应 Pawn..King，符号表示阵营。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// 棋盘编码值（无符号）
    #[inline]
    pub fn code(&self) -> i8 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight => 2,
            PieceType::Bishop => 3,
            PieceType::Rook => 4,
            PieceType::Queen => 5,
            PieceType::King => 6,
        }
    }

    /// 从棋盘编码值解析（取绝对值）
    pub fn from_code(code: i8) -> Option<PieceType> {
        match code.abs() {
            1 => Some(PieceType::Pawn),
            2 => Some(PieceType::Knight),
            3 => Some(PieceType::Bishop),
            4 => Some(PieceType::Rook),
            5 => Some(PieceType::Queen),
            6 => Some(PieceType::King),
            _ => None,
        }
    }

    /// 从 FEN 字符解析（不区分大小写）
    pub fn from_fen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    /// 转换为 FEN 字符（小写）
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// 记谱字母，兵没有字母
    pub fn notation_letter(&self) -> Option<char> {
        match self {
            PieceType::Pawn => None,
            PieceType::Knight => Some('N'),
            PieceType::Bishop => Some('B'),
            PieceType::Rook => Some('R'),
            PieceType::Queen => Some('Q'),
            PieceType::King => Some('K'),
        }
    }

    /// 子力价值（王不计入子力）
    pub fn value(&self) -> i32 {
        match self {
            PieceType::Pawn => 100,
            PieceType::Knight => 320,
            PieceType::Bishop => 330,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 0,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// 组合阵营和类型得到棋盘编码
#[inline]
pub fn piece_code(side: Side, piece_type: PieceType) -> i8 {
    piece_type.code() * side.sign()
}

/// 从棋盘编码提取阵营，0 表示空格
#[inline]
pub fn code_side(code: i8) -> Option<Side> {
    if code > 0 {
        Some(Side::White)
    } else if code < 0 {
        Some(Side::Black)
    } else {
        None
    }
}

/// 棋盘格子 (row, col)
///
/// row: 0-7（0 是黑方底线即第 8 横线，7 是白方底线即第 1 横线）
/// col: 0-7（0 是 a 线，7 是 h 线）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    /// 检查格子是否在棋盘范围内
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..=7).contains(&self.row) && (0..=7).contains(&self.col)
    }

    /// 格子加偏移量
    #[inline]
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Square {
        Square {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// 从代数坐标解析（如 "e2"）
    pub fn from_fen_str(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let col = match file {
            'a'..='h' => (file as i8) - ('a' as i8),
            _ => return None,
        };
        let row = match rank {
            '1'..='8' => ('8' as i8) - (rank as i8),
            _ => return None,
        };
        Some(Square { row, col })
    }

    /// 转换为代数坐标（如 "e2"）
    pub fn to_fen_str(&self) -> String {
        let file = (b'a' + self.col as u8) as char;
        let rank = (b'8' - self.row as u8) as char;
        format!("{}{}", file, rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_str())
    }
}

/// 一步走法请求：起点、终点、可选的升变类型
///
/// 走法本身不携带状态，合法性由棋盘判定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: PieceType) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// 从紧凑走法字符串解析
    ///
    /// 格式：
    /// - 普通走法：`e2e4`（4 字符）
    /// - 升变走法：`e7e8q`（5 字符，q/r/b/n，其他字符按后处理）
    pub fn from_fen_str(s: &str) -> Option<Move> {
        let s = s.trim();
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return None;
        }

        let from = Square::from_fen_str(&s[0..2])?;
        let to = Square::from_fen_str(&s[2..4])?;

        let promotion = if s.len() == 5 {
            let c = s.chars().nth(4)?;
            Some(match c {
                'r' => PieceType::Rook,
                'b' => PieceType::Bishop,
                'n' => PieceType::Knight,
                _ => PieceType::Queen,
            })
        } else {
            None
        };

        Some(Move {
            from,
            to,
            promotion,
        })
    }

    /// 转换为紧凑走法字符串
    pub fn to_fen_str(&self) -> String {
        let suffix = match self.promotion {
            Some(pt) => pt.to_fen_char().to_string(),
            None => String::new(),
        };
        format!("{}{}{}", self.from.to_fen_str(), self.to.to_fen_str(), suffix)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_str())
    }
}

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    WhiteWin,
    BlackWin,
    Draw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_from_fen_str() {
        assert_eq!(Square::from_fen_str("a1"), Some(Square::new(7, 0)));
        assert_eq!(Square::from_fen_str("e2"), Some(Square::new(6, 4)));
        assert_eq!(Square::from_fen_str("h8"), Some(Square::new(0, 7)));
        assert_eq!(Square::from_fen_str("i1"), None);
        assert_eq!(Square::from_fen_str("a9"), None);
    }

    #[test]
    fn test_square_to_fen_str() {
        assert_eq!(Square::new(7, 0).to_fen_str(), "a1");
        assert_eq!(Square::new(6, 4).to_fen_str(), "e2");
        assert_eq!(Square::new(0, 7).to_fen_str(), "h8");
    }

    #[test]
    fn test_move_from_fen_str() {
        let m = Move::from_fen_str("e2e4").unwrap();
        assert_eq!(m.from, Square::new(6, 4));
        assert_eq!(m.to, Square::new(4, 4));
        assert!(m.promotion.is_none());

        let m = Move::from_fen_str("e7e8q").unwrap();
        assert_eq!(m.promotion, Some(PieceType::Queen));

        let m = Move::from_fen_str("a2a1n").unwrap();
        assert_eq!(m.promotion, Some(PieceType::Knight));

        // 未知升变字符按后处理
        let m = Move::from_fen_str("e7e8x").unwrap();
        assert_eq!(m.promotion, Some(PieceType::Queen));

        assert!(Move::from_fen_str("e2").is_none());
        assert!(Move::from_fen_str("e2e4e5").is_none());
    }

    #[test]
    fn test_move_roundtrip() {
        assert_eq!(Move::from_fen_str("e2e4").unwrap().to_fen_str(), "e2e4");
        assert_eq!(Move::from_fen_str("e7e8q").unwrap().to_fen_str(), "e7e8q");
    }

    #[test]
    fn test_piece_code() {
        assert_eq!(piece_code(Side::White, PieceType::King), 6);
        assert_eq!(piece_code(Side::Black, PieceType::Pawn), -1);
        assert_eq!(code_side(3), Some(Side::White));
        assert_eq!(code_side(-5), Some(Side::Black));
        assert_eq!(code_side(0), None);
        assert_eq!(PieceType::from_code(-4), Some(PieceType::Rook));
        assert_eq!(PieceType::from_code(0), None);
    }
}
