//! 国际象棋模拟棋盘
//!
//! 使用 8x8 i8 数组存储棋子编码：0 为空，1-6 为白方兵马象车后王，
//! 负数为黑方。走法合法性采用"副本试走"方式：在完整副本上执行走法，
//! 若己方王仍被攻击则判定非法，没有悔棋日志。

use crate::fen::parse_fen;
use crate::notation::move_notation;
use crate::types::{code_side, piece_code, GameResult, Move, PieceType, Side, Square};

/// 马的 8 个跳跃偏移
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
];

/// 象的 4 个斜向
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 车的 4 个直线方向
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 全部 8 个方向（后和王使用）
pub const EVERY_DIRECTION: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 升变选择策略
///
/// 兵到达底线时由该策略同步给出升变类型，其他走法不会调用。
pub trait PromotionChooser {
    fn choose(&self, side: Side, to: Square) -> PieceType;
}

/// 默认升变策略：总是升变为后
pub struct QueenPromotion;

impl PromotionChooser for QueenPromotion {
    fn choose(&self, _side: Side, _to: Square) -> PieceType {
        PieceType::Queen
    }
}

/// 模拟棋盘
#[derive(Clone)]
pub struct Board {
    /// 8x8 棋子编码，row 0 是黑方底线
    squares: [[i8; 8]; 8],
    side_to_move: Side,
    /// 白兵刚走两格的列标记（对黑方的吃过路兵窗口）
    white_en_passant: [bool; 8],
    /// 黑兵刚走两格的列标记
    black_en_passant: [bool; 8],
    /// 白方易位权 [0] 长易位 [1] 短易位
    white_castling: [bool; 2],
    /// 黑方易位权
    black_castling: [bool; 2],
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// 创建标准初始局面
    pub fn new() -> Board {
        let squares: [[i8; 8]; 8] = [
            [-4, -2, -3, -5, -6, -3, -2, -4],
            [-1, -1, -1, -1, -1, -1, -1, -1],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [1, 1, 1, 1, 1, 1, 1, 1],
            [4, 2, 3, 5, 6, 3, 2, 4],
        ];
        Board {
            squares,
            side_to_move: Side::White,
            white_en_passant: [false; 8],
            black_en_passant: [false; 8],
            white_castling: [true; 2],
            black_castling: [true; 2],
        }
    }

    /// 从 FEN 字符串创建棋盘
    ///
    /// 双方必须各有且仅有一个王，否则返回错误。
    pub fn from_fen(fen: &str) -> Result<Board, String> {
        let state = parse_fen(fen)?;

        let board = Board {
            squares: state.squares,
            side_to_move: state.turn,
            white_en_passant: state.white_en_passant,
            black_en_passant: state.black_en_passant,
            white_castling: state.white_castling,
            black_castling: state.black_castling,
        };

        let white_kings = board.count_piece(piece_code(Side::White, PieceType::King));
        let black_kings = board.count_piece(piece_code(Side::Black, PieceType::King));
        if white_kings != 1 || black_kings != 1 {
            return Err(format!(
                "Invalid position: expected one king per side, got {} white / {} black",
                white_kings, black_kings
            ));
        }

        Ok(board)
    }

    /// 转换为 FEN 字符串
    pub fn to_fen(&self) -> String {
        crate::fen::board_to_fen(self)
    }

    fn count_piece(&self, code: i8) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|&&c| c == code)
            .count()
    }

    /// 当前走棋方
    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// 获取格子上的棋子编码
    #[inline]
    pub fn piece(&self, sq: Square) -> i8 {
        self.squares[sq.row as usize][sq.col as usize]
    }

    /// 棋盘数组（评估使用）
    #[inline]
    pub fn grid(&self) -> &[[i8; 8]; 8] {
        &self.squares
    }

    /// 某方的吃过路兵列标记
    #[inline]
    pub fn en_passant_flags(&self, side: Side) -> &[bool; 8] {
        match side {
            Side::White => &self.white_en_passant,
            Side::Black => &self.black_en_passant,
        }
    }

    /// 某方的易位权 [0] 长易位 [1] 短易位
    #[inline]
    pub fn castling_rights(&self, side: Side) -> &[bool; 2] {
        match side {
            Side::White => &self.white_castling,
            Side::Black => &self.black_castling,
        }
    }

    /// 找到某方王的位置
    pub fn king_square(&self, side: Side) -> Option<Square> {
        let king = piece_code(side, PieceType::King);
        for row in 0..8 {
            for col in 0..8 {
                if self.squares[row][col] == king {
                    return Some(Square::new(row as i8, col as i8));
                }
            }
        }
        None
    }

    /// 判断 from 上的棋子按自身规则是否攻击 target
    ///
    /// 滑行棋子的路径上不能有任何遮挡（target 本身可以有棋子）。
    fn attacks(&self, from: Square, target: Square) -> bool {
        let code = self.piece(from);
        let side = match code_side(code) {
            Some(s) => s,
            None => return false,
        };
        let piece_type = match PieceType::from_code(code) {
            Some(pt) => pt,
            None => return false,
        };

        let dr = target.row - from.row;
        let dc = target.col - from.col;

        match piece_type {
            PieceType::Pawn => dr == side.pawn_direction() && dc.abs() == 1,
            PieceType::Knight => KNIGHT_OFFSETS.contains(&(dr, dc)),
            PieceType::Bishop => self.slider_reaches(from, target, &BISHOP_DIRECTIONS),
            PieceType::Rook => self.slider_reaches(from, target, &ROOK_DIRECTIONS),
            PieceType::Queen => self.slider_reaches(from, target, &EVERY_DIRECTION),
            PieceType::King => dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0),
        }
    }

    /// 滑行棋子能否沿给定方向集到达 target
    fn slider_reaches(&self, from: Square, target: Square, directions: &[(i8, i8)]) -> bool {
        for &(dr, dc) in directions {
            let mut sq = from.offset(dr, dc);
            while sq.is_valid() {
                if sq == target {
                    return true;
                }
                if self.piece(sq) != 0 {
                    break;
                }
                sq = sq.offset(dr, dc);
            }
        }
        false
    }

    /// 检测某格是否被某方攻击
    pub fn is_square_attacked(&self, target: Square, by: Side) -> bool {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::new(row, col);
                if code_side(self.piece(sq)) == Some(by) && self.attacks(sq, target) {
                    return true;
                }
            }
        }
        false
    }

    /// 检查某方是否被将军
    pub fn is_in_check(&self, side: Side) -> bool {
        match self.king_square(side) {
            Some(king) => self.is_square_attacked(king, side.opposite()),
            // 无王视为被将军（只有非法构造的局面会走到这里）
            None => true,
        }
    }

    /// 生成某个棋子的全部候选目标格（伪合法）
    ///
    /// 合法性检查、将杀/逼和判定和搜索的走法枚举都复用这一个生成器，
    /// 三处不允许出现行为差异。
    pub fn destinations(&self, from: Square) -> Vec<Square> {
        let code = self.piece(from);
        let side = match code_side(code) {
            Some(s) => s,
            None => return Vec::new(),
        };
        let piece_type = match PieceType::from_code(code) {
            Some(pt) => pt,
            None => return Vec::new(),
        };

        match piece_type {
            PieceType::Pawn => self.pawn_destinations(from, side),
            PieceType::Knight => self.offset_destinations(from, side, &KNIGHT_OFFSETS),
            PieceType::Bishop => self.slider_destinations(from, side, &BISHOP_DIRECTIONS),
            PieceType::Rook => self.slider_destinations(from, side, &ROOK_DIRECTIONS),
            PieceType::Queen => self.slider_destinations(from, side, &EVERY_DIRECTION),
            PieceType::King => self.king_destinations(from, side),
        }
    }

    fn pawn_destinations(&self, from: Square, side: Side) -> Vec<Square> {
        let mut moves = Vec::with_capacity(4);
        let dir = side.pawn_direction();

        // 前进一格
        let one = from.offset(dir, 0);
        if one.is_valid() && self.piece(one) == 0 {
            moves.push(one);

            // 起始行可前进两格
            let two = from.offset(2 * dir, 0);
            if from.row == side.pawn_home_row() && self.piece(two) == 0 {
                moves.push(two);
            }
        }

        // 斜吃
        for dc in [-1, 1] {
            let diag = from.offset(dir, dc);
            if diag.is_valid() && code_side(self.piece(diag)) == Some(side.opposite()) {
                moves.push(diag);
            }
        }

        // 吃过路兵：对方兵刚从起始行走两格，落在己方兵旁边
        let opponent_flags = self.en_passant_flags(side.opposite());
        let ep_row = side.pawn_home_row() + 3 * dir;
        if from.row == ep_row {
            for dc in [-1, 1] {
                let target_col = from.col + dc;
                if (0..8).contains(&target_col) && opponent_flags[target_col as usize] {
                    moves.push(Square::new(from.row + dir, target_col));
                }
            }
        }

        moves
    }

    fn offset_destinations(&self, from: Square, side: Side, offsets: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::with_capacity(8);
        for &(dr, dc) in offsets {
            let sq = from.offset(dr, dc);
            if sq.is_valid() && code_side(self.piece(sq)) != Some(side) {
                moves.push(sq);
            }
        }
        moves
    }

    fn slider_destinations(&self, from: Square, side: Side, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::with_capacity(14);
        for &(dr, dc) in directions {
            let mut sq = from.offset(dr, dc);
            while sq.is_valid() {
                match code_side(self.piece(sq)) {
                    None => moves.push(sq),
                    Some(s) => {
                        if s != side {
                            moves.push(sq);
                        }
                        break;
                    }
                }
                sq = sq.offset(dr, dc);
            }
        }
        moves
    }

    fn king_destinations(&self, from: Square, side: Side) -> Vec<Square> {
        let mut moves = self.offset_destinations(from, side, &EVERY_DIRECTION);

        let back = side.back_row();
        let rights = self.castling_rights(side);
        let rook = piece_code(side, PieceType::Rook);
        let enemy = side.opposite();

        // 短易位：e->g，路径为空，e/f/g 均不被攻击
        if from == Square::new(back, 4)
            && rights[1]
            && self.squares[back as usize][5] == 0
            && self.squares[back as usize][6] == 0
            && self.squares[back as usize][7] == rook
            && !self.is_square_attacked(Square::new(back, 4), enemy)
            && !self.is_square_attacked(Square::new(back, 5), enemy)
            && !self.is_square_attacked(Square::new(back, 6), enemy)
        {
            moves.push(Square::new(back, 6));
        }

        // 长易位：e->c，b/c/d 为空，c/d/e 均不被攻击
        if from == Square::new(back, 4)
            && rights[0]
            && self.squares[back as usize][1] == 0
            && self.squares[back as usize][2] == 0
            && self.squares[back as usize][3] == 0
            && self.squares[back as usize][0] == rook
            && !self.is_square_attacked(Square::new(back, 2), enemy)
            && !self.is_square_attacked(Square::new(back, 3), enemy)
            && !self.is_square_attacked(Square::new(back, 4), enemy)
        {
            moves.push(Square::new(back, 2));
        }

        moves
    }

    /// 枚举某方的全部伪合法走法
    ///
    /// 兵到达底线的走法展开为 4 种升变。
    pub fn pseudo_legal_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(40);

        for row in 0..8 {
            for col in 0..8 {
                let from = Square::new(row, col);
                if code_side(self.piece(from)) != Some(side) {
                    continue;
                }
                let is_pawn = self.piece(from).abs() == 1;

                for to in self.destinations(from) {
                    if is_pawn && to.row == side.promotion_row() {
                        for pt in [
                            PieceType::Knight,
                            PieceType::Bishop,
                            PieceType::Rook,
                            PieceType::Queen,
                        ] {
                            moves.push(Move::with_promotion(from, to, pt));
                        }
                    } else {
                        moves.push(Move::new(from, to));
                    }
                }
            }
        }

        moves
    }

    /// 枚举某方的全部合法走法（副本试走过滤）
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        self.pseudo_legal_moves(side)
            .into_iter()
            .filter(|mv| {
                let mut scratch = self.clone();
                scratch.apply_move(mv);
                !scratch.is_in_check(side)
            })
            .collect()
    }

    /// 某方是否存在至少一个合法走法（提前退出）
    pub fn has_legal_move(&self, side: Side) -> bool {
        for mv in self.pseudo_legal_moves(side) {
            let mut scratch = self.clone();
            scratch.apply_move(&mv);
            if !scratch.is_in_check(side) {
                return true;
            }
        }
        false
    }

    /// 执行一个已确认合法的走法
    ///
    /// 处理易位的车移动、吃过路兵的兵移除和升变替换，
    /// 并维护易位权与过路兵标记，最后交换走棋方。
    pub fn apply_move(&mut self, mv: &Move) {
        let code = self.piece(mv.from);
        let side = match code_side(code) {
            Some(s) => s,
            None => return,
        };
        let piece_type = PieceType::from_code(code);
        let back = side.back_row() as usize;

        // 己方过路兵标记过期，本步若是双格推进再重新设置
        match side {
            Side::White => self.white_en_passant = [false; 8],
            Side::Black => self.black_en_passant = [false; 8],
        }

        match piece_type {
            Some(PieceType::Pawn) => {
                // 斜走到空格即吃过路兵：被吃的兵在起点行、终点列
                if mv.to.col != mv.from.col && self.piece(mv.to) == 0 {
                    self.squares[mv.from.row as usize][mv.to.col as usize] = 0;
                }
                // 双格推进设置己方标记
                if (mv.to.row - mv.from.row).abs() == 2 {
                    match side {
                        Side::White => self.white_en_passant[mv.to.col as usize] = true,
                        Side::Black => self.black_en_passant[mv.to.col as usize] = true,
                    }
                }
            }
            Some(PieceType::King) => {
                // 易位：王走两格，车同步跨越
                if mv.to.col - mv.from.col == 2 {
                    self.squares[back][7] = 0;
                    self.squares[back][5] = piece_code(side, PieceType::Rook);
                } else if mv.from.col - mv.to.col == 2 {
                    self.squares[back][0] = 0;
                    self.squares[back][3] = piece_code(side, PieceType::Rook);
                }
                match side {
                    Side::White => self.white_castling = [false; 2],
                    Side::Black => self.black_castling = [false; 2],
                }
            }
            Some(PieceType::Rook) => {
                // 车离开角落后永久失去对应易位权
                if mv.from == Square::new(back as i8, 0) {
                    match side {
                        Side::White => self.white_castling[0] = false,
                        Side::Black => self.black_castling[0] = false,
                    }
                }
                if mv.from == Square::new(back as i8, 7) {
                    match side {
                        Side::White => self.white_castling[1] = false,
                        Side::Black => self.black_castling[1] = false,
                    }
                }
            }
            _ => {}
        }

        // 移动棋子，吃子即覆盖
        self.squares[mv.to.row as usize][mv.to.col as usize] = code;
        self.squares[mv.from.row as usize][mv.from.col as usize] = 0;

        // 升变替换，缺省为后
        if piece_type == Some(PieceType::Pawn) && mv.to.row == side.promotion_row() {
            let promoted = mv.promotion.unwrap_or(PieceType::Queen);
            self.squares[mv.to.row as usize][mv.to.col as usize] = piece_code(side, promoted);
        }

        // 对方的过路兵窗口到本步为止
        match side {
            Side::White => self.black_en_passant = [false; 8],
            Side::Black => self.white_en_passant = [false; 8],
        }

        self.side_to_move = side.opposite();
    }

    /// 处理一个外部走法请求
    ///
    /// 合法则执行并返回记谱字符串，非法返回空字符串（唯一的失败信号）。
    /// 兵到达底线且请求未指定升变类型时，调用升变策略取得选择。
    pub fn try_move(&mut self, mv: &Move, chooser: &dyn PromotionChooser) -> String {
        let code = self.piece(mv.from);
        let side = match code_side(code) {
            Some(s) if s == self.side_to_move => s,
            _ => return String::new(),
        };

        if !self.destinations(mv.from).contains(&mv.to) {
            return String::new();
        }

        let mut mv = *mv;
        let is_promotion = code.abs() == 1 && mv.to.row == side.promotion_row();
        if is_promotion {
            let choice = mv.promotion.unwrap_or_else(|| chooser.choose(side, mv.to));
            // 只接受马象车后
            mv.promotion = Some(match choice {
                PieceType::Knight | PieceType::Bishop | PieceType::Rook => choice,
                _ => PieceType::Queen,
            });
        } else {
            mv.promotion = None;
        }

        // 副本试走：己方王不能暴露在攻击之下
        let mut scratch = self.clone();
        scratch.apply_move(&mv);
        if scratch.is_in_check(side) {
            return String::new();
        }

        let notation = move_notation(self, &mv);
        self.apply_move(&mv);
        notation
    }

    /// 某方是否被将杀：被将军且无任何解将走法
    pub fn is_checkmate(&self, side: Side) -> bool {
        self.is_in_check(side) && !self.has_legal_move(side)
    }

    /// 某方是否被逼和：未被将军且无任何合法走法
    pub fn is_stalemate(&self, side: Side) -> bool {
        !self.is_in_check(side) && !self.has_legal_move(side)
    }

    /// 对局是否结束（任一方被将杀或被逼和）
    pub fn is_game_over(&self) -> bool {
        self.is_checkmate(Side::White)
            || self.is_checkmate(Side::Black)
            || self.is_stalemate(Side::White)
            || self.is_stalemate(Side::Black)
    }

    /// 判断游戏结果（以当前走棋方视角）
    pub fn game_result(&self) -> GameResult {
        let side = self.side_to_move;
        if !self.has_legal_move(side) {
            if self.is_in_check(side) {
                return match side {
                    Side::White => GameResult::BlackWin,
                    Side::Black => GameResult::WhiteWin,
                };
            }
            return GameResult::Draw;
        }
        GameResult::Ongoing
    }
}

/// 从 FEN 获取当前走棋方的所有合法走法
pub fn get_legal_moves_from_fen(fen: &str) -> Result<Vec<String>, String> {
    let board = Board::from_fen(fen)?;
    Ok(board
        .legal_moves(board.side_to_move())
        .iter()
        .map(|m| m.to_fen_str())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn sq(s: &str) -> Square {
        Square::from_fen_str(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_fen_str(s).unwrap()
    }

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        assert_eq!(board.side_to_move(), Side::White);
        assert_eq!(board.piece(sq("e1")), 6);
        assert_eq!(board.piece(sq("e8")), -6);
        assert_eq!(board.piece(sq("a2")), 1);
        assert_eq!(board.piece(sq("d8")), -5);
        assert_eq!(board.castling_rights(Side::White), &[true, true]);
    }

    #[test]
    fn test_legal_moves_initial() {
        let board = Board::new();
        // 初始局面白方有 20 个合法走法（16 个兵走法 + 4 个马走法）
        assert_eq!(board.legal_moves(Side::White).len(), 20);
        assert_eq!(board.legal_moves(Side::Black).len(), 20);
    }

    #[test]
    fn test_pawn_control() {
        // 白兵在 e4，只攻击 d5 和 f5
        let board = Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(board.is_square_attacked(sq("d5"), Side::White));
        assert!(board.is_square_attacked(sq("f5"), Side::White));
        assert!(!board.is_square_attacked(sq("e5"), Side::White));
        assert!(!board.is_square_attacked(sq("d4"), Side::White));
    }

    #[test]
    fn test_knight_control() {
        let board = Board::from_fen("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        for target in ["d6", "f6", "c5", "g5", "c3", "g3", "d2", "f2"] {
            assert!(board.is_square_attacked(sq(target), Side::White), "{}", target);
        }
        assert!(!board.is_square_attacked(sq("e5"), Side::White));
    }

    #[test]
    fn test_bishop_control_blocked() {
        // 象在 c1，d2 有己方兵遮挡（e3 仍被兵攻击，f4 在遮挡之后无子可及）
        let board = Board::from_fen("4k3/8/8/8/8/8/3P4/2B1K3 w - - 0 1").unwrap();
        assert!(board.is_square_attacked(sq("d2"), Side::White));
        assert!(board.is_square_attacked(sq("e3"), Side::White));
        assert!(!board.is_square_attacked(sq("f4"), Side::White));
        assert!(board.is_square_attacked(sq("b2"), Side::White));
        assert!(board.is_square_attacked(sq("a3"), Side::White));
    }

    #[test]
    fn test_rook_control() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert!(board.is_square_attacked(sq("a8"), Side::White));
        assert!(board.is_square_attacked(sq("d1"), Side::White));
        // e1 有王遮挡，王自身够不到 g1
        assert!(!board.is_square_attacked(sq("g1"), Side::White));
        assert!(!board.is_square_attacked(sq("b2"), Side::White));
    }

    #[test]
    fn test_queen_control() {
        let board = Board::from_fen("4k3/8/8/8/3q4/8/8/4K3 b - - 0 1").unwrap();
        assert!(board.is_square_attacked(sq("d1"), Side::Black));
        assert!(board.is_square_attacked(sq("a4"), Side::Black));
        assert!(board.is_square_attacked(sq("g7"), Side::Black));
        assert!(!board.is_square_attacked(sq("e6"), Side::Black));
    }

    #[test]
    fn test_king_control() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(board.is_square_attacked(sq("d1"), Side::White));
        assert!(board.is_square_attacked(sq("e2"), Side::White));
        assert!(board.is_square_attacked(sq("f2"), Side::White));
        assert!(!board.is_square_attacked(sq("e3"), Side::White));
    }

    #[test]
    fn test_check_detection() {
        let board = Board::from_fen("4k3/4R3/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert!(board.is_in_check(Side::Black));
        assert!(!board.is_in_check(Side::White));
    }

    #[test]
    fn test_pin_rejected_by_scratch_copy() {
        // e 线上黑车牵制白马，白马任何走法都非法
        let board = Board::from_fen("4r1k1/8/8/8/8/4N3/8/4K3 w - - 0 1").unwrap();
        let knight_moves: Vec<Move> = board
            .legal_moves(Side::White)
            .into_iter()
            .filter(|m| m.from == sq("e3"))
            .collect();
        assert!(knight_moves.is_empty());
    }

    #[test]
    fn test_en_passant_flag_lifecycle() {
        let mut board = Board::new();
        assert!(board.try_move(&mv("e2e4"), &QueenPromotion).len() > 0);

        // 双格推进后恰好一列被标记
        let flags = board.en_passant_flags(Side::White);
        assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
        assert!(flags[4]);

        // 对方走完一步后标记清除
        assert!(board.try_move(&mv("g8f6"), &QueenPromotion).len() > 0);
        assert!(board.en_passant_flags(Side::White).iter().all(|&f| !f));
    }

    #[test]
    fn test_en_passant_capture_removes_passed_pawn() {
        let mut board = Board::new();
        board.try_move(&mv("e2e4"), &QueenPromotion);
        board.try_move(&mv("a7a6"), &QueenPromotion);
        board.try_move(&mv("e4e5"), &QueenPromotion);
        // 黑兵 d7->d5 双格推进，经过 e5 白兵旁边
        board.try_move(&mv("d7d5"), &QueenPromotion);
        assert!(board.en_passant_flags(Side::Black)[3]);

        // 白兵 e5xd6 吃过路兵
        let notation = board.try_move(&mv("e5d6"), &QueenPromotion);
        assert!(!notation.is_empty());
        // 被吃的黑兵从 d5（原格）移除，白兵落在 d6
        assert_eq!(board.piece(sq("d5")), 0);
        assert_eq!(board.piece(sq("d6")), 1);
        assert_eq!(board.piece(sq("e5")), 0);
    }

    #[test]
    fn test_en_passant_window_expires() {
        let mut board = Board::new();
        board.try_move(&mv("e2e4"), &QueenPromotion);
        board.try_move(&mv("a7a6"), &QueenPromotion);
        board.try_move(&mv("e4e5"), &QueenPromotion);
        board.try_move(&mv("d7d5"), &QueenPromotion);
        // 白方放弃吃过路兵
        board.try_move(&mv("a2a3"), &QueenPromotion);
        board.try_move(&mv("a6a5"), &QueenPromotion);
        // 窗口已过，e5xd6 不再合法
        assert_eq!(board.try_move(&mv("e5d6"), &QueenPromotion), "");
    }

    #[test]
    fn test_kingside_castle() {
        let mut board =
            Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let notation = board.try_move(&mv("e1g1"), &QueenPromotion);
        assert_eq!(notation, "O-O");
        assert_eq!(board.piece(sq("g1")), 6);
        assert_eq!(board.piece(sq("f1")), 4);
        assert_eq!(board.piece(sq("h1")), 0);
        assert_eq!(board.castling_rights(Side::White), &[false, false]);
    }

    #[test]
    fn test_queenside_castle() {
        let mut board =
            Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1").unwrap();
        let notation = board.try_move(&mv("e8c8"), &QueenPromotion);
        assert_eq!(notation, "O-O-O");
        assert_eq!(board.piece(sq("c8")), -6);
        assert_eq!(board.piece(sq("d8")), -4);
        assert_eq!(board.piece(sq("a8")), 0);
    }

    #[test]
    fn test_castle_through_attacked_square_illegal() {
        // 黑车控制 f1，白方不能短易位
        let mut board = Board::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert_eq!(board.try_move(&mv("e1g1"), &QueenPromotion), "");
    }

    #[test]
    fn test_castle_rights_cleared_by_rook_move() {
        let mut board =
            Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        board.try_move(&mv("h1g1"), &QueenPromotion);
        assert_eq!(board.castling_rights(Side::White), &[true, false]);
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut board = Board::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let notation = board.try_move(&mv("a7a8"), &QueenPromotion);
        assert!(!notation.is_empty());
        assert_eq!(board.piece(sq("a8")), 5);
    }

    #[test]
    fn test_promotion_honors_request() {
        let mut board = Board::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        board.try_move(&mv("a7a8n"), &QueenPromotion);
        assert_eq!(board.piece(sq("a8")), 2);
    }

    #[test]
    fn test_promotion_chooser_invoked() {
        struct RookChooser;
        impl PromotionChooser for RookChooser {
            fn choose(&self, _side: Side, _to: Square) -> PieceType {
                PieceType::Rook
            }
        }
        let mut board = Board::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        board.try_move(&mv("a7a8"), &RookChooser);
        assert_eq!(board.piece(sq("a8")), 4);
    }

    #[test]
    fn test_illegal_move_returns_empty_string() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        assert_eq!(board.try_move(&mv("e2e5"), &QueenPromotion), "");
        assert_eq!(board.try_move(&mv("b1b3"), &QueenPromotion), "");
        // 轮到白方时黑方不能走
        assert_eq!(board.try_move(&mv("e7e5"), &QueenPromotion), "");
    }

    #[test]
    fn test_checkmate_classification() {
        // 后底线杀：黑王无处可逃
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R3K1Q1 b - - 0 1").unwrap();
        let board2 = Board::from_fen("R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert!(board2.is_checkmate(Side::Black));
        assert!(!board2.is_stalemate(Side::Black));
        assert!(!board.is_checkmate(Side::Black));
    }

    #[test]
    fn test_fools_mate() {
        let mut board = Board::new();
        board.try_move(&mv("f2f3"), &QueenPromotion);
        board.try_move(&mv("e7e5"), &QueenPromotion);
        board.try_move(&mv("g2g4"), &QueenPromotion);
        let notation = board.try_move(&mv("d8h4"), &QueenPromotion);
        assert_eq!(notation, "Qh4#");
        assert!(board.is_checkmate(Side::White));
        assert_eq!(board.game_result(), GameResult::BlackWin);
    }

    #[test]
    fn test_stalemate_classification() {
        // 经典逼和：黑王 h8，白后 g6、白王 g5，黑方无子可动且未被将军
        let board = Board::from_fen("7k/8/6Q1/6K1/8/8/8/8 b - - 0 1").unwrap();
        assert!(board.is_stalemate(Side::Black));
        assert!(!board.is_checkmate(Side::Black));
        assert_eq!(board.game_result(), GameResult::Draw);
    }

    #[test]
    fn test_reject_position_without_kings() {
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn test_pseudo_legal_consumers_agree() {
        // 合法性检查、终局判定和走法枚举使用同一个生成器：
        // legal_moves 为空 当且仅当 has_legal_move 为 false
        for fen in [
            START_FEN,
            "R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1",
            "7k/8/6Q1/6K1/8/8/8/8 b - - 0 1",
        ] {
            let board = Board::from_fen(fen).unwrap();
            let side = board.side_to_move();
            assert_eq!(
                board.legal_moves(side).is_empty(),
                !board.has_legal_move(side)
            );
        }
    }
}
