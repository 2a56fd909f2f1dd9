//! 局面静态评估
//!
//! 以白方视角返回整数分数（单位：百分之一兵）。
//! 包含子力、位置表、机动性、王安全（中残局切换）和兵型结构。
//! 黑方的位置表是白方表的垂直镜像，启动时生成一次。

use lazy_static::lazy_static;

use crate::board::{Board, BISHOP_DIRECTIONS, EVERY_DIRECTION, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use crate::types::{Side, Square};

/// 将杀基础分，按剩余深度加成使更快的杀棋分数更极端
pub const MATE_SCORE: i32 = 100_000;

type PstTable = [[i32; 8]; 8];

const PAWN_TABLE_WHITE: PstTable = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE_WHITE: PstTable = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE_WHITE: PstTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE_WHITE: PstTable = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 3, 0, 0],
];

const QUEEN_TABLE_WHITE: PstTable = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

const KING_MIDDLE_TABLE_WHITE: PstTable = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

const KING_END_TABLE_WHITE: PstTable = [
    [-50, -40, -30, -20, -20, -30, -40, -50],
    [-30, -20, -10, 0, 0, -10, -20, -30],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-30, -10, 30, 40, 40, 30, -10, -30],
    [-30, -10, 30, 40, 40, 30, -10, -30],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-30, -30, 0, 0, 0, 0, -30, -30],
    [-50, -30, -30, -30, -30, -30, -30, -50],
];

/// 垂直镜像（行序反转）
fn mirrored(table: &PstTable) -> PstTable {
    let mut result = *table;
    result.reverse();
    result
}

lazy_static! {
    static ref PAWN_TABLE_BLACK: PstTable = mirrored(&PAWN_TABLE_WHITE);
    static ref KNIGHT_TABLE_BLACK: PstTable = mirrored(&KNIGHT_TABLE_WHITE);
    static ref BISHOP_TABLE_BLACK: PstTable = mirrored(&BISHOP_TABLE_WHITE);
    static ref ROOK_TABLE_BLACK: PstTable = mirrored(&ROOK_TABLE_WHITE);
    static ref QUEEN_TABLE_BLACK: PstTable = mirrored(&QUEEN_TABLE_WHITE);
    static ref KING_MIDDLE_TABLE_BLACK: PstTable = mirrored(&KING_MIDDLE_TABLE_WHITE);
    static ref KING_END_TABLE_BLACK: PstTable = mirrored(&KING_END_TABLE_WHITE);
}

/// 评估局面
///
/// `depth` 是搜索中剩余的深度，终局分数按它偏移，
/// 使强制杀棋越快分数越极端。静态调用传 0 即可。
pub fn evaluate(board: &Board, depth: i32) -> i32 {
    // 逼和先于将杀判定，和棋返回 0
    if board.is_stalemate(Side::Black) || board.is_stalemate(Side::White) {
        return 0;
    }
    if board.is_checkmate(Side::White) {
        return -MATE_SCORE - depth;
    }
    if board.is_checkmate(Side::Black) {
        return MATE_SCORE + depth;
    }

    let grid = board.grid();
    let white_ep = board.en_passant_flags(Side::White);
    let black_ep = board.en_passant_flags(Side::Black);

    let mut score = 0;
    let mut moves_white = 0;
    let mut moves_black = 0;

    let mut white_king = (0usize, 0usize);
    let mut black_king = (0usize, 0usize);

    let mut white_queen_on_board = false;
    let mut black_queen_on_board = false;
    let mut white_minor_pieces = 0;
    let mut black_minor_pieces = 0;

    let mut white_pawns_in_file = [0i32; 8];
    let mut black_pawns_in_file = [0i32; 8];

    for m in 0..8usize {
        for n in 0..8usize {
            match grid[m][n] {
                // 白兵
                1 => {
                    score += 100;
                    score += PAWN_TABLE_WHITE[m][n];
                    white_pawns_in_file[n] += 1;

                    if m > 0 {
                        if grid[m - 1][n] == 0 {
                            moves_white += 1;
                        }
                        if m == 6 && grid[5][n] == 0 && grid[4][n] == 0 {
                            moves_white += 1;
                        }
                        if n > 0 && grid[m - 1][n - 1] < 0 {
                            moves_white += 1;
                        }
                        if n < 7 && grid[m - 1][n + 1] < 0 {
                            moves_white += 1;
                        }
                    }
                    if n < 7 && grid[m][n + 1] == -1 && black_ep[n + 1] {
                        moves_white += 1;
                    }
                    if n > 0 && grid[m][n - 1] == -1 && black_ep[n - 1] {
                        moves_white += 1;
                    }
                }

                // 白马
                2 => {
                    score += 320;
                    score += KNIGHT_TABLE_WHITE[m][n];
                    white_minor_pieces += 1;

                    for (dr, dc) in KNIGHT_OFFSETS {
                        let sq = Square::new(m as i8 + dr, n as i8 + dc);
                        if sq.is_valid() && board.piece(sq) <= 0 {
                            moves_white += 1;
                        }
                    }
                }

                // 白象
                3 => {
                    score += 330;
                    score += BISHOP_TABLE_WHITE[m][n];
                    white_minor_pieces += 1;
                    moves_white += slider_mobility(board, m, n, &BISHOP_DIRECTIONS, Side::White);
                }

                // 白车
                4 => {
                    score += 500;
                    score += ROOK_TABLE_WHITE[m][n];
                    white_minor_pieces += 1;
                    moves_white += slider_mobility(board, m, n, &ROOK_DIRECTIONS, Side::White);
                }

                // 白后（不计机动性）
                5 => {
                    score += 900;
                    score += QUEEN_TABLE_WHITE[m][n];
                    white_queen_on_board = true;
                }

                // 白王：只统计不被攻击的相邻格
                6 => {
                    white_king = (m, n);
                    for (dr, dc) in EVERY_DIRECTION {
                        let sq = Square::new(m as i8 + dr, n as i8 + dc);
                        if sq.is_valid()
                            && board.piece(sq) <= 0
                            && !board.is_square_attacked(sq, Side::Black)
                        {
                            moves_white += 1;
                        }
                    }
                }

                // 黑兵
                -1 => {
                    score -= 100;
                    score -= PAWN_TABLE_BLACK[m][n];
                    black_pawns_in_file[n] += 1;

                    if m < 7 {
                        if grid[m + 1][n] == 0 {
                            moves_black += 1;
                        }
                        if m == 1 && grid[2][n] == 0 && grid[3][n] == 0 {
                            moves_black += 1;
                        }
                        if n > 0 && grid[m + 1][n - 1] > 0 {
                            moves_black += 1;
                        }
                        if n < 7 && grid[m + 1][n + 1] > 0 {
                            moves_black += 1;
                        }
                    }
                    if n < 7 && grid[m][n + 1] == 1 && white_ep[n + 1] {
                        moves_black += 1;
                    }
                    if n > 0 && grid[m][n - 1] == 1 && white_ep[n - 1] {
                        moves_black += 1;
                    }
                }

                // 黑马
                -2 => {
                    score -= 320;
                    score -= KNIGHT_TABLE_BLACK[m][n];
                    black_minor_pieces += 1;

                    for (dr, dc) in KNIGHT_OFFSETS {
                        let sq = Square::new(m as i8 + dr, n as i8 + dc);
                        if sq.is_valid() && board.piece(sq) >= 0 {
                            moves_black += 1;
                        }
                    }
                }

                // 黑象
                -3 => {
                    score -= 330;
                    score -= BISHOP_TABLE_BLACK[m][n];
                    black_minor_pieces += 1;
                    moves_black += slider_mobility(board, m, n, &BISHOP_DIRECTIONS, Side::Black);
                }

                // 黑车
                -4 => {
                    score -= 500;
                    score -= ROOK_TABLE_BLACK[m][n];
                    black_minor_pieces += 1;
                    moves_black += slider_mobility(board, m, n, &ROOK_DIRECTIONS, Side::Black);
                }

                // 黑后
                -5 => {
                    score -= 900;
                    score -= QUEEN_TABLE_BLACK[m][n];
                    black_queen_on_board = true;
                }

                // 黑王
                -6 => {
                    black_king = (m, n);
                    for (dr, dc) in EVERY_DIRECTION {
                        let sq = Square::new(m as i8 + dr, n as i8 + dc);
                        if sq.is_valid()
                            && board.piece(sq) >= 0
                            && !board.is_square_attacked(sq, Side::White)
                        {
                            moves_black += 1;
                        }
                    }
                }

                _ => {}
            }
        }
    }

    // 机动性差
    score += 10 * (moves_white - moves_black);

    // 残局判定：双方都没有后，或持后一方的大子（马象车）不超过 1 个
    let is_end_game = (!white_queen_on_board && !black_queen_on_board)
        || (white_queen_on_board && white_minor_pieces <= 1)
        || (black_queen_on_board && black_minor_pieces <= 1);

    score += if is_end_game {
        KING_END_TABLE_WHITE[white_king.0][white_king.1]
    } else {
        KING_MIDDLE_TABLE_WHITE[white_king.0][white_king.1]
    };
    score -= if is_end_game {
        KING_END_TABLE_BLACK[black_king.0][black_king.1]
    } else {
        KING_MIDDLE_TABLE_BLACK[black_king.0][black_king.1]
    };

    // 兵型结构：叠兵、孤兵、兵岛
    let mut white_islands = 0;
    let mut black_islands = 0;
    let mut white_island_flag = false;
    let mut black_island_flag = false;

    for i in 0..8usize {
        if white_pawns_in_file[i] > 1 {
            score -= white_pawns_in_file[i] * 15;
        }
        if black_pawns_in_file[i] > 1 {
            score += black_pawns_in_file[i] * 15;
        }

        if white_pawns_in_file[i] > 0 && !white_island_flag {
            white_islands += 1;
            white_island_flag = true;
        }
        if white_pawns_in_file[i] == 0 {
            white_island_flag = false;
        }

        if black_pawns_in_file[i] > 0 && !black_island_flag {
            black_islands += 1;
            black_island_flag = true;
        }
        if black_pawns_in_file[i] == 0 {
            black_island_flag = false;
        }

        if i != 0 && i != 7 {
            if white_pawns_in_file[i] > 0
                && white_pawns_in_file[i - 1] == 0
                && white_pawns_in_file[i + 1] == 0
            {
                score -= 30;
            }
            if black_pawns_in_file[i] > 0
                && black_pawns_in_file[i - 1] == 0
                && black_pawns_in_file[i + 1] == 0
            {
                score += 30;
            }
        }
    }

    score -= 10 * (white_islands - black_islands);

    score
}

/// 滑行棋子的粗粒度机动性：空格或对方棋子计数，遇子停止
fn slider_mobility(board: &Board, m: usize, n: usize, directions: &[(i8, i8)], side: Side) -> i32 {
    let mut count = 0;
    for &(dr, dc) in directions {
        let mut sq = Square::new(m as i8 + dr, n as i8 + dc);
        while sq.is_valid() {
            let code = board.piece(sq);
            let reachable = match side {
                Side::White => code <= 0,
                Side::Black => code >= 0,
            };
            if reachable {
                count += 1;
            }
            if code != 0 {
                break;
            }
            sq = sq.offset(dr, dc);
        }
    }
    count
}
