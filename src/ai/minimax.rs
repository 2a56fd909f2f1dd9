//! Minimax AI 策略

use super::{sort_best_first, AIConfig, AIStrategy, SearchResult, SUGGESTION_MARGIN};
use crate::board::Board;
use crate::eval::evaluate;
use crate::notation::move_notation;
use crate::types::Side;
use log::debug;
use rand::prelude::*;

/// Minimax AI - 固定深度，Alpha-Beta 剪枝
///
/// 白方是极大化方，黑方是极小化方。每个根候选走法都用
/// 完整窗口独立搜索，排序和过滤在根节点完成。
pub struct MinimaxAI {
    depth: u32,
    rng: StdRng,
    randomness: f64,
}

impl MinimaxAI {
    pub fn new(config: &AIConfig) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        MinimaxAI {
            depth: config.depth.max(1),
            rng,
            randomness: config.randomness,
        }
    }
}

/// Alpha-Beta 搜索
///
/// `nodes` 是本次顶层调用的节点累加器，每进入一个节点加一。
/// 叶子分数带剩余深度偏移，越快的杀棋分数越极端。
fn minimax(board: &Board, depth: u32, mut alpha: i32, mut beta: i32, nodes: &mut u64) -> i32 {
    *nodes += 1;

    if depth == 0 || board.is_game_over() {
        return evaluate(board, depth as i32);
    }

    let side = board.side_to_move();
    let moves = board.legal_moves(side);

    match side {
        Side::White => {
            let mut best = i32::MIN;
            for mv in &moves {
                let mut child = board.clone();
                child.apply_move(mv);
                let score = minimax(&child, depth - 1, alpha, beta, nodes);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
        Side::Black => {
            let mut best = i32::MAX;
            for mv in &moves {
                let mut child = board.clone();
                child.apply_move(mv);
                let score = minimax(&child, depth - 1, alpha, beta, nodes);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

impl AIStrategy for MinimaxAI {
    fn select_moves(&self, board: &Board, n: usize) -> Vec<SearchResult> {
        let side = board.side_to_move();
        let moves = board.legal_moves(side);
        let mut rng = self.rng.clone();
        let mut nodes = 0u64;

        let mut results = Vec::with_capacity(moves.len());
        for mv in moves {
            let notation = move_notation(board, &mv);
            let mut child = board.clone();
            child.apply_move(&mv);
            let score = minimax(&child, self.depth - 1, i32::MIN, i32::MAX, &mut nodes);

            let noise = if self.randomness > 0.0 {
                (rng.gen::<f64>() * self.randomness * 100.0) as i32
            } else {
                0
            };

            results.push(SearchResult {
                mv,
                notation,
                score: score + noise,
                nodes: 0,
            });
        }

        debug!(
            "search finished: depth={}, roots={}, nodes={}",
            self.depth,
            results.len(),
            nodes
        );

        sort_best_first(&mut results, side);

        // 只推荐与最佳分差在阈值内的走法，最佳走法自身总是入选
        if let Some(best) = results.first().map(|r| r.score) {
            results.retain(|r| match side {
                Side::White => best - r.score <= SUGGESTION_MARGIN,
                Side::Black => r.score - best <= SUGGESTION_MARGIN,
            });
        }
        results.truncate(n);

        for r in &mut results {
            r.nodes = nodes;
        }
        results
    }
}
