//! 随机 AI 策略

use super::{AIStrategy, SearchResult};
use crate::board::Board;
use crate::eval::evaluate;
use crate::notation::move_notation;
use rand::prelude::*;

/// 随机 AI - 随机选择合法走法
pub struct RandomAI {
    rng: StdRng,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        RandomAI { rng }
    }
}

impl AIStrategy for RandomAI {
    fn select_moves(&self, board: &Board, n: usize) -> Vec<SearchResult> {
        let mut moves = board.legal_moves(board.side_to_move());
        let mut rng = self.rng.clone();
        moves.shuffle(&mut rng);
        moves.truncate(n);

        moves
            .into_iter()
            .map(|mv| {
                let notation = move_notation(board, &mv);
                let mut child = board.clone();
                child.apply_move(&mv);
                SearchResult {
                    mv,
                    notation,
                    score: evaluate(&child, 0),
                    nodes: 0,
                }
            })
            .collect()
    }
}
