//! AI 策略模块
//!
//! 提供走法搜索策略实现，统一通过 `AIEngine` 调用

mod minimax;
mod random;

pub use minimax::MinimaxAI;
pub use random::RandomAI;

use crate::board::Board;
use crate::types::{Move, Side};

/// 候选走法过滤阈值：与最佳分差不超过该值的走法才进入推荐列表
pub const SUGGESTION_MARGIN: i32 = 50;

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 搜索深度（回合层数）
    pub depth: u32,
    /// 随机性（0.0-1.0）
    pub randomness: f64,
    /// 随机种子
    pub seed: Option<u64>,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            depth: 4,
            randomness: 0.0,
            seed: None,
        }
    }
}

/// 搜索结果：走法、代数记号、分数和本次调用访问的节点数
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub mv: Move,
    pub notation: String,
    pub score: i32,
    pub nodes: u64,
}

/// AI 策略接口
pub trait AIStrategy {
    /// 选择走法（按本方视角从优到劣排序，最多返回 n 个）
    fn select_moves(&self, board: &Board, n: usize) -> Vec<SearchResult>;

    /// 选择最佳走法
    fn select_best_move(&self, board: &Board) -> Option<SearchResult> {
        self.select_moves(board, 1).into_iter().next()
    }
}

/// 按行棋方视角把结果排成从优到劣（白方降序，黑方升序）
///
/// 稳定排序，同分保持生成顺序。
pub(crate) fn sort_best_first(results: &mut [SearchResult], side: Side) {
    match side {
        Side::White => results.sort_by(|a, b| b.score.cmp(&a.score)),
        Side::Black => results.sort_by(|a, b| a.score.cmp(&b.score)),
    }
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy>,
}

impl AIEngine {
    /// 创建随机 AI
    pub fn random(seed: Option<u64>) -> Self {
        AIEngine {
            strategy: Box::new(RandomAI::new(seed)),
        }
    }

    /// 创建 Minimax AI
    pub fn minimax(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(MinimaxAI::new(config)),
        }
    }

    /// 从策略名称创建
    pub fn from_strategy(name: &str, config: &AIConfig) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "random" => Ok(Self::random(config.seed)),
            "minimax" => Ok(Self::minimax(config)),
            _ => Err(format!(
                "Unknown strategy: {}. Available: minimax, random",
                name
            )),
        }
    }

    /// 从 FEN 选择走法
    pub fn select_moves_fen(&self, fen: &str, n: usize) -> Result<Vec<SearchResult>, String> {
        let board = Board::from_fen(fen)?;
        Ok(self.strategy.select_moves(&board, n))
    }

    /// 从 FEN 选择最佳走法
    pub fn select_best_move_fen(&self, fen: &str) -> Result<Option<SearchResult>, String> {
        let board = Board::from_fen(fen)?;
        Ok(self.strategy.select_best_move(&board))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions::START_FEN;

    #[test]
    fn test_random_ai() {
        let ai = AIEngine::random(Some(42));
        let moves = ai.select_moves_fen(START_FEN, 5).unwrap();
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_random_ai_deterministic_with_seed() {
        let a = AIEngine::random(Some(7))
            .select_best_move_fen(START_FEN)
            .unwrap()
            .unwrap();
        let b = AIEngine::random(Some(7))
            .select_best_move_fen(START_FEN)
            .unwrap()
            .unwrap();
        assert_eq!(a.mv, b.mv);
    }

    #[test]
    fn test_minimax_finds_back_rank_mate() {
        let config = AIConfig {
            depth: 2,
            ..Default::default()
        };
        let ai = AIEngine::minimax(&config);
        let best = ai
            .select_best_move_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1")
            .unwrap()
            .unwrap();
        assert_eq!(best.notation, "Ra8#");
    }

    #[test]
    fn test_suggestions_within_margin_of_best() {
        let config = AIConfig {
            depth: 2,
            ..Default::default()
        };
        let ai = AIEngine::minimax(&config);
        let moves = ai.select_moves_fen(START_FEN, 3).unwrap();
        assert!(!moves.is_empty());
        assert!(moves.len() <= 3);
        let best = moves[0].score;
        for m in &moves {
            assert!(best - m.score <= SUGGESTION_MARGIN);
        }
    }

    #[test]
    fn test_suggestions_collapse_to_single_mate() {
        // 唯一的杀棋走法远超其他候选，推荐列表只剩它一个
        let config = AIConfig {
            depth: 2,
            ..Default::default()
        };
        let ai = AIEngine::minimax(&config);
        let moves = ai
            .select_moves_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", 3)
            .unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].notation, "Ra8#");
    }

    #[test]
    fn test_all_strategies_from_name() {
        let config = AIConfig::default();
        for name in ["minimax", "random"] {
            assert!(
                AIEngine::from_strategy(name, &config).is_ok(),
                "Failed to create strategy: {}",
                name
            );
        }
        assert!(AIEngine::from_strategy("mcts", &config).is_err());
    }
}
