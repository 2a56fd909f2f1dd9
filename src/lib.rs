//! Chess AI Engine
//!
//! 国际象棋规则引擎与搜索 AI - 支持 FEN 输入输出

pub mod ai;
pub mod board;
pub mod eval;
pub mod fen;
pub mod notation;
pub mod test_positions;
pub mod types;

pub use ai::{
    AIConfig, AIEngine, AIStrategy, MinimaxAI, RandomAI, SearchResult, SUGGESTION_MARGIN,
};
pub use board::{get_legal_moves_from_fen, Board, PromotionChooser, QueenPromotion};
pub use eval::{evaluate, MATE_SCORE};
pub use fen::{apply_move_to_fen, apply_moves_to_fen, board_to_fen, parse_fen, FenState};
pub use notation::move_notation;
pub use types::{GameResult, Move, PieceType, Side, Square};
