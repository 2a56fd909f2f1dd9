//! 测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试和调试
//!
//! 命名规范:
//! - START: 初始局面
//! - OPENING_n: 开局后若干步
//! - MID_n: 中局
//! - END_n: 残局
//! - CHECK_n: 将军测试
//! - MATE_n: 杀棋测试
//! - SPECIAL_n: 特殊规则测试

// =============================================================================
// 开局 (START / OPENING)
// =============================================================================

/// 初始局面
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// 王兵开局：1. e4
pub const OPENING_1: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";

/// 开放式对局：1. e4 e5 2. Nf3 Nc6
pub const OPENING_2: &str =
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 1";

/// 意大利开局：双方王翼子力展开完毕，可以短易位
pub const OPENING_3: &str =
    "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1";

// =============================================================================
// 中局 (MID)
// =============================================================================

/// 双方易位后的典型中局
pub const MID_1: &str =
    "r2q1rk1/ppp2ppp/2np1n2/2b1p1B1/2B1P1b1/2NP1N2/PPP2PPP/R2Q1RK1 w - - 0 1";

/// 白方多一兵的中局
pub const MID_2: &str = "2r3k1/pp3ppp/3q4/3p4/3P4/2P2N2/PP3PPP/3QR1K1 w - - 0 1";

// =============================================================================
// 残局 (END)
// =============================================================================

/// 王兵残局
pub const END_1: &str = "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1";

/// 车兵残局
pub const END_2: &str = "8/5k2/8/8/8/8/4KP2/5R2 w - - 0 1";

/// 后对车残局
pub const END_3: &str = "3r2k1/8/8/8/8/8/3Q4/4K3 w - - 0 1";

// =============================================================================
// 将军与杀棋 (CHECK / MATE)
// =============================================================================

/// 白车沉底将军，黑王可以逃
pub const CHECK_1: &str = "R5k1/6pp/8/8/8/8/6PP/6K1 b - - 0 1";

/// 底线杀：白方一步 Ra8#
pub const MATE_IN_1: &str = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1";

/// 后卫式杀局：黑方已被将死
pub const MATE_BACK_RANK: &str = "R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1";

/// 逼和：黑方无子可动且未被将军
pub const STALEMATE_1: &str = "7k/8/6Q1/6K1/8/8/8/8 b - - 0 1";

// =============================================================================
// 特殊规则 (SPECIAL)
// =============================================================================

/// 双方均可向两翼易位
pub const SPECIAL_CASTLING: &str = "r3k2r/pppqppbp/2npbnp1/8/8/2NPBNP1/PPPQPPBP/R3K2R w KQkq - 0 1";

/// 白兵 e5 可吃过路兵 d5
pub const SPECIAL_EN_PASSANT: &str =
    "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1";

/// 白兵 a7 下一步升变
pub const SPECIAL_PROMOTION: &str = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";
