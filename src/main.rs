//! Chess AI CLI
//!
//! 命令行界面，用于测试 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 通信

use chess_ai::{
    apply_moves_to_fen, evaluate, get_legal_moves_from_fen, AIConfig, AIEngine, Board,
    SearchResult,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "chess-ai")]
#[command(about = "Chess AI Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// FEN 字符串
        #[arg(long)]
        fen: String,
    },

    /// 选择最佳走法
    Best {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// AI 策略 (minimax, random)
        #[arg(long, default_value = "minimax")]
        strategy: String,

        /// 搜索深度
        #[arg(long, default_value = "4")]
        depth: u32,

        /// 返回的走法数量
        #[arg(long, default_value = "1")]
        n: usize,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数（白方视角，兵 = 1.0）
    Score {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 在局面上执行一串走法，输出结果 FEN
    Apply {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// 空格分隔的走法序列（如 "e2e4 e7e5"）
        #[arg(long)]
        moves: String,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

// 对外报告的分数是内部百分兵分值除以 100（兵 = 1.0）
#[derive(Serialize, Deserialize)]
struct MoveResult {
    #[serde(rename = "move")]
    mv: String,
    notation: String,
    score: f64,
}

#[derive(Serialize, Deserialize)]
struct MovesResponse {
    moves: Vec<MoveResult>,
    total: usize,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: String,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    depth: Option<u32>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    moves: Option<String>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    turn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
}

impl ServerResponse {
    fn success_moves(
        moves: Vec<MoveResult>,
        depth: u32,
        nodes: u64,
        nps: f64,
        elapsed_ms: f64,
    ) -> Self {
        Self {
            ok: true,
            moves: Some(moves),
            depth: Some(depth),
            nodes: Some(nodes),
            nps: Some(nps),
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_legal_moves(legal_moves: Vec<String>) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            ..Default::default()
        }
    }

    fn success_eval(score: f64, turn: &str) -> Self {
        Self {
            ok: true,
            score: Some(score),
            turn: Some(turn.to_string()),
            ..Default::default()
        }
    }

    fn success_fen(fen: String) -> Self {
        Self {
            ok: true,
            fen: Some(fen),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn to_move_results(results: Vec<SearchResult>) -> (Vec<MoveResult>, u64) {
    let nodes = results.first().map(|r| r.nodes).unwrap_or(0);
    let moves = results
        .into_iter()
        .map(|r| MoveResult {
            mv: r.mv.to_fen_str(),
            notation: r.notation,
            score: r.score as f64 / 100.0,
        })
        .collect();
    (moves, nodes)
}

fn calc_nps(nodes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        nodes as f64 / elapsed_secs
    } else {
        0.0
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { fen } => match get_legal_moves_from_fen(&fen) {
            Ok(moves) => {
                println!("Legal moves ({}):", moves.len());
                for mv in &moves {
                    println!("  {}", mv);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Best {
            fen,
            strategy,
            depth,
            n,
            seed,
            json,
        } => {
            let config = AIConfig {
                depth,
                randomness: 0.0,
                seed,
            };

            let ai = match AIEngine::from_strategy(&strategy, &config) {
                Ok(ai) => ai,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let start = Instant::now();
            match ai.select_moves_fen(&fen, n) {
                Ok(results) => {
                    let elapsed = start.elapsed().as_secs_f64();
                    let (moves, nodes) = to_move_results(results);
                    let nps = calc_nps(nodes, elapsed);

                    if json {
                        let response = MovesResponse {
                            total: moves.len(),
                            moves,
                        };
                        match serde_json::to_string_pretty(&response) {
                            Ok(s) => println!("{}", s),
                            Err(e) => {
                                eprintln!("Error: {}", e);
                                std::process::exit(1);
                            }
                        }
                        eprintln!(
                            "Stats: depth={}, nodes={}, time={:.3}s, nps={:.0}",
                            depth, nodes, elapsed, nps
                        );
                    } else {
                        println!("Best moves (strategy={}):", strategy);
                        for m in &moves {
                            println!("  {} ({}) score: {:.2}", m.mv, m.notation, m.score);
                        }
                        println!(
                            "\nStats: depth={}, nodes={}, time={:.3}s, nps={:.0}",
                            depth, nodes, elapsed, nps
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Score { fen, json } => match Board::from_fen(&fen) {
            Ok(board) => {
                let score = evaluate(&board, 0) as f64 / 100.0;
                let turn = board.side_to_move();

                if json {
                    println!(
                        "{{\"fen\": {:?}, \"turn\": \"{}\", \"score\": {:.2}}}",
                        fen, turn, score
                    );
                } else {
                    println!("局面评估（白方视角）: {:.2} ({} 行棋)", score, turn);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Apply { fen, moves } => match apply_moves_to_fen(&fen, &moves) {
            Ok(result) => println!("{}", result),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Server => {
            run_server();
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    log::info!("server mode started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        // 解析请求
        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = ServerResponse::error(&format!("Invalid JSON: {}", e));
                print_response(&response);
                let _ = stdout.flush();
                continue;
            }
        };

        // 处理命令
        log::debug!("request: cmd={}", request.cmd);
        let response = match request.cmd.as_str() {
            "best" => handle_best_request(&request),
            "moves" => handle_moves_request(&request),
            "eval" => handle_eval_request(&request),
            "apply" => handle_apply_request(&request),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        // 返回响应
        print_response(&response);
        let _ = stdout.flush();
    }
}

fn print_response(response: &ServerResponse) {
    match serde_json::to_string(response) {
        Ok(s) => println!("{}", s),
        Err(e) => println!("{{\"ok\": false, \"error\": \"{}\"}}", e),
    }
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let strategy = request.strategy.as_deref().unwrap_or("minimax");
    let depth = request.depth.unwrap_or(4);
    let n = request.n.unwrap_or(3);

    let config = AIConfig {
        depth,
        randomness: 0.0,
        seed: request.seed,
    };

    let ai = match AIEngine::from_strategy(strategy, &config) {
        Ok(ai) => ai,
        Err(e) => return ServerResponse::error(&format!("Invalid strategy: {}", e)),
    };

    let start = Instant::now();
    match ai.select_moves_fen(&request.fen, n) {
        Ok(results) => {
            let elapsed = start.elapsed().as_secs_f64();
            let (moves, nodes) = to_move_results(results);
            let nps = calc_nps(nodes, elapsed);
            ServerResponse::success_moves(moves, depth, nodes, nps, elapsed * 1000.0)
        }
        Err(e) => ServerResponse::error(&format!("AI error: {}", e)),
    }
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match get_legal_moves_from_fen(&request.fen) {
        Ok(moves) => ServerResponse::success_legal_moves(moves),
        Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
    }
}

/// 处理 eval 命令（静态评估）
fn handle_eval_request(request: &ServerRequest) -> ServerResponse {
    match Board::from_fen(&request.fen) {
        Ok(board) => {
            let score = evaluate(&board, 0) as f64 / 100.0;
            ServerResponse::success_eval(score, &board.side_to_move().to_string())
        }
        Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
    }
}

/// 处理 apply 命令（执行走法序列，返回结果 FEN）
fn handle_apply_request(request: &ServerRequest) -> ServerResponse {
    let moves = request.moves.as_deref().unwrap_or("");
    match apply_moves_to_fen(&request.fen, moves) {
        Ok(fen) => ServerResponse::success_fen(fen),
        Err(e) => ServerResponse::error(&format!("Apply error: {}", e)),
    }
}
