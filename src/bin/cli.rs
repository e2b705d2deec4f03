use std::io::{self, BufRead};
use std::time::Duration;

use talon::board::Board;
use talon::error::EngineError;
use talon::moves::movegen::generate_legal_moves;
use talon::moves::perft::{perft, perft_divide};
use talon::moves::types::Move;
use talon::search::find_best_move;
use talon::status::game_winner;

const DEFAULT_SEARCH_TIME_MS: u64 = 1_000_000;

fn main() {
    #[cfg(feature = "cli")]
    if let Err(e) = talon::logger::init_logging("debug.txt", "talon=info") {
        eprintln!("fatal: could not open debug log: {e}");
        std::process::exit(1);
    }

    let mut board = Board::new();
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "uci" => handle_uci(),
            "isready" => println!("readyok"),
            "ucinewgame" => board = Board::new(),
            "position" => handle_position(&parts[1..], &mut board),
            "showboard" | "d" => {
                println!("{}", board.visualize());
                println!("Fen: {}", board.to_fen());
                println!("Hash: {:016x}", board.hash);
            }
            "go" => handle_go(&parts[1..], &mut board),
            "getfen" => println!("{}", board.to_fen()),
            "getmoves" => handle_getmoves(&mut board),
            "getbestmove" => handle_getbestmove(&parts[1..], &mut board),
            "getbestpiece" => handle_getbestpiece(&parts[1..], &mut board),
            "getgamewinner" => println!("{}", game_winner(&mut board)),
            "quit" => break,
            other => eprintln!("{}", EngineError::UnknownCommand(other.to_string())),
        }
    }
}

fn handle_uci() {
    println!("id name Talon");
    println!("id author talon contributors");
    println!("uciok");
}

fn handle_position(args: &[&str], board: &mut Board) {
    if args.is_empty() {
        return;
    }

    let moves_idx = args.iter().position(|&p| p == "moves");
    let body_end = moves_idx.unwrap_or(args.len());

    *board = match args[0] {
        "startpos" => Board::new(),
        "fen" => {
            let fen = args[1..body_end].join(" ");
            match Board::from_fen(&fen) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("invalid position: {e}");
                    return;
                }
            }
        }
        other => {
            eprintln!("unknown position subcommand: {other}");
            return;
        }
    };

    if let Some(idx) = moves_idx {
        for uci in &args[idx + 1..] {
            let legal = generate_legal_moves(board);
            match Move::from_uci(uci, &legal) {
                Some(mv) => {
                    board.make(mv);
                }
                None => {
                    eprintln!("{}", EngineError::InvalidUciMove(uci.to_string()));
                    return;
                }
            }
        }
    }
}

fn handle_go(args: &[&str], board: &mut Board) {
    if args.first() == Some(&"perft") {
        handle_perft(&args[1..], board);
    }
}

fn handle_perft(args: &[&str], board: &mut Board) {
    let Some(depth) = args.first().and_then(|d| d.parse::<u32>().ok()) else {
        println!("perft command needs a depth argument");
        return;
    };
    let divide = args.get(1) == Some(&"-d");

    if divide {
        let breakdown = perft_divide(board, depth.saturating_sub(1));
        let mut total = 0u64;
        for (mv, count) in &breakdown {
            println!("{mv}: {count}");
            total += count;
        }
        println!("Total: {total}");
    } else {
        println!("{}", perft(board, depth));
    }
}

fn handle_getmoves(board: &mut Board) {
    let moves = generate_legal_moves(board);
    let ucis: Vec<String> = moves.iter().map(Move::to_uci).collect();
    println!("{}", ucis.join(" "));
}

fn parse_search_args(args: &[&str]) -> Option<(u32, Duration)> {
    let depth = args.first()?.parse::<u32>().ok()?;
    let time_ms = args.get(1).and_then(|t| t.parse::<u64>().ok()).unwrap_or(DEFAULT_SEARCH_TIME_MS);
    Some((depth, Duration::from_millis(time_ms)))
}

fn handle_getbestmove(args: &[&str], board: &mut Board) {
    let Some((depth, time_budget)) = parse_search_args(args) else {
        println!("getbestmove needs a depth argument; usage: getbestmove <depth> [maxSearchTimeMs]");
        return;
    };
    let result = find_best_move(board, depth, time_budget);
    match result.best_move {
        Some(mv) => println!("{} {}", mv.to_uci(), result.score),
        None => println!("0000 {}", result.score),
    }
}

fn piece_letter(piece: talon::board::Piece) -> char {
    use talon::board::Piece;
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

fn handle_getbestpiece(args: &[&str], board: &mut Board) {
    let Some((depth, time_budget)) = parse_search_args(args) else {
        println!("getbestpiece needs a depth argument; usage: getbestpiece <depth> [maxSearchTimeMs]");
        return;
    };
    let result = find_best_move(board, depth, time_budget);
    match result.best_move {
        Some(mv) => println!("{} {}", piece_letter(mv.piece), result.score),
        None => println!("none {}", result.score),
    }
}
