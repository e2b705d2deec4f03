//! Game-over detection: checkmate, stalemate, and the fifty-move rule.
//! Repetition and insufficient-material draws are not tracked.

use crate::board::{Board, Color};
use crate::moves::movegen::generate_legal_moves;
use crate::moves::square_control::is_check;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay,
    Checkmate,
    Stalemate,
    DrawFiftyMove,
}

/// Checkmate/stalemate takes priority over the fifty-move rule: a position
/// with no legal moves is decisive regardless of the clock.
pub fn position_status(board: &mut Board) -> GameStatus {
    let legal = generate_legal_moves(board);
    if legal.is_empty() {
        return if is_check(board, board.side_to_move) { GameStatus::Checkmate } else { GameStatus::Stalemate };
    }
    if board.halfmove_clock >= 100 {
        return GameStatus::DrawFiftyMove;
    }
    GameStatus::InPlay
}

/// `"white"`, `"black"`, `"draw"`, or `"none"` if the game isn't over.
pub fn game_winner(board: &mut Board) -> &'static str {
    match position_status(board) {
        GameStatus::Checkmate => {
            if board.side_to_move == Color::White { "black" } else { "white" }
        }
        GameStatus::Stalemate | GameStatus::DrawFiftyMove => "draw",
        GameStatus::InPlay => "none",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_in_play() {
        let mut b = Board::new();
        assert_eq!(position_status(&mut b), GameStatus::InPlay);
        assert_eq!(game_winner(&mut b), "none");
    }

    #[test]
    fn back_rank_mate_is_checkmate_for_black() {
        let mut b = Board::from_fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
        assert_eq!(position_status(&mut b), GameStatus::Checkmate);
        assert_eq!(game_winner(&mut b), "white");
    }

    #[test]
    fn stalemate_with_no_legal_moves_and_no_check() {
        let mut b = Board::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").unwrap();
        assert_eq!(position_status(&mut b), GameStatus::Stalemate);
        assert_eq!(game_winner(&mut b), "draw");
    }

    #[test]
    fn halfmove_clock_at_hundred_is_a_fifty_move_draw() {
        let mut b = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 100 60").unwrap();
        assert_eq!(position_status(&mut b), GameStatus::DrawFiftyMove);
        assert_eq!(game_winner(&mut b), "draw");
    }
}
