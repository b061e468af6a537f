use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::moves::chess_move::Move;

/// A legal move together with the position it leads to, turn already passed
/// to the other side.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: Move,
    pub board_after_move: Board,
}

/// Produces every legal move of the side to move.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, board: &Board) -> Result<Vec<GeneratedMove>, ChessErrors>;
}
