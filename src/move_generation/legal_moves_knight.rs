use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceType;
use crate::game_state::piece::Piece;
use crate::move_generation::invalid_reasons::InvalidReason;
use crate::move_generation::legal_move_shared::{
    expect_type, step_moves, CandidateMoves, KNIGHT_OFFSETS,
};

pub fn generate_knight_moves(
    board: &Board,
    piece: &Piece,
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    expect_type(piece, PieceType::Knight)?;
    out.reject(piece.position(), InvalidReason::OriginalPosition);
    step_moves(board, piece, &KNIGHT_OFFSETS, out)
}
