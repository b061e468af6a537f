//! Rook candidate moves: rays along ranks and files.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceType;
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_shared::{
    expect_type, ray_cast_moves, CandidateMoves, ORTHOGONAL_DIRECTIONS,
};

pub fn generate_rook_moves(
    board: &Board,
    piece: &Piece,
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    expect_type(piece, PieceType::Rook)?;
    ray_cast_moves(board, piece, &ORTHOGONAL_DIRECTIONS, out)
}
