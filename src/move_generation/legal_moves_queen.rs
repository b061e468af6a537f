//! Queen candidate moves: union of rook and bishop rays.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceType;
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_shared::{
    expect_type, ray_cast_moves, CandidateMoves, ALL_DIRECTIONS,
};

pub fn generate_queen_moves(
    board: &Board,
    piece: &Piece,
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    expect_type(piece, PieceType::Queen)?;
    ray_cast_moves(board, piece, &ALL_DIRECTIONS, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Side;
    use crate::game_state::tile::Tile;

    #[test]
    fn central_queen_reaches_twenty_seven_squares() {
        let mut board = Board::empty();
        let queen = board
            .place(PieceType::Queen, Side::White, Tile::new(3, 3))
            .expect("queen");
        let piece = board.piece(queen).expect("queen on board").clone();
        let mut out = CandidateMoves::new(false);
        generate_queen_moves(&board, &piece, &mut out).expect("queen generator");
        assert_eq!(out.moves.len(), 27);
    }
}
