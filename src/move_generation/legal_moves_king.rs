//! King candidate moves, castling included.
//!
//! Each wing is evaluated on its own and leaves a diagnostic on the tile the
//! king would land on when castling is refused.

use tracing::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceType;
use crate::game_state::piece::Piece;
use crate::game_state::tile::Tile;
use crate::move_generation::invalid_reasons::InvalidReason;
use crate::move_generation::legal_move_checks::is_threatened;
use crate::move_generation::legal_move_shared::{
    expect_type, step_moves, CandidateMoves, ALL_DIRECTIONS,
};
use crate::moves::chess_move::Move;

pub fn generate_king_moves(
    board: &Board,
    piece: &Piece,
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    expect_type(piece, PieceType::King)?;
    out.reject(piece.position(), InvalidReason::OriginalPosition);
    step_moves(board, piece, &ALL_DIRECTIONS, out)?;

    if !out.bypass_check() {
        generate_castling_moves(board, piece, out)?;
    }
    Ok(())
}

fn generate_castling_moves(
    board: &Board,
    king: &Piece,
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    let queens_side = king.position() + Tile::new(0, -2);
    let kings_side = king.position() + Tile::new(0, 2);
    let enemy = king.side().opposite();

    if king.has_moved() {
        out.reject(queens_side, InvalidReason::KingMoved);
        out.reject(kings_side, InvalidReason::KingMoved);
        return Ok(());
    }
    if is_threatened(board, king.position(), enemy) {
        out.reject(queens_side, InvalidReason::KingInCheck);
        out.reject(kings_side, InvalidReason::KingInCheck);
        return Ok(());
    }

    for (landing, step) in [(queens_side, -1i8), (kings_side, 1i8)] {
        if !landing.is_valid() {
            continue;
        }
        match castling_on_wing(board, king, landing, step) {
            Ok(rook) => {
                out.push(Move::castle_candidate(board, king.id(), rook.id(), landing)?)
            }
            Err(reason) => {
                debug!(king = %king, landing = %landing, %reason, "castling refused");
                out.reject(landing, reason);
            }
        }
    }
    Ok(())
}

/// The rook the king may castle with toward `step`, or why it may not.
fn castling_on_wing<'a>(
    board: &'a Board,
    king: &Piece,
    landing: Tile,
    step: i8,
) -> Result<&'a Piece, InvalidReason> {
    let direction = Tile::new(0, step);
    let rook = find_outward_rook(board, king, direction).ok_or(InvalidReason::RookMissing)?;
    if rook.has_moved() {
        return Err(InvalidReason::RookMoved);
    }

    let mut test = king.position() + direction;
    while test != rook.position() {
        if board.piece_at(test).is_some() {
            return Err(InvalidReason::Blocked);
        }
        test += direction;
    }

    // Every tile the king crosses or lands on, origin excluded.
    let enemy = king.side().opposite();
    let mut test = king.position() + direction;
    loop {
        if is_threatened(board, test, enemy) {
            return Err(InvalidReason::Threatened);
        }
        if test == landing {
            break;
        }
        test += direction;
    }
    Ok(rook)
}

/// First rook of the king's side found walking from the king to the edge.
fn find_outward_rook<'a>(board: &'a Board, king: &Piece, direction: Tile) -> Option<&'a Piece> {
    let mut test = king.position() + direction;
    while test.is_valid() {
        if let Some(piece) = board.piece_at(test) {
            if piece.piece_type() == PieceType::Rook && piece.side() == king.side() {
                return Some(piece);
            }
        }
        test += direction;
    }
    None
}
