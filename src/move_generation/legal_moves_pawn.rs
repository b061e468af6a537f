//! Pawn candidate moves: pushes, captures, en passant and promotion.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceType, PROMOTION_TARGETS};
use crate::game_state::piece::Piece;
use crate::game_state::tile::Tile;
use crate::move_generation::invalid_reasons::InvalidReason;
use crate::move_generation::legal_move_shared::{expect_type, CandidateMoves};
use crate::moves::chess_move::Move;

pub fn generate_pawn_moves(
    board: &Board,
    piece: &Piece,
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    expect_type(piece, PieceType::Pawn)?;
    out.reject(piece.position(), InvalidReason::OriginalPosition);

    let forward = piece.side().forward();
    check_pawn_forward(board, piece, forward, out)?;
    check_pawn_diagonal(board, piece, forward, -1, out)?;
    check_pawn_diagonal(board, piece, forward, 1, out)?;
    Ok(())
}

fn check_pawn_forward(
    board: &Board,
    piece: &Piece,
    forward: i8,
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    let in_front = piece.position() + Tile::new(forward, 0);
    let in_front_two = piece.position() + Tile::new(forward * 2, 0);

    if !piece.has_moved() && in_front_two.is_valid() {
        if board.piece_at(in_front).is_some() {
            out.reject(in_front_two, InvalidReason::Blocked);
        } else if board.piece_at(in_front_two).is_some() {
            out.reject(in_front_two, InvalidReason::Occupied);
        } else {
            push_pawn_move(board, piece, in_front_two, out)?;
        }
    }

    if in_front.is_valid() {
        if board.piece_at(in_front).is_some() {
            out.reject(in_front, InvalidReason::Occupied);
        } else {
            push_pawn_move(board, piece, in_front, out)?;
        }
    }
    Ok(())
}

fn check_pawn_diagonal(
    board: &Board,
    piece: &Piece,
    forward: i8,
    left_right: i8,
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    let diagonal = piece.position() + Tile::new(forward, left_right);
    if !diagonal.is_valid() {
        return Ok(());
    }

    match board.piece_at(diagonal) {
        None => {
            // En passant: the victim stands beside the pawn, not on the diagonal.
            let beside = piece.position() + Tile::new(0, left_right);
            let en_passant = board.piece_at(beside).is_some_and(|victim| {
                victim.piece_type() == PieceType::Pawn
                    && victim.side() != piece.side()
                    && victim.pawn_just_moved_double()
            });
            if en_passant {
                push_pawn_move(board, piece, diagonal, out)?;
            } else {
                out.reject(diagonal, InvalidReason::Empty);
            }
        }
        Some(target) if target.side() == piece.side() => {
            out.reject(diagonal, InvalidReason::Occupied);
        }
        Some(_) => push_pawn_move(board, piece, diagonal, out)?,
    }
    Ok(())
}

/// A move onto the promotion row becomes one promotion per target type.
fn push_pawn_move(
    board: &Board,
    piece: &Piece,
    to: Tile,
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    if to.row == piece.side().promotion_row() {
        for target in PROMOTION_TARGETS {
            out.push(Move::promotion_candidate(board, piece.id(), to, target)?);
        }
    } else {
        out.push(Move::candidate(board, piece.id(), to)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Side;

    fn tile(s: &str) -> Tile {
        Tile::from_algebraic(s).expect("test square should parse")
    }

    fn pawn_moves(board: &Board, square: &str) -> CandidateMoves {
        let pawn = board.piece_at(tile(square)).expect("pawn").clone();
        let mut out = CandidateMoves::new(false);
        generate_pawn_moves(board, &pawn, &mut out).expect("pawn generator");
        out
    }

    #[test]
    fn unmoved_pawn_pushes_one_or_two() {
        let board = Board::new();
        let out = pawn_moves(&board, "e2");
        let mut tiles: Vec<Tile> = out.moves.iter().map(|m| m.to()).collect();
        tiles.sort();
        assert_eq!(tiles, vec![tile("e3"), tile("e4")]);
        assert_eq!(out.reasons.get(tile("d3")), Some(InvalidReason::Empty));
    }

    #[test]
    fn blocked_pawn_reports_reasons() {
        let mut board = Board::new();
        board
            .place(PieceType::Knight, Side::Black, tile("e3"))
            .expect("blocker");
        let out = pawn_moves(&board, "e2");
        assert!(out.moves.is_empty());
        assert_eq!(out.reasons.get(tile("e4")), Some(InvalidReason::Blocked));
        assert_eq!(out.reasons.get(tile("e3")), Some(InvalidReason::Occupied));
    }

    #[test]
    fn far_row_yields_four_promotions() {
        let mut board = Board::empty();
        board
            .place(PieceType::Pawn, Side::Black, tile("c2"))
            .expect("pawn");
        board
            .place(PieceType::Rook, Side::White, tile("b1"))
            .expect("rook");
        let out = pawn_moves(&board, "c2");
        assert_eq!(out.moves.len(), 8);
        assert!(out.moves.iter().all(|m| m.promotion_target().is_some()));
        assert_eq!(out.moves[0].promotion_target(), Some(PieceType::Queen));
        assert_eq!(out.moves.iter().filter(|m| m.is_capture()).count(), 4);
    }

    #[test]
    fn moved_pawn_cannot_double_step() {
        let mut board = Board::empty();
        board
            .place(PieceType::Pawn, Side::White, tile("d3"))
            .expect("pawn");
        let out = pawn_moves(&board, "d3");
        let tiles: Vec<Tile> = out.moves.iter().map(|m| m.to()).collect();
        assert_eq!(tiles, vec![tile("d4")]);
    }
}
