//! Attack detection.
//!
//! Threatened tiles mirror candidate generation without legality bookkeeping
//! (no castling, no self-check filter, no diagnostics), so asking whether a
//! king is attacked never recurses back into the validator.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceType, Side};
use crate::game_state::piece::Piece;
use crate::game_state::tile::Tile;
use crate::move_generation::legal_move_shared::{
    ALL_DIRECTIONS, DIAGONAL_DIRECTIONS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS,
};

/// Tiles `piece` attacks on `board`.
///
/// Pawns attack both forward diagonals whether or not anything stands there.
pub fn threatened_tiles(board: &Board, piece: &Piece) -> Vec<Tile> {
    let mut out = Vec::with_capacity(16);
    match piece.piece_type() {
        PieceType::King => threatened_steps(board, piece, &ALL_DIRECTIONS, &mut out),
        PieceType::Knight => threatened_steps(board, piece, &KNIGHT_OFFSETS, &mut out),
        PieceType::Bishop => threatened_rays(board, piece, &DIAGONAL_DIRECTIONS, &mut out),
        PieceType::Rook => threatened_rays(board, piece, &ORTHOGONAL_DIRECTIONS, &mut out),
        PieceType::Queen => threatened_rays(board, piece, &ALL_DIRECTIONS, &mut out),
        PieceType::Pawn => {
            let forward = piece.side().forward();
            let diagonals = [Tile::new(forward, -1), Tile::new(forward, 1)];
            threatened_steps(board, piece, &diagonals, &mut out);
        }
    }
    out
}

fn threatened_steps(board: &Board, piece: &Piece, offsets: &[Tile], out: &mut Vec<Tile>) {
    for offset in offsets {
        let test = piece.position() + *offset;
        if !test.is_valid() {
            continue;
        }
        if board
            .piece_at(test)
            .is_some_and(|target| target.side() == piece.side())
        {
            continue;
        }
        out.push(test);
    }
}

fn threatened_rays(board: &Board, piece: &Piece, directions: &[Tile], out: &mut Vec<Tile>) {
    for direction in directions {
        let mut test = piece.position() + *direction;
        while test.is_valid() {
            if let Some(blocker) = board.piece_at(test) {
                if blocker.side() != piece.side() {
                    out.push(test);
                }
                break;
            }
            out.push(test);
            test += *direction;
        }
    }
}

/// Whether any piece of `by` attacks `tile`.
pub fn is_threatened(board: &Board, tile: Tile, by: Side) -> bool {
    board
        .pieces_of(by)
        .any(|piece| threatened_tiles(board, piece).contains(&tile))
}

/// Whether `side`'s king is attacked. A side without a king is never in check.
pub fn is_in_check(board: &Board, side: Side) -> bool {
    match board.king(side) {
        Some(king) => is_threatened(board, king.position(), side.opposite()),
        None => false,
    }
}

/// Enemy pieces attacking `side`'s king.
pub fn checkers(board: &Board, side: Side) -> Vec<&Piece> {
    let Some(king) = board.king(side) else {
        return Vec::new();
    };
    let target = king.position();
    board
        .pieces_of(side.opposite())
        .filter(|piece| threatened_tiles(board, piece).contains(&target))
        .collect()
}
