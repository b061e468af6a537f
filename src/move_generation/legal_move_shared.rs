//! Pieces shared by the per-type candidate generators.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceType;
use crate::game_state::piece::Piece;
use crate::game_state::tile::Tile;
use crate::move_generation::invalid_reasons::{InvalidReason, InvalidReasons};
use crate::moves::chess_move::Move;

pub const DIAGONAL_DIRECTIONS: [Tile; 4] = [
    Tile::new(-1, -1),
    Tile::new(1, -1),
    Tile::new(-1, 1),
    Tile::new(1, 1),
];

pub const ORTHOGONAL_DIRECTIONS: [Tile; 4] = [
    Tile::new(0, -1),
    Tile::new(-1, 0),
    Tile::new(1, 0),
    Tile::new(0, 1),
];

pub const ALL_DIRECTIONS: [Tile; 8] = [
    Tile::new(-1, -1),
    Tile::new(0, -1),
    Tile::new(1, -1),
    Tile::new(-1, 0),
    Tile::new(1, 0),
    Tile::new(-1, 1),
    Tile::new(0, 1),
    Tile::new(1, 1),
];

pub const KNIGHT_OFFSETS: [Tile; 8] = [
    Tile::new(1, 2),
    Tile::new(-1, 2),
    Tile::new(1, -2),
    Tile::new(-1, -2),
    Tile::new(2, 1),
    Tile::new(-2, 1),
    Tile::new(2, -1),
    Tile::new(-2, -1),
];

/// Output of one candidate-generation pass.
#[derive(Debug, Default)]
pub struct CandidateMoves {
    pub moves: Vec<Move>,
    pub reasons: InvalidReasons,
    bypass_check: bool,
}

impl CandidateMoves {
    pub fn new(bypass_check: bool) -> Self {
        Self {
            moves: Vec::with_capacity(32),
            reasons: InvalidReasons::default(),
            bypass_check,
        }
    }

    /// When set, castling is not generated and no reasons are recorded.
    #[inline]
    pub fn bypass_check(&self) -> bool {
        self.bypass_check
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn reject(&mut self, tile: Tile, reason: InvalidReason) {
        if !self.bypass_check {
            self.reasons.add(tile, reason);
        }
    }
}

/// Fails unless `piece` is of the type the calling generator handles.
pub fn expect_type(piece: &Piece, expected: PieceType) -> Result<(), ChessErrors> {
    if piece.piece_type() == expected {
        Ok(())
    } else {
        Err(ChessErrors::GeneratingWrongMovementForPieceType(
            piece.piece_type(),
        ))
    }
}

/// Casts rays from `piece` along `directions`. Each ray stops at the board
/// edge or the first piece; an enemy blocker is included as a capture.
pub fn ray_cast_moves(
    board: &Board,
    piece: &Piece,
    directions: &[Tile],
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    out.reject(piece.position(), InvalidReason::OriginalPosition);
    for direction in directions {
        let mut test = piece.position() + *direction;
        while test.is_valid() {
            match board.piece_at(test) {
                Some(blocker) => {
                    if blocker.side() != piece.side() {
                        out.push(Move::candidate(board, piece.id(), test)?);
                    } else {
                        out.reject(test, InvalidReason::Occupied);
                    }
                    break;
                }
                None => out.push(Move::candidate(board, piece.id(), test)?),
            }
            test += *direction;
        }
    }
    Ok(())
}

/// Fixed-offset steps (king, knight): off-board and friendly-occupied
/// destinations are rejected.
pub fn step_moves(
    board: &Board,
    piece: &Piece,
    offsets: &[Tile],
    out: &mut CandidateMoves,
) -> Result<(), ChessErrors> {
    for offset in offsets {
        let test = piece.position() + *offset;
        if !test.is_valid() {
            out.reject(test, InvalidReason::OffBoard);
            continue;
        }
        if board
            .piece_at(test)
            .is_some_and(|target| target.side() == piece.side())
        {
            out.reject(test, InvalidReason::Occupied);
            continue;
        }
        out.push(Move::candidate(board, piece.id(), test)?);
    }
    Ok(())
}
