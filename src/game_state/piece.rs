//! Individual pieces owned by a [`Board`](crate::game_state::board::Board).

use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{PieceType, Side};
use crate::game_state::tile::Tile;

/// Stable identity of a piece within one board and its simulation copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u32);

/// A piece on the board.
///
/// Position and the movement flags are only written by the board's commit
/// pathway; callers read them through the accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    piece_type: PieceType,
    side: Side,
    position: Tile,
    has_moved: bool,
    /// Only meaningful for pawns.
    pawn_just_moved_double: bool,
}

impl Piece {
    pub(crate) fn new(id: PieceId, piece_type: PieceType, side: Side, position: Tile) -> Self {
        Self {
            id,
            piece_type,
            side,
            position,
            has_moved: false,
            pawn_just_moved_double: false,
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn position(&self) -> Tile {
        self.position
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    #[inline]
    pub fn pawn_just_moved_double(&self) -> bool {
        self.pawn_just_moved_double
    }

    /// Algebraic name of the current square, for example `e5`.
    pub fn chess_pos(&self) -> String {
        self.position.to_algebraic()
    }

    /// Promotes a pawn standing on its promotion row.
    ///
    /// Returns `Ok(true)` when the type changed and `Ok(false)` when the piece
    /// is not a pawn on its last row.
    pub fn promote(&mut self, promoted_to: PieceType) -> Result<bool, ChessErrors> {
        if promoted_to == PieceType::King {
            return Err(ChessErrors::CannotPromoteToKing);
        }

        if self.piece_type == PieceType::Pawn && self.position.row == self.side.promotion_row() {
            self.piece_type = promoted_to;
            return Ok(true);
        }
        Ok(false)
    }

    /// Same type, side and square, ignoring identity and flags.
    pub fn equals_shallow(&self, other: &Piece) -> bool {
        self.piece_type == other.piece_type
            && self.side == other.side
            && self.position == other.position
    }

    pub(crate) fn set_position(&mut self, position: Tile) {
        self.position = position;
    }

    pub(crate) fn set_has_moved(&mut self, has_moved: bool) {
        self.has_moved = has_moved;
    }

    pub(crate) fn set_pawn_just_moved_double(&mut self, value: bool) {
        self.pawn_just_moved_double = value;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} at {}",
            self.side,
            self.piece_type.name(),
            self.position
        )
    }
}
