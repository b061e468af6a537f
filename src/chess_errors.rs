//! Errors used throughout the chess board.
//!
//! `ChessErrors` is the single error type of the crate. Its variants fall into
//! two groups:
//! - programming errors (wrong generator for a piece type, promoting to a
//!   king, malformed coordinates) which abort the current operation;
//! - state-consistency errors (stale moves, wrong side committing) raised when
//!   a caller breaks the commit contract.
//!
//! An illegal destination is not an error: the validator answers `None` and
//! records an [`InvalidReason`](crate::move_generation::invalid_reasons::InvalidReason).
//! `ChessGame::try_move` is the one place that folds such a rejection into
//! `ChessErrors::IllegalMove`.

use thiserror::Error;

use crate::game_state::chess_types::{PieceType, Side};
use crate::game_state::piece::PieceId;
use crate::game_state::tile::Tile;
use crate::move_generation::invalid_reasons::InvalidReason;

/// Unified error type for the chess board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// A piece-specific movement generator was invoked for another piece type.
    ///
    /// Payload: the type that was passed in.
    #[error("movement generator invoked for the wrong piece type: {0:?}")]
    GeneratingWrongMovementForPieceType(PieceType),

    /// Pawns can never become kings.
    #[error("pawns cannot be promoted to kings")]
    CannotPromoteToKing,

    /// A promotion target was supplied for a move that does not promote.
    #[error("move to {0} is not a promotion")]
    NotAPromotion(Tile),

    /// A tile outside the 8x8 board was used where a real square is required.
    #[error("tile {0:?} is off the board")]
    InvalidTile(Tile),

    /// A single character of an algebraic coordinate was invalid.
    #[error("invalid algebraic character: {0}")]
    InvalidAlgebraicChar(char),

    /// An algebraic string could not be interpreted.
    #[error("invalid algebraic string: {0}")]
    InvalidAlgebraicString(String),

    /// Unknown notation style name.
    #[error("unknown notation style: {0}")]
    UnknownNotationStyle(String),

    /// The referenced piece is no longer on the board.
    #[error("piece {0:?} is not on the board")]
    PieceNotOnBoard(PieceId),

    /// The move was built against an older board revision.
    #[error("move was built at board revision {built_at} but the board is at {current}")]
    StaleMove { built_at: u64, current: u64 },

    /// The move belongs to the side that is not on turn.
    #[error("it is not {0:?}'s turn")]
    NotSidesTurn(Side),

    /// A requested destination is not legal for the piece.
    #[error("illegal move to {to}: {reason}")]
    IllegalMove { to: Tile, reason: InvalidReason },

    /// A perft worker thread panicked before reporting its counts.
    #[error("perft worker thread panicked")]
    PerftWorkerPanicked,
}
