//! A board paired with its validator.
//!
//! `ChessGame` is the unit a host serialises access to. Committing through it
//! applies the move, passes the turn and drops the validator cache in one
//! call, which is the sequence a caller driving [`Board`] directly has to
//! follow by hand.

use std::sync::mpsc::Receiver;

use tracing::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{GameStatus, PieceType, Side};
use crate::game_state::piece::PieceId;
use crate::game_state::tile::Tile;
use crate::move_generation::invalid_reasons::{InvalidReason, InvalidReasons};
use crate::move_generation::movement_validator::MovementValidator;
use crate::moves::chess_move::Move;
use crate::moves::move_events::MoveCommitted;

#[derive(Debug, Clone, Default)]
pub struct ChessGame {
    board: Board,
    validator: MovementValidator,
}

impl ChessGame {
    /// A game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            validator: MovementValidator::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn validator(&self) -> &MovementValidator {
        &self.validator
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.board.turn()
    }

    pub fn legal_moves(&mut self, piece: PieceId) -> Result<Vec<Move>, ChessErrors> {
        self.validator.get_valid_moves(&self.board, piece)
    }

    /// Every legal move of the side to move.
    pub fn all_legal_moves(&self) -> Result<Vec<Move>, ChessErrors> {
        self.validator.all_legal_moves(&self.board, self.board.turn())
    }

    pub fn is_movement_valid(
        &mut self,
        piece: PieceId,
        target: Tile,
    ) -> Result<Option<Move>, ChessErrors> {
        self.validator.is_movement_valid(&self.board, piece, target)
    }

    pub fn is_promotion_valid(
        &mut self,
        piece: PieceId,
        target: Tile,
        promote_to: PieceType,
    ) -> Result<Option<Move>, ChessErrors> {
        self.validator
            .is_promotion_valid(&self.board, piece, target, promote_to)
    }

    /// Diagnostics of the latest legal-move query.
    pub fn invalid_reasons(&self) -> Option<&InvalidReasons> {
        self.validator.invalid_reasons()
    }

    /// Moves `piece` to `target` if legal and commits it.
    ///
    /// A refused destination comes back as [`ChessErrors::IllegalMove`] with
    /// the recorded reason, or `NOT REACHABLE` when none was recorded.
    pub fn try_move(&mut self, piece: PieceId, target: Tile) -> Result<Move, ChessErrors> {
        let side = self
            .board
            .piece(piece)
            .ok_or(ChessErrors::PieceNotOnBoard(piece))?
            .side();
        if side != self.board.turn() {
            return Err(ChessErrors::NotSidesTurn(side));
        }

        match self.validator.is_movement_valid(&self.board, piece, target)? {
            Some(mv) => {
                self.commit(mv.clone())?;
                Ok(mv)
            }
            None => {
                let reason = self
                    .validator
                    .reason_for(target)
                    .unwrap_or(InvalidReason::NotReachable);
                debug!(to = %target, %reason, "move refused");
                Err(ChessErrors::IllegalMove { to: target, reason })
            }
        }
    }

    /// Commits `mv`, passes the turn and invalidates the validator cache.
    pub fn commit(&mut self, mv: Move) -> Result<(), ChessErrors> {
        if mv.side() != self.board.turn() {
            return Err(ChessErrors::NotSidesTurn(mv.side()));
        }
        self.board.commit(mv)?;
        self.board.switch_turn();
        self.validator.reset_cache();
        Ok(())
    }

    pub fn status(&self) -> Result<GameStatus, ChessErrors> {
        self.validator.status(&self.board)
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        self.validator.is_in_check(&self.board, side)
    }

    pub fn check_if_mated(&self, side: Side) -> Result<bool, ChessErrors> {
        self.validator.check_if_mated(&self.board, side)
    }

    pub fn check_if_stalemated(&self, side: Side) -> Result<bool, ChessErrors> {
        self.validator.check_if_stalemated(&self.board, side)
    }

    pub fn subscribe(&mut self) -> Receiver<MoveCommitted> {
        self.board.subscribe()
    }

    /// Back to the starting position; subscribers stay attached.
    pub fn reset(&mut self) {
        self.board.reset();
        self.validator.reset_cache();
    }
}
