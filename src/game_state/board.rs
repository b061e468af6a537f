//! Board state: piece collection, turn, move log and commit notifications.
//!
//! Pieces live in an ordered `Vec` rather than a fixed 8x8 grid, so a capture
//! simply removes the piece. Tile lookup is a linear scan over at most 32
//! entries. Every committed move bumps `revision`; validator caches and moves
//! built against an older revision are recognised as stale through it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Receiver;

use chrono::Utc;
use tracing::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{is_home_square, starting_layout};
use crate::game_state::chess_types::{PieceType, Side};
use crate::game_state::piece::{Piece, PieceId};
use crate::game_state::tile::Tile;
use crate::moves::chess_move::Move;
use crate::moves::move_events::{MoveCommitted, MoveSubscribers};
use crate::moves::move_notation::NotationStyle;
use crate::utils::render_board::render_board;

static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one board instance. Every clone receives a fresh id.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct BoardId(u64);

impl BoardId {
    fn fresh() -> Self {
        BoardId(NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Clone for BoardId {
    fn clone(&self) -> Self {
        BoardId::fresh()
    }
}

/// A game of chess in progress.
#[derive(Debug, Clone)]
pub struct Board {
    id: BoardId,
    pieces: Vec<Piece>,
    turn: Side,
    moves: Vec<Move>,
    revision: u64,
    next_piece_id: u32,
    subscribers: MoveSubscribers,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board in the standard starting layout with White to move.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// A board with no pieces and White to move, for custom setups.
    pub fn empty() -> Self {
        Self {
            id: BoardId::fresh(),
            pieces: Vec::with_capacity(32),
            turn: Side::White,
            moves: Vec::new(),
            revision: 0,
            next_piece_id: 0,
            subscribers: MoveSubscribers::default(),
        }
    }

    /// Restores the starting layout, clears the move log, White to move.
    ///
    /// The revision keeps counting so moves and caches from before the reset
    /// are recognised as stale.
    pub fn reset(&mut self) {
        self.moves.clear();
        self.pieces.clear();
        for (piece_type, side, tile) in starting_layout() {
            self.register(piece_type, side, tile);
        }
        self.turn = Side::White;
        self.revision += 1;
        debug!(board = self.id.0, revision = self.revision, "board reset");
    }

    /// Copy used to simulate a candidate move: pieces, turn and revision only.
    pub fn simulation_copy(&self) -> Self {
        Self {
            id: BoardId::fresh(),
            pieces: self.pieces.clone(),
            turn: self.turn,
            moves: Vec::new(),
            revision: self.revision,
            next_piece_id: self.next_piece_id,
            subscribers: MoveSubscribers::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> &BoardId {
        &self.id
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Flips the side to move. Must follow every committed move.
    pub fn switch_turn(&mut self) {
        self.turn = self.turn.opposite();
    }

    /// Sets the side to move for custom setups.
    pub fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    /// Every committed move, both sides, oldest first.
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.side() == side)
    }

    /// The piece standing on `tile`, if any.
    pub fn piece_at(&self, tile: Tile) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.position() == tile)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub fn king(&self, side: Side) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.side() == side && p.piece_type() == PieceType::King)
    }

    /// Puts a new piece on `tile`, evicting whatever stood there.
    ///
    /// A piece placed on one of its starting squares counts as unmoved; one
    /// placed anywhere else is marked as having moved, so it cannot castle or
    /// double-step.
    pub fn place(
        &mut self,
        piece_type: PieceType,
        side: Side,
        tile: Tile,
    ) -> Result<PieceId, ChessErrors> {
        if !tile.is_valid() {
            return Err(ChessErrors::InvalidTile(tile));
        }
        self.remove_at(tile);
        let id = self.register(piece_type, side, tile);
        if !is_home_square(piece_type, side, tile) {
            if let Some(piece) = self.piece_mut(id) {
                piece.set_has_moved(true);
            }
        }
        self.revision += 1;
        Ok(id)
    }

    /// Receives one [`MoveCommitted`] per move committed from now on.
    pub fn subscribe(&mut self) -> Receiver<MoveCommitted> {
        self.subscribers.subscribe()
    }

    /// Applies `mv` and appends it to the move log.
    ///
    /// The move must have been built against the current revision. The caller
    /// still has to [`switch_turn`](Self::switch_turn) afterwards.
    pub fn commit(&mut self, mv: Move) -> Result<(), ChessErrors> {
        if mv.revision() != self.revision {
            return Err(ChessErrors::StaleMove {
                built_at: mv.revision(),
                current: self.revision,
            });
        }
        mv.do_move(self)?;
        debug!(
            board = self.id.0,
            revision = self.revision,
            mv = %mv.notation(NotationStyle::Coordinate),
            "move committed"
        );
        self.moves.push(mv);
        Ok(())
    }

    fn register(&mut self, piece_type: PieceType, side: Side, tile: Tile) -> PieceId {
        let id = PieceId(self.next_piece_id);
        self.next_piece_id += 1;
        self.pieces.push(Piece::new(id, piece_type, side, tile));
        id
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id() == id)
    }

    /// Removes and returns the piece on `tile`.
    pub(crate) fn remove_at(&mut self, tile: Tile) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.position() == tile)?;
        Some(self.pieces.remove(index))
    }

    /// Moves several pieces at once. Occupants of the destinations that are
    /// not themselves being moved are evicted first.
    pub(crate) fn relocate(&mut self, placements: &[(PieceId, Tile)]) -> Result<(), ChessErrors> {
        for (id, _) in placements {
            if self.piece(*id).is_none() {
                return Err(ChessErrors::PieceNotOnBoard(*id));
            }
        }
        self.pieces.retain(|p| {
            placements.iter().any(|(id, _)| *id == p.id())
                || !placements.iter().any(|(_, tile)| *tile == p.position())
        });
        for (id, tile) in placements {
            if let Some(piece) = self.piece_mut(*id) {
                piece.set_position(*tile);
            }
        }
        Ok(())
    }

    /// Bookkeeping after a move's effect: en-passant eligibility, revision,
    /// notification.
    pub(crate) fn after_piece_moved(&mut self, mv: &Move, captured: Option<Piece>) {
        let double_step = mv.piece_type() == PieceType::Pawn
            && mv.from().column == mv.to().column
            && (mv.from().row - mv.to().row).abs() == 2;
        for piece in &mut self.pieces {
            let eligible = double_step && piece.id() == mv.piece();
            piece.set_pawn_just_moved_double(eligible);
        }
        self.revision += 1;

        if !self.subscribers.is_empty() {
            self.subscribers.publish(MoveCommitted {
                mv: mv.clone(),
                captured,
                revision: self.revision,
                committed_at: Utc::now(),
            });
        }
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}
