//! Moves: an intended transition of one or two pieces plus the code that
//! commits it to a board.
//!
//! A `Move` is immutable once built. Its origin square and capture flag are
//! read from the board at construction time, as is the board revision, so a
//! move can only be committed to the position it was generated for. The
//! public constructors also settle disambiguation and check/mate flags from
//! that board, so a hand-built move logs the same notation as a generated
//! one. Plain
//! moves, castling and promotion share one struct and differ in [`MoveKind`];
//! [`Move::do_move`] handles all three in one `match`.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceType, Side};
use crate::game_state::piece::{Piece, PieceId};
use crate::game_state::tile::Tile;
use crate::move_generation::legal_move_generator::annotate_constructed;

/// What else happens besides the mover's relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// A regular move or capture, en passant included.
    Plain,
    /// King move of two columns with the rook jumping over it.
    Castle {
        rook: PieceId,
        rook_from: Tile,
        rook_to: Tile,
        is_kings_side: bool,
    },
    /// Pawn reaching its last row, turning into `promote_to`.
    Promotion { promote_to: PieceType },
}

/// How much of the origin square notation needs to name the mover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Disambiguation {
    #[default]
    None,
    File,
    Rank,
    Full,
}

/// Effect of the move on the opponent, evaluated on the position after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub gives_check: bool,
    pub is_checkmate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    piece: PieceId,
    piece_type: PieceType,
    side: Side,
    from: Tile,
    to: Tile,
    is_capture: bool,
    captured_type: Option<PieceType>,
    is_en_passant: bool,
    kind: MoveKind,
    revision: u64,
    disambiguation: Disambiguation,
    annotations: MoveAnnotations,
}

impl Move {
    /// A plain move of `piece` to `to` on the current `board`.
    pub fn new(board: &Board, piece: PieceId, to: Tile) -> Result<Self, ChessErrors> {
        let mut mv = Self::candidate(board, piece, to)?;
        annotate_constructed(board, &mut mv)?;
        Ok(mv)
    }

    /// Castling of `king` with `rook`; the king lands on `king_to`.
    pub fn castle(
        board: &Board,
        king: PieceId,
        rook: PieceId,
        king_to: Tile,
    ) -> Result<Self, ChessErrors> {
        let mut mv = Self::castle_candidate(board, king, rook, king_to)?;
        annotate_constructed(board, &mut mv)?;
        Ok(mv)
    }

    /// Pawn move to its last row, promoting to `promote_to`.
    pub fn promotion(
        board: &Board,
        pawn: PieceId,
        to: Tile,
        promote_to: PieceType,
    ) -> Result<Self, ChessErrors> {
        let mut mv = Self::promotion_candidate(board, pawn, to, promote_to)?;
        annotate_constructed(board, &mut mv)?;
        Ok(mv)
    }

    /// Plain move without notation facts. Generators build these and
    /// annotate only the ones that survive the self-check filter.
    pub(crate) fn candidate(
        board: &Board,
        piece: PieceId,
        to: Tile,
    ) -> Result<Self, ChessErrors> {
        let mover = board
            .piece(piece)
            .ok_or(ChessErrors::PieceNotOnBoard(piece))?;
        if !to.is_valid() {
            return Err(ChessErrors::InvalidTile(to));
        }

        let from = mover.position();
        let mut captured_type = board.piece_at(to).map(|p| p.piece_type());
        let is_en_passant = captured_type.is_none() && en_passant_victim(board, mover, to).is_some();
        if is_en_passant {
            captured_type = Some(PieceType::Pawn);
        }

        Ok(Self {
            piece,
            piece_type: mover.piece_type(),
            side: mover.side(),
            from,
            to,
            is_capture: captured_type.is_some(),
            captured_type,
            is_en_passant,
            kind: MoveKind::Plain,
            revision: board.revision(),
            disambiguation: Disambiguation::None,
            annotations: MoveAnnotations::default(),
        })
    }

    pub(crate) fn castle_candidate(
        board: &Board,
        king: PieceId,
        rook: PieceId,
        king_to: Tile,
    ) -> Result<Self, ChessErrors> {
        let mut mv = Self::candidate(board, king, king_to)?;
        let king_from = mv.from;
        let rook_from = board
            .piece(rook)
            .ok_or(ChessErrors::PieceNotOnBoard(rook))?
            .position();
        let is_kings_side = king_from.column < rook_from.column;
        let rook_to = Tile::new(
            king_from.row,
            king_to.column + if is_kings_side { -1 } else { 1 },
        );
        mv.kind = MoveKind::Castle {
            rook,
            rook_from,
            rook_to,
            is_kings_side,
        };
        Ok(mv)
    }

    pub(crate) fn promotion_candidate(
        board: &Board,
        pawn: PieceId,
        to: Tile,
        promote_to: PieceType,
    ) -> Result<Self, ChessErrors> {
        if promote_to == PieceType::King {
            return Err(ChessErrors::CannotPromoteToKing);
        }
        let mut mv = Self::candidate(board, pawn, to)?;
        if mv.piece_type != PieceType::Pawn || to.row != mv.side.promotion_row() {
            return Err(ChessErrors::NotAPromotion(to));
        }
        mv.kind = MoveKind::Promotion { promote_to };
        Ok(mv)
    }

    #[inline]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    /// Type of the mover before the move.
    #[inline]
    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    /// Type of the mover once the move is done.
    pub fn piece_type_after(&self) -> PieceType {
        match self.kind {
            MoveKind::Promotion { promote_to } => promote_to,
            _ => self.piece_type,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn from(&self) -> Tile {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Tile {
        self.to
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.is_capture
    }

    #[inline]
    pub fn captured_type(&self) -> Option<PieceType> {
        self.captured_type
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    pub fn promotion_target(&self) -> Option<PieceType> {
        match self.kind {
            MoveKind::Promotion { promote_to } => Some(promote_to),
            _ => None,
        }
    }

    /// Board revision the move was built against.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn disambiguation(&self) -> Disambiguation {
        self.disambiguation
    }

    #[inline]
    pub fn annotations(&self) -> MoveAnnotations {
        self.annotations
    }

    pub(crate) fn set_disambiguation(&mut self, disambiguation: Disambiguation) {
        self.disambiguation = disambiguation;
    }

    pub(crate) fn set_annotations(&mut self, annotations: MoveAnnotations) {
        self.annotations = annotations;
    }

    /// Applies the move to `board` and raises the move-committed notification.
    ///
    /// Does not touch the move log or the turn; see [`Board::commit`].
    /// Returns the captured piece, if any.
    pub fn do_move(&self, board: &mut Board) -> Result<Option<Piece>, ChessErrors> {
        let mover = board
            .piece(self.piece)
            .ok_or(ChessErrors::PieceNotOnBoard(self.piece))?;
        if mover.position() != self.from {
            return Err(ChessErrors::StaleMove {
                built_at: self.revision,
                current: board.revision(),
            });
        }

        let captured = match self.kind {
            MoveKind::Plain => self.relocate_with_capture(board)?,
            MoveKind::Castle { rook, rook_to, .. } => {
                board.relocate(&[(self.piece, self.to), (rook, rook_to)])?;
                for id in [self.piece, rook] {
                    if let Some(piece) = board.piece_mut(id) {
                        piece.set_has_moved(true);
                    }
                }
                None
            }
            MoveKind::Promotion { promote_to } => {
                let captured = self.relocate_with_capture(board)?;
                board
                    .piece_mut(self.piece)
                    .ok_or(ChessErrors::PieceNotOnBoard(self.piece))?
                    .promote(promote_to)?;
                captured
            }
        };

        board.after_piece_moved(self, captured.clone());
        Ok(captured)
    }

    fn relocate_with_capture(&self, board: &mut Board) -> Result<Option<Piece>, ChessErrors> {
        let mut captured = None;

        // En passant: diagonal pawn step onto an empty square.
        let diff = self.to - self.from;
        if self.piece_type == PieceType::Pawn
            && diff.abs() == Tile::UNIT_RC
            && board.piece_at(self.to).is_none()
        {
            captured = board.remove_at(self.from + diff.column_only());
        }

        if let Some(victim) = board.remove_at(self.to) {
            captured = Some(victim);
        }
        board.relocate(&[(self.piece, self.to)])?;
        if let Some(piece) = board.piece_mut(self.piece) {
            piece.set_has_moved(true);
        }
        Ok(captured)
    }
}

/// The pawn an en-passant capture by `mover` onto `to` would remove.
fn en_passant_victim<'a>(board: &'a Board, mover: &Piece, to: Tile) -> Option<&'a Piece> {
    if mover.piece_type() != PieceType::Pawn {
        return None;
    }
    let diff = to - mover.position();
    if diff.row != mover.side().forward() || diff.column.abs() != 1 {
        return None;
    }
    let behind = Tile::new(to.row - mover.side().forward(), to.column);
    board.piece_at(behind).filter(|victim| {
        victim.piece_type() == PieceType::Pawn
            && victim.side() != mover.side()
            && victim.pawn_just_moved_double()
    })
}
