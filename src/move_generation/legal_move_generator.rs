//! Full legal move generation pipeline.
//!
//! Dispatches per-type candidate generation, simulates each candidate on a
//! private copy of the board to drop those leaving the mover's king attacked,
//! and annotates the survivors with disambiguation and check/mate metadata.

use tracing::trace;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceType, Side};
use crate::game_state::piece::Piece;
use crate::move_generation::invalid_reasons::{InvalidReason, InvalidReasons};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_shared::CandidateMoves;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::chess_move::{Disambiguation, Move, MoveAnnotations};
use crate::utils::util::unique_among_all;

/// Annotated generator: disambiguation and check/mate flags are filled in.
pub struct LegalMoveGenerator;

/// Same moves as [`LegalMoveGenerator`] without annotations.
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, board: &Board) -> Result<Vec<GeneratedMove>, ChessErrors> {
        generate_side_moves(board, board.turn(), true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(&self, board: &Board) -> Result<Vec<GeneratedMove>, ChessErrors> {
        generate_side_moves(board, board.turn(), false)
    }
}

/// Candidate moves of `piece` before the self-check filter.
pub fn generate_candidates(
    board: &Board,
    piece: &Piece,
    bypass_check: bool,
) -> Result<CandidateMoves, ChessErrors> {
    let mut out = CandidateMoves::new(bypass_check);
    match piece.piece_type() {
        PieceType::King => generate_king_moves(board, piece, &mut out)?,
        PieceType::Pawn => generate_pawn_moves(board, piece, &mut out)?,
        PieceType::Knight => generate_knight_moves(board, piece, &mut out)?,
        PieceType::Bishop => generate_bishop_moves(board, piece, &mut out)?,
        PieceType::Rook => generate_rook_moves(board, piece, &mut out)?,
        PieceType::Queen => generate_queen_moves(board, piece, &mut out)?,
    }
    Ok(out)
}

/// Legal moves of one piece plus the reasons its other destinations were
/// refused.
pub fn generate_piece_moves(
    board: &Board,
    piece: &Piece,
    annotate: bool,
) -> Result<(Vec<GeneratedMove>, InvalidReasons), ChessErrors> {
    let CandidateMoves {
        moves: candidates,
        mut reasons,
        ..
    } = generate_candidates(board, piece, false)?;

    let mut legal = Vec::with_capacity(candidates.len());
    for mv in candidates {
        match simulate(board, &mv)? {
            Some(board_after_move) => legal.push(GeneratedMove {
                mv,
                board_after_move,
            }),
            None => {
                trace!(piece = %piece, to = %mv.to(), "candidate leaves king in check");
                reasons.add(mv.to(), InvalidReason::StillInCheck);
            }
        }
    }

    if annotate {
        for generated in &mut legal {
            annotate_move(board, generated)?;
        }
    }
    Ok((legal, reasons))
}

/// Legal moves of every piece of `side`.
pub fn generate_side_moves(
    board: &Board,
    side: Side,
    annotate: bool,
) -> Result<Vec<GeneratedMove>, ChessErrors> {
    let mut legal = Vec::with_capacity(64);
    for piece in board.pieces_of(side) {
        let (moves, _) = generate_piece_moves(board, piece, annotate)?;
        legal.extend(moves);
    }
    Ok(legal)
}

/// Whether `side` has at least one legal move. Stops at the first one found.
pub fn has_any_legal_move(board: &Board, side: Side) -> Result<bool, ChessErrors> {
    for piece in board.pieces_of(side) {
        for mv in generate_candidates(board, piece, false)?.moves {
            if simulate(board, &mv)?.is_some() {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Plays `mv` on a copy of `board`. `None` when the mover's king ends up
/// attacked; otherwise the resulting board with the turn passed on.
fn simulate(board: &Board, mv: &Move) -> Result<Option<Board>, ChessErrors> {
    let mut next = board.simulation_copy();
    mv.do_move(&mut next)?;
    if is_in_check(&next, mv.side()) {
        return Ok(None);
    }
    next.set_turn(mv.side().opposite());
    Ok(Some(next))
}

fn annotate_move(board: &Board, generated: &mut GeneratedMove) -> Result<(), ChessErrors> {
    let GeneratedMove {
        mv,
        board_after_move,
    } = generated;
    annotate(board, mv, board_after_move)
}

/// Notation facts for a move built outside the generator. The move is
/// played on a copy without the self-check filter, so an illegal move still
/// gets its flags.
pub(crate) fn annotate_constructed(board: &Board, mv: &mut Move) -> Result<(), ChessErrors> {
    let mut after = board.simulation_copy();
    mv.do_move(&mut after)?;
    after.set_turn(mv.side().opposite());
    annotate(board, mv, &after)
}

fn annotate(board: &Board, mv: &mut Move, board_after_move: &Board) -> Result<(), ChessErrors> {
    let disambiguation = disambiguation_for(board, mv)?;
    mv.set_disambiguation(disambiguation);

    let defender = mv.side().opposite();
    let gives_check = is_in_check(board_after_move, defender);
    let is_checkmate = gives_check && !has_any_legal_move(board_after_move, defender)?;
    mv.set_annotations(MoveAnnotations {
        gives_check,
        is_checkmate,
    });
    Ok(())
}

/// How much of the origin square is needed to tell `mv` apart from moves of
/// other same-type pieces that can legally reach the same tile.
fn disambiguation_for(board: &Board, mv: &Move) -> Result<Disambiguation, ChessErrors> {
    if mv.piece_type() == PieceType::Pawn || mv.is_castle() {
        return Ok(Disambiguation::None);
    }

    let mut origins = vec![mv.from()];
    let rivals = board
        .pieces_of(mv.side())
        .filter(|p| p.piece_type() == mv.piece_type() && p.id() != mv.piece());
    for rival in rivals {
        for candidate in generate_candidates(board, rival, true)?.moves {
            if candidate.to() == mv.to() && simulate(board, &candidate)?.is_some() {
                origins.push(rival.position());
                break;
            }
        }
    }

    Ok(if origins.len() == 1 {
        Disambiguation::None
    } else if unique_among_all(&origins, |tile| tile.column) {
        Disambiguation::File
    } else if unique_among_all(&origins, |tile| tile.row) {
        Disambiguation::Rank
    } else {
        Disambiguation::Full
    })
}
