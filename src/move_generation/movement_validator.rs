//! Per-piece legal move queries with a single-slot cache and diagnostics.
//!
//! The validator holds no reference to the board; every query takes the
//! board it is about. The cache key includes the board identity and
//! revision, so a cached answer is never served for a position it was not
//! computed on, even when [`MovementValidator::reset_cache`] is forgotten.

use tracing::trace;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{GameStatus, PieceType, Side};
use crate::game_state::piece::{Piece, PieceId};
use crate::game_state::tile::Tile;
use crate::move_generation::invalid_reasons::{InvalidReason, InvalidReasons};
use crate::move_generation::legal_move_checks::{self, checkers};
use crate::move_generation::legal_move_generator::{
    generate_candidates, generate_piece_moves, generate_side_moves, has_any_legal_move,
};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    board: u64,
    piece: PieceId,
    piece_type: PieceType,
    position: Tile,
    revision: u64,
    bypass_check: bool,
}

impl CacheKey {
    fn new(board: &Board, piece: &Piece, bypass_check: bool) -> Self {
        Self {
            board: board.id().value(),
            piece: piece.id(),
            piece_type: piece.piece_type(),
            position: piece.position(),
            revision: board.revision(),
            bypass_check,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedQuery {
    key: CacheKey,
    moves: Vec<Move>,
    reasons: InvalidReasons,
}

#[derive(Debug, Clone, Default)]
pub struct MovementValidator {
    cached: Option<CachedQuery>,
}

impl MovementValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Legal moves of `piece` on `board`, annotated for notation.
    pub fn get_valid_moves(&mut self, board: &Board, piece: PieceId) -> Result<Vec<Move>, ChessErrors> {
        self.get_valid_moves_with(board, piece, false)
    }

    /// With `bypass_check` set, returns raw candidates: no castling, no
    /// self-check filter, no annotations and no diagnostics.
    pub fn get_valid_moves_with(
        &mut self,
        board: &Board,
        piece: PieceId,
        bypass_check: bool,
    ) -> Result<Vec<Move>, ChessErrors> {
        let piece = board
            .piece(piece)
            .ok_or(ChessErrors::PieceNotOnBoard(piece))?;
        let key = CacheKey::new(board, piece, bypass_check);

        if let Some(cached) = self.cached.as_ref().filter(|c| c.key == key) {
            trace!(piece = %piece, revision = key.revision, "valid moves served from cache");
            return Ok(cached.moves.clone());
        }

        let (moves, reasons) = if bypass_check {
            (generate_candidates(board, piece, true)?.moves, InvalidReasons::default())
        } else {
            let (generated, reasons) = generate_piece_moves(board, piece, true)?;
            (generated.into_iter().map(|g| g.mv).collect(), reasons)
        };

        self.cached = Some(CachedQuery {
            key,
            moves: moves.clone(),
            reasons,
        });
        Ok(moves)
    }

    /// The move that takes `piece` to `target`, if legal. A pawn reaching its
    /// last row promotes to a queen; see [`Self::is_promotion_valid`].
    pub fn is_movement_valid(
        &mut self,
        board: &Board,
        piece: PieceId,
        target: Tile,
    ) -> Result<Option<Move>, ChessErrors> {
        Ok(self
            .get_valid_moves(board, piece)?
            .into_iter()
            .find(|mv| mv.to() == target))
    }

    /// The promotion of `piece` on `target` to `promote_to`, if legal.
    pub fn is_promotion_valid(
        &mut self,
        board: &Board,
        piece: PieceId,
        target: Tile,
        promote_to: PieceType,
    ) -> Result<Option<Move>, ChessErrors> {
        if promote_to == PieceType::King {
            return Err(ChessErrors::CannotPromoteToKing);
        }
        Ok(self
            .get_valid_moves(board, piece)?
            .into_iter()
            .find(|mv| mv.to() == target && mv.promotion_target() == Some(promote_to)))
    }

    /// Every legal move of `side`, annotated. Leaves the cache untouched.
    pub fn all_legal_moves(&self, board: &Board, side: Side) -> Result<Vec<Move>, ChessErrors> {
        Ok(generate_side_moves(board, side, true)?
            .into_iter()
            .map(|g| g.mv)
            .collect())
    }

    /// Tiles attacked by `piece`.
    pub fn threatened_tiles(&self, board: &Board, piece: PieceId) -> Result<Vec<Tile>, ChessErrors> {
        let piece = board
            .piece(piece)
            .ok_or(ChessErrors::PieceNotOnBoard(piece))?;
        Ok(legal_move_checks::threatened_tiles(board, piece))
    }

    pub fn is_in_check(&self, board: &Board, side: Side) -> bool {
        legal_move_checks::is_in_check(board, side)
    }

    /// Enemy pieces currently giving check to `side`.
    pub fn checkers<'a>(&self, board: &'a Board, side: Side) -> Vec<&'a Piece> {
        checkers(board, side)
    }

    pub fn check_if_mated(&self, board: &Board, side: Side) -> Result<bool, ChessErrors> {
        Ok(self.is_in_check(board, side) && !has_any_legal_move(board, side)?)
    }

    pub fn check_if_stalemated(&self, board: &Board, side: Side) -> Result<bool, ChessErrors> {
        Ok(!self.is_in_check(board, side) && !has_any_legal_move(board, side)?)
    }

    /// Status from the point of view of the side to move.
    pub fn status(&self, board: &Board) -> Result<GameStatus, ChessErrors> {
        let side = board.turn();
        let in_check = self.is_in_check(board, side);
        let can_move = has_any_legal_move(board, side)?;
        Ok(match (in_check, can_move) {
            (true, false) => side.opposite().victory_status(),
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check(side),
            (false, true) => GameStatus::InProgress,
        })
    }

    pub fn reset_cache(&mut self) {
        self.cached = None;
    }

    /// Diagnostics of the most recent [`Self::get_valid_moves`] query.
    pub fn invalid_reasons(&self) -> Option<&InvalidReasons> {
        self.cached.as_ref().map(|c| &c.reasons)
    }

    pub fn reason_for(&self, tile: Tile) -> Option<InvalidReason> {
        self.invalid_reasons().and_then(|reasons| reasons.get(tile))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use super::*;
    use crate::moves::move_notation::{algebraic_destination, NotationStyle};

    fn tile(s: &str) -> Tile {
        Tile::from_algebraic(s).expect("test square should parse")
    }

    fn id_at(board: &Board, s: &str) -> PieceId {
        board.piece_at(tile(s)).expect("piece on square").id()
    }

    fn play(board: &mut Board, validator: &mut MovementValidator, from: &str, to: &str) -> Move {
        let mv = validator
            .is_movement_valid(board, id_at(board, from), tile(to))
            .expect("query")
            .unwrap_or_else(|| panic!("{from}-{to} should be legal"));
        board.commit(mv.clone()).expect("commit");
        board.switch_turn();
        validator.reset_cache();
        mv
    }

    #[test]
    fn opening_pawn_and_knight_moves() {
        let board = Board::new();
        let mut validator = MovementValidator::new();

        let pawn = validator.get_valid_moves(&board, id_at(&board, "e2")).expect("moves");
        let mut tiles: Vec<Tile> = pawn.iter().map(|m| m.to()).collect();
        tiles.sort();
        assert_eq!(tiles, vec![tile("e3"), tile("e4")]);

        let knight = validator.get_valid_moves(&board, id_at(&board, "g1")).expect("moves");
        let mut tiles: Vec<Tile> = knight.iter().map(|m| m.to()).collect();
        tiles.sort();
        assert_eq!(tiles, vec![tile("f3"), tile("h3")]);
        assert_eq!(validator.reason_for(tile("e2")), Some(InvalidReason::Occupied));
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut board = Board::new();
        let mut validator = MovementValidator::new();
        play(&mut board, &mut validator, "f2", "f3");
        play(&mut board, &mut validator, "e7", "e5");
        play(&mut board, &mut validator, "g2", "g4");
        let mate = play(&mut board, &mut validator, "d8", "h4");

        assert!(validator.is_in_check(&board, Side::White));
        assert!(validator.check_if_mated(&board, Side::White).expect("mate check"));
        assert_eq!(validator.status(&board).expect("status"), GameStatus::VictoryBlack);
        assert!(mate.annotations().is_checkmate);
        assert_eq!(mate.notation(NotationStyle::Algebraic), "Qh4#");
        assert!(validator
            .all_legal_moves(&board, Side::White)
            .expect("moves")
            .is_empty());
    }

    #[test]
    fn en_passant_available_for_one_move_only() {
        let mut board = Board::new();
        let mut validator = MovementValidator::new();
        play(&mut board, &mut validator, "e2", "e4");
        play(&mut board, &mut validator, "a7", "a6");
        play(&mut board, &mut validator, "e4", "e5");
        play(&mut board, &mut validator, "d7", "d5");

        let ep = validator
            .is_movement_valid(&board, id_at(&board, "e5"), tile("d6"))
            .expect("query")
            .expect("en passant is legal");
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());
        assert_eq!(ep.notation(NotationStyle::Algebraic), "exd6");

        // Declining it for one move forfeits it.
        play(&mut board, &mut validator, "a2", "a3");
        play(&mut board, &mut validator, "a6", "a5");
        let late = validator
            .is_movement_valid(&board, id_at(&board, "e5"), tile("d6"))
            .expect("query");
        assert!(late.is_none());
        assert_eq!(validator.reason_for(tile("d6")), Some(InvalidReason::Empty));
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut board = Board::new();
        let mut validator = MovementValidator::new();
        play(&mut board, &mut validator, "e2", "e4");
        play(&mut board, &mut validator, "a7", "a6");
        play(&mut board, &mut validator, "e4", "e5");
        play(&mut board, &mut validator, "d7", "d5");
        play(&mut board, &mut validator, "e5", "d6");
        assert!(board.piece_at(tile("d5")).is_none());
        assert_eq!(board.pieces().len(), 31);
    }

    #[test]
    fn kingside_castle_after_clearing() {
        let mut board = Board::new();
        let mut validator = MovementValidator::new();
        play(&mut board, &mut validator, "e2", "e4");
        play(&mut board, &mut validator, "e7", "e5");
        play(&mut board, &mut validator, "g1", "f3");
        play(&mut board, &mut validator, "b8", "c6");

        // Bishop still on f1.
        let blocked = validator
            .is_movement_valid(&board, id_at(&board, "e1"), tile("g1"))
            .expect("query");
        assert!(blocked.is_none());
        assert_eq!(validator.reason_for(tile("g1")), Some(InvalidReason::Blocked));

        play(&mut board, &mut validator, "f1", "c4");
        play(&mut board, &mut validator, "g8", "f6");
        let castle = play(&mut board, &mut validator, "e1", "g1");
        assert!(castle.is_castle());
        assert_eq!(castle.notation(NotationStyle::Algebraic), "O-O");
        let rook = board.piece_at(tile("f1")).expect("rook moved");
        assert_eq!(rook.piece_type(), PieceType::Rook);
        assert!(rook.has_moved());
    }

    #[test]
    fn cache_follows_board_revision() {
        let mut board = Board::new();
        let mut validator = MovementValidator::new();
        let bishop = id_at(&board, "f1");
        let pawn = validator
            .is_movement_valid(&board, id_at(&board, "e2"), tile("e4"))
            .expect("query")
            .expect("e4 is legal");
        assert!(validator.get_valid_moves(&board, bishop).expect("moves").is_empty());

        board.commit(pawn).expect("commit");
        board.switch_turn();
        // No reset_cache: the revision key alone invalidates the old answer.
        assert_eq!(validator.get_valid_moves(&board, bishop).expect("moves").len(), 5);
    }

    #[test]
    fn stalemate_is_not_mate() {
        let mut board = Board::empty();
        board
            .place(PieceType::King, Side::Black, tile("h8"))
            .expect("king");
        board
            .place(PieceType::Queen, Side::White, tile("g6"))
            .expect("queen");
        board
            .place(PieceType::King, Side::White, tile("f7"))
            .expect("king");
        board.set_turn(Side::Black);
        let validator = MovementValidator::new();
        assert!(!validator.is_in_check(&board, Side::Black));
        assert!(validator.check_if_stalemated(&board, Side::Black).expect("stalemate"));
        assert!(!validator.check_if_mated(&board, Side::Black).expect("mate"));
        assert_eq!(validator.status(&board).expect("status"), GameStatus::Stalemate);
    }

    #[test]
    fn promotion_variants_and_queen_default() {
        let mut board = Board::empty();
        board
            .place(PieceType::King, Side::White, tile("a1"))
            .expect("king");
        board
            .place(PieceType::King, Side::Black, tile("h1"))
            .expect("king");
        let pawn = board
            .place(PieceType::Pawn, Side::White, tile("d7"))
            .expect("pawn");
        let mut validator = MovementValidator::new();

        let default = validator
            .is_movement_valid(&board, pawn, tile("d8"))
            .expect("query")
            .expect("promotion legal");
        assert_eq!(default.promotion_target(), Some(PieceType::Queen));

        let knight = validator
            .is_promotion_valid(&board, pawn, tile("d8"), PieceType::Knight)
            .expect("query")
            .expect("knight promotion legal");
        assert_eq!(knight.notation(NotationStyle::Pgn), "d8=N");
        assert_eq!(
            validator.is_promotion_valid(&board, pawn, tile("d8"), PieceType::King),
            Err(ChessErrors::CannotPromoteToKing)
        );
    }

    #[test]
    fn check_suffix_follows_promoted_piece() {
        let mut board = Board::empty();
        board
            .place(PieceType::King, Side::White, tile("a1"))
            .expect("king");
        board
            .place(PieceType::King, Side::Black, tile("f7"))
            .expect("king");
        let pawn = board
            .place(PieceType::Pawn, Side::White, tile("d7"))
            .expect("pawn");
        let mut validator = MovementValidator::new();

        let knight = validator
            .is_promotion_valid(&board, pawn, tile("d8"), PieceType::Knight)
            .expect("query")
            .expect("knight promotion legal");
        assert!(knight.annotations().gives_check);
        assert_eq!(knight.notation(NotationStyle::Pgn), "d8=N+");
        assert_eq!(knight.notation(NotationStyle::English), "P-Q8(N) ch");

        let queen = validator
            .is_promotion_valid(&board, pawn, tile("d8"), PieceType::Queen)
            .expect("query")
            .expect("queen promotion legal");
        assert!(!queen.annotations().gives_check);
        assert_eq!(queen.notation(NotationStyle::Pgn), "d8=Q");
    }

    #[test]
    fn bypass_skips_castling_and_diagnostics() {
        let mut board = Board::empty();
        board
            .place(PieceType::King, Side::White, tile("e1"))
            .expect("king");
        board
            .place(PieceType::Rook, Side::White, tile("h1"))
            .expect("rook");
        let king = id_at(&board, "e1");
        let mut validator = MovementValidator::new();

        let full = validator.get_valid_moves(&board, king).expect("moves");
        assert!(full.iter().any(|m| m.is_castle()));
        let raw = validator.get_valid_moves_with(&board, king, true).expect("moves");
        assert!(raw.iter().all(|m| !m.is_castle()));
        assert!(validator.invalid_reasons().is_some_and(|r| r.is_empty()));
    }

    #[test]
    fn missing_piece_is_an_error() {
        let mut board = Board::new();
        let pawn = id_at(&board, "e2");
        board.remove_at(tile("e2"));
        let mut validator = MovementValidator::new();
        assert_eq!(
            validator.get_valid_moves(&board, pawn),
            Err(ChessErrors::PieceNotOnBoard(pawn))
        );
    }

    #[test]
    fn fresh_pawn_destinations() {
        let board = Board::new();
        let mut validator = MovementValidator::new();
        let pawn = id_at(&board, "e2");
        for target in ["e3", "e4"] {
            assert!(validator
                .is_movement_valid(&board, pawn, tile(target))
                .expect("query")
                .is_some());
        }
        for target in ["e1", "e5"] {
            assert!(validator
                .is_movement_valid(&board, pawn, tile(target))
                .expect("query")
                .is_none());
        }
    }

    #[test]
    fn no_en_passant_without_eligible_neighbour() {
        let mut board = Board::new();
        let mut validator = MovementValidator::new();
        play(&mut board, &mut validator, "e2", "e4");
        play(&mut board, &mut validator, "d7", "d5");

        let moves = validator
            .get_valid_moves(&board, id_at(&board, "e4"))
            .expect("moves");
        let mut tiles: Vec<Tile> = moves.iter().map(|m| m.to()).collect();
        tiles.sort();
        assert_eq!(tiles, vec![tile("d5"), tile("e5")]);
        assert!(moves.iter().all(|m| !m.is_en_passant()));
        assert_eq!(validator.reason_for(tile("f5")), Some(InvalidReason::Empty));
    }

    #[test]
    fn double_step_can_be_captured_next_move() {
        let mut board = Board::new();
        let mut validator = MovementValidator::new();
        play(&mut board, &mut validator, "e2", "e4");
        play(&mut board, &mut validator, "d7", "d5");
        let capture = play(&mut board, &mut validator, "e4", "d5");
        assert!(capture.is_capture());
        assert_eq!(
            board.piece_at(tile("d5")).map(|p| p.side()),
            Some(Side::White)
        );
        assert_eq!(board.pieces().len(), 31);
    }

    #[test]
    fn rook_on_open_file_mates_boxed_king() {
        let mut board = Board::empty();
        board
            .place(PieceType::King, Side::Black, tile("e8"))
            .expect("king");
        board
            .place(PieceType::Rook, Side::White, tile("e1"))
            .expect("checking rook");
        board
            .place(PieceType::Rook, Side::White, tile("d1"))
            .expect("rook");
        board
            .place(PieceType::Rook, Side::White, tile("f1"))
            .expect("rook");
        board
            .place(PieceType::King, Side::White, tile("a3"))
            .expect("king");
        board.set_turn(Side::Black);
        let validator = MovementValidator::new();

        assert!(validator.is_in_check(&board, Side::Black));
        assert_eq!(validator.checkers(&board, Side::Black).len(), 1);
        assert!(validator.check_if_mated(&board, Side::Black).expect("mate"));
        assert!(!validator.check_if_stalemated(&board, Side::Black).expect("stalemate"));
        assert_eq!(validator.status(&board).expect("status"), GameStatus::VictoryWhite);
    }

    #[test]
    fn random_playouts_stay_legal() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..4 {
            let mut board = Board::new();
            let mut validator = MovementValidator::new();
            for _ in 0..60 {
                let side = board.turn();
                let moves = validator.all_legal_moves(&board, side).expect("moves");
                let Some(mv) = moves.choose(&mut rng).cloned() else {
                    break;
                };
                assert!(mv.to().is_valid());
                assert!(mv.from().is_valid());
                if !mv.is_castle() {
                    let algebraic = mv.notation(NotationStyle::Algebraic);
                    assert_eq!(algebraic_destination(&algebraic), Ok(mv.to()));
                }
                board.commit(mv).expect("commit");
                assert!(!validator.is_in_check(&board, side));
                board.switch_turn();
                validator.reset_cache();
                assert!(board.pieces().iter().all(|p| p.position().is_valid()));
            }
        }
    }
}
