use std::sync::Arc;
use std::thread;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    board: &Board,
    depth: u8,
) -> Result<PerftCounts, ChessErrors> {
    perft_single_thread(generator, board, depth)
}

pub fn perft_single_thread<G: MoveGenerator>(
    generator: &G,
    board: &Board,
    depth: u8,
) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_legal_moves(board)?;
    let mut total = PerftCounts::default();

    for mv in root_moves {
        perft_recurse(generator, &mv, depth, 1, &mut total)?;
    }

    Ok(total)
}

/// One worker thread per root move.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    board: &Board,
    depth: u8,
) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_legal_moves(board)?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = perft_recurse(generator_ref.as_ref(), &mv, depth, 1, &mut local);
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle
            .join()
            .map_err(|_| ChessErrors::PerftWorkerPanicked)?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    generated: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> Result<(), ChessErrors> {
    if current_depth == search_depth {
        let mv = &generated.mv;
        counts.nodes += 1;

        if mv.is_capture() {
            counts.captures += 1;
        }
        if mv.is_en_passant() {
            counts.en_passant += 1;
        }
        if mv.is_castle() {
            counts.castles += 1;
        }
        if mv.promotion_target().is_some() {
            counts.promotions += 1;
        }
        if mv.annotations().gives_check {
            counts.checks += 1;
        }
        if mv.annotations().is_checkmate {
            counts.checkmates += 1;
        }

        return Ok(());
    }

    let moves = generator.generate_legal_moves(&generated.board_after_move)?;
    for child in moves {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{PieceType, Side};
    use crate::game_state::tile::Tile;
    use crate::move_generation::legal_move_generator::{FastLegalMoveGenerator, LegalMoveGenerator};

    fn tile(s: &str) -> Tile {
        Tile::from_algebraic(s).expect("test square should parse")
    }

    /// Board from a FEN piece-placement field, rank 8 first.
    fn board_from_placement(placement: &str, turn: Side) -> Board {
        let mut board = Board::empty();
        for (rank, row) in placement.split('/').enumerate() {
            let mut column = 0i8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    column += skip as i8;
                    continue;
                }
                let side = if c.is_ascii_uppercase() {
                    Side::White
                } else {
                    Side::Black
                };
                let piece_type = match c.to_ascii_lowercase() {
                    'p' => PieceType::Pawn,
                    'n' => PieceType::Knight,
                    'b' => PieceType::Bishop,
                    'r' => PieceType::Rook,
                    'q' => PieceType::Queen,
                    'k' => PieceType::King,
                    other => panic!("unexpected placement char {other}"),
                };
                board
                    .place(piece_type, side, Tile::new(7 - rank as i8, column))
                    .expect("setup");
                column += 1;
            }
        }
        board.set_turn(turn);
        board
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&FastLegalMoveGenerator, &Board::new(), 0).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn startpos_node_counts() {
        let board = Board::new();
        for (depth, nodes) in [(1, 20), (2, 400)] {
            let counts = perft(&FastLegalMoveGenerator, &board, depth).expect("perft should run");
            assert_eq!(counts.nodes, nodes, "depth {depth}");
        }
    }

    #[test]
    fn startpos_depth_three_leaf_metrics() {
        let counts = perft(&LegalMoveGenerator, &Board::new(), 3).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn multi_threaded_matches_single_thread() {
        let board = Board::new();
        let single = perft(&FastLegalMoveGenerator, &board, 2).expect("perft should run");
        let multi = perft_multi_threaded(Arc::new(FastLegalMoveGenerator), &board, 2)
            .expect("perft should run");
        assert_eq!(single, multi);
    }

    #[test]
    fn castling_position_counts_both_castles() {
        let mut board = Board::empty();
        for (piece_type, side, square) in [
            (PieceType::King, Side::White, "e1"),
            (PieceType::Rook, Side::White, "a1"),
            (PieceType::Rook, Side::White, "h1"),
            (PieceType::King, Side::Black, "e8"),
        ] {
            board.place(piece_type, side, tile(square)).expect("setup");
        }
        let counts = perft(&FastLegalMoveGenerator, &board, 1).expect("perft should run");
        assert_eq!(counts.castles, 2);
        // 5 king steps, 2 castles, 10 + 9 rook moves.
        assert_eq!(counts.nodes, 26);
    }

    #[test]
    fn kiwipete_counts() {
        let board = board_from_placement(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            Side::White,
        );
        let shallow = perft(&FastLegalMoveGenerator, &board, 1).expect("perft should run");
        assert_eq!(shallow.nodes, 48);
        assert_eq!(shallow.captures, 8);
        assert_eq!(shallow.castles, 2);

        let counts = perft(&FastLegalMoveGenerator, &board, 2).expect("perft should run");
        assert_eq!(counts.nodes, 2039);
        assert_eq!(counts.captures, 351);
        assert_eq!(counts.en_passant, 1);
        assert_eq!(counts.castles, 91);
        assert_eq!(counts.promotions, 0);
    }

    #[test]
    fn rook_and_pawn_endgame_depth_four() {
        let board = board_from_placement("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Side::White);
        for (depth, nodes) in [(1, 14), (2, 191), (3, 2812), (4, 43238)] {
            let counts = perft(&FastLegalMoveGenerator, &board, depth).expect("perft should run");
            assert_eq!(counts.nodes, nodes, "depth {depth}");
        }
    }

    #[test]
    fn promotion_heavy_position_depth_three() {
        let board = board_from_placement(
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R",
            Side::Black,
        );
        for (depth, nodes) in [(1, 6), (2, 264), (3, 9467)] {
            let counts = perft(&FastLegalMoveGenerator, &board, depth).expect("perft should run");
            assert_eq!(counts.nodes, nodes, "depth {depth}");
        }
        let shallow = perft(&FastLegalMoveGenerator, &board, 2).expect("perft should run");
        assert_eq!(shallow.promotions, 48);
        assert_eq!(shallow.castles, 6);
    }
}
