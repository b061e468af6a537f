//! Text diagram of a board for logs, tests and terminal debugging.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceType, Side};
use crate::game_state::tile::Tile;

/// Renders the board with rank 8 on top, files labelled on both edges.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in (0..8i8).rev() {
        let rank = char::from(b'1' + row as u8);
        out.push(rank);
        out.push(' ');

        for column in 0..8i8 {
            match board.piece_at(Tile::new(row, column)) {
                Some(piece) => out.push(piece_to_unicode(piece.side(), piece.piece_type())),
                None => out.push('·'),
            }

            if column < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(side: Side, piece_type: PieceType) -> char {
    match (side, piece_type) {
        (Side::White, PieceType::Pawn) => '♙',
        (Side::White, PieceType::Knight) => '♘',
        (Side::White, PieceType::Bishop) => '♗',
        (Side::White, PieceType::Rook) => '♖',
        (Side::White, PieceType::Queen) => '♕',
        (Side::White, PieceType::King) => '♔',
        (Side::Black, PieceType::Pawn) => '♟',
        (Side::Black, PieceType::Knight) => '♞',
        (Side::Black, PieceType::Bishop) => '♝',
        (Side::Black, PieceType::Rook) => '♜',
        (Side::Black, PieceType::Queen) => '♛',
        (Side::Black, PieceType::King) => '♚',
    }
}
