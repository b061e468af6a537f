//! Canonical chess-rule constants.
//!
//! The standard starting layout and the "home square" test used to decide
//! whether a freshly placed piece counts as unmoved.

use crate::game_state::chess_types::{PieceType, Side};
use crate::game_state::tile::Tile;

/// Back-rank piece order from the a-file to the h-file.
pub const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Row holding a side's back rank.
#[inline]
pub const fn back_row(side: Side) -> i8 {
    match side {
        Side::White => 0,
        Side::Black => 7,
    }
}

/// Row holding a side's pawns at the start of the game.
#[inline]
pub const fn pawn_row(side: Side) -> i8 {
    match side {
        Side::White => 1,
        Side::Black => 6,
    }
}

/// The 32-piece starting layout, White first, back ranks before pawns.
pub fn starting_layout() -> Vec<(PieceType, Side, Tile)> {
    let mut layout = Vec::with_capacity(32);
    for side in [Side::White, Side::Black] {
        for (column, piece_type) in BACK_RANK.iter().enumerate() {
            layout.push((*piece_type, side, Tile::new(back_row(side), column as i8)));
        }
    }
    for column in 0..8 {
        layout.push((PieceType::Pawn, Side::White, Tile::new(pawn_row(Side::White), column)));
        layout.push((PieceType::Pawn, Side::Black, Tile::new(pawn_row(Side::Black), column)));
    }
    layout
}

/// Whether `tile` is a square a piece of this type and side starts the game on.
pub fn is_home_square(piece_type: PieceType, side: Side, tile: Tile) -> bool {
    if !tile.is_valid() {
        return false;
    }
    match piece_type {
        PieceType::Pawn => tile.row == pawn_row(side),
        _ => tile.row == back_row(side) && BACK_RANK[tile.column as usize] == piece_type,
    }
}
