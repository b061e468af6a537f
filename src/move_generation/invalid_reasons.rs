//! Diagnostics for destinations the validator refused.

use std::collections::BTreeMap;
use std::fmt;

use crate::game_state::tile::Tile;

/// Why a tile is not a legal destination, shown by a UI next to the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    OffBoard,
    OriginalPosition,
    Occupied,
    Blocked,
    /// Pawn diagonal with nothing to capture.
    Empty,
    StillInCheck,
    KingMoved,
    KingInCheck,
    Threatened,
    RookMoved,
    RookMissing,
    /// The piece has no way of reaching the tile at all.
    NotReachable,
}

impl InvalidReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            InvalidReason::OffBoard => "OFF BOARD",
            InvalidReason::OriginalPosition => "ORIGINAL POSITION",
            InvalidReason::Occupied => "OCCUPIED",
            InvalidReason::Blocked => "BLOCKED",
            InvalidReason::Empty => "EMPTY",
            InvalidReason::StillInCheck => "STILL IN CHECK",
            InvalidReason::KingMoved => "KING MOVED",
            InvalidReason::KingInCheck => "KING IN CHECK",
            InvalidReason::Threatened => "THREATENED",
            InvalidReason::RookMoved => "ROOK MOVED",
            InvalidReason::RookMissing => "ROOK MISSING",
            InvalidReason::NotReachable => "NOT REACHABLE",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason per rejected tile for the last validator query.
///
/// The first reason recorded for a tile is kept; later ones are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidReasons {
    reasons: BTreeMap<Tile, InvalidReason>,
}

impl InvalidReasons {
    pub fn add(&mut self, tile: Tile, reason: InvalidReason) {
        self.reasons.entry(tile).or_insert(reason);
    }

    pub fn get(&self, tile: Tile) -> Option<InvalidReason> {
        self.reasons.get(&tile).copied()
    }

    pub fn clear(&mut self) {
        self.reasons.clear();
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tile, InvalidReason)> + '_ {
        self.reasons.iter().map(|(tile, reason)| (*tile, *reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insertions_keep_first_reason() {
        let mut reasons = InvalidReasons::default();
        reasons.add(Tile::new(0, 6), InvalidReason::Blocked);
        reasons.add(Tile::new(0, 6), InvalidReason::Threatened);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons.get(Tile::new(0, 6)), Some(InvalidReason::Blocked));
        reasons.clear();
        assert!(reasons.is_empty());
    }

    #[test]
    fn reasons_render_as_codes() {
        assert_eq!(InvalidReason::StillInCheck.to_string(), "STILL IN CHECK");
        assert_eq!(InvalidReason::OffBoard.as_str(), "OFF BOARD");
    }
}
