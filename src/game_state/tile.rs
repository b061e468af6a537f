//! Board coordinates and their notation renderings.
//!
//! A `Tile` is a `(row, column)` pair where row `0` is White's back rank and
//! column `0` is the a-file. Off-board tiles are representable so that move
//! generators can step past the edge and test `is_valid`; consumers reject
//! them. Renderers never panic: they clamp each component onto the board.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Side;
use crate::utils::util::clamp_to_board;

const ENGLISH_FILES: [&str; 8] = ["QR", "QN", "QB", "Q", "K", "KB", "KN", "KR"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tile {
    pub row: i8,
    pub column: i8,
}

impl Tile {
    pub const UNIT_R: Tile = Tile { row: 1, column: 0 };
    pub const UNIT_C: Tile = Tile { row: 0, column: 1 };
    pub const UNIT_RC: Tile = Tile { row: 1, column: 1 };

    #[inline]
    pub const fn new(row: i8, column: i8) -> Self {
        Self { row, column }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.row >= 0 && self.row < 8 && self.column >= 0 && self.column < 8
    }

    #[inline]
    pub const fn abs(self) -> Self {
        Self::new(self.row.abs(), self.column.abs())
    }

    #[inline]
    pub const fn row_only(self) -> Self {
        Self::new(self.row, 0)
    }

    #[inline]
    pub const fn column_only(self) -> Self {
        Self::new(0, self.column)
    }

    /// Parses a lower-case algebraic square such as `e4`.
    pub fn from_algebraic(square: &str) -> Result<Self, ChessErrors> {
        let bytes = square.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
        }

        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) {
            return Err(ChessErrors::InvalidAlgebraicChar(file as char));
        }
        if !(b'1'..=b'8').contains(&rank) {
            return Err(ChessErrors::InvalidAlgebraicChar(rank as char));
        }

        Ok(Self::new((rank - b'1') as i8, (file - b'a') as i8))
    }

    /// File letter, `a` through `h`.
    pub fn file_char(self) -> char {
        char::from(b'a' + clamp_to_board(self.column))
    }

    /// Rank digit, `1` through `8`.
    pub fn rank_char(self) -> char {
        char::from(b'1' + clamp_to_board(self.row))
    }

    /// Algebraic rendering, for example `e4`.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Coordinate rendering, for example `E4`.
    pub fn to_coordinate(self) -> String {
        format!("{}{}", self.file_char().to_ascii_uppercase(), self.rank_char())
    }

    /// English descriptive file name, for example `QR` or `K`.
    pub fn english_file(self) -> &'static str {
        ENGLISH_FILES[clamp_to_board(self.column) as usize]
    }

    /// English descriptive rank, counted from `side`'s own back rank.
    pub fn english_rank(self, side: Side) -> u8 {
        let row = clamp_to_board(self.row);
        match side {
            Side::White => row + 1,
            Side::Black => 8 - row,
        }
    }

    /// English descriptive rendering from `side`'s point of view, for example
    /// `K4` or `QR1`.
    pub fn to_english(self, side: Side) -> String {
        format!("{}{}", self.english_file(), self.english_rank(side))
    }

    /// ICCF numeric rendering, column digit then row digit, for example `54`.
    pub fn to_iccf(self) -> String {
        format!(
            "{}{}",
            clamp_to_board(self.column) + 1,
            clamp_to_board(self.row) + 1
        )
    }
}

impl Add for Tile {
    type Output = Tile;

    fn add(self, rhs: Tile) -> Tile {
        Tile::new(self.row + rhs.row, self.column + rhs.column)
    }
}

impl Sub for Tile {
    type Output = Tile;

    fn sub(self, rhs: Tile) -> Tile {
        Tile::new(self.row - rhs.row, self.column - rhs.column)
    }
}

impl AddAssign for Tile {
    fn add_assign(&mut self, rhs: Tile) {
        *self = *self + rhs;
    }
}

impl SubAssign for Tile {
    fn sub_assign(&mut self, rhs: Tile) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Tile {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tile::from_algebraic(s.trim())
    }
}
