//! Side, piece type and game status enumerations shared by every layer.

/// One of the two playing sides. Also used for piece ownership and turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row direction a pawn of this side advances in.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Row on which pawns of this side promote.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    /// Status reported when this side has delivered checkmate.
    #[inline]
    pub const fn victory_status(self) -> GameStatus {
        match self {
            Side::White => GameStatus::VictoryWhite,
            Side::Black => GameStatus::VictoryBlack,
        }
    }
}

/// Kind of a piece. Side is stored separately on the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
}

/// Promotion targets in the order the validator offers them.
pub const PROMOTION_TARGETS: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

impl PieceType {
    /// Letter used in move notation.
    ///
    /// Pawns have no letter in algebraic notation but are written `P` in
    /// English descriptive notation.
    pub const fn abbreviation(self, english: bool) -> &'static str {
        match self {
            PieceType::King => "K",
            PieceType::Queen => "Q",
            PieceType::Rook => "R",
            PieceType::Knight => "N",
            PieceType::Bishop => "B",
            PieceType::Pawn => {
                if english {
                    "P"
                } else {
                    ""
                }
            }
        }
    }

    /// Digit used by ICCF numeric notation for a promotion target.
    pub const fn iccf_promotion_digit(self) -> Option<char> {
        match self {
            PieceType::Queen => Some('1'),
            PieceType::Rook => Some('2'),
            PieceType::Bishop => Some('3'),
            PieceType::Knight => Some('4'),
            PieceType::King | PieceType::Pawn => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceType::King => "King",
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
        }
    }
}

/// Overall state of a game from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// The given side is in check but has a legal reply.
    Check(Side),
    Stalemate,
    VictoryWhite,
    VictoryBlack,
}

impl GameStatus {
    pub const fn is_victory(self) -> bool {
        matches!(self, GameStatus::VictoryWhite | GameStatus::VictoryBlack)
    }

    pub fn is_victory_for_side(self, side: Side) -> bool {
        self == side.victory_status()
    }

    pub const fn is_over(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate | GameStatus::VictoryWhite | GameStatus::VictoryBlack
        )
    }
}
