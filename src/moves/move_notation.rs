//! Rendering moves in the supported notation styles.
//!
//! Disambiguation and the check/mate annotation are decided by the validator
//! before the move is committed and stored on the [`Move`]; rendering here is
//! a pure function of the move. The style used by `Display` is a
//! process-wide preference, read once from `CHESS_BOARD_NOTATION` and
//! overridable with [`set_preferred_notation`].

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::PieceType;
use crate::game_state::tile::Tile;
use crate::moves::chess_move::{Disambiguation, Move, MoveKind};

/// Environment variable holding the default notation style name.
pub const NOTATION_ENV_VAR: &str = "CHESS_BOARD_NOTATION";

const PREFERENCE_UNSET: u8 = u8::MAX;
static PREFERRED_NOTATION: AtomicU8 = AtomicU8::new(PREFERENCE_UNSET);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotationStyle {
    /// Plain sentence, for example `White Pawn from e2 to e4`.
    Descriptive,
    /// Short algebraic, for example `Nf3`, `exd5`, `e8Q+`.
    Algebraic,
    /// PGN flavoured algebraic, for example `e8=Q+`.
    Pgn,
    /// English descriptive, for example `P-K4`, `NxP ch`.
    English,
    /// Coordinate, for example `E2-E4`.
    Coordinate,
    /// ICCF numeric, for example `5254`.
    Iccf,
}

pub const ALL_NOTATION_STYLES: [NotationStyle; 6] = [
    NotationStyle::Descriptive,
    NotationStyle::Algebraic,
    NotationStyle::Pgn,
    NotationStyle::English,
    NotationStyle::Coordinate,
    NotationStyle::Iccf,
];

impl NotationStyle {
    const fn code(self) -> u8 {
        match self {
            NotationStyle::Descriptive => 0,
            NotationStyle::Algebraic => 1,
            NotationStyle::Pgn => 2,
            NotationStyle::English => 3,
            NotationStyle::Coordinate => 4,
            NotationStyle::Iccf => 5,
        }
    }

    const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(NotationStyle::Descriptive),
            1 => Some(NotationStyle::Algebraic),
            2 => Some(NotationStyle::Pgn),
            3 => Some(NotationStyle::English),
            4 => Some(NotationStyle::Coordinate),
            5 => Some(NotationStyle::Iccf),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            NotationStyle::Descriptive => "descriptive",
            NotationStyle::Algebraic => "algebraic",
            NotationStyle::Pgn => "pgn",
            NotationStyle::English => "english",
            NotationStyle::Coordinate => "coordinate",
            NotationStyle::Iccf => "iccf",
        }
    }
}

impl FromStr for NotationStyle {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL_NOTATION_STYLES
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| ChessErrors::UnknownNotationStyle(s.to_owned()))
    }
}

impl fmt::Display for NotationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Style used when a move is formatted with `Display`.
pub fn preferred_notation() -> NotationStyle {
    if let Some(style) = NotationStyle::from_code(PREFERRED_NOTATION.load(Ordering::Relaxed)) {
        return style;
    }
    let style = std::env::var(NOTATION_ENV_VAR)
        .ok()
        .and_then(|name| name.parse::<NotationStyle>().ok())
        .unwrap_or(NotationStyle::Algebraic);
    // A concurrent `set_preferred_notation` wins over the environment default.
    match PREFERRED_NOTATION.compare_exchange(
        PREFERENCE_UNSET,
        style.code(),
        Ordering::Relaxed,
        Ordering::Relaxed,
    ) {
        Ok(_) => style,
        Err(current) => NotationStyle::from_code(current).unwrap_or(style),
    }
}

pub fn set_preferred_notation(style: NotationStyle) {
    PREFERRED_NOTATION.store(style.code(), Ordering::Relaxed);
}

/// Extracts the destination square from an algebraic or PGN move string.
///
/// Castling has no destination square and is rejected.
pub fn algebraic_destination(notation: &str) -> Result<Tile, ChessErrors> {
    let invalid = || ChessErrors::InvalidAlgebraicString(notation.to_owned());
    let mut body = notation.trim().trim_end_matches(['+', '#']);
    if body.starts_with("O-O") {
        return Err(invalid());
    }
    if let Some(last) = body.chars().last() {
        if matches!(last, 'Q' | 'R' | 'B' | 'N') {
            body = body[..body.len() - 1].trim_end_matches('=');
        }
    }
    if body.len() < 2 || !body.is_char_boundary(body.len() - 2) {
        return Err(invalid());
    }
    Tile::from_algebraic(&body[body.len() - 2..])
}

impl Move {
    /// Renders the move in `style`.
    pub fn notation(&self, style: NotationStyle) -> String {
        match style {
            NotationStyle::Descriptive => self.descriptive_notation(),
            NotationStyle::Algebraic => self.algebraic_notation(false),
            NotationStyle::Pgn => self.algebraic_notation(true),
            NotationStyle::English => self.english_notation(),
            NotationStyle::Coordinate => self.coordinate_notation(),
            NotationStyle::Iccf => self.iccf_notation(),
        }
    }

    fn descriptive_notation(&self) -> String {
        let mut out = format!(
            "{:?} {} from {} to {}",
            self.side(),
            self.piece_type().name(),
            self.from(),
            self.to()
        );
        match self.kind() {
            MoveKind::Castle { is_kings_side, .. } => {
                out.push_str(if is_kings_side {
                    ", castling king's side"
                } else {
                    ", castling queen's side"
                });
            }
            MoveKind::Promotion { promote_to } => {
                out.push_str(&format!(", promoting to {}", promote_to.name()));
            }
            MoveKind::Plain => {}
        }
        out
    }

    fn algebraic_notation(&self, pgn: bool) -> String {
        let mut out = String::new();
        if let MoveKind::Castle { is_kings_side, .. } = self.kind() {
            out.push_str(castle_text(is_kings_side));
        } else {
            if self.piece_type() == PieceType::Pawn {
                if self.is_capture() {
                    out.push(self.from().file_char());
                }
            } else {
                out.push_str(self.piece_type().abbreviation(false));
                match self.disambiguation() {
                    Disambiguation::None => {}
                    Disambiguation::File => out.push(self.from().file_char()),
                    Disambiguation::Rank => out.push(self.from().rank_char()),
                    Disambiguation::Full => out.push_str(&self.from().to_algebraic()),
                }
            }
            if self.is_capture() {
                out.push('x');
            }
            out.push_str(&self.to().to_algebraic());
            if let Some(target) = self.promotion_target() {
                if pgn {
                    out.push('=');
                }
                out.push_str(target.abbreviation(false));
            }
        }
        out.push_str(self.check_suffix("+", "#"));
        out
    }

    fn english_notation(&self) -> String {
        let side = self.side();
        let mut out = String::new();
        if let MoveKind::Castle { is_kings_side, .. } = self.kind() {
            out.push_str(castle_text(is_kings_side));
        } else {
            out.push_str(self.piece_type().abbreviation(true));
            let from = self.from();
            match self.disambiguation() {
                Disambiguation::None => {}
                Disambiguation::File => out.push_str(&format!("({})", from.english_file())),
                Disambiguation::Rank => out.push_str(&format!("({})", from.english_rank(side))),
                Disambiguation::Full => out.push_str(&format!("({})", from.to_english(side))),
            }
            match self.captured_type() {
                Some(victim) => {
                    out.push('x');
                    out.push_str(victim.abbreviation(true));
                }
                None => {
                    out.push('-');
                    out.push_str(&self.to().to_english(side));
                }
            }
            if let Some(target) = self.promotion_target() {
                out.push_str(&format!("({})", target.abbreviation(true)));
            }
            if self.is_en_passant() {
                out.push_str(" e.p.");
            }
        }
        out.push_str(self.check_suffix(" ch", " mate"));
        out
    }

    fn coordinate_notation(&self) -> String {
        let mut out = format!(
            "{}{}{}",
            self.from().to_coordinate(),
            if self.is_capture() { 'x' } else { '-' },
            self.to().to_coordinate()
        );
        if let Some(target) = self.promotion_target() {
            out.push_str(target.abbreviation(false));
        }
        out
    }

    fn iccf_notation(&self) -> String {
        let mut out = format!("{}{}", self.from().to_iccf(), self.to().to_iccf());
        if let Some(digit) = self.promotion_target().and_then(|t| t.iccf_promotion_digit()) {
            out.push(digit);
        }
        out
    }

    fn check_suffix(&self, check: &'static str, mate: &'static str) -> &'static str {
        let annotations = self.annotations();
        if annotations.is_checkmate {
            mate
        } else if annotations.gives_check {
            check
        } else {
            ""
        }
    }
}

fn castle_text(is_kings_side: bool) -> &'static str {
    if is_kings_side {
        "O-O"
    } else {
        "O-O-O"
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation(preferred_notation()))
    }
}
