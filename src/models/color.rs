use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeckBuilderError;

// ---------------------------------------------------------------------------
// Color — the five colors in WUBRG order
// ---------------------------------------------------------------------------

/// One of the five colors of Magic, ordered W, U, B, R, G.
///
/// The derived `Ord` follows the canonical WUBRG order, which is also the
/// order used when sorting by color identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
}

impl Color {
    pub const ALL: [Color; 5] = [Color::W, Color::U, Color::B, Color::R, Color::G];

    pub fn symbol(self) -> char {
        match self {
            Color::W => 'W',
            Color::U => 'U',
            Color::B => 'B',
            Color::R => 'R',
            Color::G => 'G',
        }
    }

    /// Position in the fixed WUBRG order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_symbol(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::W),
            'U' => Some(Color::U),
            'B' => Some(Color::B),
            'R' => Some(Color::R),
            'G' => Some(Color::G),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Color {
    type Err = DeckBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Color::from_symbol(c)
                .ok_or_else(|| DeckBuilderError::InvalidArgument(format!("Unknown color: {}", s))),
            _ => Err(DeckBuilderError::InvalidArgument(format!("Unknown color: {}", s))),
        }
    }
}

/// Concatenate color symbols in WUBRG order, e.g. `"WU"`.
pub fn color_string<'a, I: IntoIterator<Item = &'a Color>>(colors: I) -> String {
    let mut sorted: Vec<Color> = colors.into_iter().copied().collect();
    sorted.sort();
    sorted.dedup();
    sorted.iter().map(|c| c.symbol()).collect()
}
