use std::fmt;

use strum::{EnumIter, VariantArray};

/// Sticker color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, VariantArray)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Orange,
    Green,
    Red,
    Blue,
    Yellow,
}
impl Color {
    /// Returns the color for a single-character color code, or `None` if the
    /// code is not recognized.
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::White),
            'o' => Some(Self::Orange),
            'g' => Some(Self::Green),
            'r' => Some(Self::Red),
            'b' => Some(Self::Blue),
            'y' => Some(Self::Yellow),
            _ => None,
        }
    }

    /// Returns the single-character color code.
    pub fn code(self) -> char {
        match self {
            Self::White => 'w',
            Self::Orange => 'o',
            Self::Green => 'g',
            Self::Red => 'r',
            Self::Blue => 'b',
            Self::Yellow => 'y',
        }
    }
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
