use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumIter, VariantArray};

use crate::InvalidMoveError;

/// Face, slice, or rotation letter at the start of a move token.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, EnumIter, VariantArray)]
#[allow(missing_docs)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
    M,
    E,
    S,
    X,
    Y,
    Z,
    #[strum(to_string = "u")]
    WideU,
    #[strum(to_string = "d")]
    WideD,
    #[strum(to_string = "l")]
    WideL,
    #[strum(to_string = "r")]
    WideR,
    #[strum(to_string = "f")]
    WideF,
    #[strum(to_string = "b")]
    WideB,
}
impl Face {
    /// Returns the face for a notation letter, or `None` if the letter is not
    /// recognized. Letters are case-sensitive.
    pub fn from_char(c: char) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|face| face.letter() == c)
    }

    /// Returns the notation letter for the face.
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
            Face::M => 'M',
            Face::E => 'E',
            Face::S => 'S',
            Face::X => 'X',
            Face::Y => 'Y',
            Face::Z => 'Z',
            Face::WideU => 'u',
            Face::WideD => 'd',
            Face::WideL => 'l',
            Face::WideR => 'r',
            Face::WideF => 'f',
            Face::WideB => 'b',
        }
    }

    /// Returns which kind of layer the letter turns.
    pub fn layer_kind(self) -> LayerKind {
        match self {
            Face::U | Face::D | Face::L | Face::R | Face::F | Face::B => LayerKind::Outer,
            Face::M | Face::E | Face::S => LayerKind::Slice,
            Face::X | Face::Y | Face::Z => LayerKind::WholeCube,
            Face::WideU | Face::WideD | Face::WideL | Face::WideR | Face::WideF | Face::WideB => {
                LayerKind::Wide
            }
        }
    }

    /// Returns the outer face that a wide move, slice, or rotation follows for
    /// its turning direction.
    ///
    /// `M` follows `L`, `E` follows `D`, `S` follows `F`, and the rotations
    /// `X`, `Y`, `Z` follow `R`, `U`, `F`.
    pub fn reference_face(self) -> Face {
        match self {
            Face::M => Face::L,
            Face::E => Face::D,
            Face::S => Face::F,
            Face::X => Face::R,
            Face::Y => Face::U,
            Face::Z => Face::F,
            Face::WideU => Face::U,
            Face::WideD => Face::D,
            Face::WideL => Face::L,
            Face::WideR => Face::R,
            Face::WideF => Face::F,
            Face::WideB => Face::B,
            outer => outer,
        }
    }
}

/// Kind of layer turned by a move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// One outer layer.
    Outer,
    /// Middle slice between two opposite outer layers.
    Slice,
    /// Outer layer plus the adjacent middle slice.
    Wide,
    /// Whole cube.
    WholeCube,
}

/// Direction and amount of a move.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, EnumIter, VariantArray)]
pub enum Modifier {
    /// Clockwise quarter turn (no suffix).
    #[default]
    Clockwise,
    /// Counterclockwise quarter turn (`'`).
    CounterClockwise,
    /// Half turn (`2`).
    Double,
}
impl Modifier {
    /// Returns the modifier for a suffix character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::CounterClockwise),
            '2' => Some(Self::Double),
            _ => None,
        }
    }

    /// Returns the suffix written after the face letter.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Clockwise => "",
            Self::CounterClockwise => "'",
            Self::Double => "2",
        }
    }

    /// Returns the modifier that undoes this one.
    ///
    /// Half turns are their own inverse.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
            Self::Double => Self::Double,
        }
    }

    /// Returns the number of clockwise quarter turns: `1`, `-1`, or `2`.
    pub fn clockwise_quarter_turns(self) -> i8 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
            Self::Double => 2,
        }
    }

    /// Returns the angle of the move in degrees, ignoring direction.
    pub fn degrees(self) -> u32 {
        match self {
            Self::Clockwise | Self::CounterClockwise => 90,
            Self::Double => 180,
        }
    }
}

/// Single move token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face, slice, or rotation letter.
    pub face: Face,
    /// Direction and amount.
    pub modifier: Modifier,
}
impl Move {
    /// Constructs a move.
    pub const fn new(face: Face, modifier: Modifier) -> Self {
        Self { face, modifier }
    }

    /// Returns the move that undoes this one: same letter, inverted modifier.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            face: self.face,
            modifier: self.modifier.inverse(),
        }
    }

    /// Returns whether the move is a half turn.
    pub fn is_half_turn(self) -> bool {
        self.modifier == Modifier::Double
    }
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.modifier.suffix())
    }
}
impl FromStr for Move {
    type Err = InvalidMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let first = chars.next().ok_or(InvalidMoveError::Empty)?;
        let face = Face::from_char(first).ok_or_else(|| InvalidMoveError::UnknownFace {
            token: token.to_owned(),
            face: first,
        })?;
        let second = chars.next();
        if chars.next().is_some() {
            return Err(InvalidMoveError::TooLong {
                token: token.to_owned(),
            });
        }
        let modifier = match second {
            None => Modifier::Clockwise,
            Some(c) => Modifier::from_char(c).ok_or_else(|| InvalidMoveError::BadModifier {
                token: token.to_owned(),
                modifier: c,
            })?,
        };
        Ok(Self { face, modifier })
    }
}
