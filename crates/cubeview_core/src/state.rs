use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use strum::{EnumIter, IntoEnumIterator, VariantArray};

use crate::{Color, FACELET_COUNT, FACELETS_PER_FACE, LatticePoint, MalformedStateError};

/// Face of the cube, in the order used by [`CubeState`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, VariantArray)]
#[allow(missing_docs)]
pub enum CubeFace {
    Up,
    Left,
    Front,
    Right,
    Back,
    Down,
}
impl CubeFace {
    /// Returns the position of the facelet at `row` and `col` (each in
    /// `0..3`) when the face is read row-major in the standard unfolded net:
    /// the up face is read with the back edge first, the down face with the
    /// front edge first, and the four side faces upright as seen from outside.
    pub fn position(self, row: usize, col: usize) -> LatticePoint {
        // -2, 0, or 2
        let along = |i: usize| 2 * i as i8 - 2;
        let (r, c) = (along(row), along(col));
        match self {
            CubeFace::Up => LatticePoint::new(c, 3, r),
            CubeFace::Left => LatticePoint::new(-3, -r, c),
            CubeFace::Front => LatticePoint::new(c, -r, 3),
            CubeFace::Right => LatticePoint::new(3, -r, -c),
            CubeFace::Back => LatticePoint::new(-c, -r, -3),
            CubeFace::Down => LatticePoint::new(c, -3, -r),
        }
    }

    /// Returns the color of this face on a solved cube.
    pub fn solved_color(self) -> Color {
        match self {
            CubeFace::Up => Color::White,
            CubeFace::Left => Color::Orange,
            CubeFace::Front => Color::Green,
            CubeFace::Right => Color::Red,
            CubeFace::Back => Color::Blue,
            CubeFace::Down => Color::Yellow,
        }
    }
}

/// Colors of all 54 facelets, grouped into six faces of nine in the order
/// up, left, front, right, back, down, each read row-major.
///
/// This is the interchange format with the solver and scramble services. It
/// is not updated while turns are animated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubeState(pub [Color; FACELET_COUNT]);
impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}
impl CubeState {
    /// Returns the state of a solved cube.
    pub fn solved() -> Self {
        let mut colors = [Color::White; FACELET_COUNT];
        for (face, chunk) in CubeFace::iter().zip(colors.chunks_mut(FACELETS_PER_FACE)) {
            chunk.fill(face.solved_color());
        }
        Self(colors)
    }

    /// Returns the lattice position of each index in the state string.
    pub fn positions() -> impl Iterator<Item = LatticePoint> {
        CubeFace::iter().flat_map(|face| {
            (0..3)
                .cartesian_product(0..3)
                .map(move |(row, col)| face.position(row, col))
        })
    }

    /// Returns the nine colors of one face.
    pub fn face(&self, face: CubeFace) -> &[Color] {
        let start = face as usize * FACELETS_PER_FACE;
        &self.0[start..start + FACELETS_PER_FACE]
    }

    /// Returns whether every face is a single color.
    pub fn is_solved(&self) -> bool {
        self.0
            .chunks(FACELETS_PER_FACE)
            .all(|face| face.iter().all_equal())
    }

    /// Returns the state as an unfolded net, one face row per line.
    pub fn net(&self) -> String {
        let row = |face: CubeFace, r: usize| -> String {
            self.face(face)[r * 3..r * 3 + 3]
                .iter()
                .map(|c| c.code())
                .collect()
        };
        let mut lines = vec![];
        for r in 0..3 {
            lines.push(format!("    {}", row(CubeFace::Up, r)));
        }
        for r in 0..3 {
            lines.push(
                [CubeFace::Left, CubeFace::Front, CubeFace::Right, CubeFace::Back]
                    .into_iter()
                    .map(|face| row(face, r))
                    .join(" "),
            );
        }
        for r in 0..3 {
            lines.push(format!("    {}", row(CubeFace::Down, r)));
        }
        lines.join("\n")
    }
}
impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.0 {
            write!(f, "{}", color.code())?;
        }
        Ok(())
    }
}
impl FromStr for CubeState {
    type Err = MalformedStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != FACELET_COUNT {
            return Err(MalformedStateError::WrongLength { len });
        }
        let mut colors = [Color::White; FACELET_COUNT];
        for (index, (code, color)) in s.chars().zip(&mut colors).enumerate() {
            *color = Color::from_code(code).ok_or(MalformedStateError::BadColor { index, code })?;
        }
        Ok(Self(colors))
    }
}
