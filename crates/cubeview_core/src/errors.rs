use thiserror::Error;

use crate::{Axis, LatticePoint};

/// Error produced when a cube state string cannot be used to build a cube.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MalformedStateError {
    /// State string does not contain exactly 54 characters
    #[error("cube state has {len} characters; expected 54")]
    WrongLength {
        /// Number of characters in the string.
        len: usize,
    },
    /// State string contains a character that is not a color code
    #[error("bad color code {code:?} at index {index}")]
    BadColor {
        /// Index of the character.
        index: usize,
        /// Offending character.
        code: char,
    },
}

/// Error produced when the facelets are not arranged on the lattice.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LatticeError {
    /// Facelet is not at a valid facelet position
    #[error("facelet {facelet} is off the lattice at {point}")]
    OffLattice {
        /// Index of the facelet.
        facelet: usize,
        /// Position of the facelet.
        point: LatticePoint,
    },
    /// Two facelets share a position
    #[error("facelets {first} and {second} overlap at {point}")]
    Overlapping {
        /// Index of one facelet.
        first: usize,
        /// Index of the other facelet.
        second: usize,
        /// Shared position.
        point: LatticePoint,
    },
    /// No facelet occupies a position
    #[error("no facelet at {point}")]
    Unoccupied {
        /// Empty position.
        point: LatticePoint,
    },
}

/// Error produced when a move does not select exactly one layer.
///
/// This never happens on a cube whose facelets have all been snapped to the
/// lattice; it indicates that the facelet set has been corrupted.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AmbiguousLayerError {
    /// Facelets are not on the lattice
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    /// A plane of the layer does not contain the expected number of facelets
    #[error("plane {axis}={plane} has {found} facelets; expected {expected}")]
    PlaneCount {
        /// Axis perpendicular to the plane.
        axis: Axis,
        /// Coordinate of the plane, in half-units.
        plane: i8,
        /// Expected number of facelets.
        expected: usize,
        /// Actual number of facelets.
        found: usize,
    },
}
