//! Facelet lattice, cube state, and layer resolution for a 3x3x3 cube.
//!
//! The 54 facelets of the cube live on a discrete lattice. Each facelet
//! stores its exact [`LatticePoint`], which is the source of truth for the
//! puzzle state, alongside a floating-point presentation transform that is
//! rotated incrementally while a turn is animated and snapped back onto the
//! lattice afterwards.

mod color;
mod errors;
mod facelet;
mod lattice;
mod layer;
mod registry;
mod state;

pub use cubeview_notation as notation;

pub use color::Color;
pub use errors::{AmbiguousLayerError, LatticeError, MalformedStateError};
pub use facelet::{Decoration, DecorationKind, Facelet};
pub use lattice::{Axis, HALF_UNIT, LATTICE_COORDS, LatticePoint, SEPARATION, SIDE_WIDTH, Sign};
pub use layer::{ResolvedLayer, resolve};
pub use registry::{DecorationId, FaceletId, FaceletSet};
pub use state::{CubeFace, CubeState};

/// Number of facelets on the cube.
pub const FACELET_COUNT: usize = 54;

/// Number of facelets on each face of the cube.
pub const FACELETS_PER_FACE: usize = 9;
