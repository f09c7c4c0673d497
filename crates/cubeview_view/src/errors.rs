use cubeview_core::{AmbiguousLayerError, LatticeError, MalformedStateError};
use cubeview_notation::InvalidMoveError;
use thiserror::Error;

/// Text shown in place of a scramble that failed validation.
pub const INVALID_SCRAMBLE_INDICATOR: &str = "Invalid Scramble";

/// Error produced when a playback request is not allowed in the current
/// session state. Rejected requests never change the session or the cube.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaybackError {
    /// There is no active solution
    #[error("no solution to play")]
    NoSolution,
    /// Cursor is at the first move and cannot step backward
    #[error("already at the start of the solution")]
    AtStart,
    /// Cursor is past the last move and cannot step forward
    #[error("already at the end of the solution")]
    AtEnd,
    /// Solution is not playing automatically
    #[error("solution is not playing")]
    NotPlaying,
    /// Request is not allowed while the solution is playing automatically
    #[error("not allowed while the solution is playing")]
    AutoPlaying,
    /// Another turn is already queued or in progress
    #[error("another turn is in progress")]
    Busy,
    /// A solve request is already pending
    #[error("already waiting for a solution")]
    SolvePending,
}

/// Error produced by a [`crate::CubeSimulation`] request.
#[derive(Error, Debug)]
pub enum ViewError {
    /// Scramble text contains an invalid move
    #[error("{INVALID_SCRAMBLE_INDICATOR}: {0}")]
    InvalidScramble(#[from] InvalidMoveError),
    /// Cube state could not be used to rebuild the cube
    #[error("malformed cube state: {0}")]
    MalformedState(#[from] MalformedStateError),
    /// Move could not be resolved to a layer
    #[error("unable to resolve layer: {0}")]
    AmbiguousLayer(#[from] AmbiguousLayerError),
    /// Facelets are not arranged on the lattice
    #[error("unable to read cube state: {0}")]
    Lattice(#[from] LatticeError),
    /// Request not allowed in the current playback state
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    /// External service failed
    #[error("{service} failed: {error}")]
    Collaborator {
        /// Name of the service.
        service: &'static str,
        /// Error reported by the service.
        error: eyre::Report,
    },
}
