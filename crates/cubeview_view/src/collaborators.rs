//! External services that the simulation depends on.

use cubeview_core::{CubeState, FaceletSet};
use cubeview_notation::parse_scramble;

/// Service that finds a solution for a cube state.
///
/// Solving may take an arbitrarily long time, so the simulation calls it on
/// a worker thread.
pub trait CubeSolver: Send + Sync {
    /// Returns a solution for `state` as space-separated move tokens.
    fn solve(&self, state: &CubeState) -> eyre::Result<String>;
}
impl<F: Fn(&CubeState) -> eyre::Result<String> + Send + Sync> CubeSolver for F {
    fn solve(&self, state: &CubeState) -> eyre::Result<String> {
        self(state)
    }
}

/// Service that converts a scramble into the state of a cube scrambled with
/// it.
pub trait ScrambleResolver {
    /// Returns the 54-character state string of a solved cube after applying
    /// `scramble`.
    fn state_from_scramble(&self, scramble: &str) -> eyre::Result<String>;
}
impl<F: Fn(&str) -> eyre::Result<String>> ScrambleResolver for F {
    fn state_from_scramble(&self, scramble: &str) -> eyre::Result<String> {
        self(scramble)
    }
}

/// Scramble resolver that applies the scramble to a solved cube locally.
#[derive(Debug, Default, Copy, Clone)]
pub struct LocalStateResolver;
impl ScrambleResolver for LocalStateResolver {
    fn state_from_scramble(&self, scramble: &str) -> eyre::Result<String> {
        let mut facelets = FaceletSet::build(&CubeState::solved());
        for mv in parse_scramble(scramble)? {
            facelets.apply_move(mv)?;
        }
        Ok(facelets.state()?.to_string())
    }
}
