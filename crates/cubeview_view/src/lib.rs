//! Turn animation, solution playback, and simulation driver for a 3x3x3
//! cube, to ensure consistent behavior across frontends.
//!
//! [`CubeSimulation`] owns the facelets and is driven by calling
//! [`CubeSimulation::step()`] once per frame. Turns and the delays between
//! them run through a [`Scheduler`], which never animates more than one turn
//! at a time.

mod animation;
mod collaborators;
mod errors;
mod scheduler;
mod sequencer;
mod simulation;

pub use animation::{FrameSink, IgnoreFrames, RunningTurn, TurnAnimation, TurnState};
pub use collaborators::{CubeSolver, LocalStateResolver, ScrambleResolver};
pub use errors::{INVALID_SCRAMBLE_INDICATOR, PlaybackError, ViewError};
pub use scheduler::{Scheduler, SchedulerEvent, Task};
pub use sequencer::{Controls, PlaybackSession, PlaybackState, Solution, Transition};
pub use simulation::CubeSimulation;
