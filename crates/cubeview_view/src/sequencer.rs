//! Solution playback state machine.
//!
//! The session is a plain value: every transition takes a
//! [`PlaybackSession`] and returns the next one, so nothing is shared between
//! sessions. Transitions only decide which move to turn; the caller is
//! responsible for turning it.

use std::fmt;

use cubeview_notation::{InvalidMoveError, Move, format_moves, parse_scramble};
use itertools::Itertools;
use strum::Display;

use crate::PlaybackError;

/// Ordered list of moves that solves a cube.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Solution(Vec<Move>);
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_moves(&self.0))
    }
}
impl From<Vec<Move>> for Solution {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}
impl Solution {
    /// Parses a solution from space-separated move tokens.
    pub fn parse(text: &str) -> Result<Self, InvalidMoveError> {
        parse_scramble(text).map(Self)
    }

    /// Returns the moves in the solution.
    pub fn moves(&self) -> &[Move] {
        &self.0
    }
    /// Returns the move at `index`.
    pub fn get(&self, index: usize) -> Option<Move> {
        self.0.get(index).copied()
    }
    /// Returns the number of moves.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether there are no moves.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Formats the solution with the move at `cursor` wrapped in brackets.
    /// If `cursor` is past the end, no move is marked.
    pub fn display_with_cursor(&self, cursor: usize) -> String {
        self.0
            .iter()
            .enumerate()
            .map(|(i, mv)| match i == cursor {
                true => format!("[{mv}]"),
                false => mv.to_string(),
            })
            .join(" ")
    }
}

/// State of solution playback.
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Not playing, and no move has been stepped through manually.
    #[default]
    Idle,
    /// Moves are played automatically.
    AutoPlaying,
    /// Automatic playback is paused.
    Paused,
    /// The user is stepping through moves one at a time.
    ManualStep,
}

/// Progress through a solution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlaybackSession {
    /// Index of the next move to play.
    pub solution_index: usize,
    /// Whether moves are played automatically.
    pub is_playing: bool,
    /// Speed slider value.
    pub speed: u32,
    /// Playback state.
    pub state: PlaybackState,
}
impl PlaybackSession {
    /// Constructs a session at the start of a solution.
    pub fn new(speed: u32) -> Self {
        Self {
            solution_index: 0,
            is_playing: false,
            speed,
            state: PlaybackState::Idle,
        }
    }

    /// Returns the initial session, keeping the speed.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::new(self.speed)
    }

    /// Returns the fraction of the solution that has been played.
    pub fn progress(&self, solution: &Solution) -> f64 {
        if solution.is_empty() {
            return 0.0;
        }
        self.solution_index as f64 / solution.len() as f64
    }

    /// Starts or resumes automatic playback.
    pub fn play(self, solution: &Solution) -> Result<Self, PlaybackError> {
        if self.solution_index >= solution.len() {
            return Err(PlaybackError::AtEnd);
        }
        Ok(Self {
            is_playing: true,
            state: PlaybackState::AutoPlaying,
            ..self
        })
    }

    /// Pauses automatic playback. The turn in progress, if any, still
    /// completes. Does nothing unless playing.
    #[must_use]
    pub fn pause(self) -> Self {
        if self.state != PlaybackState::AutoPlaying {
            return self;
        }
        Self {
            is_playing: false,
            state: PlaybackState::Paused,
            ..self
        }
    }

    /// Returns the next move to play automatically. Called whenever the
    /// previous move and the delay after it have finished.
    pub fn next_auto_move(self, solution: &Solution) -> Result<Transition, PlaybackError> {
        if !self.is_playing {
            return Err(PlaybackError::NotPlaying);
        }
        self.advance(solution, PlaybackState::AutoPlaying)
    }

    /// Steps forward through one move.
    pub fn step_forward(self, solution: &Solution) -> Result<Transition, PlaybackError> {
        if self.is_playing {
            return Err(PlaybackError::AutoPlaying);
        }
        self.advance(solution, PlaybackState::ManualStep)
    }

    /// Steps backward through one move by turning the inverse of the
    /// previous move.
    pub fn step_backward(self, solution: &Solution) -> Result<Transition, PlaybackError> {
        if self.is_playing {
            return Err(PlaybackError::AutoPlaying);
        }
        let index = self
            .solution_index
            .checked_sub(1)
            .ok_or(PlaybackError::AtStart)?;
        let mv = solution.get(index).ok_or(PlaybackError::AtEnd)?.inverse();
        let session = Self {
            solution_index: index,
            state: PlaybackState::ManualStep,
            ..self
        };
        Ok(Transition {
            mv,
            progress: session.progress(solution),
            description: mv.description(),
            session,
            finished: false,
        })
    }

    fn advance(self, solution: &Solution, state: PlaybackState) -> Result<Transition, PlaybackError> {
        let mv = solution
            .get(self.solution_index)
            .ok_or(PlaybackError::AtEnd)?;
        let moved = Self {
            solution_index: self.solution_index + 1,
            state,
            ..self
        };
        let progress = moved.progress(solution);
        let finished = moved.solution_index == solution.len();
        Ok(Transition {
            mv,
            progress,
            description: mv.description(),
            session: if finished { moved.reset() } else { moved },
            finished,
        })
    }
}

/// Result of a playback transition that turns a move.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Session after the transition.
    pub session: PlaybackSession,
    /// Move to turn.
    pub mv: Move,
    /// Fraction of the solution played after the move, from 0 to 1.
    pub progress: f64,
    /// Human-readable description of `mv`.
    pub description: String,
    /// Whether this move completes the solution. If so, `session` has been
    /// reset and the solution should be discarded.
    pub finished: bool,
}

/// Which user controls are enabled.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Controls {
    /// Buttons that turn a single move.
    pub moves: bool,
    /// Step forward through the solution.
    pub step_forward: bool,
    /// Step backward through the solution.
    pub step_backward: bool,
    /// Apply a random scramble.
    pub random_scramble: bool,
    /// Request a solution.
    pub solve: bool,
    /// Play or pause the solution.
    pub play_pause: bool,
}
impl Controls {
    /// Returns the controls enabled for a session.
    pub fn new(session: &PlaybackSession, solution: Option<&Solution>, solve_pending: bool) -> Self {
        let playing = session.is_playing;
        let remaining = solution.is_some_and(|s| session.solution_index < s.len());
        Self {
            moves: !playing,
            step_forward: !playing && remaining,
            step_backward: !playing && solution.is_some() && session.solution_index > 0,
            random_scramble: !playing,
            solve: solution.is_none() && !solve_pending,
            play_pause: remaining,
        }
    }
}
