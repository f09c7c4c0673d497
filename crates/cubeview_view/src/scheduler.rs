//! Tick-driven queue of delays and turns.

use std::collections::VecDeque;

use cubeview_core::{AmbiguousLayerError, FaceletSet, ResolvedLayer};
use cubeview_notation::Move;
use cubeview_prefs::InterpolateFn;
use web_time::Duration;

use crate::{FrameSink, PlaybackError, TurnAnimation};

/// Unit of scheduled work.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Task {
    /// Wait for a fixed amount of time.
    Wait(Duration),
    /// Resolve a move against the current facelets and animate it over a
    /// number of frames.
    Turn {
        /// Move to turn.
        mv: Move,
        /// Number of animation frames.
        steps: u32,
    },
}

/// Something that happened during a [`Scheduler::tick()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// A wait finished.
    WaitElapsed,
    /// A turn was resolved and its animation started.
    TurnStarted(ResolvedLayer),
    /// A turn finished and its facelets were snapped onto the lattice.
    TurnSettled(ResolvedLayer),
    /// A move could not be resolved, so it was dropped without touching the
    /// facelets.
    TurnFailed(Move, AmbiguousLayerError),
}

/// Cooperative scheduler for turns and the delays between them.
///
/// Tasks run strictly in order. Time passed to [`Scheduler::tick()`] is spent
/// on waits directly and on turns one frame at a time, so a turn never
/// starts before the previous task has finished. At most one turn may be
/// queued or running at any time.
#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    queue: VecDeque<Task>,
    animation: TurnAnimation,
    /// Time available to the task at the front of the queue.
    banked: Duration,
}
impl Scheduler {
    /// Constructs an empty scheduler.
    pub fn new(interpolation: InterpolateFn) -> Self {
        Self {
            queue: VecDeque::new(),
            animation: TurnAnimation::new(interpolation),
            banked: Duration::ZERO,
        }
    }

    /// Returns the turn animation.
    pub fn animation(&self) -> &TurnAnimation {
        &self.animation
    }
    /// Returns the turn animation, mutably.
    pub fn animation_mut(&mut self) -> &mut TurnAnimation {
        &mut self.animation
    }

    /// Returns whether there is nothing left to do.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && !self.animation.is_running()
    }
    /// Returns whether a turn is queued or running.
    pub fn has_turn(&self) -> bool {
        self.animation.is_running() || self.queue.iter().any(|t| matches!(t, Task::Turn { .. }))
    }
    /// Returns the queued tasks, including the one in progress.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.queue.iter()
    }

    /// Appends a task to the queue.
    ///
    /// Returns [`PlaybackError::Busy`] if `task` is a turn and another turn
    /// is already queued or running.
    pub fn push(&mut self, task: Task) -> Result<(), PlaybackError> {
        if matches!(task, Task::Turn { .. }) && self.has_turn() {
            return Err(PlaybackError::Busy);
        }
        self.queue.push_back(task);
        Ok(())
    }

    /// Drops every queued wait. The current turn, if any, is unaffected.
    pub fn cancel_waits(&mut self) {
        self.queue.retain(|t| matches!(t, Task::Turn { .. }));
        if !self.animation.is_running() {
            self.banked = Duration::ZERO;
        }
    }

    /// Advances the scheduler by `delta`, animating one step per
    /// `frame_duration`, and returns what happened.
    pub fn tick(
        &mut self,
        delta: Duration,
        frame_duration: Duration,
        facelets: &mut FaceletSet,
        sink: &mut dyn FrameSink,
    ) -> Vec<SchedulerEvent> {
        let frame_duration = frame_duration.max(Duration::from_millis(1));
        let mut events = vec![];
        self.banked += delta;

        loop {
            if self.animation.is_running() {
                if self.banked < frame_duration {
                    break;
                }
                self.banked -= frame_duration;
                if let Some(layer) = self.animation.advance(facelets, sink) {
                    self.queue.pop_front();
                    events.push(SchedulerEvent::TurnSettled(layer));
                }
                continue;
            }

            match self.queue.front().copied() {
                None => {
                    self.banked = Duration::ZERO;
                    break;
                }
                Some(Task::Wait(duration)) => {
                    if self.banked < duration {
                        break;
                    }
                    self.banked -= duration;
                    self.queue.pop_front();
                    events.push(SchedulerEvent::WaitElapsed);
                }
                Some(Task::Turn { mv, steps }) => match cubeview_core::resolve(mv, facelets) {
                    Ok(layer) => {
                        if let Err(e) = self.animation.start(layer.clone(), steps) {
                            // unreachable: the animation is not running here
                            log::error!("unable to start {mv}: {e}");
                            self.queue.pop_front();
                            continue;
                        }
                        events.push(SchedulerEvent::TurnStarted(layer));
                    }
                    Err(e) => {
                        log::error!("unable to turn {mv}: {e}");
                        self.queue.pop_front();
                        events.push(SchedulerEvent::TurnFailed(mv, e));
                    }
                },
            }
        }

        events
    }

    /// Runs every queued task to completion without waiting, and returns
    /// what happened.
    pub fn flush(
        &mut self,
        facelets: &mut FaceletSet,
        sink: &mut dyn FrameSink,
    ) -> Vec<SchedulerEvent> {
        let mut events = vec![];
        self.banked = Duration::ZERO;
        loop {
            if let Some(layer) = self.animation.finish(facelets, sink) {
                self.queue.pop_front();
                events.push(SchedulerEvent::TurnSettled(layer));
            }
            match self.queue.front() {
                None => break,
                Some(Task::Wait(_)) => {
                    self.queue.pop_front();
                    events.push(SchedulerEvent::WaitElapsed);
                }
                Some(Task::Turn { .. }) => {
                    events.extend(self.tick(Duration::ZERO, Duration::MAX, facelets, sink));
                }
            }
        }
        events
    }
}
