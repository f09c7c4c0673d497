//! Frame-by-frame animation of a single turn.

use cubeview_core::{FaceletSet, ResolvedLayer};
use cubeview_prefs::InterpolateFn;

use crate::PlaybackError;

/// Receiver of a notification after every animation frame, typically a
/// renderer that draws the facelet set.
pub trait FrameSink {
    /// Called once per animation step, after the facelets have moved.
    fn frame_ready(&mut self, facelets: &FaceletSet);
}
impl<F: FnMut(&FaceletSet)> FrameSink for F {
    fn frame_ready(&mut self, facelets: &FaceletSet) {
        self(facelets);
    }
}

/// Frame sink that does nothing.
#[derive(Debug, Default, Copy, Clone)]
pub struct IgnoreFrames;
impl FrameSink for IgnoreFrames {
    fn frame_ready(&mut self, _facelets: &FaceletSet) {}
}

/// Turn that is partway through its animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningTurn {
    /// Layer being turned.
    pub layer: ResolvedLayer,
    /// Number of steps completed so far.
    pub step: u32,
    /// Total number of steps.
    pub steps: u32,
}

/// State of a [`TurnAnimation`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum TurnState {
    /// No turn has been started.
    #[default]
    Idle,
    /// A turn is being animated.
    Running(RunningTurn),
    /// The most recent turn has completed and its facelets have been snapped
    /// onto the lattice.
    Settled(ResolvedLayer),
}

/// Animation of one turn, split into a fixed number of steps.
///
/// Each step rotates the facelets of the layer by a fraction of the total
/// angle. The last step snaps them onto the lattice. A turn cannot be
/// interrupted; a new one may only start once the previous one has settled.
#[derive(Debug, Default, Clone)]
pub struct TurnAnimation {
    state: TurnState,
    interpolation: InterpolateFn,
}
impl TurnAnimation {
    /// Constructs an idle animation with the given presentation easing.
    pub fn new(interpolation: InterpolateFn) -> Self {
        Self {
            state: TurnState::Idle,
            interpolation,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &TurnState {
        &self.state
    }
    /// Returns whether a turn is in progress.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TurnState::Running(_))
    }
    /// Sets the easing used by subsequent steps.
    pub fn set_interpolation(&mut self, interpolation: InterpolateFn) {
        self.interpolation = interpolation;
    }

    /// Starts animating a turn of `layer` over `steps` frames.
    pub fn start(&mut self, layer: ResolvedLayer, steps: u32) -> Result<(), PlaybackError> {
        if self.is_running() {
            return Err(PlaybackError::Busy);
        }
        log::trace!("starting {} over {steps} steps", layer.mv);
        self.state = TurnState::Running(RunningTurn {
            layer,
            step: 0,
            steps: steps.max(1),
        });
        Ok(())
    }

    /// Advances the animation by one frame and notifies `sink`. Returns the
    /// layer if this frame completed the turn.
    ///
    /// Does nothing unless a turn is running.
    pub fn advance(
        &mut self,
        facelets: &mut FaceletSet,
        sink: &mut dyn FrameSink,
    ) -> Option<ResolvedLayer> {
        let TurnState::Running(turn) = &mut self.state else {
            return None;
        };

        let t0 = f64::from(turn.step) / f64::from(turn.steps);
        turn.step += 1;
        let t1 = f64::from(turn.step) / f64::from(turn.steps);
        let fraction = self.interpolation.interpolate(t1) - self.interpolation.interpolate(t0);
        let rotation = turn
            .layer
            .axis
            .rotation(turn.layer.angle_radians() * fraction);
        facelets.rotate(&turn.layer.facelets, &rotation);

        let settled = if turn.step >= turn.steps {
            facelets.settle(&turn.layer);
            log::debug!("settled {} after {} steps", turn.layer.mv, turn.steps);
            let layer = turn.layer.clone();
            self.state = TurnState::Settled(layer.clone());
            Some(layer)
        } else {
            None
        };

        sink.frame_ready(facelets);
        settled
    }

    /// Runs the remaining steps of the current turn, if any, and returns its
    /// layer.
    pub fn finish(
        &mut self,
        facelets: &mut FaceletSet,
        sink: &mut dyn FrameSink,
    ) -> Option<ResolvedLayer> {
        while self.is_running() {
            if let Some(layer) = self.advance(facelets, sink) {
                return Some(layer);
            }
        }
        None
    }
}
