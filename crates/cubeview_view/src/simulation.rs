use std::sync::{Arc, mpsc};

use cubeview_core::{CubeState, FaceletSet, LatticeError};
use cubeview_notation::{Move, format_moves, parse_scramble, random_scramble};
use cubeview_prefs::{AnimationPreferences, Preferences, SPEED_RANGE};
use rand::Rng;
use web_time::{Duration, Instant};

use crate::{
    Controls, CubeSolver, FrameSink, INVALID_SCRAMBLE_INDICATOR, IgnoreFrames, PlaybackError,
    PlaybackSession, Scheduler, SchedulerEvent, ScrambleResolver, Solution, Task, Transition,
    ViewError,
};

/// Cube simulation, which manages the facelets, turn animations, solution
/// playback, and requests to external services.
///
/// All work happens in [`CubeSimulation::step()`], which should be called
/// once per frame with the time since the previous frame.
pub struct CubeSimulation {
    /// Live facelets. This is the single source of truth for the cube.
    facelets: FaceletSet,
    /// Queue of turns and delays.
    scheduler: Scheduler,
    /// Whether the queued turn was started by automatic playback and must be
    /// followed by the inter-move delay, even if playback is paused before it
    /// settles.
    autoplay_turn: bool,
    prefs: Preferences,

    /// Playback progress through `solution`.
    session: PlaybackSession,
    /// Active solution, if any.
    solution: Option<Solution>,
    /// Fraction of the solution played.
    progress: f64,
    /// Description of the most recent solution move.
    description: Option<String>,

    solver: Arc<dyn CubeSolver>,
    solve_waiting: Option<mpsc::Receiver<eyre::Result<String>>>,
    resolver: Box<dyn ScrambleResolver>,

    /// Scramble most recently applied.
    scramble: Option<String>,
    /// Feedback shown in place of the scramble input.
    scramble_feedback: Option<&'static str>,
    back_sides_visible: bool,

    frame_sink: Box<dyn FrameSink>,
    /// Time of last frame, or `None` if the simulation was idle.
    last_frame_time: Option<Instant>,
}
impl CubeSimulation {
    /// Constructs a simulation of a solved cube.
    pub fn new(
        prefs: Preferences,
        resolver: impl ScrambleResolver + 'static,
        solver: impl CubeSolver + 'static,
    ) -> Self {
        let mut facelets = FaceletSet::build(&CubeState::solved());
        facelets.set_back_sides_visible(prefs.playback.show_back_sides);
        Self {
            facelets,
            scheduler: Scheduler::new(prefs.animation.twist_interpolation),
            autoplay_turn: false,

            session: PlaybackSession::new(prefs.animation.speed),
            solution: None,
            progress: 0.0,
            description: None,

            solver: Arc::new(solver),
            solve_waiting: None,
            resolver: Box::new(resolver),

            scramble: None,
            scramble_feedback: None,
            back_sides_visible: prefs.playback.show_back_sides,

            frame_sink: Box::new(IgnoreFrames),
            last_frame_time: None,

            prefs,
        }
    }

    /// Sets the receiver that is notified after every animation frame.
    pub fn set_frame_sink(&mut self, sink: impl FrameSink + 'static) {
        self.frame_sink = Box::new(sink);
    }

    /// Returns the live facelets.
    pub fn facelets(&self) -> &FaceletSet {
        &self.facelets
    }
    /// Reads the current cube state from the exact facelet positions. A turn
    /// in progress is not included.
    pub fn state(&self) -> Result<CubeState, LatticeError> {
        self.facelets.state()
    }
    /// Returns the preferences.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }
    /// Returns the playback session.
    pub fn session(&self) -> PlaybackSession {
        self.session
    }
    /// Returns the active solution, if any.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
    /// Returns the active solution with the next move marked.
    pub fn solution_text(&self) -> Option<String> {
        let solution = self.solution.as_ref()?;
        Some(solution.display_with_cursor(self.session.solution_index))
    }
    /// Returns the fraction of the solution that has been played.
    pub fn progress(&self) -> f64 {
        self.progress
    }
    /// Returns a description of the most recent solution move.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    /// Returns the scramble most recently applied.
    pub fn scramble(&self) -> Option<&str> {
        self.scramble.as_deref()
    }
    /// Returns feedback to show in place of the scramble input, such as
    /// [`INVALID_SCRAMBLE_INDICATOR`].
    pub fn scramble_feedback(&self) -> Option<&'static str> {
        self.scramble_feedback
    }
    /// Returns which user controls are enabled.
    pub fn controls(&self) -> Controls {
        Controls::new(&self.session, self.solution.as_ref(), self.solve_pending())
    }
    /// Returns whether a solve request is pending.
    pub fn solve_pending(&self) -> bool {
        self.solve_waiting.is_some()
    }
    /// Returns whether a turn is queued or in progress.
    pub fn is_turning(&self) -> bool {
        self.scheduler.has_turn()
    }
    /// Returns whether there is no pending work: no turn, no delay, no
    /// automatic playback, and no solve request.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle() && !self.session.is_playing && !self.solve_pending()
    }

    fn animation_prefs(&self) -> AnimationPreferences {
        AnimationPreferences {
            speed: self.session.speed,
            ..self.prefs.animation.clone()
        }
    }

    /// Sets the speed slider value, clamped to [`SPEED_RANGE`]. Affects turns
    /// that have not started yet.
    pub fn set_speed(&mut self, speed: u32) {
        let speed = speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
        self.session.speed = speed;
        self.prefs.animation.speed = speed;
    }
    /// Shows or hides the floating copies of the back faces.
    pub fn set_back_sides_visible(&mut self, visible: bool) {
        self.back_sides_visible = visible;
        self.facelets.set_back_sides_visible(visible);
    }

    /// Queues a turn after the configured lead-in.
    fn enqueue_turn(&mut self, mv: Move) -> Result<(), PlaybackError> {
        if self.scheduler.has_turn() {
            return Err(PlaybackError::Busy);
        }
        let lead_in = self.prefs.playback.turn_lead_in();
        if !lead_in.is_zero() {
            self.scheduler.push(Task::Wait(lead_in))?;
        }
        let steps = self.animation_prefs().steps_per_turn();
        self.scheduler.push(Task::Turn { mv, steps })
    }

    /// Turns a single move outside of solution playback.
    pub fn submit_move(&mut self, mv: Move) -> Result<(), ViewError> {
        if self.session.is_playing {
            log::warn!("ignoring {mv} while the solution is playing");
            return Err(PlaybackError::AutoPlaying.into());
        }
        self.enqueue_turn(mv)?;
        log::debug!("queued {mv}");
        Ok(())
    }

    /// Starts or resumes automatic playback of the solution.
    pub fn play(&mut self) -> Result<(), ViewError> {
        let solution = self.solution.as_ref().ok_or(PlaybackError::NoSolution)?;
        self.session = self.session.play(solution)?;
        log::info!("playing from move {}", self.session.solution_index + 1);
        Ok(())
    }
    /// Pauses automatic playback. The turn in progress, if any, still
    /// completes.
    pub fn pause(&mut self) {
        if self.session.is_playing {
            log::info!("pausing at move {}", self.session.solution_index + 1);
        }
        self.session = self.session.pause();
    }
    /// Plays if paused, or pauses if playing.
    pub fn toggle_play(&mut self) -> Result<(), ViewError> {
        match self.session.is_playing {
            true => {
                self.pause();
                Ok(())
            }
            false => self.play(),
        }
    }

    /// Turns the next move of the solution.
    pub fn step_forward(&mut self) -> Result<Transition, ViewError> {
        let solution = self.solution.as_ref().ok_or(PlaybackError::NoSolution)?;
        if self.scheduler.has_turn() {
            return Err(PlaybackError::Busy.into());
        }
        let transition = self.session.step_forward(solution)?;
        self.commit(&transition)?;
        Ok(transition)
    }
    /// Undoes the previous move of the solution by turning its inverse.
    pub fn step_backward(&mut self) -> Result<Transition, ViewError> {
        let solution = self.solution.as_ref().ok_or(PlaybackError::NoSolution)?;
        if self.scheduler.has_turn() {
            return Err(PlaybackError::Busy.into());
        }
        let transition = self.session.step_backward(solution)?;
        self.commit(&transition)?;
        Ok(transition)
    }

    /// Queues the move of a transition and adopts its session.
    fn commit(&mut self, transition: &Transition) -> Result<(), PlaybackError> {
        self.enqueue_turn(transition.mv)?;
        self.session = transition.session;
        self.progress = transition.progress;
        self.description = Some(transition.description.clone());
        log::info!(
            "{} ({:.0}%): {}",
            transition.mv,
            transition.progress * 100.0,
            transition.description,
        );
        if transition.finished {
            log::info!("solution complete");
            self.solution = None;
        }
        Ok(())
    }

    /// Requests a solution for the current cube state. The solver runs on a
    /// worker thread; its result is received by a later
    /// [`CubeSimulation::step()`].
    pub fn request_solve(&mut self) -> Result<(), ViewError> {
        if self.solve_pending() {
            return Err(PlaybackError::SolvePending.into());
        }
        if !self.scheduler.is_idle() {
            return Err(PlaybackError::Busy.into());
        }
        let state = self.facelets.state()?;
        let solver = Arc::clone(&self.solver);
        let (tx, rx) = mpsc::channel();
        self.solve_waiting = Some(rx);
        log::info!("requesting solution for {state}");
        std::thread::spawn(move || {
            // ignore channel error
            let _ = tx.send(solver.solve(&state));
        });
        Ok(())
    }
    /// Checks whether the solver has responded.
    fn poll_solve(&mut self) {
        let Some(rx) = &self.solve_waiting else {
            return;
        };
        match rx.try_recv() {
            Err(mpsc::TryRecvError::Empty) => (), // still waiting
            Err(mpsc::TryRecvError::Disconnected) => {
                log::error!("solver stopped without responding");
                self.solve_waiting = None;
            }
            Ok(Err(e)) => {
                log::error!("solver failed: {e}");
                self.solve_waiting = None;
            }
            Ok(Ok(text)) => {
                self.solve_waiting = None;
                self.recv_solution(&text);
            }
        }
    }
    fn recv_solution(&mut self, text: &str) {
        let solution = match Solution::parse(text) {
            Ok(solution) => solution,
            Err(e) => {
                log::error!("solver returned an invalid solution {text:?}: {e}");
                return;
            }
        };
        self.session = self.session.reset();
        self.progress = 0.0;
        self.description = None;
        if solution.is_empty() {
            log::info!("cube is already solved");
            self.solution = None;
        } else {
            log::info!("received {}-move solution: {solution}", solution.len());
            self.solution = Some(solution);
        }
    }

    /// Validates a scramble and rebuilds the cube in the state it produces.
    ///
    /// If the scramble is invalid, [`Self::scramble_feedback()`] becomes
    /// [`INVALID_SCRAMBLE_INDICATOR`] and the cube is left untouched. If the
    /// scramble resolver fails or returns a malformed state, the cube is also
    /// left untouched. On success the solution and playback are reset.
    pub fn apply_scramble(&mut self, text: &str) -> Result<(), ViewError> {
        if let Err(e) = parse_scramble(text) {
            log::warn!("rejected scramble {text:?}: {e}");
            self.scramble_feedback = Some(INVALID_SCRAMBLE_INDICATOR);
            return Err(e.into());
        }
        if self.scheduler.has_turn() {
            return Err(PlaybackError::Busy.into());
        }

        let state = self
            .resolver
            .state_from_scramble(text)
            .map_err(|error| ViewError::Collaborator {
                service: "scramble resolver",
                error,
            })?;
        self.facelets.rebuild(&state)?;
        self.facelets.set_back_sides_visible(self.back_sides_visible);

        self.scheduler.cancel_waits();
        self.solve_waiting = None;
        self.solution = None;
        self.session = self.session.reset();
        self.progress = 0.0;
        self.description = None;
        self.scramble = Some(text.trim().to_owned());
        self.scramble_feedback = None;
        log::info!("applied scramble {text:?}");
        Ok(())
    }

    /// Generates a random scramble using the configured length, applies it,
    /// and returns it.
    pub fn apply_random_scramble(&mut self, rng: &mut impl Rng) -> Result<String, ViewError> {
        if self.session.is_playing {
            return Err(PlaybackError::AutoPlaying.into());
        }
        let moves = random_scramble(rng, self.prefs.playback.scramble_length);
        let scramble = format_moves(&moves);
        self.apply_scramble(&scramble)?;
        Ok(scramble)
    }

    /// Advances the simulation by `delta`. Returns whether the facelets moved.
    pub fn step(&mut self, delta: Duration) -> bool {
        self.poll_solve();

        let animation_prefs = self.animation_prefs();
        self.scheduler
            .animation_mut()
            .set_interpolation(animation_prefs.twist_interpolation);
        let events = self.scheduler.tick(
            delta,
            animation_prefs.frame_duration(),
            &mut self.facelets,
            &mut *self.frame_sink,
        );
        let moved = events.iter().any(|e| {
            matches!(
                e,
                SchedulerEvent::TurnStarted(_) | SchedulerEvent::TurnSettled(_),
            )
        }) || self.scheduler.animation().is_running();
        self.handle_events(events);

        self.schedule_auto_move();

        moved
    }

    /// Advances the simulation by the time since the previous call, as
    /// measured by the system clock. Returns whether the facelets moved.
    pub fn step_realtime(&mut self) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => self.animation_prefs().frame_duration(),
        };
        let moved = self.step(delta);
        self.last_frame_time = (!self.is_idle()).then_some(now);
        moved
    }

    /// Completes all queued turns immediately, skipping their animations and
    /// any delays.
    pub fn skip_animations(&mut self) {
        let events = self
            .scheduler
            .flush(&mut self.facelets, &mut *self.frame_sink);
        self.handle_events(events);
    }

    fn handle_events(&mut self, events: Vec<SchedulerEvent>) {
        for event in events {
            match event {
                SchedulerEvent::TurnSettled(_) => {
                    if std::mem::take(&mut self.autoplay_turn) {
                        let divider = self.animation_prefs().divider();
                        let delay = self.prefs.playback.move_delay(divider);
                        if let Err(e) = self.scheduler.push(Task::Wait(delay)) {
                            log::error!("unable to schedule delay: {e}");
                        }
                    }
                }
                SchedulerEvent::TurnFailed(mv, _) => {
                    self.autoplay_turn = false;
                    if self.session.is_playing {
                        log::error!("pausing playback after failing to turn {mv}");
                    }
                    self.session = self.session.pause();
                }
                _ => (),
            }
        }
    }

    fn schedule_auto_move(&mut self) {
        if !self.session.is_playing || !self.scheduler.is_idle() {
            return;
        }
        let Some(solution) = &self.solution else {
            log::warn!("stopping playback with no solution");
            self.session = self.session.reset();
            return;
        };
        match self.session.next_auto_move(solution) {
            Ok(transition) => match self.commit(&transition) {
                Ok(()) => self.autoplay_turn = !transition.finished,
                Err(e) => {
                    log::error!("unable to play {}: {e}", transition.mv);
                    self.session = self.session.pause();
                }
            },
            Err(e) => {
                log::warn!("stopping playback: {e}");
                self.session = self.session.pause();
            }
        }
    }
}
