//! End-to-end playback through [`CubeSimulation`].

use std::cell::Cell;
use std::rc::Rc;

use cubeview_core::{CubeState, FaceletSet, LatticePoint};
use cubeview_notation::parse;
use cubeview_prefs::Preferences;
use cubeview_view::*;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);
const SCRAMBLE: &str = "R U F";
const SOLUTION: &str = "F' U' R'";

fn simulation_with(prefs: Preferences, solution: &'static str) -> CubeSimulation {
    CubeSimulation::new(
        prefs,
        LocalStateResolver,
        move |_: &CubeState| -> eyre::Result<String> { Ok(solution.to_owned()) },
    )
}

fn simulation(solution: &'static str) -> CubeSimulation {
    simulation_with(Preferences::default(), solution)
}

/// Returns a simulation scrambled with [`SCRAMBLE`] and holding [`SOLUTION`].
fn solving_simulation() -> CubeSimulation {
    let mut sim = simulation(SOLUTION);
    sim.apply_scramble(SCRAMBLE).unwrap();
    sim.request_solve().unwrap();
    wait_for_solution(&mut sim);
    assert_eq!(sim.solution().map(|s| s.to_string()), Some(SOLUTION.to_owned()));
    sim
}

fn wait_for_solution(sim: &mut CubeSimulation) {
    for _ in 0..5000 {
        sim.step(Duration::ZERO);
        if !sim.solve_pending() {
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    panic!("solver did not respond");
}

fn run_until_idle(sim: &mut CubeSimulation) {
    for _ in 0..100_000 {
        if sim.is_idle() {
            return;
        }
        sim.step(FRAME);
    }
    panic!("simulation did not become idle");
}

fn lattice_snapshot(set: &FaceletSet) -> Vec<LatticePoint> {
    set.facelets().iter().map(|f| f.lattice()).collect()
}

fn state_after(scramble: &str) -> CubeState {
    LocalStateResolver
        .state_from_scramble(scramble)
        .unwrap()
        .parse()
        .unwrap()
}

#[test]
fn test_three_move_solution_reaches_terminal_state_once() {
    let mut sim = solving_simulation();
    assert!(!sim.controls().solve);
    assert_eq!(sim.solution_text().as_deref(), Some("[F'] U' R'"));

    let mut finished = vec![];
    for i in 0..3 {
        assert!(sim.controls().play_pause, "controls disabled before move {i}");
        assert!(sim.controls().step_forward);
        let transition = sim.step_forward().unwrap();
        finished.push(transition.finished);
        run_until_idle(&mut sim);
    }
    assert_eq!(finished, [false, false, true]);

    let controls = sim.controls();
    assert!(!controls.play_pause);
    assert!(!controls.step_forward);
    assert!(controls.solve);
    assert!(sim.solution().is_none());
    assert_eq!(sim.progress(), 1.0);
    assert_eq!(sim.description(), Some("Turn the right face 90 degrees anticlockwise"));
    assert_eq!(sim.session(), PlaybackSession::new(50));
    assert!(sim.state().unwrap().is_solved());

    assert!(matches!(
        sim.step_forward(),
        Err(ViewError::Playback(PlaybackError::NoSolution)),
    ));
}

#[test]
fn test_step_back_then_forward_reproduces_state() {
    let mut sim = solving_simulation();

    sim.step_forward().unwrap();
    run_until_idle(&mut sim);
    let after_one = lattice_snapshot(sim.facelets());
    sim.step_forward().unwrap();
    run_until_idle(&mut sim);
    let after_two = lattice_snapshot(sim.facelets());
    assert_eq!(sim.state().unwrap(), state_after("R U F F' U'"));
    assert_eq!(sim.solution_text().as_deref(), Some("F' U' [R']"));

    let back = sim.step_backward().unwrap();
    assert_eq!(back.mv, parse("U").unwrap());
    run_until_idle(&mut sim);
    assert_eq!(lattice_snapshot(sim.facelets()), after_one);
    assert_eq!(sim.session().solution_index, 1);

    sim.step_forward().unwrap();
    run_until_idle(&mut sim);
    assert_eq!(lattice_snapshot(sim.facelets()), after_two);
    assert_eq!(sim.session().solution_index, 2);
    assert_eq!(sim.progress(), 2.0 / 3.0);
}

#[test]
fn test_step_backward_at_start_is_rejected() {
    let mut sim = solving_simulation();
    let before = lattice_snapshot(sim.facelets());
    assert!(matches!(
        sim.step_backward(),
        Err(ViewError::Playback(PlaybackError::AtStart)),
    ));
    assert!(!sim.is_turning());
    assert_eq!(sim.session().solution_index, 0);
    run_until_idle(&mut sim);
    assert_eq!(lattice_snapshot(sim.facelets()), before);
}

#[test]
fn test_autoplay_solves_cube() {
    let mut sim = solving_simulation();
    sim.play().unwrap();
    assert!(!sim.controls().moves);
    assert!(!sim.controls().random_scramble);
    assert!(matches!(
        sim.step_forward(),
        Err(ViewError::Playback(PlaybackError::AutoPlaying)),
    ));

    run_until_idle(&mut sim);
    assert!(sim.state().unwrap().is_solved());
    assert!(sim.solution().is_none());
    assert!(!sim.session().is_playing);
    assert!(sim.controls().solve);
}

#[test]
fn test_pause_lets_turn_in_progress_finish() {
    let mut sim = solving_simulation();
    sim.play().unwrap();
    for _ in 0..5 {
        sim.step(FRAME);
    }
    assert!(sim.is_turning());
    sim.pause();
    assert_eq!(sim.session().state, PlaybackState::Paused);

    run_until_idle(&mut sim);
    for _ in 0..500 {
        sim.step(FRAME);
    }
    assert_eq!(sim.state().unwrap(), state_after("R U F F'"));
    assert_eq!(sim.session().solution_index, 1);
    assert!(sim.controls().play_pause);

    sim.play().unwrap();
    run_until_idle(&mut sim);
    assert!(sim.state().unwrap().is_solved());
}

#[test]
fn test_moves_are_serialized() {
    let mut sim = simulation("");
    sim.submit_move(parse("R").unwrap()).unwrap();
    assert!(matches!(
        sim.submit_move(parse("U").unwrap()),
        Err(ViewError::Playback(PlaybackError::Busy)),
    ));
    run_until_idle(&mut sim);
    assert_eq!(sim.state().unwrap(), state_after("R"));

    sim.submit_move(parse("U").unwrap()).unwrap();
    run_until_idle(&mut sim);
    assert_eq!(sim.state().unwrap(), state_after("R U"));
}

#[test]
fn test_invalid_scramble_leaves_cube_untouched() {
    let mut sim = simulation("");
    sim.apply_scramble("R U").unwrap();
    let before = lattice_snapshot(sim.facelets());

    assert!(matches!(
        sim.apply_scramble("R Q"),
        Err(ViewError::InvalidScramble(_)),
    ));
    assert_eq!(sim.scramble_feedback(), Some(INVALID_SCRAMBLE_INDICATOR));
    assert_eq!(sim.scramble(), Some("R U"));
    assert_eq!(lattice_snapshot(sim.facelets()), before);

    sim.apply_scramble("  ").unwrap();
    assert_eq!(sim.scramble_feedback(), None);
    assert!(sim.state().unwrap().is_solved());
}

#[test]
fn test_malformed_state_keeps_previous_cube() {
    let mut sim = CubeSimulation::new(
        Preferences::default(),
        |_: &str| -> eyre::Result<String> { Ok("wwwwwwwwwxyz".to_owned()) },
        |_: &CubeState| -> eyre::Result<String> { Ok(String::new()) },
    );
    sim.submit_move(parse("F").unwrap()).unwrap();
    run_until_idle(&mut sim);
    let before = lattice_snapshot(sim.facelets());

    assert!(matches!(
        sim.apply_scramble("R"),
        Err(ViewError::MalformedState(_)),
    ));
    assert_eq!(lattice_snapshot(sim.facelets()), before);
    assert_eq!(sim.facelets().len(), 54);
}

#[test]
fn test_failing_solver_is_absorbed() {
    let mut sim = CubeSimulation::new(
        Preferences::default(),
        LocalStateResolver,
        |_: &CubeState| -> eyre::Result<String> { Err(eyre::eyre!("service unavailable")) },
    );
    sim.apply_scramble("R").unwrap();
    sim.request_solve().unwrap();
    assert!(!sim.controls().solve);
    assert!(matches!(
        sim.request_solve(),
        Err(ViewError::Playback(PlaybackError::SolvePending)),
    ));
    wait_for_solution(&mut sim);
    assert!(sim.solution().is_none());
    assert!(sim.controls().solve);
}

#[test]
fn test_solved_cube_has_no_solution() {
    let mut sim = simulation("");
    sim.request_solve().unwrap();
    wait_for_solution(&mut sim);
    assert!(sim.solution().is_none());
    assert!(matches!(
        sim.play(),
        Err(ViewError::Playback(PlaybackError::NoSolution)),
    ));
}

#[test]
fn test_random_scramble_is_reproducible() {
    let mut a = simulation("");
    let mut b = simulation("");
    let scramble_a = a
        .apply_random_scramble(&mut ChaCha12Rng::seed_from_u64(7))
        .unwrap();
    let scramble_b = b
        .apply_random_scramble(&mut ChaCha12Rng::seed_from_u64(7))
        .unwrap();
    assert_eq!(scramble_a, scramble_b);
    assert_eq!(scramble_a.split_whitespace().count(), 20);
    assert_eq!(a.state().unwrap(), b.state().unwrap());
    assert_eq!(a.state().unwrap(), state_after(&scramble_a));
}

#[test]
fn test_frame_sink_sees_every_step() {
    let frames = Rc::new(Cell::new(0));
    let mut sim = simulation("");
    let counter = Rc::clone(&frames);
    sim.set_frame_sink(move |_: &FaceletSet| counter.set(counter.get() + 1));

    sim.submit_move(parse("M2").unwrap()).unwrap();
    run_until_idle(&mut sim);
    assert_eq!(frames.get(), sim.prefs().animation.steps_per_turn());

    sim.set_speed(99);
    sim.submit_move(parse("M2").unwrap()).unwrap();
    assert!(sim.step(FRAME));
    assert!(!sim.is_turning());
    assert_eq!(frames.get(), 26);
    assert!(sim.state().unwrap().is_solved());
}

#[test]
fn test_turn_lead_in_delays_animation() {
    let mut prefs = Preferences::default();
    prefs.playback.turn_lead_in_ms = 100;
    let mut sim = simulation_with(prefs, "");
    sim.submit_move(parse("X").unwrap()).unwrap();
    for _ in 0..6 {
        assert!(!sim.step(FRAME));
    }
    assert!(sim.step(FRAME));
    run_until_idle(&mut sim);
    assert_eq!(sim.state().unwrap(), state_after("X"));
}

#[test]
fn test_back_sides_toggle_survives_rebuild() {
    let mut sim = simulation("");
    sim.set_back_sides_visible(true);
    sim.apply_scramble("R U").unwrap();
    assert!(sim.facelets().decorations().iter().all(|d| d.visible));
    sim.set_back_sides_visible(false);
    assert!(sim.facelets().decorations().iter().any(|d| !d.visible));
}

/// Plays the first solution move and pauses while it is turning, then runs
/// until that move settles.
fn pause_during_first_move(sim: &mut CubeSimulation) {
    sim.play().unwrap();
    for _ in 0..5 {
        sim.step(FRAME);
    }
    assert!(sim.is_turning());
    sim.pause();
    while sim.is_turning() {
        sim.step(FRAME);
    }
    assert_eq!(sim.session().solution_index, 1);
    // the delay after an automatic move survives the pause
    assert!(!sim.is_idle());
}

#[test]
fn test_resume_waits_for_move_delay() {
    let mut sim = solving_simulation();
    let delay = sim.prefs().move_delay();
    pause_during_first_move(&mut sim);

    sim.play().unwrap();
    let ms = Duration::from_millis(1);
    let mut elapsed = Duration::ZERO;
    while !sim.is_turning() {
        sim.step(ms);
        elapsed += ms;
        assert!(elapsed <= delay, "second move did not start after {elapsed:?}");
    }
    assert!(elapsed + FRAME >= delay, "second move started after {elapsed:?}");
    assert_eq!(sim.session().solution_index, 2);

    run_until_idle(&mut sim);
    assert!(sim.state().unwrap().is_solved());
}

#[test]
fn test_manual_step_while_paused_follows_move_delay() {
    let mut sim = solving_simulation();
    let delay = sim.prefs().move_delay();
    pause_during_first_move(&mut sim);

    let frames = Rc::new(Cell::new(0));
    let counter = Rc::clone(&frames);
    sim.set_frame_sink(move |_: &FaceletSet| counter.set(counter.get() + 1));

    let transition = sim.step_forward().unwrap();
    assert_eq!(transition.mv, parse("U'").unwrap());
    assert_eq!(transition.session.state, PlaybackState::ManualStep);
    assert_eq!(sim.session().solution_index, 2);
    assert_eq!(sim.progress(), 2.0 / 3.0);

    let ms = Duration::from_millis(1);
    let mut elapsed = Duration::ZERO;
    while frames.get() == 0 {
        sim.step(ms);
        elapsed += ms;
        assert!(elapsed <= delay + FRAME, "manual step did not start");
    }
    assert!(elapsed >= delay, "manual step started after {elapsed:?}");

    run_until_idle(&mut sim);
    assert_eq!(sim.state().unwrap(), state_after("R U F F' U'"));
    assert_eq!(sim.session().state, PlaybackState::ManualStep);
}

#[test]
fn test_toggle_play() {
    let mut sim = simulation("");
    assert!(matches!(
        sim.toggle_play(),
        Err(ViewError::Playback(PlaybackError::NoSolution)),
    ));

    let mut sim = solving_simulation();
    sim.toggle_play().unwrap();
    assert_eq!(sim.session().state, PlaybackState::AutoPlaying);
    assert!(sim.session().is_playing);
    sim.toggle_play().unwrap();
    assert_eq!(sim.session().state, PlaybackState::Paused);
    assert!(!sim.session().is_playing);
    sim.toggle_play().unwrap();
    assert_eq!(sim.session().state, PlaybackState::AutoPlaying);

    run_until_idle(&mut sim);
    assert!(sim.state().unwrap().is_solved());
}

#[test]
fn test_skip_animations_settles_turn_in_progress() {
    let mut sim = simulation("");
    sim.submit_move(parse("R").unwrap()).unwrap();
    for _ in 0..3 {
        assert!(sim.step(FRAME));
    }
    assert!(sim.is_turning());

    sim.skip_animations();
    assert!(!sim.is_turning());
    assert!(sim.is_idle());
    assert_eq!(sim.state().unwrap(), state_after("R"));
    for f in sim.facelets().facelets() {
        assert_eq!(f.position(), f.lattice().to_world());
    }
}

#[test]
fn test_skip_animations_keeps_autoplay_going() {
    let mut sim = solving_simulation();
    sim.play().unwrap();
    sim.step(FRAME);
    assert!(sim.is_turning());

    sim.skip_animations();
    assert!(!sim.is_turning());
    assert!(sim.session().is_playing);
    assert_eq!(sim.state().unwrap(), state_after("R U F F'"));
    // the delay after the move is queued but not yet elapsed
    sim.step(Duration::ZERO);
    assert!(!sim.is_turning());

    // skipping again also skips the delay
    sim.skip_animations();
    sim.step(Duration::ZERO);
    assert!(sim.is_turning());
    assert_eq!(sim.session().solution_index, 2);

    run_until_idle(&mut sim);
    assert!(sim.state().unwrap().is_solved());
}

#[test]
fn test_step_realtime() {
    let frames = Rc::new(Cell::new(0));
    let mut sim = simulation("");
    let counter = Rc::clone(&frames);
    sim.set_frame_sink(move |_: &FaceletSet| counter.set(counter.get() + 1));

    sim.submit_move(parse("U").unwrap()).unwrap();
    assert!(sim.step_realtime());
    assert_eq!(frames.get(), 1);
    for _ in 0..10_000 {
        if sim.is_idle() {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
        sim.step_realtime();
    }
    assert!(sim.is_idle());
    assert!(!sim.step_realtime());
    assert_eq!(sim.state().unwrap(), state_after("U"));

    // an idle simulation measures its next frame from scratch
    std::thread::sleep(std::time::Duration::from_millis(50));
    frames.set(0);
    sim.submit_move(parse("U'").unwrap()).unwrap();
    assert!(sim.step_realtime());
    assert_eq!(frames.get(), 1);
}
