use std::path::PathBuf;

use cubeview_core::CubeState;
use cubeview_notation::{Move, format_moves, parse_scramble, random_scramble};
use cubeview_prefs::Preferences;
use cubeview_view::{CubeSimulation, LocalStateResolver, ScrambleResolver, Solution};
use eyre::{Context, Result, bail, eyre};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Headless 3x3x3 cube simulator
///
/// Logging is controlled by the `RUST_LOG` environment variable.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to layer over the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Check that a scramble is well-formed.
    Validate {
        /// Space-separated move tokens (such as `R U2 F'`).
        scramble: String,
    },
    /// Print the 54-character state of a solved cube after a scramble.
    State {
        /// Space-separated move tokens.
        scramble: String,
    },
    /// Print a 54-character state as an unfolded net.
    Net {
        /// State string with one color code per facelet.
        state: String,
    },
    /// Print a random scramble.
    Random {
        /// Seed for a reproducible scramble.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Number of moves. Defaults to the preferred scramble length.
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Scramble a cube and animate a solution without a display.
    Play {
        /// Space-separated move tokens.
        #[arg(short, long)]
        scramble: String,
        /// Solution to play. Defaults to the inverse of the scramble.
        #[arg(short = 'm', long)]
        solution: Option<String>,
        /// Animation speed from 1 to 99.
        #[arg(long)]
        speed: Option<u32>,
    },
}

pub(crate) fn exec(subcommand: Subcommand, prefs: Preferences) -> Result<()> {
    match subcommand {
        Subcommand::Validate { scramble } => {
            let moves = parse_scramble(&scramble)?;
            println!("{} valid moves", moves.len());
            Ok(())
        }

        Subcommand::State { scramble } => {
            println!("{}", LocalStateResolver.state_from_scramble(&scramble)?);
            Ok(())
        }

        Subcommand::Net { state } => {
            let state: CubeState = state.parse()?;
            print!("{}", state.net());
            Ok(())
        }

        Subcommand::Random { seed, length } => {
            let length = length.unwrap_or(prefs.playback.scramble_length);
            let moves = match seed {
                Some(seed) => random_scramble(&mut ChaCha12Rng::seed_from_u64(seed), length),
                None => random_scramble(&mut rand::rng(), length),
            };
            println!("{}", format_moves(&moves));
            Ok(())
        }

        Subcommand::Play {
            scramble,
            solution,
            speed,
        } => play(prefs, &scramble, solution, speed),
    }
}

/// Returns the moves that undo `moves`.
pub(crate) fn inverted(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

fn play(
    prefs: Preferences,
    scramble: &str,
    solution: Option<String>,
    speed: Option<u32>,
) -> Result<()> {
    let solution = match solution {
        Some(text) => Solution::parse(&text).wrap_err("bad solution")?,
        None => Solution::from(inverted(&parse_scramble(scramble)?)),
    };
    let frame = prefs.animation.frame_duration();

    let solution_text = solution.to_string();
    let mut sim = CubeSimulation::new(prefs, LocalStateResolver, move |_: &CubeState| {
        eyre::Ok(solution_text.clone())
    });
    if let Some(speed) = speed {
        sim.set_speed(speed);
    }
    sim.apply_scramble(scramble)?;
    println!("scrambled: {}", sim.state()?);

    sim.request_solve()?;
    while sim.solve_pending() {
        sim.step(frame);
        std::thread::yield_now();
    }
    if sim.solution().is_none() {
        if solution.is_empty() {
            println!("nothing to play");
            return Ok(());
        }
        bail!("solver did not produce a solution");
    }

    loop {
        let Some(cursor) = sim.solution_text() else {
            break;
        };
        log::debug!("playing {cursor}");
        let transition = sim.step_forward()?;
        run_until_idle(&mut sim, frame)?;
        println!(
            "{:>3.0}%  {:<3} {}",
            transition.progress * 100.0,
            transition.mv.to_string(),
            transition.description,
        );
        if transition.finished {
            break;
        }
    }

    let state = sim.state()?;
    println!("final: {state}");
    print!("{}", state.net());
    if !state.is_solved() {
        log::warn!("solution does not solve the cube");
    }
    Ok(())
}

fn run_until_idle(sim: &mut CubeSimulation, frame: std::time::Duration) -> Result<()> {
    const MAX_FRAMES: usize = 1_000_000;
    for _ in 0..MAX_FRAMES {
        if sim.is_idle() {
            return Ok(());
        }
        sim.step(frame);
    }
    Err(eyre!("playback did not settle"))
}
