//! Command-line front end for the Cubeview 3x3x3 cube simulator.

mod cli;


fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();
    color_eyre::install()?;

    let prefs = cubeview_prefs::Preferences::load(args.prefs.as_deref());
    cli::exec(args.subcommand, prefs)
}
