//! Play the NEXUS preloader in a window, or render a snapshot of it.
//!
//! ```text
//! nexus-preloader [config.json] [--reduced-motion] [--prefs prefs.json] [--snapshot out.png]
//! ```

use clap::Parser;
use nexus_particles::{run, snapshot, Config, RunError, StoredPreferences};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "nexus-preloader", version, about = "Play the NEXUS preloader or render a snapshot of it")]
struct Args {
    /// JSON config file; defaults are used when omitted
    config: Option<PathBuf>,

    /// Start with reduced motion, as if the OS asked for it
    #[arg(long)]
    reduced_motion: bool,

    /// File holding remembered accessibility preferences
    #[arg(long, value_name = "FILE")]
    prefs: Option<PathBuf>,

    /// Render the last hold frame to this PNG instead of opening a window
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: &Args) -> Result<(), RunError> {
    let config = load_config(args)?;

    let mut stored = match &args.prefs {
        Some(path) => StoredPreferences::load(path).unwrap_or_else(|e| {
            log::warn!("ignoring preferences in {:?}: {}", path, e);
            StoredPreferences::default()
        }),
        None => StoredPreferences::default(),
    };
    // the flag stands in for the OS setting; a stored choice still wins
    let prefs = stored.resolve(args.reduced_motion);

    if let Some(out) = &args.snapshot {
        return snapshot(&config, prefs, out);
    }

    let final_prefs = run(config, prefs)?;
    if let (Some(path), true) = (&args.prefs, final_prefs != prefs) {
        stored.remember(final_prefs);
        if let Err(e) = stored.save(path) {
            log::warn!("could not save preferences to {:?}: {}", path, e);
        }
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<Config, RunError> {
    match &args.config {
        Some(path) => {
            log::debug!("loading config from {:?}", path);
            Ok(Config::load(path)?)
        }
        None => Ok(Config::default()),
    }
}
