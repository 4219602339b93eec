//! audio-deid CLI
//!
//! Command-line interface for beeping out ranges of a WAV recording.

use clap::Parser;
use env_logger::Env;
use log::error;

use audio_deid::cli::{commands, Cli};
use audio_deid::DeidError;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let result = commands::run(&cli);

    if let Err(err) = &result {
        if let Some(hint) = err
            .downcast_ref::<DeidError>()
            .and_then(DeidError::recovery_suggestion)
        {
            error!("{}", hint);
        }
    }

    result
}
