mod cli;
mod platform;

use std::process::ExitCode;

use clap::Parser;
use fetchdeck_logging::deck_error;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    platform::logging::initialize(cli.log.into(), cli.log_level);

    match platform::run_app(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            deck_error!("fetchdeck failed: {}", err);
            eprintln!("fetchdeck: {err}");
            ExitCode::FAILURE
        }
    }
}
