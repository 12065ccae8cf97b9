use std::process::ExitCode;

use clap::Parser;

use piar::cli::Cli;
use piar::color::{self, ColorMode};
use piar::commands;
use piar::error::PiarError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Resolve color mode from CLI flag and environment variables
    let color_mode = ColorMode::resolve(cli.color);

    match commands::open::cmd_open(color_mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err.downcast_ref::<PiarError>(), Some(PiarError::Cancelled)) {
                eprintln!("{}", color::warn(color_mode, &err));
            } else {
                eprintln!("{}", color::report(color_mode, &err));
            }
            ExitCode::FAILURE
        }
    }
}
