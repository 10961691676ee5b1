//! tabnorm CLI.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tabnorm_cli::logging::init_logging;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command};
use crate::commands::{run_columns, run_normalize};
use crate::summary::print_summary;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();

    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match dispatch(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, "Command failed");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: &Command) -> Result<()> {
    match command {
        Command::Run(args) => {
            let result = run_normalize(args)?;
            print_summary(&result);
        }
        Command::Columns(args) => run_columns(args)?,
    }
    Ok(())
}
