mod cli;

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use cli::types::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli::dispatch::dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
