// filmstrip-cli/src/main.rs
//
// Entry point for the filmstrip CLI: parses arguments, sets up logging and
// dispatches to the command implementations. Errors from the core library
// are printed once and mapped to a non-zero exit code.

use clap::Parser;
use log::error;
use std::process;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Render(args) => commands::render::execute_render(args),
        Commands::Formats => commands::formats::execute_formats(),
        Commands::Check => commands::check::execute_check(),
    };

    if let Err(err) = result {
        error!("{err}");
        process::exit(1);
    }
}
