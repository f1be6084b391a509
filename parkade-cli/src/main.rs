//! Main entry point for the parkade CLI.
//!
//! This is the command-line interface for the parkade spot allocation
//! system. It provides commands for operating the engine and lifecycle:
//! - `allocate`: reserve the best eligible spot for an arriving vehicle
//! - `confirm` / `cancel`: drive the reservation lifecycle
//! - `list`: show every spot's live state
//! - `weather`: read or set the rain flag
//! - `block` / `unblock`: administrative spot withdrawal

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let logger = parkade::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        geometry: cli.geometry,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Allocate(cmd) => cmd.execute(&global, &logger),
        cli::Command::Confirm(cmd) => cmd.execute(&global, &logger),
        cli::Command::Cancel(cmd) => cmd.execute(&global, &logger),
        cli::Command::List(cmd) => cmd.execute(&global, &logger),
        cli::Command::Weather(cmd) => cmd.execute(&global, &logger),
        cli::Command::Block(cmd) => cmd.execute(&global, &logger),
        cli::Command::Unblock(cmd) => cmd.execute(&global, &logger),
        cli::Command::Init(cmd) => cmd.execute(&global, &logger),
        cli::Command::Validate(cmd) => cmd.execute(&global, &logger),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
