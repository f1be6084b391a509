//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    AllocateCommand, BlockCommand, CancelCommand, ConfirmCommand, InitCommand, ListCommand,
    UnblockCommand, ValidateCommand, WeatherCommand,
};

/// Command-line tool for allocating and managing parking spots.
#[derive(Parser)]
#[command(name = "parkade")]
#[command(version, about = "Allocate and manage parking spot reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PARKADE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the geometry directory location
    #[arg(long, value_name = "PATH", global = true, env = "PARKADE_GEOMETRY_DIR")]
    pub geometry: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "PARKADE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic store initialization
    #[arg(long, global = true, env = "PARKADE_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Allocate the best eligible spot for an arriving vehicle
    Allocate(AllocateCommand),

    /// Confirm a reservation (vehicle arrived)
    Confirm(ConfirmCommand),

    /// Cancel a reservation or release an occupied spot
    Cancel(CancelCommand),

    /// List all spots with their live state
    List(ListCommand),

    /// Show or set the weather flag
    Weather(WeatherCommand),

    /// Administratively withdraw a spot from allocation
    Block(BlockCommand),

    /// Return a blocked spot to service
    Unblock(UnblockCommand),

    /// Initialize the data directory and store schema
    Init(InitCommand),

    /// Load and integrity-check the geometry files
    Validate(ValidateCommand),
}
