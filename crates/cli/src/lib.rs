// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tmsync: operator CLI for the TrackMage synchronization engine.
//!
//! Scaffolds an installation (`init`), pushes entities on demand (`sync`)
//! and replays webhook payloads from files (`webhook`).

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command};
pub use error::{CliError, CliResult};

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Init => commands::init(&cli.config, &cli.db),
        Command::Sync { entity, id } => commands::sync(&cli.config, &cli.db, entity.into(), id),
        Command::Webhook { ref file } => commands::webhook(&cli.config, &cli.db, file),
    }
}
