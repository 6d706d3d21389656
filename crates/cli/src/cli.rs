// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line definition for `tmsync`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use tm_core::EntityKind;

/// TrackMage order & shipment synchronization.
#[derive(Parser, Debug)]
#[command(name = "tmsync")]
#[command(about = "Synchronize shop orders and shipments with TrackMage")]
#[command(version)]
pub struct Cli {
    /// Path to the settings file.
    #[arg(long, global = true, default_value = "trackmage.toml")]
    pub config: PathBuf,

    /// Path to the local shop database.
    #[arg(long, global = true, default_value = "trackmage.db")]
    pub db: PathBuf,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a settings file template and an empty database.
    Init,
    /// Push one entity (and its dependents) to TrackMage.
    Sync {
        /// Entity type to sync.
        #[arg(value_enum)]
        entity: EntityArg,
        /// Local id of the entity.
        id: i64,
    },
    /// Replay a webhook payload from a JSON file.
    Webhook {
        /// File containing the raw payload body.
        file: PathBuf,
    },
}

/// Entity type argument.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityArg {
    Order,
    OrderItem,
    Shipment,
    ShipmentItem,
}

impl From<EntityArg> for EntityKind {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Order => EntityKind::Order,
            EntityArg::OrderItem => EntityKind::OrderItem,
            EntityArg::Shipment => EntityKind::Shipment,
            EntityArg::ShipmentItem => EntityKind::ShipmentItem,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
