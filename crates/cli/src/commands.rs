// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command implementations.

use std::fs;
use std::path::Path;

use tm_core::endpoint::{self, Reception};
use tm_core::sync::{ChangeEvent, Orchestrator};
use tm_core::{Database, EntityKind, HttpApiClient, Settings};

use crate::error::{CliError, CliResult};

/// Settings template written by `init`.
const CONFIG_TEMPLATE: &str = r#"# TrackMage synchronization settings.
# Fill in the workspace and the API credential pair from your TrackMage
# account before running `tmsync sync`.

workspace_id = ""
client_id = ""
client_secret = ""

# Identifier tagging remote records created by this installation.
# Inbound webhooks are rejected unless their externalSource matches.
external_source = ""

# api_base = "https://api.trackmage.com"
# sync_enabled = true

# Shop statuses that trigger synchronization.
order_statuses = ["completed"]
shipment_statuses = ["shipped"]
"#;

/// Create a settings template and an empty, migrated database.
pub fn init(config: &Path, db: &Path) -> CliResult<()> {
    if config.exists() {
        return Err(CliError::Usage(format!(
            "refusing to overwrite existing {}",
            config.display()
        )));
    }

    fs::write(config, CONFIG_TEMPLATE)?;
    Database::open(db)?;

    println!("created {}", config.display());
    println!("created {}", db.display());
    Ok(())
}

/// Push one entity (and its dependents) to TrackMage.
pub fn sync(config: &Path, db: &Path, kind: EntityKind, id: i64) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let db = Database::open(db)?;
    let api = HttpApiClient::new(&settings)?;
    let orchestrator = Orchestrator::new(&api, &db, &settings);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(orchestrator.handle(&ChangeEvent::new(kind, id)))?;

    println!("synced {} {}", kind.name(), id);
    Ok(())
}

/// Replay a webhook payload from a file through the receiving endpoint.
pub fn webhook(config: &Path, db: &Path, file: &Path) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let db = Database::open(db)?;
    let raw = fs::read_to_string(file)?;

    // Mirrors the live endpoint: rejections are reported, never fatal.
    match endpoint::receive(&db, &settings, &raw) {
        Reception::Applied { entity } => println!("applied: {}", entity.name()),
        Reception::Ignored => println!("ignored: no mapper registered"),
        Reception::Rejected { reason } => println!("rejected: {reason}"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
