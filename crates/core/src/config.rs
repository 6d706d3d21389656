// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Installation settings.
//!
//! Settings are stored in `trackmage.toml` and constructed once at startup;
//! every component receives them by reference (no global lookups). They
//! include:
//! - `workspace_id`: the TrackMage workspace this installation is bound to
//! - `client_id` / `client_secret`: API credential pair
//! - `external_source`: identifier tagging remote records created here
//! - trigger-status sets: which shop statuses permit synchronization

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Default settings file name.
pub const CONFIG_FILE_NAME: &str = "trackmage.toml";

/// Installation settings loaded from `trackmage.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// TrackMage workspace id scoping all remote entities.
    pub workspace_id: String,
    /// API credential pair.
    pub client_id: String,
    pub client_secret: String,
    /// Identifier tagging remote records created by this installation.
    /// Inbound webhooks are rejected unless their `externalSource` matches.
    pub external_source: String,
    /// Base URL of the TrackMage REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Global kill switch; when false every sync call is a silent no-op.
    #[serde(default = "default_sync_enabled")]
    pub sync_enabled: bool,
    /// Order statuses that trigger synchronization (orders and their items).
    /// An empty set means no order ever syncs.
    #[serde(default)]
    pub order_statuses: Vec<String>,
    /// Shipment statuses that trigger synchronization (shipments and their items).
    #[serde(default)]
    pub shipment_statuses: Vec<String>,
}

fn default_api_base() -> String {
    "https://api.trackmage.com".to_string()
}

fn default_sync_enabled() -> bool {
    true
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Write settings to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Whether an order with the given shop status should sync.
    pub fn triggers_order(&self, status: &str) -> bool {
        self.order_statuses.iter().any(|s| s == status)
    }

    /// Whether a shipment with the given status should sync.
    pub fn triggers_shipment(&self, status: &str) -> bool {
        self.shipment_statuses.iter().any(|s| s == status)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
