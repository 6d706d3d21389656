// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Webhook receiving endpoint.
//!
//! Validates the raw request body, dispatches it to the mappers and
//! reports the outcome. The remote platform treats webhooks as
//! fire-and-forget, so the transport layer always answers success;
//! rejections are recorded in the `logs` table and dropped.

use serde_json::json;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::db::Database;
use crate::entity::EntityKind;
use crate::protocol::WebhookPayload;
use crate::webhook::Dispatcher;

/// Error type for payload validation, raised before any mapper runs.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("malformed webhook payload: {0}")]
    Malformed(String),
}

/// Outcome of receiving one webhook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reception {
    /// A mapper applied the change to a local row.
    Applied { entity: EntityKind },
    /// No mapper is registered for the payload's entity type.
    Ignored,
    /// The payload was malformed or a mapper rejected it.
    Rejected { reason: String },
}

/// Parse and validate a raw webhook body.
pub fn parse(raw: &str) -> Result<WebhookPayload, EndpointError> {
    let payload: WebhookPayload =
        serde_json::from_str(raw).map_err(|e| EndpointError::Malformed(e.to_string()))?;
    if payload.entity.is_empty() {
        return Err(EndpointError::Malformed(
            "'entity' must not be empty".to_string(),
        ));
    }
    if !payload.data.is_object() {
        return Err(EndpointError::Malformed(
            "'data' must be an object".to_string(),
        ));
    }
    Ok(payload)
}

/// Receive one webhook body to completion.
///
/// Never fails from the caller's point of view: every outcome, including
/// malformed payloads and mapper rejections, is folded into [`Reception`].
pub fn receive(db: &Database, settings: &Settings, raw: &str) -> Reception {
    let payload = match parse(raw) {
        Ok(payload) => payload,
        Err(e) => return reject(db, "webhook payload rejected", e.to_string()),
    };

    match Dispatcher::new().dispatch(db, settings, &payload) {
        Ok(Some(entity)) => {
            debug!(entity = entity.name(), "webhook applied");
            Reception::Applied { entity }
        }
        Ok(None) => {
            debug!(entity = %payload.entity, "no mapper registered, payload ignored");
            Reception::Ignored
        }
        Err(e) => reject(db, "webhook rejected by mapper", e.to_string()),
    }
}

fn reject(db: &Database, message: &str, reason: String) -> Reception {
    warn!(%reason, "{message}");
    let _ = db.log(message, &json!({ "reason": reason }));
    Reception::Rejected { reason }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
