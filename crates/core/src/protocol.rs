// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types shared with the remote platform.
//!
//! Inbound: the webhook payload shape posted by TrackMage on remote entity
//! changes. Outbound: helpers for the hydra-style envelopes the REST API
//! wraps around collection responses (`hydra:member`) and error bodies
//! (`hydra:description`).

use serde::Deserialize;
use serde_json::Value;

/// An inbound webhook payload describing a remote entity change.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Remote collection name ("orders", "shipments", ...).
    pub entity: String,
    /// Change kind as reported by the platform ("update", "create", ...).
    #[serde(default)]
    pub event: Option<String>,
    /// Remote field names that changed. Fields absent from this list are
    /// never written locally, whatever `data` carries.
    #[serde(default)]
    pub updated_fields: Vec<String>,
    /// Full remote field values, including `id`, `workspace`,
    /// `externalSource` and `externalSyncId`.
    pub data: Value,
}

impl WebhookPayload {
    /// The remote entity id carried in `data`.
    pub fn remote_id(&self) -> Option<&str> {
        self.data.get("id").and_then(Value::as_str)
    }

    /// The `externalSource` tag carried in `data`.
    pub fn external_source(&self) -> Option<&str> {
        self.data.get("externalSource").and_then(Value::as_str)
    }

    /// The local id this remote record claims to mirror, if any.
    ///
    /// The platform echoes `externalSyncId` back as either a number or a
    /// string; both are accepted.
    pub fn external_sync_id(&self) -> Option<i64> {
        match self.data.get("externalSyncId") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        }
    }

    /// A field value from `data` by its remote name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

/// Ids of the records in a `hydra:member` collection envelope.
pub fn member_ids(body: &Value) -> Vec<String> {
    body.get("hydra:member")
        .and_then(Value::as_array)
        .map(|members| {
            members
                .iter()
                .filter_map(|m| m.get("id").and_then(Value::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Id of the first record in a `hydra:member` collection envelope.
pub fn first_member_id(body: &Value) -> Option<String> {
    member_ids(body).into_iter().next()
}

/// The `hydra:description` of an error body, if present.
pub fn error_description(body: &Value) -> Option<&str> {
    body.get("hydra:description").and_then(Value::as_str)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
