// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound webhook mappers and dispatcher.
//!
//! A [`Mapper`] decides whether a remote entity change applies to this
//! installation and which local columns to write back. Mappers are
//! data-driven: one type parameterized by entity kind, reading the static
//! field-translation table. There is no per-entity subclassing.
//!
//! Rejections ([`WebhookError::SourceMismatch`], [`WebhookError::EntityNotFound`])
//! are expected outcomes, not faults: remote records created by other
//! integrations or never mirrored locally simply do not match.

use crate::config::Settings;
use crate::db::Database;
use crate::entity::EntityKind;
use crate::error::Error;
use crate::fields::{self, json_to_sql};
use crate::protocol::WebhookPayload;
use crate::repository::{integer, row_i64, text, Repository};

/// Error type for webhook mapping.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The payload's `externalSource` does not match this installation.
    #[error("unable to handle because external source does not match")]
    SourceMismatch,

    /// No local row mirrors the remote record.
    #[error("unable to handle because entity was not found")]
    EntityNotFound,

    /// Local storage failed while applying the change.
    #[error(transparent)]
    Store(#[from] Error),
}

/// Applies remote changes of one entity kind to local rows.
pub struct Mapper {
    kind: EntityKind,
}

impl Mapper {
    pub fn new(kind: EntityKind) -> Self {
        Mapper { kind }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Pure predicate: does this mapper handle the payload's entity type?
    pub fn supports(&self, payload: &WebhookPayload) -> bool {
        payload.entity == self.kind.collection()
    }

    /// Validate and apply one payload.
    ///
    /// Writes exactly the columns whose remote names appear in the
    /// payload's updated-field list and have a translation table entry;
    /// everything else on the row is left untouched.
    pub fn handle(
        &self,
        db: &Database,
        settings: &Settings,
        payload: &WebhookPayload,
    ) -> Result<(), WebhookError> {
        if payload.external_source() != Some(settings.external_source.as_str()) {
            return Err(WebhookError::SourceMismatch);
        }

        let remote_id = payload.remote_id().ok_or(WebhookError::EntityNotFound)?;
        let repo = Repository::new(db, self.kind);

        // Prefer the double-keyed lookup when the remote record knows which
        // local id it mirrors; fall back to the remote id alone.
        let row = match payload.external_sync_id() {
            Some(local_id) => repo.find_one_by(&[
                ("remote_id", text(remote_id)),
                ("id", integer(local_id)),
            ])?,
            None => repo.find_one_by(&[("remote_id", text(remote_id))])?,
        }
        .ok_or(WebhookError::EntityNotFound)?;

        let local_id = row_i64(&row, "id").ok_or_else(|| {
            WebhookError::Store(Error::CorruptedData(format!(
                "{} row without id",
                self.kind.table()
            )))
        })?;

        let map = fields::for_kind(self.kind);
        let mut changes = Vec::new();
        for field in &payload.updated_fields {
            let Some(local) = map.local_for(field) else {
                continue;
            };
            let Some(value) = payload.field(field) else {
                continue;
            };
            changes.push((local, json_to_sql(value)));
        }

        if changes.is_empty() {
            return Ok(());
        }
        repo.update(&changes, &[("id", integer(local_id))])?;
        Ok(())
    }
}

/// Routes an inbound payload to the first mapper that supports it.
pub struct Dispatcher {
    mappers: Vec<Mapper>,
}

impl Dispatcher {
    /// Mappers in fixed priority order.
    pub fn new() -> Self {
        Dispatcher {
            mappers: vec![
                Mapper::new(EntityKind::Order),
                Mapper::new(EntityKind::OrderItem),
                Mapper::new(EntityKind::Shipment),
                Mapper::new(EntityKind::ShipmentItem),
            ],
        }
    }

    /// Handle the payload with the first supporting mapper.
    ///
    /// Returns `Ok(None)` when no registered mapper supports the payload's
    /// entity type, an expected, non-error outcome.
    pub fn dispatch(
        &self,
        db: &Database,
        settings: &Settings,
        payload: &WebhookPayload,
    ) -> Result<Option<EntityKind>, WebhookError> {
        for mapper in &self.mappers {
            if mapper.supports(payload) {
                mapper.handle(db, settings, payload)?;
                return Ok(Some(mapper.kind()));
            }
        }
        Ok(None)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
