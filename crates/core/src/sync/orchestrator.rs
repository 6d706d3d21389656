// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronization orchestrator.
//!
//! Entry point for local mutation events. The mutation site constructs a
//! [`ChangeEvent`] after commit and hands it to [`Orchestrator::handle`],
//! which resolves the ordering dependencies between entity types (order
//! before its items, shipment before its items) and invokes the entity
//! synchronizers sequentially. Events are ephemeral: handled to completion
//! within the triggering request, never queued.

use serde_json::json;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::db::Database;
use crate::entity::{EntityKind, OrderItem, ShipmentItem};
use crate::error::Error;
use crate::repository::{integer, row_i64, Repository};

use super::api::ApiClient;
use super::order::OrderSync;
use super::order_item::OrderItemSync;
use super::shipment::ShipmentSync;
use super::shipment_item::ShipmentItemSync;
use super::SyncResult;

/// A local entity change, produced by the mutation site after commit.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: EntityKind,
    pub id: i64,
    /// Local column names that changed, for diagnostics.
    pub changed: Vec<String>,
}

impl ChangeEvent {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        ChangeEvent {
            kind,
            id,
            changed: Vec::new(),
        }
    }

    pub fn with_changed(mut self, changed: Vec<String>) -> Self {
        self.changed = changed;
        self
    }
}

/// Drives the entity synchronizers in dependency order.
pub struct Orchestrator<'a, C: ApiClient + ?Sized> {
    api: &'a C,
    db: &'a Database,
    settings: &'a Settings,
    disabled: bool,
}

impl<'a, C: ApiClient + ?Sized> Orchestrator<'a, C> {
    pub fn new(api: &'a C, db: &'a Database, settings: &'a Settings) -> Self {
        Orchestrator {
            api,
            db,
            settings,
            disabled: false,
        }
    }

    /// Disable all synchronization (test isolation, bulk imports).
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Handle one change event to completion.
    ///
    /// Failures are recorded in the `logs` table and propagated; the sync
    /// attempt is abandoned, nothing is retried.
    pub async fn handle(&self, event: &ChangeEvent) -> SyncResult<()> {
        if self.disabled {
            return Ok(());
        }

        debug!(
            entity = event.kind.name(),
            id = event.id,
            changed = ?event.changed,
            "handling change event"
        );

        let result = self.dispatch(event).await;
        if let Err(e) = &result {
            warn!(
                entity = event.kind.name(),
                id = event.id,
                error = %e,
                "synchronization failed"
            );
            let _ = self.db.log(
                "synchronization failed",
                &json!({
                    "entity": event.kind.name(),
                    "id": event.id,
                    "error": e.to_string(),
                }),
            );
        }
        result
    }

    async fn dispatch(&self, event: &ChangeEvent) -> SyncResult<()> {
        match event.kind {
            EntityKind::Order => {
                OrderSync::new(self.api, self.db, self.settings)
                    .sync(event.id)
                    .await?;
                self.sync_order_items(event.id).await
            }
            EntityKind::OrderItem => {
                let repo = Repository::new(self.db, EntityKind::OrderItem);
                let row = repo.find(event.id)?.ok_or(Error::NotFound {
                    entity: "order item",
                    id: event.id,
                })?;
                let item = OrderItem::from_row(&row)?;

                OrderSync::new(self.api, self.db, self.settings)
                    .sync(item.order_id)
                    .await?;
                OrderItemSync::new(self.api, self.db, self.settings)
                    .sync(event.id)
                    .await
            }
            EntityKind::Shipment => {
                ShipmentSync::new(self.api, self.db, self.settings)
                    .sync(event.id)
                    .await?;
                self.sync_shipment_items(event.id).await
            }
            EntityKind::ShipmentItem => {
                let repo = Repository::new(self.db, EntityKind::ShipmentItem);
                let row = repo.find(event.id)?.ok_or(Error::NotFound {
                    entity: "shipment item",
                    id: event.id,
                })?;
                let item = ShipmentItem::from_row(&row)?;

                ShipmentSync::new(self.api, self.db, self.settings)
                    .sync(item.shipment_id)
                    .await?;
                ShipmentItemSync::new(self.api, self.db, self.settings)
                    .sync(event.id)
                    .await
            }
        }
    }

    async fn sync_order_items(&self, order_id: i64) -> SyncResult<()> {
        let items = Repository::new(self.db, EntityKind::OrderItem)
            .find_by(&[("order_id", integer(order_id))])?;
        let item_sync = OrderItemSync::new(self.api, self.db, self.settings);
        for row in items {
            let item_id = row_i64(&row, "id").ok_or_else(|| {
                Error::CorruptedData("order_items row without id".to_string())
            })?;
            item_sync.sync(item_id).await?;
        }
        Ok(())
    }

    async fn sync_shipment_items(&self, shipment_id: i64) -> SyncResult<()> {
        let items = Repository::new(self.db, EntityKind::ShipmentItem)
            .find_by(&[("shipment_id", integer(shipment_id))])?;
        let item_sync = ShipmentItemSync::new(self.api, self.db, self.settings);
        for row in items {
            let item_id = row_i64(&row, "id").ok_or_else(|| {
                Error::CorruptedData("shipment_items row without id".to_string())
            })?;
            item_sync.sync(item_id).await?;
        }
        Ok(())
    }
}
