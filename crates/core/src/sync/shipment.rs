// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronizer for shipments.
//!
//! Shipments are scoped to the workspace rather than to their order: the
//! conflict lookup runs against the workspace shipment collection, and the
//! order reference in the payload is optional (a shipment may be pushed
//! before its order when only shipment statuses are configured to
//! trigger).

use serde_json::json;
use tracing::debug;

use crate::config::Settings;
use crate::db::Database;
use crate::entity::{EntityKind, Order, Shipment};
use crate::error::Error;
use crate::fields;
use crate::repository::Repository;

use super::api::ApiClient;
use super::push::{push, PushTarget};
use super::SyncResult;

/// Pushes a local shipment to the remote platform.
pub struct ShipmentSync<'a, C: ApiClient + ?Sized> {
    api: &'a C,
    db: &'a Database,
    settings: &'a Settings,
}

impl<'a, C: ApiClient + ?Sized> ShipmentSync<'a, C> {
    pub fn new(api: &'a C, db: &'a Database, settings: &'a Settings) -> Self {
        ShipmentSync { api, db, settings }
    }

    /// Sync one shipment by local id.
    pub async fn sync(&self, shipment_id: i64) -> SyncResult<()> {
        if !self.settings.sync_enabled {
            return Ok(());
        }

        let repo = Repository::new(self.db, EntityKind::Shipment);
        let row = repo.find(shipment_id)?.ok_or(Error::NotFound {
            entity: "shipment",
            id: shipment_id,
        })?;
        let shipment = Shipment::from_row(&row)?;

        if !self.settings.triggers_shipment(&shipment.status) {
            debug!(shipment_id, status = %shipment.status, "status not in trigger set, skipping");
            return Ok(());
        }

        let map = fields::for_kind(EntityKind::Shipment);
        let mut update_payload = map.translate_row(&row);
        update_payload.insert("externalSyncId".to_string(), json!(shipment.id));

        let mut create_payload = update_payload.clone();
        create_payload.insert(
            "workspace".to_string(),
            json!(format!("/workspaces/{}", self.settings.workspace_id)),
        );
        create_payload.insert(
            "externalSource".to_string(),
            json!(self.settings.external_source),
        );

        // Link the order when it is already synced; the platform matches by
        // tracking number otherwise.
        let orders = Repository::new(self.db, EntityKind::Order);
        if let Some(order_row) = orders.find(shipment.order_id)? {
            let order = Order::from_row(&order_row)?;
            if let Some(order_remote_id) = order.remote_id {
                create_payload.insert(
                    "order".to_string(),
                    json!(format!("/orders/{order_remote_id}")),
                );
            }
        }

        let target = PushTarget {
            kind: EntityKind::Shipment,
            local_id: shipment.id,
            remote_id: shipment.remote_id,
            synced_hash: shipment.synced_hash,
            lookup_path: format!("workspaces/{}/shipments", self.settings.workspace_id),
            create_payload,
            update_payload,
        };
        push(self.api, self.db, &target).await
    }
}
