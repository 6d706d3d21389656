// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronizer for shipment items.
//!
//! A shipment item lives inside its shipment remotely and references the
//! order item it packs, so both the parent shipment and the order item
//! must already carry remote ids.

use serde_json::json;
use tracing::debug;

use crate::config::Settings;
use crate::db::Database;
use crate::entity::{EntityKind, OrderItem, Shipment, ShipmentItem};
use crate::error::Error;
use crate::fields;
use crate::repository::Repository;

use super::api::ApiClient;
use super::push::{push, PushTarget};
use super::{SyncError, SyncResult};

/// Pushes a local shipment item to the remote platform.
pub struct ShipmentItemSync<'a, C: ApiClient + ?Sized> {
    api: &'a C,
    db: &'a Database,
    settings: &'a Settings,
}

impl<'a, C: ApiClient + ?Sized> ShipmentItemSync<'a, C> {
    pub fn new(api: &'a C, db: &'a Database, settings: &'a Settings) -> Self {
        ShipmentItemSync { api, db, settings }
    }

    /// Sync one shipment item by local id.
    pub async fn sync(&self, item_id: i64) -> SyncResult<()> {
        if !self.settings.sync_enabled {
            return Ok(());
        }

        let repo = Repository::new(self.db, EntityKind::ShipmentItem);
        let row = repo.find(item_id)?.ok_or(Error::NotFound {
            entity: "shipment item",
            id: item_id,
        })?;
        let item = ShipmentItem::from_row(&row)?;

        let shipments = Repository::new(self.db, EntityKind::Shipment);
        let shipment_row = shipments.find(item.shipment_id)?.ok_or(Error::NotFound {
            entity: "shipment",
            id: item.shipment_id,
        })?;
        let shipment = Shipment::from_row(&shipment_row)?;

        if !self.settings.triggers_shipment(&shipment.status) {
            debug!(
                item_id,
                shipment_id = shipment.id,
                status = %shipment.status,
                "shipment status not in trigger set, skipping item"
            );
            return Ok(());
        }

        let shipment_remote_id = shipment.remote_id.ok_or(SyncError::ParentNotSynced {
            child: "shipment item",
            parent: "shipment",
        })?;

        let order_items = Repository::new(self.db, EntityKind::OrderItem);
        let order_item_row = order_items.find(item.order_item_id)?.ok_or(Error::NotFound {
            entity: "order item",
            id: item.order_item_id,
        })?;
        let order_item = OrderItem::from_row(&order_item_row)?;
        let order_item_remote_id = order_item.remote_id.ok_or(SyncError::ParentNotSynced {
            child: "shipment item",
            parent: "order item",
        })?;

        let map = fields::for_kind(EntityKind::ShipmentItem);
        let mut update_payload = map.translate_row(&row);
        update_payload.insert("externalSyncId".to_string(), json!(item.id));

        let mut create_payload = update_payload.clone();
        create_payload.insert(
            "shipment".to_string(),
            json!(format!("/shipments/{shipment_remote_id}")),
        );
        create_payload.insert(
            "orderItem".to_string(),
            json!(format!("/order_items/{order_item_remote_id}")),
        );
        create_payload.insert(
            "externalSource".to_string(),
            json!(self.settings.external_source),
        );

        let target = PushTarget {
            kind: EntityKind::ShipmentItem,
            local_id: item.id,
            remote_id: item.remote_id,
            synced_hash: item.synced_hash,
            lookup_path: format!("shipments/{shipment_remote_id}/items"),
            create_payload,
            update_payload,
        };
        push(self.api, self.db, &target).await
    }
}
