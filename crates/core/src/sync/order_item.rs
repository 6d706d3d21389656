// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronizer for order line items.
//!
//! An order item can only exist remotely inside its order, so the parent
//! order must already carry a remote id. The status gate is the parent
//! order's status: an item of an order that cannot sync is silently
//! skipped, while an item of a syncable-but-unsynced order is an error.

use serde_json::json;
use tracing::debug;

use crate::config::Settings;
use crate::db::Database;
use crate::entity::{EntityKind, Order, OrderItem};
use crate::error::Error;
use crate::fields;
use crate::repository::Repository;

use super::api::ApiClient;
use super::push::{push, PushTarget};
use super::{SyncError, SyncResult};

/// Pushes a local order item to the remote platform.
pub struct OrderItemSync<'a, C: ApiClient + ?Sized> {
    api: &'a C,
    db: &'a Database,
    settings: &'a Settings,
}

impl<'a, C: ApiClient + ?Sized> OrderItemSync<'a, C> {
    pub fn new(api: &'a C, db: &'a Database, settings: &'a Settings) -> Self {
        OrderItemSync { api, db, settings }
    }

    /// Sync one order item by local id.
    pub async fn sync(&self, item_id: i64) -> SyncResult<()> {
        if !self.settings.sync_enabled {
            return Ok(());
        }

        let repo = Repository::new(self.db, EntityKind::OrderItem);
        let row = repo.find(item_id)?.ok_or(Error::NotFound {
            entity: "order item",
            id: item_id,
        })?;
        let item = OrderItem::from_row(&row)?;

        let orders = Repository::new(self.db, EntityKind::Order);
        let order_row = orders.find(item.order_id)?.ok_or(Error::NotFound {
            entity: "order",
            id: item.order_id,
        })?;
        let order = Order::from_row(&order_row)?;

        if !self.settings.triggers_order(&order.status) {
            debug!(
                item_id,
                order_id = order.id,
                status = %order.status,
                "order status not in trigger set, skipping item"
            );
            return Ok(());
        }

        let order_remote_id = order.remote_id.ok_or(SyncError::ParentNotSynced {
            child: "order item",
            parent: "order",
        })?;

        let map = fields::for_kind(EntityKind::OrderItem);
        let mut update_payload = map.translate_row(&row);
        update_payload.insert("externalSyncId".to_string(), json!(item.id));

        let mut create_payload = update_payload.clone();
        create_payload.insert(
            "order".to_string(),
            json!(format!("/orders/{order_remote_id}")),
        );
        create_payload.insert(
            "externalSource".to_string(),
            json!(self.settings.external_source),
        );

        let target = PushTarget {
            kind: EntityKind::OrderItem,
            local_id: item.id,
            remote_id: item.remote_id,
            synced_hash: item.synced_hash,
            lookup_path: format!("orders/{order_remote_id}/items"),
            create_payload,
            update_payload,
        };
        push(self.api, self.db, &target).await
    }
}
