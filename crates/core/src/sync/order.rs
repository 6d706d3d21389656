// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronizer for shop orders.

use serde_json::json;
use tracing::debug;

use crate::config::Settings;
use crate::db::Database;
use crate::entity::{EntityKind, Order};
use crate::error::Error;
use crate::fields;
use crate::repository::Repository;

use super::api::ApiClient;
use super::push::{push, PushTarget};
use super::SyncResult;

/// Pushes a local order to the remote platform.
pub struct OrderSync<'a, C: ApiClient + ?Sized> {
    api: &'a C,
    db: &'a Database,
    settings: &'a Settings,
}

impl<'a, C: ApiClient + ?Sized> OrderSync<'a, C> {
    pub fn new(api: &'a C, db: &'a Database, settings: &'a Settings) -> Self {
        OrderSync { api, db, settings }
    }

    /// Sync one order by local id.
    ///
    /// A disabled installation or an order whose status is outside the
    /// trigger set is a silent no-op.
    pub async fn sync(&self, order_id: i64) -> SyncResult<()> {
        if !self.settings.sync_enabled {
            return Ok(());
        }

        let repo = Repository::new(self.db, EntityKind::Order);
        let row = repo.find(order_id)?.ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;
        let order = Order::from_row(&row)?;

        if !self.settings.triggers_order(&order.status) {
            debug!(order_id, status = %order.status, "status not in trigger set, skipping");
            return Ok(());
        }

        let map = fields::for_kind(EntityKind::Order);
        let mut update_payload = map.translate_row(&row);
        update_payload.insert("externalSyncId".to_string(), json!(order.id));

        let mut create_payload = update_payload.clone();
        create_payload.insert(
            "workspace".to_string(),
            json!(format!("/workspaces/{}", self.settings.workspace_id)),
        );
        create_payload.insert(
            "externalSource".to_string(),
            json!(self.settings.external_source),
        );

        let target = PushTarget {
            kind: EntityKind::Order,
            local_id: order.id,
            remote_id: order.remote_id,
            synced_hash: order.synced_hash,
            lookup_path: format!("workspaces/{}/orders", self.settings.workspace_id),
            create_payload,
            update_payload,
        };
        push(self.api, self.db, &target).await
    }
}
