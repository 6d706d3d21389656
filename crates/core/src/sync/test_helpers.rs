// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use crate::config::Settings;
use crate::db::Database;
use crate::entity::EntityKind;
use crate::repository::{integer, row_str, text, Repository};

pub const TM_ORDER_ID: &str = "tm-order-id";
pub const TM_ORDER_ITEM_ID: &str = "tm-order-item-id";
pub const TM_SHIPMENT_ID: &str = "tm-shipment-id";

/// Settings with order status "completed" and shipment status "shipped" as
/// the trigger sets.
pub fn make_settings() -> Settings {
    Settings {
        workspace_id: "ws-1".to_string(),
        client_id: "key".to_string(),
        client_secret: "secret".to_string(),
        external_source: "shop-7".to_string(),
        api_base: "https://api.trackmage.com".to_string(),
        sync_enabled: true,
        order_statuses: vec!["completed".to_string()],
        shipment_statuses: vec!["shipped".to_string()],
    }
}

const NOW: &str = "2026-01-01T00:00:00Z";

pub fn insert_order(db: &Database, number: &str, status: &str) -> i64 {
    let row = Repository::new(db, EntityKind::Order)
        .insert(&[
            ("number", text(number)),
            ("status", text(status)),
            ("created_at", text(NOW)),
            ("updated_at", text(NOW)),
        ])
        .unwrap();
    crate::repository::row_i64(&row, "id").unwrap()
}

pub fn insert_order_item(db: &Database, order_id: i64, name: &str, qty: i64, price: &str) -> i64 {
    let row = Repository::new(db, EntityKind::OrderItem)
        .insert(&[
            ("order_id", integer(order_id)),
            ("product_name", text(name)),
            ("qty", integer(qty)),
            ("price", text(price)),
            ("row_total", text(price)),
            ("created_at", text(NOW)),
            ("updated_at", text(NOW)),
        ])
        .unwrap();
    crate::repository::row_i64(&row, "id").unwrap()
}

pub fn insert_shipment(db: &Database, order_id: i64, status: &str, tracking: &str) -> i64 {
    let row = Repository::new(db, EntityKind::Shipment)
        .insert(&[
            ("order_id", integer(order_id)),
            ("tracking_number", text(tracking)),
            ("carrier", text("ups")),
            ("status", text(status)),
            ("created_at", text(NOW)),
            ("updated_at", text(NOW)),
        ])
        .unwrap();
    crate::repository::row_i64(&row, "id").unwrap()
}

pub fn insert_shipment_item(db: &Database, shipment_id: i64, order_item_id: i64, qty: i64) -> i64 {
    let row = Repository::new(db, EntityKind::ShipmentItem)
        .insert(&[
            ("shipment_id", integer(shipment_id)),
            ("order_item_id", integer(order_item_id)),
            ("qty", integer(qty)),
            ("created_at", text(NOW)),
            ("updated_at", text(NOW)),
        ])
        .unwrap();
    crate::repository::row_i64(&row, "id").unwrap()
}

/// Link a local row to a remote id, as if a previous sync succeeded.
pub fn set_remote_id(db: &Database, kind: EntityKind, id: i64, remote_id: &str) {
    Repository::new(db, kind)
        .update(&[("remote_id", text(remote_id))], &[("id", integer(id))])
        .unwrap();
}

pub fn remote_id_of(db: &Database, kind: EntityKind, id: i64) -> Option<String> {
    let row = Repository::new(db, kind).find(id).unwrap().unwrap();
    row_str(&row, "remote_id").map(String::from)
}

pub fn synced_hash_of(db: &Database, kind: EntityKind, id: i64) -> Option<String> {
    let row = Repository::new(db, kind).find(id).unwrap().unwrap();
    row_str(&row, "synced_hash").map(String::from)
}
