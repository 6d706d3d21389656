// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the order item synchronizer.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use serde_json::json;

use crate::db::Database;
use crate::entity::EntityKind;

use super::api_tests::{assert_body_includes, MockApiClient};
use super::order_item::OrderItemSync;
use super::test_helpers::*;
use super::SyncError;

const QTY: i64 = 1;
const PRICE: &str = "100";
const PRODUCT_NAME: &str = "Test Product";

struct Fixture {
    db: Database,
    api: MockApiClient,
    settings: crate::config::Settings,
    order_id: i64,
    item_id: i64,
}

/// An order in trigger status with one line item.
fn fixture(order_status: &str) -> Fixture {
    let db = Database::open_in_memory().unwrap();
    let order_id = insert_order(&db, "1001", order_status);
    let item_id = insert_order_item(&db, order_id, PRODUCT_NAME, QTY, PRICE);
    Fixture {
        db,
        api: MockApiClient::new(),
        settings: make_settings(),
        order_id,
        item_id,
    }
}

#[tokio::test]
async fn test_item_is_not_posted_because_order_must_be_synced_first() {
    let f = fixture("completed");
    // order has no remote id

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    let err = sync.sync(f.item_id).await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::ParentNotSynced {
            child: "order item",
            parent: "order"
        }
    ));
    assert_eq!(
        err.to_string(),
        "unable to sync order item because order is not yet synced"
    );
    assert!(f.api.requests().is_empty());
}

#[tokio::test]
async fn test_new_item_gets_posted() {
    let f = fixture("completed");
    set_remote_id(&f.db, EntityKind::Order, f.order_id, TM_ORDER_ID);
    f.api.queue_ok(json!({"id": TM_ORDER_ITEM_ID}));

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    sync.sync(f.item_id).await.unwrap();

    let requests = f.api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "order_items");
    assert_body_includes(
        &requests[0],
        &[
            ("order", json!(format!("/orders/{TM_ORDER_ID}"))),
            ("productName", json!(PRODUCT_NAME)),
            ("qty", json!(QTY)),
            ("rowTotal", json!(PRICE)),
            ("externalSyncId", json!(f.item_id)),
            ("externalSource", json!("shop-7")),
        ],
    );

    // the assigned remote id is stored on the local row
    assert_eq!(
        remote_id_of(&f.db, EntityKind::OrderItem, f.item_id).as_deref(),
        Some(TM_ORDER_ITEM_ID)
    );
    assert!(synced_hash_of(&f.db, EntityKind::OrderItem, f.item_id).is_some());
}

#[tokio::test]
async fn test_already_synced_item_sends_update() {
    let f = fixture("completed");
    set_remote_id(&f.db, EntityKind::Order, f.order_id, TM_ORDER_ID);
    set_remote_id(&f.db, EntityKind::OrderItem, f.item_id, TM_ORDER_ITEM_ID);
    f.api.queue_ok(json!({"id": TM_ORDER_ITEM_ID}));

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    sync.sync(f.item_id).await.unwrap();

    let requests = f.api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, format!("order_items/{TM_ORDER_ITEM_ID}"));
    assert_body_includes(
        &requests[0],
        &[
            ("productName", json!(PRODUCT_NAME)),
            ("qty", json!(QTY)),
            ("rowTotal", json!(PRICE)),
            ("externalSyncId", json!(f.item_id)),
        ],
    );
}

#[tokio::test]
async fn test_already_synced_item_is_not_sent_twice() {
    let f = fixture("completed");
    set_remote_id(&f.db, EntityKind::Order, f.order_id, TM_ORDER_ID);
    set_remote_id(&f.db, EntityKind::OrderItem, f.item_id, TM_ORDER_ITEM_ID);
    f.api.queue_ok(json!({"id": TM_ORDER_ITEM_ID}));

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    sync.sync(f.item_id).await.unwrap();
    // second call with unchanged data must not hit the network again
    sync.sync(f.item_id).await.unwrap();

    assert_eq!(f.api.requests().len(), 1);
}

#[tokio::test]
async fn test_used_external_sync_id_is_looked_up() {
    let f = fixture("completed");
    set_remote_id(&f.db, EntityKind::Order, f.order_id, TM_ORDER_ID);
    f.api
        .queue_error(400, "externalSyncId: This value is already used.");
    f.api
        .queue_ok(json!({"hydra:member": [{"id": TM_ORDER_ITEM_ID}]}));
    f.api.queue_ok(json!({"id": TM_ORDER_ITEM_ID}));

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    sync.sync(f.item_id).await.unwrap();

    // create is rejected, the remote counterpart is found by externalSyncId
    // within the parent order, then updated - never a second create
    let requests = f.api.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "order_items");
    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].path, format!("orders/{TM_ORDER_ID}/items"));
    assert_eq!(
        requests[1].query,
        vec![("externalSyncId".to_string(), f.item_id.to_string())]
    );
    assert_eq!(requests[2].method, "PUT");
    assert_eq!(requests[2].path, format!("order_items/{TM_ORDER_ITEM_ID}"));

    assert_eq!(
        remote_id_of(&f.db, EntityKind::OrderItem, f.item_id).as_deref(),
        Some(TM_ORDER_ITEM_ID)
    );
}

#[tokio::test]
async fn test_stale_remote_id_gets_posted_once_again() {
    let f = fixture("completed");
    set_remote_id(&f.db, EntityKind::Order, f.order_id, TM_ORDER_ID);
    set_remote_id(
        &f.db,
        EntityKind::OrderItem,
        f.item_id,
        "tm-old-order-item-id",
    );
    f.api.queue_error(404, "Not Found");
    f.api.queue_ok(json!({"id": TM_ORDER_ITEM_ID}));

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    sync.sync(f.item_id).await.unwrap();

    let requests = f.api.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "order_items/tm-old-order-item-id");
    assert_eq!(requests[1].method, "POST");
    assert_eq!(requests[1].path, "order_items");

    // the stale link is replaced by the freshly assigned id
    assert_eq!(
        remote_id_of(&f.db, EntityKind::OrderItem, f.item_id).as_deref(),
        Some(TM_ORDER_ITEM_ID)
    );
}

#[tokio::test]
async fn test_item_is_not_posted_if_order_cannot_be_synced() {
    let f = fixture("pending");

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    sync.sync(f.item_id).await.unwrap();

    assert!(f.api.requests().is_empty());
    assert!(remote_id_of(&f.db, EntityKind::OrderItem, f.item_id).is_none());
}

#[tokio::test]
async fn test_disabled_sync_is_a_silent_no_op() {
    let mut f = fixture("completed");
    set_remote_id(&f.db, EntityKind::Order, f.order_id, TM_ORDER_ID);
    f.settings.sync_enabled = false;

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    sync.sync(f.item_id).await.unwrap();

    assert!(f.api.requests().is_empty());
}

#[tokio::test]
async fn test_missing_item_is_an_error() {
    let f = fixture("completed");

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    let err = sync.sync(9999).await.unwrap_err();

    assert!(matches!(err, SyncError::Store(_)));
    assert!(f.api.requests().is_empty());
}

#[tokio::test]
async fn test_remote_error_propagates_without_local_write() {
    let f = fixture("completed");
    set_remote_id(&f.db, EntityKind::Order, f.order_id, TM_ORDER_ID);
    f.api
        .queue_error(422, "qty: This value should be positive.");

    let sync = OrderItemSync::new(&f.api, &f.db, &f.settings);
    let err = sync.sync(f.item_id).await.unwrap_err();

    assert!(err.to_string().contains("should be positive"));
    assert!(remote_id_of(&f.db, EntityKind::OrderItem, f.item_id).is_none());
    assert!(synced_hash_of(&f.db, EntityKind::OrderItem, f.item_id).is_none());
}
