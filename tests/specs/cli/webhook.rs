// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the `tmsync webhook` command: replaying inbound payloads
//! end to end against a real database file.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use tm_core::repository::{integer, row_i64, row_str, text, Repository};
use tm_core::{Database, EntityKind};

fn tmsync() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("tmsync").unwrap()
}

const CONFIG: &str = r#"
workspace_id = "ws-1"
client_id = "key"
client_secret = "secret"
external_source = "shop-7"
order_statuses = ["completed"]
shipment_statuses = ["shipped"]
"#;

/// Set up config + database with one shipment linked to `tm-1`.
fn setup(temp: &TempDir) -> i64 {
    fs::write(temp.path().join("trackmage.toml"), CONFIG).unwrap();
    let db = Database::open(&temp.path().join("trackmage.db")).unwrap();
    let row = Repository::new(&db, EntityKind::Shipment)
        .insert(&[
            ("order_id", integer(1)),
            ("status", text("shipped")),
            ("remote_id", text("tm-1")),
            ("created_at", text("2026-01-01T00:00:00Z")),
            ("updated_at", text("2026-01-01T00:00:00Z")),
        ])
        .unwrap();
    row_i64(&row, "id").unwrap()
}

fn shipment_status(temp: &TempDir, id: i64) -> String {
    let db = Database::open(&temp.path().join("trackmage.db")).unwrap();
    let row = Repository::new(&db, EntityKind::Shipment)
        .find(id)
        .unwrap()
        .unwrap();
    row_str(&row, "status").unwrap().to_string()
}

fn write_payload(temp: &TempDir, value: serde_json::Value) -> std::path::PathBuf {
    let path = temp.path().join("payload.json");
    fs::write(&path, value.to_string()).unwrap();
    path
}

fn run_webhook(temp: &TempDir, payload: &Path) -> assert_cmd::assert::Assert {
    tmsync()
        .arg("webhook")
        .arg(payload)
        .current_dir(temp.path())
        .assert()
}

#[test]
fn webhook_applies_a_remote_status_change() {
    let temp = TempDir::new().unwrap();
    let id = setup(&temp);

    let payload = write_payload(
        &temp,
        json!({
            "entity": "shipments",
            "updatedFields": ["status"],
            "data": {
                "id": "tm-1",
                "externalSource": "shop-7",
                "externalSyncId": id,
                "status": "delivered",
            }
        }),
    );

    run_webhook(&temp, &payload)
        .success()
        .stdout(predicate::str::contains("applied: shipment"));

    assert_eq!(shipment_status(&temp, id), "delivered");
}

#[test]
fn webhook_rejects_foreign_sources_without_failing() {
    let temp = TempDir::new().unwrap();
    let id = setup(&temp);

    let payload = write_payload(
        &temp,
        json!({
            "entity": "shipments",
            "updatedFields": ["status"],
            "data": {
                "id": "tm-1",
                "externalSource": "someone-else",
                "status": "delivered",
            }
        }),
    );

    run_webhook(&temp, &payload)
        .success()
        .stdout(predicate::str::contains("rejected"));

    // no local write happened
    assert_eq!(shipment_status(&temp, id), "shipped");
}

#[test]
fn webhook_requires_the_payload_file() {
    let temp = TempDir::new().unwrap();
    setup(&temp);

    tmsync()
        .arg("webhook")
        .arg("missing.json")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
