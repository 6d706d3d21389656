// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the `tmsync sync` command.
//!
//! These specs only exercise paths that stop before the network: guard
//! no-ops and local failures. The remote decision algorithm is covered by
//! the mock-client tests in tm-core.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use tm_core::repository::{text, Repository};
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

fn setup(temp: &TempDir) {
    fs::write(temp.path().join("trackmage.toml"), CONFIG).unwrap();
    Database::open(&temp.path().join("trackmage.db")).unwrap();
}

#[test]
fn sync_without_settings_fails() {
    let temp = TempDir::new().unwrap();

    tmsync()
        .args(["sync", "order", "1"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn sync_of_an_untriggered_order_is_a_quiet_no_op() {
    let temp = TempDir::new().unwrap();
    setup(&temp);

    let db = Database::open(&temp.path().join("trackmage.db")).unwrap();
    Repository::new(&db, EntityKind::Order)
        .insert(&[
            ("number", text("1001")),
            ("status", text("pending")),
            ("created_at", text("2026-01-01T00:00:00Z")),
            ("updated_at", text("2026-01-01T00:00:00Z")),
        ])
        .unwrap();
    drop(db);

    // status "pending" is outside the trigger set: no network is touched
    tmsync()
        .args(["sync", "order", "1"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("synced order 1"));
}

#[test]
fn sync_of_a_missing_entity_fails() {
    let temp = TempDir::new().unwrap();
    setup(&temp);

    tmsync()
        .args(["sync", "order-item", "42"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("order item not found: 42"));
}
