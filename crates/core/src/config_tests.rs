// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tempfile::tempdir;

fn minimal_toml() -> &'static str {
    r#"
workspace_id = "ws-1"
client_id = "key"
client_secret = "secret"
external_source = "shop-7"
"#
}

#[test]
fn load_applies_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, minimal_toml()).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.workspace_id, "ws-1");
    assert_eq!(settings.api_base, "https://api.trackmage.com");
    assert!(settings.sync_enabled);
    assert!(settings.order_statuses.is_empty());
    assert!(settings.shipment_statuses.is_empty());
}

#[test]
fn load_rejects_missing_credentials() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "workspace_id = \"ws-1\"\n").unwrap();

    let err = Settings::load(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    let settings = Settings {
        workspace_id: "ws-1".into(),
        client_id: "key".into(),
        client_secret: "secret".into(),
        external_source: "shop-7".into(),
        api_base: "https://api.stage.trackmage.com".into(),
        sync_enabled: false,
        order_statuses: vec!["completed".into()],
        shipment_statuses: vec!["shipped".into()],
    };
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded.api_base, "https://api.stage.trackmage.com");
    assert!(!loaded.sync_enabled);
    assert_eq!(loaded.order_statuses, vec!["completed".to_string()]);
}

#[test]
fn trigger_checks_are_exact_match() {
    let settings = Settings {
        workspace_id: "ws-1".into(),
        client_id: "key".into(),
        client_secret: "secret".into(),
        external_source: "shop-7".into(),
        api_base: default_api_base(),
        sync_enabled: true,
        order_statuses: vec!["completed".into(), "shipped".into()],
        shipment_statuses: vec!["in_transit".into()],
    };

    assert!(settings.triggers_order("completed"));
    assert!(!settings.triggers_order("pending"));
    assert!(!settings.triggers_order("Completed"));
    assert!(settings.triggers_shipment("in_transit"));
    assert!(!settings.triggers_shipment("delivered"));
}
