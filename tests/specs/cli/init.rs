// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the `tmsync init` command.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tmsync() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("tmsync").unwrap()
}

#[test]
fn init_creates_config_and_database() {
    let temp = TempDir::new().unwrap();

    tmsync()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("trackmage.toml"))
        .stdout(predicate::str::contains("trackmage.db"));

    assert!(temp.path().join("trackmage.toml").exists());
    assert!(temp.path().join("trackmage.db").exists());
}

#[test]
fn init_refuses_to_overwrite_settings() {
    let temp = TempDir::new().unwrap();

    tmsync()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();

    tmsync()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));
}

#[test]
fn help_lists_subcommands() {
    tmsync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("webhook"));
}
