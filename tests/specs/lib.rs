// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Spec-level tests for the TrackMage synchronization engine.
//!
//! The files under `cli/` are wired into the `tmsync` crate as `[[test]]`
//! targets and drive the compiled binary end to end.
