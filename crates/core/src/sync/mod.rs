// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound synchronization with the TrackMage REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Orchestrator │────►│ Entity syncs │────►│  ApiClient   │
//! │ (ChangeEvent)│     │ (guards +    │     │   (trait)    │
//! └──────────────┘     │  payloads)   │     └──────────────┘
//!                      └──────┬───────┘
//!                             ▼
//!                      ┌──────────────┐
//!                      │ push engine  │  (create / conflict-lookup /
//!                      └──────────────┘   update / 404-recreate)
//! ```
//!
//! # Contract
//!
//! - Parent entities sync before dependents (order before its items,
//!   shipment before its items); a dependent whose parent has no remote id
//!   fails without touching the network.
//! - A successful sync persists the remote id and a payload fingerprint;
//!   re-syncing unchanged data issues no further requests.
//! - The only automatic recoveries are the conflict-lookup on a used
//!   `externalSyncId` and the single recreate after a stale remote id 404s.
//!   Everything else propagates as [`SyncError`].

mod api;
mod http;
mod order;
mod order_item;
mod orchestrator;
mod push;
mod shipment;
mod shipment_item;

pub use api::{ApiClient, ApiError, ApiResult};
pub use http::HttpApiClient;
pub use order::OrderSync;
pub use order_item::OrderItemSync;
pub use orchestrator::{ChangeEvent, Orchestrator};
pub use push::SyncError;
pub use shipment::ShipmentSync;
pub use shipment_item::ShipmentItemSync;

/// Result type for synchronization operations.
pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod test_helpers;



#[cfg(test)]
mod order_item_tests;
