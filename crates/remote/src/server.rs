// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Webhook routes.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::error;

use tm_core::endpoint::{self, Reception};
use tm_core::{Database, Settings};

/// Shared route state.
///
/// The database is opened per request: connections are cheap under WAL and
/// rusqlite connections cannot be shared across handler tasks.
pub struct AppState {
    pub db_path: PathBuf,
    pub settings: Settings,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(receive_webhook))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Receive one webhook payload.
///
/// Always answers 200: rejections are recorded locally, the platform never
/// retries and must not see them as protocol errors.
async fn receive_webhook(State(state): State<Arc<AppState>>, body: String) -> Json<Value> {
    let outcome = match Database::open(&state.db_path) {
        Ok(db) => endpoint::receive(&db, &state.settings, &body),
        Err(e) => {
            error!(error = %e, "failed to open database for webhook");
            Reception::Rejected {
                reason: e.to_string(),
            }
        }
    };

    let outcome = match outcome {
        Reception::Applied { entity } => json!({"outcome": "applied", "entity": entity.name()}),
        Reception::Ignored => json!({"outcome": "ignored"}),
        Reception::Rejected { reason } => json!({"outcome": "rejected", "reason": reason}),
    };
    Json(json!({"status": "ok", "result": outcome}))
}
