// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote API abstraction.
//!
//! Provides a trait-based client layer that enables:
//! - Real HTTPS requests against the TrackMage REST API in production
//! - Mock clients with scripted responses for unit testing

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

/// Error type for remote API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The remote API answered with a non-success status.
    #[error("remote API returned {status}: {description}")]
    Http {
        status: u16,
        /// The `hydra:description` of the error body, or the raw body when
        /// the platform sends something unstructured.
        description: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded as JSON.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    /// True for the 404 answered on a stale remote id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }

    /// True when a create was rejected because the `externalSyncId` is
    /// already attached to an existing remote record.
    pub fn is_external_sync_id_conflict(&self) -> bool {
        match self {
            ApiError::Http {
                status,
                description,
            } => (400..500).contains(status) && description.contains("already used"),
            _ => false,
        }
    }
}

/// Result type for remote API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Authenticated request/response client against the TrackMage REST API.
///
/// This trait abstracts over the actual HTTP mechanism, allowing for easy
/// testing with mock implementations.
pub trait ApiClient: Send + Sync {
    /// `GET /{path}` with query parameters; returns the decoded JSON body.
    fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Pin<Box<dyn Future<Output = ApiResult<Value>> + Send + '_>>;

    /// `POST /{path}` with a JSON body; returns the decoded JSON body.
    fn post(
        &self,
        path: &str,
        body: Value,
    ) -> Pin<Box<dyn Future<Output = ApiResult<Value>> + Send + '_>>;

    /// `PUT /{path}` with a JSON body; returns the decoded JSON body.
    fn put(
        &self,
        path: &str,
        body: Value,
    ) -> Pin<Box<dyn Future<Output = ApiResult<Value>> + Send + '_>>;
}
