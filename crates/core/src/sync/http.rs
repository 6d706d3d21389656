// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest-backed implementation of [`ApiClient`].

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::config::Settings;
use crate::protocol;

use super::api::{ApiClient, ApiError, ApiResult};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTPS client against the TrackMage REST API.
///
/// Authenticates every request with the installation's credential pair.
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl HttpApiClient {
    /// Build a client from the installation settings.
    pub fn new(settings: &Settings) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpApiClient {
            client,
            base_url: settings.api_base.trim_end_matches('/').to_string(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
        })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut request = self
            .client
            .request(method, url)
            .basic_auth(&self.client_id, Some(&self.client_secret));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_body(status, &text));
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

/// Build an [`ApiError::Http`] from an error response body.
///
/// Error bodies normally carry a `hydra:description`; anything else falls
/// back to the raw text so conflict detection still sees the message.
fn error_from_body(status: StatusCode, text: &str) -> ApiError {
    let description = serde_json::from_str::<Value>(text)
        .ok()
        .as_ref()
        .and_then(protocol::error_description)
        .map(String::from)
        .unwrap_or_else(|| text.to_string());

    ApiError::Http {
        status: status.as_u16(),
        description,
    }
}

impl ApiClient for HttpApiClient {
    fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Pin<Box<dyn Future<Output = ApiResult<Value>> + Send + '_>> {
        let path = path.to_string();
        let query = query.to_vec();
        Box::pin(async move { self.execute(Method::GET, &path, &query, None).await })
    }

    fn post(
        &self,
        path: &str,
        body: Value,
    ) -> Pin<Box<dyn Future<Output = ApiResult<Value>> + Send + '_>> {
        let path = path.to_string();
        Box::pin(async move { self.execute(Method::POST, &path, &[], Some(body)).await })
    }

    fn put(
        &self,
        path: &str,
        body: Value,
    ) -> Pin<Box<dyn Future<Output = ApiResult<Value>> + Send + '_>> {
        let path = path.to_string();
        Box::pin(async move { self.execute(Method::PUT, &path, &[], Some(body)).await })
    }
}
