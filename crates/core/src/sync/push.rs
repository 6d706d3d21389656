// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared push engine behind the per-entity synchronizers.
//!
//! Implements the create / conflict-lookup / update / recreate decision:
//!
//! 1. No remote id yet: POST to the collection. If the platform rejects the
//!    create because the `externalSyncId` is already attached to a remote
//!    record (both sides created the "same" entity independently), look the
//!    record up by `externalSyncId` within the parent scope, adopt its id,
//!    and continue as an update. Never a second POST within one call.
//! 2. Remote id known: PUT, unless the payload fingerprint matches the last
//!    successful push (then the call is a no-op). A 404 means the remote
//!    record was deleted behind our back: clear the stale id and run the
//!    create path once.
//!
//! A successful push persists the remote id and the payload fingerprint
//! before returning. No other local write happens on failure, except the
//! self-healing id-clear in the 404 case.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::db::Database;
use crate::entity::EntityKind;
use crate::error::Error;
use crate::protocol;
use crate::repository::{integer, text, Repository};

use super::api::{ApiClient, ApiError};
use super::SyncResult;

/// Error type for synchronization operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A dependent entity cannot sync before its parent carries a remote id.
    #[error("unable to sync {child} because {parent} is not yet synced")]
    ParentNotSynced {
        child: &'static str,
        parent: &'static str,
    },

    /// The remote call failed and no recovery path applies.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The remote API answered successfully but violated its own contract.
    #[error("remote API contract violation: {0}")]
    Remote(String),

    /// Local storage failed.
    #[error(transparent)]
    Store(#[from] Error),
}

/// Everything the push engine needs to know about one entity instance.
pub(crate) struct PushTarget {
    pub kind: EntityKind,
    pub local_id: i64,
    pub remote_id: Option<String>,
    pub synced_hash: Option<String>,
    /// Collection path for conflict lookups, scoped to the parent resource
    /// (e.g. `orders/{rid}/items` or `workspaces/{ws}/orders`).
    pub lookup_path: String,
    /// Full payload for POST: translated fields, parent references,
    /// `externalSyncId` and `externalSource`.
    pub create_payload: Map<String, Value>,
    /// Payload for PUT: translated fields and `externalSyncId`.
    pub update_payload: Map<String, Value>,
}

/// Run the decision algorithm for one entity instance.
pub(crate) async fn push<C>(api: &C, db: &Database, target: &PushTarget) -> SyncResult<()>
where
    C: ApiClient + ?Sized,
{
    let hash = payload_hash(&target.update_payload)?;

    let Some(remote_id) = target.remote_id.as_deref() else {
        return create(api, db, target, &hash).await;
    };

    if target.synced_hash.as_deref() == Some(hash.as_str()) {
        debug!(
            entity = target.kind.name(),
            id = target.local_id,
            "payload unchanged since last push, skipping"
        );
        return Ok(());
    }

    let path = format!("{}/{}", target.kind.collection(), remote_id);
    match api
        .put(&path, Value::Object(target.update_payload.clone()))
        .await
    {
        Ok(_) => persist(db, target, remote_id, Some(&hash)),
        Err(e) if e.is_not_found() => {
            // The remote record was deleted externally; drop the stale link
            // and recreate once.
            debug!(
                entity = target.kind.name(),
                id = target.local_id,
                remote_id,
                "remote record is gone, recreating"
            );
            clear_remote_link(db, target)?;
            create(api, db, target, &hash).await
        }
        Err(e) => Err(e.into()),
    }
}

/// Create path: POST, recovering a used `externalSyncId` via lookup + update.
async fn create<C>(api: &C, db: &Database, target: &PushTarget, hash: &str) -> SyncResult<()>
where
    C: ApiClient + ?Sized,
{
    let collection = target.kind.collection();
    match api
        .post(collection, Value::Object(target.create_payload.clone()))
        .await
    {
        Ok(body) => {
            let remote_id = body
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| SyncError::Remote("create response carries no id".to_string()))?;
            persist(db, target, remote_id, Some(hash))
        }
        Err(e) if e.is_external_sync_id_conflict() => {
            let query = [("externalSyncId".to_string(), target.local_id.to_string())];
            let found = api.get(&target.lookup_path, &query).await?;
            let remote_id = protocol::first_member_id(&found).ok_or_else(|| {
                SyncError::Remote(format!(
                    "externalSyncId {} is already used but no matching record was found",
                    target.local_id
                ))
            })?;

            // Adopt the id first so the reconciled link survives even if the
            // follow-up update fails, then bring the remote record up to date.
            persist(db, target, &remote_id, None)?;
            let path = format!("{collection}/{remote_id}");
            api.put(&path, Value::Object(target.update_payload.clone()))
                .await?;
            persist(db, target, &remote_id, Some(hash))
        }
        Err(e) => Err(e.into()),
    }
}

/// Fingerprint of an update payload, hex-encoded SHA-256 of its JSON text.
pub(crate) fn payload_hash(payload: &Map<String, Value>) -> SyncResult<String> {
    let raw = serde_json::to_string(&Value::Object(payload.clone()))
        .map_err(|e| SyncError::Store(e.into()))?;
    let digest = Sha256::digest(raw.as_bytes());
    Ok(hex::encode(digest))
}

fn persist(db: &Database, target: &PushTarget, remote_id: &str, hash: Option<&str>) -> SyncResult<()> {
    let repo = Repository::new(db, target.kind);
    let mut fields = vec![("remote_id", text(remote_id))];
    if let Some(hash) = hash {
        fields.push(("synced_hash", text(hash)));
    }
    let affected = repo.update(&fields, &[("id", integer(target.local_id))])?;
    if affected == 0 {
        return Err(Error::NotFound {
            entity: target.kind.name(),
            id: target.local_id,
        }
        .into());
    }
    Ok(())
}

fn clear_remote_link(db: &Database, target: &PushTarget) -> SyncResult<()> {
    let repo = Repository::new(db, target.kind);
    repo.update(
        &[
            ("remote_id", rusqlite::types::Value::Null),
            ("synced_hash", rusqlite::types::Value::Null),
        ],
        &[("id", integer(target.local_id))],
    )?;
    Ok(())
}
