// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed database for local shop storage.
//!
//! The [`Database`] struct owns the connection used by the entity
//! repositories, the synchronizers and the webhook mappers. Every table
//! that mirrors a remote resource carries a nullable `remote_id` (the id
//! assigned by TrackMage once synced) and a `synced_hash` (fingerprint of
//! the last successfully pushed payload).

use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::Result;

/// SQL schema for the local shop database.
pub const SCHEMA: &str = r#"
-- Shop orders; status is the shop-side status string ("pending", "completed", ...)
CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    email TEXT,
    total TEXT,
    remote_id TEXT,
    synced_hash TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Line items of an order
CREATE TABLE IF NOT EXISTS order_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL,
    product_name TEXT NOT NULL,
    qty INTEGER NOT NULL DEFAULT 1,
    price TEXT,
    row_total TEXT,
    remote_id TEXT,
    synced_hash TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (order_id) REFERENCES orders(id)
);

-- Shipments created for an order
CREATE TABLE IF NOT EXISTS shipments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL,
    tracking_number TEXT,
    carrier TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    email TEXT,
    remote_id TEXT,
    synced_hash TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (order_id) REFERENCES orders(id)
);

-- Order items packed into a shipment
CREATE TABLE IF NOT EXISTS shipment_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    shipment_id INTEGER NOT NULL,
    order_item_id INTEGER NOT NULL,
    qty INTEGER NOT NULL DEFAULT 1,
    remote_id TEXT,
    synced_hash TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (shipment_id) REFERENCES shipments(id),
    FOREIGN KEY (order_item_id) REFERENCES order_items(id)
);

-- Plain message log (sync failures, webhook rejections)
CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    message TEXT NOT NULL,
    context TEXT,
    created_at TEXT NOT NULL
);

-- At most one local row per remote id within an installation
CREATE UNIQUE INDEX IF NOT EXISTS idx_orders_remote_id
    ON orders(remote_id) WHERE remote_id IS NOT NULL;
CREATE UNIQUE INDEX IF NOT EXISTS idx_order_items_remote_id
    ON order_items(remote_id) WHERE remote_id IS NOT NULL;
CREATE UNIQUE INDEX IF NOT EXISTS idx_shipments_remote_id
    ON shipments(remote_id) WHERE remote_id IS NOT NULL;
CREATE UNIQUE INDEX IF NOT EXISTS idx_shipment_items_remote_id
    ON shipment_items(remote_id) WHERE remote_id IS NOT NULL;

-- Indexes
CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id);
CREATE INDEX IF NOT EXISTS idx_shipments_order ON shipments(order_id);
CREATE INDEX IF NOT EXISTS idx_shipment_items_shipment ON shipment_items(shipment_id);
"#;

/// Run schema creation and all migrations on a database connection.
///
/// This is the single migration path for all crates (core, CLI, endpoint).
/// It applies the canonical schema and runs idempotent migrations to upgrade
/// older databases that may be missing columns.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_synced_hash(conn)?;
    Ok(())
}

/// Migration: Add `synced_hash` columns to databases created before the
/// payload-fingerprint dedup existed.
fn migrate_add_synced_hash(conn: &Connection) -> Result<()> {
    for table in ["orders", "order_items", "shipments", "shipment_items"] {
        let has_column: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM pragma_table_info(?1) WHERE name = 'synced_hash'",
                [table],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !has_column {
            let sql = format!("ALTER TABLE {table} ADD COLUMN synced_hash TEXT");
            conn.execute(&sql, [])?;
        }
    }
    Ok(())
}

/// SQLite database connection for the local shop store.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() && !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrency
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Append a message to the `logs` table.
    pub fn log(&self, message: &str, context: &serde_json::Value) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO logs (message, context, created_at) VALUES (?1, ?2, ?3)",
            params![message, context.to_string(), Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
