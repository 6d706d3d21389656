// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mirrored entity kinds and typed row views.
//!
//! The repository hands out generic rows; the synchronizers read them
//! through the typed views below. Local ids are authoritative and
//! immutable; `remote_id` is the TrackMage-assigned id once a row has been
//! synced (NULL means never synced).

use crate::error::{Error, Result};
use crate::repository::{row_i64, row_str, Row};

/// The four entity types mirrored to the remote platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Order,
    OrderItem,
    Shipment,
    ShipmentItem,
}

impl EntityKind {
    /// Remote collection name, as used in API paths and webhook payloads.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Order => "orders",
            EntityKind::OrderItem => "order_items",
            EntityKind::Shipment => "shipments",
            EntityKind::ShipmentItem => "shipment_items",
        }
    }

    /// Local table name. Identical to the collection name by design of the schema.
    pub fn table(&self) -> &'static str {
        self.collection()
    }

    /// Columns of the local table, used to validate repository filters.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Order => &[
                "id",
                "number",
                "status",
                "email",
                "total",
                "remote_id",
                "synced_hash",
                "created_at",
                "updated_at",
            ],
            EntityKind::OrderItem => &[
                "id",
                "order_id",
                "product_name",
                "qty",
                "price",
                "row_total",
                "remote_id",
                "synced_hash",
                "created_at",
                "updated_at",
            ],
            EntityKind::Shipment => &[
                "id",
                "order_id",
                "tracking_number",
                "carrier",
                "status",
                "email",
                "remote_id",
                "synced_hash",
                "created_at",
                "updated_at",
            ],
            EntityKind::ShipmentItem => &[
                "id",
                "shipment_id",
                "order_item_id",
                "qty",
                "remote_id",
                "synced_hash",
                "created_at",
                "updated_at",
            ],
        }
    }

    /// Parse an entity kind from a collection name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "orders" => Some(EntityKind::Order),
            "order_items" => Some(EntityKind::OrderItem),
            "shipments" => Some(EntityKind::Shipment),
            "shipment_items" => Some(EntityKind::ShipmentItem),
            _ => None,
        }
    }

    /// Singular human-readable name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Order => "order",
            EntityKind::OrderItem => "order item",
            EntityKind::Shipment => "shipment",
            EntityKind::ShipmentItem => "shipment item",
        }
    }
}

fn required_i64(row: &Row, kind: EntityKind, column: &str) -> Result<i64> {
    row_i64(row, column).ok_or_else(|| {
        Error::CorruptedData(format!("missing '{column}' in {} row", kind.table()))
    })
}

fn required_str(row: &Row, kind: EntityKind, column: &str) -> Result<String> {
    row_str(row, column).map(String::from).ok_or_else(|| {
        Error::CorruptedData(format!("missing '{column}' in {} row", kind.table()))
    })
}

fn optional_str(row: &Row, column: &str) -> Option<String> {
    row_str(row, column).map(String::from)
}

/// Typed view of an `orders` row.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub number: String,
    pub status: String,
    pub email: Option<String>,
    pub total: Option<String>,
    pub remote_id: Option<String>,
    pub synced_hash: Option<String>,
}

impl Order {
    pub fn from_row(row: &Row) -> Result<Self> {
        let kind = EntityKind::Order;
        Ok(Order {
            id: required_i64(row, kind, "id")?,
            number: required_str(row, kind, "number")?,
            status: required_str(row, kind, "status")?,
            email: optional_str(row, "email"),
            total: optional_str(row, "total"),
            remote_id: optional_str(row, "remote_id"),
            synced_hash: optional_str(row, "synced_hash"),
        })
    }
}

/// Typed view of an `order_items` row.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_name: String,
    pub qty: i64,
    pub price: Option<String>,
    pub row_total: Option<String>,
    pub remote_id: Option<String>,
    pub synced_hash: Option<String>,
}

impl OrderItem {
    pub fn from_row(row: &Row) -> Result<Self> {
        let kind = EntityKind::OrderItem;
        Ok(OrderItem {
            id: required_i64(row, kind, "id")?,
            order_id: required_i64(row, kind, "order_id")?,
            product_name: required_str(row, kind, "product_name")?,
            qty: required_i64(row, kind, "qty")?,
            price: optional_str(row, "price"),
            row_total: optional_str(row, "row_total"),
            remote_id: optional_str(row, "remote_id"),
            synced_hash: optional_str(row, "synced_hash"),
        })
    }
}

/// Typed view of a `shipments` row.
#[derive(Debug, Clone)]
pub struct Shipment {
    pub id: i64,
    pub order_id: i64,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub status: String,
    pub email: Option<String>,
    pub remote_id: Option<String>,
    pub synced_hash: Option<String>,
}

impl Shipment {
    pub fn from_row(row: &Row) -> Result<Self> {
        let kind = EntityKind::Shipment;
        Ok(Shipment {
            id: required_i64(row, kind, "id")?,
            order_id: required_i64(row, kind, "order_id")?,
            tracking_number: optional_str(row, "tracking_number"),
            carrier: optional_str(row, "carrier"),
            status: required_str(row, kind, "status")?,
            email: optional_str(row, "email"),
            remote_id: optional_str(row, "remote_id"),
            synced_hash: optional_str(row, "synced_hash"),
        })
    }
}

/// Typed view of a `shipment_items` row.
#[derive(Debug, Clone)]
pub struct ShipmentItem {
    pub id: i64,
    pub shipment_id: i64,
    pub order_item_id: i64,
    pub qty: i64,
    pub remote_id: Option<String>,
    pub synced_hash: Option<String>,
}

impl ShipmentItem {
    pub fn from_row(row: &Row) -> Result<Self> {
        let kind = EntityKind::ShipmentItem;
        Ok(ShipmentItem {
            id: required_i64(row, kind, "id")?,
            shipment_id: required_i64(row, kind, "shipment_id")?,
            order_item_id: required_i64(row, kind, "order_item_id")?,
            qty: required_i64(row, kind, "qty")?,
            remote_id: optional_str(row, "remote_id"),
            synced_hash: optional_str(row, "synced_hash"),
        })
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
