// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Static field-name translation tables.
//!
//! One table per entity kind, mapping local column names to the remote
//! field names of the TrackMage API. Push payloads translate local→remote;
//! webhook application translates remote→local. Columns without an entry
//! (ids, fingerprints, timestamps) never cross the wire.

use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Number, Value};

use crate::entity::EntityKind;
use crate::repository::Row;

/// Local column ↔ remote field name pairs for one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    pairs: &'static [(&'static str, &'static str)],
}

const ORDER_FIELDS: FieldMap = FieldMap {
    pairs: &[
        ("number", "orderNumber"),
        ("status", "status"),
        ("email", "email"),
        ("total", "total"),
    ],
};

const ORDER_ITEM_FIELDS: FieldMap = FieldMap {
    pairs: &[
        ("product_name", "productName"),
        ("qty", "qty"),
        ("price", "price"),
        ("row_total", "rowTotal"),
    ],
};

const SHIPMENT_FIELDS: FieldMap = FieldMap {
    pairs: &[
        ("tracking_number", "trackingNumber"),
        ("carrier", "originCarrier"),
        ("status", "status"),
        ("email", "email"),
    ],
};

const SHIPMENT_ITEM_FIELDS: FieldMap = FieldMap {
    pairs: &[("qty", "qty")],
};

/// The translation table for an entity kind.
pub fn for_kind(kind: EntityKind) -> FieldMap {
    match kind {
        EntityKind::Order => ORDER_FIELDS,
        EntityKind::OrderItem => ORDER_ITEM_FIELDS,
        EntityKind::Shipment => SHIPMENT_FIELDS,
        EntityKind::ShipmentItem => SHIPMENT_ITEM_FIELDS,
    }
}

impl FieldMap {
    /// Remote field name for a local column, if the column is translated.
    pub fn remote_for(&self, local: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(l, _)| *l == local)
            .map(|(_, r)| *r)
    }

    /// Local column name for a remote field, if the field is translated.
    pub fn local_for(&self, remote: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(_, r)| *r == remote)
            .map(|(l, _)| *l)
    }

    /// Translate a local row into a remote JSON object.
    ///
    /// NULL columns are omitted rather than sent as JSON null; the remote
    /// API treats absent and null fields the same way on create/update.
    pub fn translate_row(&self, row: &Row) -> Map<String, Value> {
        let mut out = Map::new();
        for (local, remote) in self.pairs {
            if let Some(value) = row.get(*local).and_then(sql_to_json) {
                out.insert((*remote).to_string(), value);
            }
        }
        out
    }
}

fn sql_to_json(value: &SqlValue) -> Option<Value> {
    match value {
        SqlValue::Null => None,
        SqlValue::Integer(i) => Some(Value::Number(Number::from(*i))),
        SqlValue::Real(f) => Number::from_f64(*f).map(Value::Number),
        SqlValue::Text(s) => Some(Value::String(s.clone())),
        SqlValue::Blob(_) => None,
    }
}

/// Convert an inbound JSON value to a SQLite value for a local write.
pub fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlValue::Integer(i)
            } else {
                SqlValue::Real(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => SqlValue::Text(s.clone()),
        // Nested structures are stored as raw JSON text
        other => SqlValue::Text(other.to_string()),
    }
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
