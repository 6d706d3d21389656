// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Generic row repository over the local database.
//!
//! Every mirrored entity table is accessed through the same small contract:
//! `find`, `find_one_by`, `find_by`, `insert` (returns the stored row with
//! its id), `update` and `delete`. Filters are exact-match equality on
//! column names; column names are validated against the table's column set
//! before being interpolated into SQL.

use rusqlite::types::Value;
use rusqlite::ToSql;
use std::collections::BTreeMap;

use crate::db::Database;
use crate::entity::EntityKind;
use crate::error::{Error, Result};

/// A stored row: column name to SQLite value.
pub type Row = BTreeMap<String, Value>;

/// Shorthand for a TEXT value.
pub fn text(s: impl Into<String>) -> Value {
    Value::Text(s.into())
}

/// Shorthand for an INTEGER value.
pub fn integer(i: i64) -> Value {
    Value::Integer(i)
}

/// Read a column as text. `None` for NULL or missing columns.
pub fn row_str<'a>(row: &'a Row, column: &str) -> Option<&'a str> {
    match row.get(column) {
        Some(Value::Text(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Read a column as an integer. `None` for NULL or missing columns.
pub fn row_i64(row: &Row, column: &str) -> Option<i64> {
    match row.get(column) {
        Some(Value::Integer(i)) => Some(*i),
        _ => None,
    }
}

/// Row store for a single table.
pub struct Repository<'a> {
    db: &'a Database,
    table: &'static str,
    columns: &'static [&'static str],
}

impl<'a> Repository<'a> {
    /// Repository for one of the mirrored entity tables.
    pub fn new(db: &'a Database, kind: EntityKind) -> Self {
        Repository {
            db,
            table: kind.table(),
            columns: kind.columns(),
        }
    }

    /// Repository for the `logs` table.
    pub fn logs(db: &'a Database) -> Self {
        Repository {
            db,
            table: "logs",
            columns: &["id", "message", "context", "created_at"],
        }
    }

    /// Find a row by its local id.
    pub fn find(&self, id: i64) -> Result<Option<Row>> {
        self.find_one_by(&[("id", integer(id))])
    }

    /// Find the first row matching all filter columns.
    pub fn find_one_by(&self, filter: &[(&str, Value)]) -> Result<Option<Row>> {
        Ok(self.select(filter)?.into_iter().next())
    }

    /// Find all rows matching all filter columns (all rows for an empty filter).
    pub fn find_by(&self, filter: &[(&str, Value)]) -> Result<Vec<Row>> {
        self.select(filter)
    }

    /// Insert a row and return it as stored (including the assigned id).
    pub fn insert(&self, fields: &[(&str, Value)]) -> Result<Row> {
        self.check_columns(fields)?;

        if fields.is_empty() {
            let sql = format!("INSERT INTO {} DEFAULT VALUES", self.table);
            self.db.conn.execute(&sql, [])?;
        } else {
            let columns = fields.iter().map(|(c, _)| *c).collect::<Vec<_>>().join(", ");
            let placeholders = (1..=fields.len())
                .map(|i| format!("?{i}"))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table, columns, placeholders
            );
            let params = to_params(fields);
            self.db.conn.execute(&sql, params.as_slice())?;
        }

        let id = self.db.conn.last_insert_rowid();
        self.find(id)?.ok_or_else(|| {
            Error::CorruptedData(format!("inserted row {id} missing from {}", self.table))
        })
    }

    /// Update the given columns on all rows matching the filter.
    ///
    /// Returns the number of affected rows.
    pub fn update(&self, fields: &[(&str, Value)], filter: &[(&str, Value)]) -> Result<usize> {
        if fields.is_empty() {
            return Ok(0);
        }
        self.check_columns(fields)?;
        self.check_columns(filter)?;

        let assignments = fields
            .iter()
            .enumerate()
            .map(|(i, (c, _))| format!("{c} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("UPDATE {} SET {}", self.table, assignments);
        if !filter.is_empty() {
            let conditions = filter
                .iter()
                .enumerate()
                .map(|(i, (c, _))| format!("{c} = ?{}", fields.len() + i + 1))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&conditions);
        }

        let mut params = to_params(fields);
        params.extend(to_params(filter));
        let affected = self.db.conn.execute(&sql, params.as_slice())?;
        Ok(affected)
    }

    /// Delete all rows matching the filter (all rows for an empty filter).
    ///
    /// Returns the number of affected rows.
    pub fn delete(&self, filter: &[(&str, Value)]) -> Result<usize> {
        self.check_columns(filter)?;

        let mut sql = format!("DELETE FROM {}", self.table);
        if !filter.is_empty() {
            let conditions = filter
                .iter()
                .enumerate()
                .map(|(i, (c, _))| format!("{c} = ?{}", i + 1))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&conditions);
        }

        let params = to_params(filter);
        let affected = self.db.conn.execute(&sql, params.as_slice())?;
        Ok(affected)
    }

    fn select(&self, filter: &[(&str, Value)]) -> Result<Vec<Row>> {
        self.check_columns(filter)?;

        let mut sql = format!("SELECT * FROM {}", self.table);
        if !filter.is_empty() {
            let conditions = filter
                .iter()
                .enumerate()
                .map(|(i, (c, _))| format!("{c} = ?{}", i + 1))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&conditions);
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = self.db.conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let params = to_params(filter);

        let rows = stmt
            .query_map(params.as_slice(), |row| {
                let mut map = Row::new();
                for (i, name) in names.iter().enumerate() {
                    map.insert(name.clone(), row.get::<_, Value>(i)?);
                }
                Ok(map)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Reject column names not belonging to this table before they reach SQL.
    fn check_columns(&self, pairs: &[(&str, Value)]) -> Result<()> {
        for (column, _) in pairs {
            if !self.columns.iter().any(|c| c == column) {
                return Err(Error::UnknownColumn(format!("{}.{column}", self.table)));
            }
        }
        Ok(())
    }
}

fn to_params<'p>(pairs: &'p [(&str, Value)]) -> Vec<&'p dyn ToSql> {
    pairs.iter().map(|(_, v)| v as &dyn ToSql).collect()
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
