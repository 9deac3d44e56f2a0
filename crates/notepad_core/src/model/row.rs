//! Flat column-name to scalar mapping used to persist posts.
//!
//! # Invariants
//! - Column order is deterministic (sorted by name) so generated SQL is
//!   stable for the same row shape.
//! - `merge` only adds or replaces columns, it never removes one.

use crate::model::post::{PostError, PostResult};
use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};
use serde::Serialize;
use std::collections::BTreeMap;

pub const TYPE_COLUMN: &str = "type";
pub const CREATED_AT_COLUMN: &str = "created_at";
pub const TEXT_COLUMN: &str = "text";

/// One scalar cell as SQLite stores it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl RowValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<String> for RowValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for RowValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for RowValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<ValueRef<'_>> for RowValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(value) => Self::Integer(value),
            ValueRef::Real(value) => Self::Real(value),
            ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => Self::Text(text.to_string()),
                Err(_) => Self::Blob(bytes.to_vec()),
            },
            ValueRef::Blob(bytes) => Self::Blob(bytes.to_vec()),
        }
    }
}

impl ToSql for RowValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Owned(Value::Null),
            Self::Integer(value) => ToSqlOutput::Owned(Value::Integer(*value)),
            Self::Real(value) => ToSqlOutput::Owned(Value::Real(*value)),
            Self::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
            Self::Blob(value) => ToSqlOutput::Borrowed(ValueRef::Blob(value.as_slice())),
        })
    }
}

/// Persisted form of a post: `type`, `created_at` and variant columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    columns: BTreeMap<String, RowValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one column, returning the previous value if any.
    pub fn insert(
        &mut self,
        column: impl Into<String>,
        value: impl Into<RowValue>,
    ) -> Option<RowValue> {
        self.columns.insert(column.into(), value.into())
    }

    /// Builder form of [`Row::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RowValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Lays `other` on top of this row.
    pub fn merge(&mut self, other: Row) {
        self.columns.extend(other.columns);
    }

    pub fn get(&self, column: &str) -> Option<&RowValue> {
        self.columns.get(column)
    }

    /// Text value of `column`; `None` when missing, NULL or non-text.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(RowValue::as_text)
    }

    /// Text value of `column`; `None` when missing or NULL, an error for
    /// any other non-text value.
    pub fn optional_text(&self, column: &str) -> PostResult<Option<&str>> {
        match self.get(column) {
            None | Some(RowValue::Null) => Ok(None),
            Some(RowValue::Text(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(PostError::NonTextColumn(column.to_string())),
        }
    }

    /// Like [`Row::optional_text`] but reports a missing column as an error.
    pub fn require_text(&self, column: &str) -> PostResult<&str> {
        self.optional_text(column)?
            .ok_or_else(|| PostError::MissingColumn(column.to_string()))
    }

    /// Discriminator naming the variant this row belongs to.
    pub fn type_name(&self) -> Option<&str> {
        self.text(TYPE_COLUMN)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &RowValue> {
        self.columns.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValue)> {
        self.columns.iter().map(|(column, value)| (column.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, RowValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, RowValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
