//! Post store contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert posts as rows, look them up by id, list raw rows by type/limit.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every operation opens its own connection and drops it before returning,
//!   on success and on error alike.
//! - Listing is always newest first (`rowid DESC`).
//! - A missing id is `Ok(None)`, never an error.

use crate::config::StoreConfig;
use crate::db::{open_db, DbError};
use crate::model::post::{Post, PostError};
use crate::model::row::{Row, RowValue, TYPE_COLUMN};
use crate::registry::{PostRegistry, RegistryError};
use log::{debug, error, info, warn};
use rusqlite::{params_from_iter, Connection, Statement};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// SQLite `rowid` of a stored post.
pub type PostId = i64;

const ID_ALIAS: &str = "id";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error taxonomy.
#[derive(Debug)]
pub enum StoreError {
    /// Statement preparation or execution failed in the backend.
    Db(DbError),
    /// Stored discriminator has no registered variant.
    UnknownVariant(RegistryError),
    /// Row could not be loaded into its variant.
    Post(PostError),
    /// Row column name is not a plain identifier.
    InvalidColumn(String),
    /// Stored row violates the table shape (e.g. no `type`).
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "database query failed: {err}"),
            Self::UnknownVariant(err) => write!(f, "{err}"),
            Self::Post(err) => write!(f, "invalid stored post: {err}"),
            Self::InvalidColumn(column) => write!(f, "invalid column name `{column}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted post data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UnknownVariant(err) => Some(err),
            Self::Post(err) => Some(err),
            Self::InvalidColumn(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RegistryError> for StoreError {
    fn from(value: RegistryError) -> Self {
        Self::UnknownVariant(value)
    }
}

impl From<PostError> for StoreError {
    fn from(value: PostError) -> Self {
        Self::Post(value)
    }
}

/// Filter for listing raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Only rows whose `type` equals this discriminator.
    pub kind: Option<String>,
    /// Maximum number of rows returned.
    pub limit: Option<u32>,
}

impl PostFilter {
    pub fn of_type(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Raw stored row plus its identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRow {
    pub id: PostId,
    #[serde(flatten)]
    pub columns: Row,
}

impl StoredRow {
    pub fn type_name(&self) -> Option<&str> {
        self.columns.type_name()
    }
}

/// Persistence boundary for posts.
pub trait PostStore {
    /// Inserts one post and returns the backend-assigned id.
    fn insert(&self, post: &dyn Post) -> StoreResult<PostId>;

    /// Loads one post; `None` when no row has this id.
    fn find_by_id(&self, id: PostId) -> StoreResult<Option<Box<dyn Post>>>;

    /// Lists raw rows, newest first. Rows are not turned back into posts.
    fn find_many(&self, filter: &PostFilter) -> StoreResult<Vec<StoredRow>>;
}

/// SQLite-backed post store opening one connection per operation.
#[derive(Debug, Clone)]
pub struct SqlitePostStore {
    config: StoreConfig,
    registry: PostRegistry,
}

impl SqlitePostStore {
    /// Store over `config` resolving the built-in variants.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_registry(config, PostRegistry::with_default_types())
    }

    pub fn with_registry(config: StoreConfig, registry: PostRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn registry(&self) -> &PostRegistry {
        &self.registry
    }

    fn connect(&self) -> StoreResult<Connection> {
        Ok(open_db(self.config.db_path())?)
    }

    fn query_rows(&self, sql: &str, bind_values: &[RowValue]) -> StoreResult<Vec<StoredRow>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        read_rows(&mut stmt, bind_values)
    }

    /// Rebuilds the variant named by the row's discriminator.
    fn restore(&self, stored: &StoredRow) -> StoreResult<Box<dyn Post>> {
        let type_name = stored.type_name().ok_or_else(|| {
            StoreError::InvalidData(format!("row {} has no `{TYPE_COLUMN}` value", stored.id))
        })?;
        let mut post = self.registry.create(type_name)?;
        post.load_row(&stored.columns)?;
        Ok(post)
    }
}

impl PostStore for SqlitePostStore {
    fn insert(&self, post: &dyn Post) -> StoreResult<PostId> {
        let started_at = Instant::now();
        let row = post.to_row();
        let sql = insert_sql(&row)?;

        let conn = self.connect()?;
        if let Err(err) = conn.execute(&sql, params_from_iter(row.values())) {
            error!(
                "event=post_insert module=repo status=error type={} error={}",
                post.type_name(),
                err
            );
            return Err(err.into());
        }
        let id = conn.last_insert_rowid();

        info!(
            "event=post_insert module=repo status=ok type={} id={} duration_ms={}",
            post.type_name(),
            id,
            started_at.elapsed().as_millis()
        );
        Ok(id)
    }

    fn find_by_id(&self, id: PostId) -> StoreResult<Option<Box<dyn Post>>> {
        let sql = format!("SELECT rowid AS {ID_ALIAS}, * FROM posts WHERE rowid = ?1;");
        let mut rows = self
            .query_rows(&sql, &[RowValue::Integer(id)])
            .map_err(|err| {
                error!("event=post_find module=repo status=error id={id} error={err}");
                err
            })?;

        let Some(stored) = rows.pop() else {
            warn!("event=post_find module=repo status=not_found id={id}");
            return Ok(None);
        };

        let post = self.restore(&stored).map_err(|err| {
            error!("event=post_find module=repo status=error id={id} error={err}");
            err
        })?;

        debug!(
            "event=post_find module=repo status=ok type={} id={}",
            post.type_name(),
            id
        );
        Ok(Some(post))
    }

    fn find_many(&self, filter: &PostFilter) -> StoreResult<Vec<StoredRow>> {
        let mut sql = format!("SELECT rowid AS {ID_ALIAS}, * FROM posts");
        let mut bind_values: Vec<RowValue> = Vec::new();

        if let Some(kind) = &filter.kind {
            sql.push_str(" WHERE type = ?");
            bind_values.push(RowValue::from(kind.as_str()));
        }

        sql.push_str(" ORDER BY rowid DESC");

        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(RowValue::Integer(i64::from(limit)));
        }

        let type_label = filter.kind.as_deref().unwrap_or("*");
        let rows = self.query_rows(&sql, &bind_values).map_err(|err| {
            error!("event=post_list module=repo status=error type={type_label} error={err}");
            err
        })?;

        debug!(
            "event=post_list module=repo status=ok type={} limit={} count={}",
            type_label,
            filter
                .limit
                .map_or_else(|| "none".to_string(), |limit| limit.to_string()),
            rows.len()
        );
        Ok(rows)
    }
}

fn insert_sql(row: &Row) -> StoreResult<String> {
    let mut columns = Vec::with_capacity(row.len());
    for column in row.columns() {
        if !is_valid_column(column) {
            return Err(StoreError::InvalidColumn(column.to_string()));
        }
        columns.push(column);
    }
    if columns.is_empty() {
        return Err(StoreError::InvalidData("post produced an empty row".to_string()));
    }

    let placeholders = (1..=columns.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "INSERT INTO posts ({}) VALUES ({placeholders});",
        columns.join(", ")
    ))
}

fn read_rows(stmt: &mut Statement<'_>, bind_values: &[RowValue]) -> StoreResult<Vec<StoredRow>> {
    let column_names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut stored = Vec::new();
    while let Some(row) = rows.next()? {
        let mut id: Option<PostId> = None;
        let mut columns = Row::new();
        for (index, name) in column_names.iter().enumerate() {
            if name == ID_ALIAS && id.is_none() {
                id = Some(row.get(index)?);
            } else {
                columns.insert(name.clone(), RowValue::from(row.get_ref(index)?));
            }
        }
        let id = id.ok_or_else(|| StoreError::InvalidData("row without rowid".to_string()))?;
        stored.push(StoredRow { id, columns });
    }

    Ok(stored)
}

fn is_valid_column(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first == '_' => chars
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{insert_sql, is_valid_column, StoreError};
    use crate::model::row::Row;

    #[test]
    fn insert_sql_lists_columns_in_row_order() {
        let row = Row::new()
            .with("type", "Memo")
            .with("created_at", "2025-01-02 03:04:05 +0000")
            .with("text", "hi");
        assert_eq!(
            insert_sql(&row).unwrap(),
            "INSERT INTO posts (created_at, text, type) VALUES (?1, ?2, ?3);"
        );
    }

    #[test]
    fn insert_sql_rejects_non_identifier_columns() {
        let row = Row::new().with("type; DROP TABLE posts", "Memo");
        let err = insert_sql(&row).unwrap_err();
        assert!(matches!(err, StoreError::InvalidColumn(_)));
    }

    #[test]
    fn column_names_are_lowercase_identifiers() {
        assert!(is_valid_column("due_date"));
        assert!(is_valid_column("_x1"));
        assert!(!is_valid_column(""));
        assert!(!is_valid_column("1st"));
        assert!(!is_valid_column("Due"));
    }
}
