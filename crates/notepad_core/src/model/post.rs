//! Post contract shared by every record variant.
//!
//! # Responsibility
//! - Define the `Post` trait implemented by memo/task/link variants.
//! - Own the base fields (`created_at`, `body`) and their row mapping.
//!
//! # Invariants
//! - `created_at` is fixed at construction (whole seconds) and only replaced
//!   when a persisted row is loaded into a fresh instance.
//! - Variant rows always start from `PostBase::to_row` and never drop its
//!   columns.

use crate::model::dates::DateParseError;
use crate::model::intake::Intake;
use crate::model::row::{Row, CREATED_AT_COLUMN, TEXT_COLUMN, TYPE_COLUMN};
use chrono::{DateTime, Local, SubsecRound};
use std::any::Any;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::io;

/// Storage format of `created_at`, e.g. `2015-07-26 15:38:26 +0300`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
const CREATED_LINE_FORMAT: &str = "%Y.%m.%d, %H:%M:%S";

pub type PostResult<T> = Result<T, PostError>;

/// Errors raised while filling or restoring a post.
#[derive(Debug)]
pub enum PostError {
    DateParse(DateParseError),
    InvalidTimestamp(String),
    MissingColumn(String),
    NonTextColumn(String),
    InputClosed,
    Io(io::Error),
}

impl Display for PostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParse(err) => write!(f, "{err}"),
            Self::InvalidTimestamp(value) => write!(f, "invalid created_at timestamp `{value}`"),
            Self::MissingColumn(column) => write!(f, "row has no value in column `{column}`"),
            Self::NonTextColumn(column) => write!(f, "column `{column}` does not hold text"),
            Self::InputClosed => write!(f, "input closed before an answer was given"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DateParse(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DateParseError> for PostError {
    fn from(value: DateParseError) -> Self {
        Self::DateParse(value)
    }
}

impl From<io::Error> for PostError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Capability set every record variant implements.
pub trait Post: Debug + Any {
    /// Discriminator stored in the `type` column.
    fn type_name(&self) -> &'static str;

    fn base(&self) -> &PostBase;

    /// Fills variant fields from an interactive source.
    fn read_from_console(&mut self, intake: &mut dyn Intake) -> PostResult<()>;

    /// Display lines, in export order.
    fn to_lines(&self) -> Vec<String>;

    /// Row for insertion: base columns plus variant columns.
    fn to_row(&self) -> Row;

    /// Restores this instance from a persisted row.
    fn load_row(&mut self, row: &Row) -> PostResult<()>;

    fn as_any(&self) -> &dyn Any;
}

impl dyn Post {
    pub fn downcast_ref<T: Post>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Post>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.base().created_at()
    }

    pub fn body(&self) -> &str {
        &self.base().body
    }
}

/// Fields every variant carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBase {
    created_at: DateTime<Local>,
    pub body: String,
}

impl PostBase {
    pub fn new() -> Self {
        Self {
            created_at: Local::now().trunc_subsecs(0),
            body: String::new(),
        }
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// `created_at` in its storage form.
    pub fn created_at_text(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }

    /// Trailing `Created: ...` display line; the newline leaves a blank line
    /// after each exported post.
    pub fn created_line(&self) -> String {
        format!("Created: {}\n", self.created_at.format(CREATED_LINE_FORMAT))
    }

    /// Base columns shared by all variants.
    pub fn to_row(&self, type_name: &str) -> Row {
        Row::new()
            .with(TYPE_COLUMN, type_name)
            .with(CREATED_AT_COLUMN, self.created_at_text())
    }

    /// Restores `created_at` and `body`; a missing or NULL `text` reads as
    /// empty.
    pub fn load_row(&mut self, row: &Row) -> PostResult<()> {
        self.created_at = parse_created_at(row.require_text(CREATED_AT_COLUMN)?)?;
        self.body = row.optional_text(TEXT_COLUMN)?.unwrap_or_default().to_string();
        Ok(())
    }
}

impl Default for PostBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a stored `created_at`, accepting RFC 3339 as well.
pub fn parse_created_at(value: &str) -> PostResult<DateTime<Local>> {
    let trimmed = value.trim();
    DateTime::parse_from_str(trimmed, CREATED_AT_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .map(|parsed| parsed.with_timezone(&Local))
        .map_err(|_| PostError::InvalidTimestamp(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_created_at, PostBase, PostError};
    use crate::model::row::Row;
    use chrono::Timelike;

    #[test]
    fn new_base_has_empty_body_and_whole_second_timestamp() {
        let base = PostBase::new();
        assert!(base.body.is_empty());
        assert_eq!(base.created_at().nanosecond(), 0);
    }

    #[test]
    fn base_row_roundtrips_created_at_and_body() {
        let mut original = PostBase::new();
        original.body = "hello".to_string();
        let row = original.to_row("Memo").with("text", "hello");

        let mut restored = PostBase::new();
        restored.load_row(&row).unwrap();
        assert_eq!(restored, original);
        assert_eq!(row.type_name(), Some("Memo"));
    }

    #[test]
    fn parses_storage_and_rfc3339_timestamps() {
        let stored = parse_created_at("2015-07-26 15:38:26 +0300").unwrap();
        let rfc = parse_created_at("2015-07-26T12:38:26Z").unwrap();
        assert_eq!(stored, rfc);
    }

    #[test]
    fn load_row_rejects_garbage_timestamp() {
        let row = Row::new().with("created_at", "yesterday");
        let err = PostBase::new().load_row(&row).unwrap_err();
        assert!(matches!(err, PostError::InvalidTimestamp(value) if value == "yesterday"));
    }
}
