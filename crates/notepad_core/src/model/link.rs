//! Bookmark: an address plus a short description.

use crate::model::intake::Intake;
use crate::model::post::{Post, PostBase, PostResult};
use crate::model::row::{Row, TEXT_COLUMN};
use std::any::Any;

pub const URL_COLUMN: &str = "url";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    base: PostBase,
    pub url: String,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_details(url: impl Into<String>, body: impl Into<String>) -> Self {
        let mut link = Self::new();
        link.url = url.into();
        link.base.body = body.into();
        link
    }
}

impl Post for Link {
    fn type_name(&self) -> &'static str {
        "Link"
    }

    fn base(&self) -> &PostBase {
        &self.base
    }

    fn read_from_console(&mut self, intake: &mut dyn Intake) -> PostResult<()> {
        self.url = intake.ask("Link address:")?;
        self.base.body = intake.ask("What is behind this link?")?;
        Ok(())
    }

    fn to_lines(&self) -> Vec<String> {
        vec![
            format!("Link: {}", self.url),
            self.base.body.clone(),
            self.base.created_line(),
        ]
    }

    fn to_row(&self) -> Row {
        let mut row = self.base.to_row(self.type_name());
        row.merge(
            Row::new()
                .with(TEXT_COLUMN, self.base.body.as_str())
                .with(URL_COLUMN, self.url.as_str()),
        );
        row
    }

    fn load_row(&mut self, row: &Row) -> PostResult<()> {
        self.base.load_row(row)?;
        self.url = row.require_text(URL_COLUMN)?.to_string();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Link;
    use crate::model::intake::ConsoleIntake;
    use crate::model::post::{Post, PostError};
    use crate::model::row::Row;
    use std::io::Cursor;

    #[test]
    fn intake_reads_url_then_description() {
        let input = Cursor::new("https://www.rust-lang.org\nRust home\n");
        let mut intake = ConsoleIntake::new(input, Vec::new());
        let mut link = Link::new();
        link.read_from_console(&mut intake).unwrap();

        assert_eq!(link.url, "https://www.rust-lang.org");
        assert_eq!(link.base().body, "Rust home");
    }

    #[test]
    fn lines_start_with_address() {
        let link = Link::with_details("https://docs.rs", "crate docs");
        let lines = link.to_lines();
        assert_eq!(lines[0], "Link: https://docs.rs");
        assert_eq!(lines[1], "crate docs");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn row_roundtrip_restores_url_and_base() {
        let link = Link::with_details("https://docs.rs", "crate docs");
        let row = link.to_row();
        assert_eq!(row.text("url"), Some("https://docs.rs"));

        let mut restored = Link::new();
        restored.load_row(&row).unwrap();
        assert_eq!(restored, link);
    }

    #[test]
    fn row_without_url_is_rejected() {
        let row = Row::new()
            .with("type", "Link")
            .with("created_at", "2025-01-02 03:04:05 +0000");
        let err = Link::new().load_row(&row).unwrap_err();
        assert!(matches!(err, PostError::MissingColumn(column) if column == "url"));
    }
}
