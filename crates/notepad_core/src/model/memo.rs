//! Free-form memo: body text only.

use crate::model::intake::Intake;
use crate::model::post::{Post, PostBase, PostResult};
use crate::model::row::{Row, TEXT_COLUMN};
use std::any::Any;

/// Line that finishes multi-line memo input.
pub const MEMO_TERMINATOR: &str = "end";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memo {
    base: PostBase,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(body: impl Into<String>) -> Self {
        let mut memo = Self::new();
        memo.base.body = body.into();
        memo
    }
}

impl Post for Memo {
    fn type_name(&self) -> &'static str {
        "Memo"
    }

    fn base(&self) -> &PostBase {
        &self.base
    }

    fn read_from_console(&mut self, intake: &mut dyn Intake) -> PostResult<()> {
        intake.prompt(&format!(
            "New memo (everything up to a line containing only \"{MEMO_TERMINATOR}\"):"
        ))?;

        let mut lines = Vec::new();
        while let Some(line) = intake.read_line()? {
            if line == MEMO_TERMINATOR {
                break;
            }
            lines.push(line);
        }

        self.base.body = lines.join("\n");
        Ok(())
    }

    fn to_lines(&self) -> Vec<String> {
        vec![self.base.body.clone(), self.base.created_line()]
    }

    fn to_row(&self) -> Row {
        let mut row = self.base.to_row(self.type_name());
        row.merge(Row::new().with(TEXT_COLUMN, self.base.body.as_str()));
        row
    }

    fn load_row(&mut self, row: &Row) -> PostResult<()> {
        self.base.load_row(row)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
