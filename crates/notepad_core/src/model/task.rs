//! Dated task with a countdown to its deadline.
//!
//! # Invariants
//! - `due_date` is a calendar date without time of day.
//! - The `due_date` column holds the rendered countdown, not a date; the raw
//!   date travels in `due_on`. Rows without `due_on` fall back to parsing
//!   `due_date`, which fails for countdown text.

use crate::model::countdown::Countdown;
use crate::model::dates::parse_date;
use crate::model::intake::Intake;
use crate::model::post::{Post, PostBase, PostResult};
use crate::model::row::{Row, TEXT_COLUMN};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::any::Any;

pub const DUE_DATE_COLUMN: &str = "due_date";
pub const DUE_ON_COLUMN: &str = "due_on";
pub const TASK_EVENT_LABEL: &str = "deadline";

const DEADLINE_FORMAT: &str = "%Y.%m.%d";
const DUE_ON_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    base: PostBase,
    due_date: NaiveDate,
    event_label: &'static str,
}

impl Task {
    /// New task due today.
    pub fn new() -> Self {
        let base = PostBase::new();
        let due_date = base.created_at().date_naive();
        Self {
            base,
            due_date,
            event_label: TASK_EVENT_LABEL,
        }
    }

    pub fn with_details(body: impl Into<String>, due_date: NaiveDate) -> Self {
        let mut task = Self::new();
        task.base.body = body.into();
        task.due_date = due_date;
        task
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn set_due_date(&mut self, due_date: NaiveDate) {
        self.due_date = due_date;
    }

    pub fn event_label(&self) -> &'static str {
        self.event_label
    }

    pub fn countdown_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Countdown {
        Countdown::compute(self.due_date, now)
    }

    /// Rendered countdown relative to `now`.
    pub fn remaining_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        self.countdown_at(now).render(self.event_label)
    }

    pub fn remaining(&self) -> String {
        self.remaining_at(&Local::now())
    }

    pub fn lines_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<String> {
        vec![
            format!("Deadline: {}", self.due_date.format(DEADLINE_FORMAT)),
            self.remaining_at(now),
            self.base.body.clone(),
            self.base.created_line(),
        ]
    }

    pub fn row_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Row {
        let mut row = self.base.to_row(self.type_name());
        row.merge(
            Row::new()
                .with(TEXT_COLUMN, self.base.body.as_str())
                .with(DUE_DATE_COLUMN, self.remaining_at(now))
                .with(DUE_ON_COLUMN, self.due_date.format(DUE_ON_FORMAT).to_string()),
        );
        row
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}

impl Post for Task {
    fn type_name(&self) -> &'static str {
        "Task"
    }

    fn base(&self) -> &PostBase {
        &self.base
    }

    fn read_from_console(&mut self, intake: &mut dyn Intake) -> PostResult<()> {
        self.base.body = intake.ask("What needs to be done?")?;
        let input = intake.ask("Due by which date? Use DD.MM.YYYY, for example 12.05.2003")?;
        self.set_due_date(parse_date(&input)?);
        Ok(())
    }

    fn to_lines(&self) -> Vec<String> {
        self.lines_at(&Local::now())
    }

    fn to_row(&self) -> Row {
        self.row_at(&Local::now())
    }

    fn load_row(&mut self, row: &Row) -> PostResult<()> {
        self.base.load_row(row)?;
        let raw = match row.optional_text(DUE_ON_COLUMN)? {
            Some(value) => value,
            None => row.require_text(DUE_DATE_COLUMN)?,
        };
        self.set_due_date(parse_date(raw)?);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
