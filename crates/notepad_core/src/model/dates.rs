//! Calendar date parsing for console input and persisted columns.
//!
//! Accepted shapes are day-first (`31.12.2025`, `31-12-2025`, `31/12/2025`)
//! and year-first (`2025-12-31`, `2025.12.31`, `2025/12/31`).

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DAY_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[./-](\d{1,2})[./-](\d{4})$").expect("valid day-first date regex")
});
static YEAR_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})[./-](\d{1,2})[./-](\d{1,2})$").expect("valid year-first date regex")
});

/// Input did not name a real calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot parse `{}` as a date", self.input)
    }
}

impl Error for DateParseError {}

/// Parses a calendar date written day-first or year-first.
///
/// # Errors
/// - Returns `DateParseError` for any other shape, or for numbers that do not
///   form a real date (`31.02.2025`).
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    let fail = || DateParseError {
        input: trimmed.to_string(),
    };

    let (year, month, day) = if let Some(caps) = DAY_FIRST_RE.captures(trimmed) {
        date_parts(&caps[3], &caps[2], &caps[1]).ok_or_else(fail)?
    } else if let Some(caps) = YEAR_FIRST_RE.captures(trimmed) {
        date_parts(&caps[1], &caps[2], &caps[3]).ok_or_else(fail)?
    } else {
        return Err(fail());
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(fail)
}

fn date_parts(year: &str, month: &str, day: &str) -> Option<(i32, u32, u32)> {
    Some((year.parse().ok()?, month.parse().ok()?, day.parse().ok()?))
}
