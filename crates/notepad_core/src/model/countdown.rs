//! Day/hour/minute/second countdown towards (or since) a calendar date.
//!
//! # Invariants
//! - A countdown always carries exactly four parts, ordered day, hour,
//!   minute, second.
//! - The target date is measured from its midnight in the wall clock of `now`.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use serde::Serialize;

const UNIT_ORDER: [TimeUnit; 4] = [
    TimeUnit::Day,
    TimeUnit::Hour,
    TimeUnit::Minute,
    TimeUnit::Second,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }

    fn seconds(self) -> u64 {
        match self {
            Self::Day => 24 * 60 * 60,
            Self::Hour => 60 * 60,
            Self::Minute => 60,
            Self::Second => 1,
        }
    }
}

/// Whether the target lies behind (`Since`) or ahead of (`Until`) now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Since,
    Until,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Since => "since",
            Self::Until => "until",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownPart {
    pub magnitude: u64,
    pub unit: TimeUnit,
}

impl CountdownPart {
    /// Renders `"<n> <unit>"`, pluralized unless `n` is exactly 1.
    pub fn render(&self) -> String {
        let suffix = if self.magnitude == 1 { "" } else { "s" };
        format!("{} {}{}", self.magnitude, self.unit.label(), suffix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub parts: [CountdownPart; 4],
    pub direction: Direction,
}

impl Countdown {
    /// Breaks the distance between `now` and midnight of `target` into
    /// whole days, hours, minutes and seconds.
    ///
    /// Sub-second remainders are dropped.
    pub fn compute<Tz: TimeZone>(target: NaiveDate, now: &DateTime<Tz>) -> Self {
        let elapsed = now.naive_local() - target.and_time(NaiveTime::MIN);
        let direction = if elapsed > TimeDelta::zero() {
            Direction::Since
        } else {
            Direction::Until
        };

        let mut remaining = elapsed.num_seconds().unsigned_abs();
        let parts = UNIT_ORDER.map(|unit| {
            let magnitude = remaining / unit.seconds();
            remaining %= unit.seconds();
            CountdownPart { magnitude, unit }
        });

        Self { parts, direction }
    }

    pub fn is_past(&self) -> bool {
        self.direction == Direction::Since
    }

    /// Renders e.g. `"5 days, 3 hours, 0 minutes, 12 seconds until deadline."`.
    pub fn render(&self, event_label: &str) -> String {
        let parts = self
            .parts
            .iter()
            .map(CountdownPart::render)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{parts} {} {event_label}.", self.direction.label())
    }
}

#[cfg(test)]
mod tests {
    use super::{Countdown, CountdownPart, Direction, TimeUnit};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn target() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    #[test]
    fn future_target_counts_down_until() {
        let now = Utc.with_ymd_and_hms(2025, 12, 25, 20, 59, 48).unwrap();
        let countdown = Countdown::compute(target(), &now);

        assert_eq!(countdown.direction, Direction::Until);
        assert!(!countdown.is_past());
        assert_eq!(
            countdown.render("deadline"),
            "5 days, 3 hours, 0 minutes, 12 seconds until deadline."
        );
    }

    #[test]
    fn past_target_counts_since() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 1, 1, 1).unwrap();
        let countdown = Countdown::compute(target(), &now);

        assert!(countdown.is_past());
        assert_eq!(
            countdown.render("deadline"),
            "1 day, 1 hour, 1 minute, 1 second since deadline."
        );
    }

    #[test]
    fn exact_midnight_is_until_with_all_zero_parts() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        let countdown = Countdown::compute(target(), &now);

        assert_eq!(countdown.direction, Direction::Until);
        assert!(countdown.parts.iter().all(|part| part.magnitude == 0));
        assert_eq!(
            countdown.render("deadline"),
            "0 days, 0 hours, 0 minutes, 0 seconds until deadline."
        );
    }

    #[test]
    fn parts_follow_fixed_unit_order() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let countdown = Countdown::compute(target(), &now);
        let units: Vec<TimeUnit> = countdown.parts.iter().map(|part| part.unit).collect();

        assert_eq!(
            units,
            vec![TimeUnit::Day, TimeUnit::Hour, TimeUnit::Minute, TimeUnit::Second]
        );
        assert_eq!(countdown, Countdown::compute(target(), &now));
    }

    #[test]
    fn part_pluralizes_unless_exactly_one() {
        let render = |magnitude| {
            CountdownPart {
                magnitude,
                unit: TimeUnit::Hour,
            }
            .render()
        };

        assert_eq!(render(0), "0 hours");
        assert_eq!(render(1), "1 hour");
        assert_eq!(render(2), "2 hours");
    }
}
