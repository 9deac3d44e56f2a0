use chrono::{FixedOffset, NaiveDate, TimeZone};
use notepad_core::{Countdown, Direction, Task, TimeUnit};

fn target() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
}

#[test]
fn countdown_uses_wall_clock_of_now() {
    let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
    let now = moscow.with_ymd_and_hms(2025, 12, 30, 12, 0, 0).unwrap();

    let countdown = Countdown::compute(target(), &now);

    assert_eq!(countdown.direction, Direction::Until);
    assert_eq!(countdown.parts[0].magnitude, 0);
    assert_eq!(countdown.parts[1].magnitude, 12);
    assert_eq!(
        countdown.render("deadline"),
        "0 days, 12 hours, 0 minutes, 0 seconds until deadline."
    );
}

#[test]
fn countdown_is_deterministic_with_four_ordered_parts() {
    let now = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 2, 29, 23, 59, 59)
        .unwrap();

    let first = Countdown::compute(target(), &now);
    let second = Countdown::compute(target(), &now);

    assert_eq!(first, second);
    assert_eq!(first.parts.len(), 4);
    assert_eq!(
        first.parts.map(|part| part.unit),
        [TimeUnit::Day, TimeUnit::Hour, TimeUnit::Minute, TimeUnit::Second]
    );
}

#[test]
fn task_remaining_matches_countdown_render() {
    let now = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 1, 2, 0, 0, 1)
        .unwrap();
    let task = Task::with_details("late", target());

    assert!(task.countdown_at(&now).is_past());
    assert_eq!(
        task.remaining_at(&now),
        "2 days, 0 hours, 0 minutes, 1 second since deadline."
    );
}
