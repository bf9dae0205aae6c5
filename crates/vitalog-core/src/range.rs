use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::datetime::{first_of_month, last_of_month, shift_months};

/// Weeks begin on Sunday, the dashboard's fixed convention. Never
/// derived from locale at runtime.
pub const WEEK_START: Weekday = Weekday::Sun;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "day" | "daily" => Some(Self::Day),
            "week" | "weekly" => Some(Self::Week),
            "month" | "monthly" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Inclusive calendar-date span. `start <= end` holds for every range
/// produced by `resolve_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Advances the reference date by one unit of the granularity. Month
/// steps clamp the day-of-month, so stepping Jan 31 forward lands on the
/// last day of February.
pub fn step(reference: NaiveDate, granularity: Granularity, direction: Direction) -> NaiveDate {
    let sign = match direction {
        Direction::Prev => -1,
        Direction::Next => 1,
    };

    match granularity {
        Granularity::Day => reference
            .checked_add_signed(Duration::days(sign.into()))
            .unwrap_or(reference),
        Granularity::Week => reference
            .checked_add_signed(Duration::weeks(sign.into()))
            .unwrap_or(reference),
        Granularity::Month => shift_months(reference, sign),
    }
}

pub fn resolve_range(reference: NaiveDate, granularity: Granularity) -> DateRange {
    match granularity {
        Granularity::Day => DateRange {
            start: reference,
            end: reference,
        },
        Granularity::Week => {
            let start = week_start_of(reference);
            DateRange {
                start,
                end: start
                    .checked_add_signed(Duration::days(6))
                    .unwrap_or(start),
            }
        }
        Granularity::Month => DateRange {
            start: first_of_month(reference),
            end: last_of_month(reference),
        },
    }
}

/// First day of the week containing `date`, per `WEEK_START`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().days_since(WEEK_START);
    date.checked_sub_signed(Duration::days(offset.into()))
        .unwrap_or(date)
}

/// Display label for the active range: a full date for Day, a span for
/// Week (month and year stated once where they repeat), "Month Year" for
/// Month.
pub fn format_label(reference: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => reference.format("%B %-d, %Y").to_string(),
        Granularity::Week => {
            let range = resolve_range(reference, Granularity::Week);
            format_week_span(&range)
        }
        Granularity::Month => reference.format("%B %Y").to_string(),
    }
}

fn format_week_span(range: &DateRange) -> String {
    let (start, end) = (range.start, range.end);

    if start.year() != end.year() {
        return format!(
            "{} – {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        );
    }
    if start.month() != end.month() {
        return format!(
            "{} – {}, {}",
            start.format("%b %-d"),
            end.format("%b %-d"),
            end.year()
        );
    }
    format!(
        "{} – {}, {}",
        start.format("%b %-d"),
        end.day(),
        end.year()
    )
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

pub fn is_in_range(date: NaiveDate, range: &DateRange) -> bool {
    range.contains(date)
}
