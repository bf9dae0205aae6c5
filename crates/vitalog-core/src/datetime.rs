use anyhow::{Context, anyhow};
use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

/// Parses a CLI date expression against an injected `today`.
///
/// Supported forms: `today`, `yesterday`, `tomorrow`, `YYYY-MM-DD`, and
/// relative offsets `+Nd` / `-Nw` / `+Nm` (days, weeks, calendar months).
#[tracing::instrument(fields(input = input))]
pub fn parse_date_expr(input: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let token = input.trim();
    let lower = token.to_ascii_lowercase();

    match lower.as_str() {
        "today" => return Ok(today),
        "tomorrow" => {
            return today
                .checked_add_signed(Duration::days(1))
                .ok_or_else(|| anyhow!("date overflow stepping past {today}"));
        }
        "yesterday" => {
            return today
                .checked_sub_signed(Duration::days(1))
                .ok_or_else(|| anyhow!("date overflow stepping before {today}"));
        }
        _ => {}
    }

    let rel_re = Regex::new(r"^(?P<sign>[+-])(?P<num>\d+)(?P<unit>[dwm])$")
        .map_err(|e| anyhow!("internal regex compile failure: {e}"))?;

    if let Some(caps) = rel_re.captures(&lower) {
        let sign = caps
            .name("sign")
            .map(|m| m.as_str())
            .ok_or_else(|| anyhow!("missing relative sign"))?;
        let num: i32 = caps
            .name("num")
            .map(|m| m.as_str())
            .ok_or_else(|| anyhow!("missing relative amount"))?
            .parse()
            .context("invalid relative amount")?;
        let unit = caps
            .name("unit")
            .map(|m| m.as_str())
            .ok_or_else(|| anyhow!("missing relative unit"))?;

        let amount = if sign == "-" { -num } else { num };
        let shifted = match unit {
            "d" => today.checked_add_signed(Duration::days(amount.into())),
            "w" => today.checked_add_signed(Duration::weeks(amount.into())),
            "m" => Some(shift_months(today, amount)),
            _ => return Err(anyhow!("unknown relative unit: {unit}")),
        };
        return shifted.ok_or_else(|| anyhow!("date overflow applying offset {token}"));
    }

    if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
        return Ok(date);
    }

    Err(anyhow!("unrecognized date expression: {input}")).with_context(|| {
        "supported forms: today/yesterday/tomorrow, YYYY-MM-DD, +Nd/-Nd, +Nw/-Nw, +Nm/-Nm"
    })
}

/// Shifts a date by whole calendar months, clamping the day-of-month to
/// the target month's length (Jan 31 + 1m = Feb 28 or 29).
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month() as i32 - 1 + delta;
    let year = total.div_euclid(12);
    let month = (total.rem_euclid(12) + 1) as u32;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
        .unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), days_in_month(date.year(), date.month()))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{days_in_month, parse_date_expr, shift_months};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parses_named_days() {
        let today = date(2024, 3, 15);
        assert_eq!(parse_date_expr("today", today).expect("today"), today);
        assert_eq!(
            parse_date_expr("tomorrow", today).expect("tomorrow"),
            date(2024, 3, 16)
        );
        assert_eq!(
            parse_date_expr("yesterday", today).expect("yesterday"),
            date(2024, 3, 14)
        );
    }

    #[test]
    fn parses_absolute_dates() {
        let today = date(2024, 3, 15);
        assert_eq!(
            parse_date_expr("2023-12-31", today).expect("absolute"),
            date(2023, 12, 31)
        );
        assert!(parse_date_expr("2024-02-30", today).is_err());
        assert!(parse_date_expr("next tuesday", today).is_err());
    }

    #[test]
    fn parses_relative_offsets() {
        let today = date(2024, 3, 15);
        assert_eq!(
            parse_date_expr("+3d", today).expect("+3d"),
            date(2024, 3, 18)
        );
        assert_eq!(
            parse_date_expr("-2w", today).expect("-2w"),
            date(2024, 3, 1)
        );
        assert_eq!(
            parse_date_expr("+1m", today).expect("+1m"),
            date(2024, 4, 15)
        );
    }

    #[test]
    fn month_shift_clamps_to_shorter_months() {
        assert_eq!(shift_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_months(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(shift_months(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(shift_months(date(2024, 12, 15), 1), date(2025, 1, 15));
        assert_eq!(shift_months(date(2024, 1, 15), -1), date(2023, 12, 15));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
