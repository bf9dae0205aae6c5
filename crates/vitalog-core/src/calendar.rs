use chrono::{Datelike, Duration, NaiveDate};

use crate::datetime::first_of_month;
use crate::range::WEEK_START;

/// Six full weeks, every month, so the picker never changes height.
pub const GRID_LEN: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// False for padding cells borrowed from the adjacent months.
    pub in_reference_month: bool,
}

/// Builds the month-picker grid for the month containing `reference`.
/// Only the reference's year and month are significant. Cells run from
/// the `WEEK_START` on or before the 1st, contiguously, for 42 days.
pub fn build_grid(reference: NaiveDate) -> [CalendarCell; GRID_LEN] {
    let first = first_of_month(reference);
    let lead = i64::from(first.weekday().days_since(WEEK_START));
    let grid_start = first
        .checked_sub_signed(Duration::days(lead))
        .unwrap_or(first);

    std::array::from_fn(|idx| {
        let date = grid_start
            .checked_add_signed(Duration::days(idx as i64))
            .unwrap_or(grid_start);
        CalendarCell {
            date,
            in_reference_month: date.year() == reference.year()
                && date.month() == reference.month(),
        }
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};

    use super::{GRID_LEN, build_grid};
    use crate::datetime::days_in_month;
    use crate::range::WEEK_START;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn assert_grid_invariants(reference: NaiveDate) {
        let grid = build_grid(reference);
        assert_eq!(grid.len(), GRID_LEN);
        assert_eq!(grid[0].date.weekday(), WEEK_START);

        for window in grid.windows(2) {
            assert_eq!(
                (window[1].date - window[0].date).num_days(),
                1,
                "grid dates must be contiguous around {}",
                window[0].date
            );
        }

        let in_month = grid.iter().filter(|cell| cell.in_reference_month).count();
        assert_eq!(
            in_month as u32,
            days_in_month(reference.year(), reference.month()),
            "in-month cell count for {reference}"
        );
    }

    #[test]
    fn grid_invariants_across_month_shapes() {
        // Months of 28, 29, 30, and 31 days, starting on assorted weekdays.
        for reference in [
            date(2023, 2, 1),
            date(2024, 2, 20),
            date(2024, 4, 9),
            date(2024, 3, 1),
            date(2024, 9, 30),
            date(2024, 12, 25),
            date(2025, 6, 1),
        ] {
            assert_grid_invariants(reference);
        }
    }

    #[test]
    fn march_2024_padding_counts() {
        // March 2024 starts on a Friday: five February cells lead,
        // six April cells trail, 5 + 31 + 6 = 42.
        let grid = build_grid(date(2024, 3, 1));

        assert_eq!(grid[0].date, date(2024, 2, 25));
        assert!(!grid[0].in_reference_month);

        let leading = grid
            .iter()
            .take_while(|cell| !cell.in_reference_month)
            .count();
        let trailing = grid
            .iter()
            .rev()
            .take_while(|cell| !cell.in_reference_month)
            .count();

        assert_eq!(leading, 5);
        assert_eq!(trailing, 6);
        assert_eq!(grid[5].date, date(2024, 3, 1));
        assert_eq!(grid[41].date, date(2024, 4, 6));
    }

    #[test]
    fn month_starting_on_week_start_has_no_leading_padding() {
        // September 2024 begins on a Sunday.
        let grid = build_grid(date(2024, 9, 15));
        assert_eq!(grid[0].date, date(2024, 9, 1));
        assert!(grid[0].in_reference_month);
    }

    #[test]
    fn no_duplicate_dates() {
        let grid = build_grid(date(2024, 2, 1));
        for (i, a) in grid.iter().enumerate() {
            for b in grid.iter().skip(i + 1) {
                assert_ne!(a.date, b.date);
            }
        }
    }
}
