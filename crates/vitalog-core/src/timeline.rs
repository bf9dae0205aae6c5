use tracing::trace;
use uuid::Uuid;

use crate::entry::{CategoryFilter, Entry};
use crate::range::DateRange;

/// Read-only projection of the record set for one category and range:
/// keeps a record iff its calendar date falls inside `range` (inclusive)
/// and the filter admits its category, then orders ascending by
/// `occurred_at`. The sort is stable, so records sharing a timestamp keep
/// their input order. Input is never mutated; identical calls produce
/// identical output.
#[tracing::instrument(skip(records), fields(total = records.len()))]
pub fn project<'a>(
    records: &'a [Entry],
    filter: CategoryFilter,
    range: &DateRange,
) -> Vec<&'a Entry> {
    let mut selected: Vec<&Entry> = records
        .iter()
        .filter(|entry| {
            let ok = range.contains(entry.occurred_at.date()) && filter.admits(entry.category);
            trace!(id = %entry.id, category = %entry.category, ok, "timeline membership");
            ok
        })
        .collect();

    selected.sort_by_key(|entry| entry.occurred_at);
    selected
}

/// Detail-view lookup. An absent id is a normal outcome (the caller may
/// hold a stale selection), hence `Option` rather than an error.
pub fn find_by_id(records: &[Entry], id: Uuid) -> Option<&Entry> {
    records.iter().find(|entry| entry.id == id)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    use super::{find_by_id, project};
    use crate::entry::{Category, CategoryFilter, Entry, Status};
    use crate::range::{DateRange, Granularity, resolve_range};

    fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid timestamp")
    }

    fn fixture() -> Vec<Entry> {
        vec![
            Entry::new(
                Category::Meals,
                at(2024, 3, 15, 8, 0),
                "Oatmeal with berries",
                Status::Favorable,
            ),
            Entry::new(
                Category::Exercise,
                at(2024, 3, 15, 9, 30),
                "Morning run",
                Status::Favorable,
            ),
            Entry::new(
                Category::Meals,
                at(2024, 3, 16, 8, 0),
                "Scrambled eggs",
                Status::Neutral,
            ),
        ]
    }

    #[test]
    fn filters_by_category_and_single_day_range() {
        let records = fixture();
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"),
            end: NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"),
        };

        let shown = project(&records, CategoryFilter::Only(Category::Meals), &range);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Oatmeal with berries");
    }

    #[test]
    fn all_filter_and_covering_range_return_everything_in_order() {
        let mut records = fixture();
        // Scramble the input order; projection must restore chronology.
        records.swap(0, 2);

        let range = resolve_range(
            NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"),
            Granularity::Week,
        );
        let shown = project(&records, CategoryFilter::All, &range);

        assert_eq!(shown.len(), records.len());
        for window in shown.windows(2) {
            assert!(window[0].occurred_at <= window[1].occurred_at);
        }
    }

    #[test]
    fn identical_timestamps_keep_input_order() {
        let when = at(2024, 3, 15, 7, 45);
        let first = Entry::new(Category::Supplements, when, "Vitamin D", Status::Neutral);
        let second = Entry::new(Category::Supplements, when, "Magnesium", Status::Neutral);
        let records = vec![first.clone(), second.clone()];

        let range = DateRange {
            start: when.date(),
            end: when.date(),
        };
        let shown = project(&records, CategoryFilter::All, &range);
        assert_eq!(shown[0].id, first.id);
        assert_eq!(shown[1].id, second.id);
    }

    #[test]
    fn projection_is_idempotent_and_does_not_mutate_input() {
        let records = fixture();
        let before = records.clone();
        let range = resolve_range(
            NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"),
            Granularity::Month,
        );

        let once: Vec<Uuid> = project(&records, CategoryFilter::All, &range)
            .iter()
            .map(|e| e.id)
            .collect();
        let twice: Vec<Uuid> = project(&records, CategoryFilter::All, &range)
            .iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(once, twice);
        assert_eq!(records, before);
    }

    #[test]
    fn empty_range_membership_is_inclusive_on_both_ends() {
        let records = fixture();
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"),
            end: NaiveDate::from_ymd_opt(2024, 3, 16).expect("valid"),
        };
        let shown = project(&records, CategoryFilter::All, &range);
        assert_eq!(shown.len(), 3);
    }

    #[test]
    fn find_by_id_hit_and_miss() {
        let records = fixture();
        let wanted = records[1].id;

        let found = find_by_id(&records, wanted).expect("entry present");
        assert_eq!(found.title, "Morning run");

        assert!(find_by_id(&records, Uuid::new_v4()).is_none());
        assert!(find_by_id(&[], wanted).is_none());
    }
}
