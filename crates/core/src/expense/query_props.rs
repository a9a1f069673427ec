//! Property-based tests for range resolution and listing queries.
//!
//! - Named periods end at `now` and span exactly 7/30/90 days
//! - Custom ranges are accepted iff start <= end
//! - Every built filter is scoped to its owner
//! - Page metadata agrees with ceil(total / limit)

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tally_shared::types::{PageMeta, PageRequest, UserId};

use super::category::Category;
use super::period::{InvalidRangeError, PeriodParams, resolve_date_range_at};
use super::query::{ExpenseQuery, ListExpensesQuery};

/// Strategy for an instant between 2000 and 2050.
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..2_524_608_000i64)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
}

/// Strategy for a named period and its length in days.
fn named_period() -> impl Strategy<Value = (&'static str, i64)> {
    prop_oneof![Just(("week", 7)), Just(("month", 30)), Just(("3months", 90))]
}

fn category() -> impl Strategy<Value = Option<Category>> {
    prop_oneof![
        Just(None),
        proptest::sample::select(Category::ALL.to_vec()).prop_map(Some)
    ]
}

proptest! {
    #[test]
    fn prop_named_period_span((token, days) in named_period(), now in instant()) {
        let range = resolve_date_range_at(Some(token), None, None, now).unwrap().unwrap();

        prop_assert_eq!(range.end, now);
        prop_assert!(range.start < range.end);
        prop_assert_eq!(range.end - range.start, Duration::days(days));
    }

    #[test]
    fn prop_custom_accepts_iff_ordered(a in instant(), b in instant(), now in instant()) {
        let start = a.to_rfc3339();
        let end = b.to_rfc3339();
        let result = resolve_date_range_at(Some("custom"), Some(&start), Some(&end), now);

        if a <= b {
            let range = result.unwrap().unwrap();
            prop_assert_eq!(range.start, a);
            prop_assert_eq!(range.end, b);
        } else {
            prop_assert_eq!(result, Err(InvalidRangeError::Inverted));
        }
    }

    #[test]
    fn prop_unknown_token_is_unfiltered(token in "[a-z0-9]{0,10}", now in instant()) {
        prop_assume!(!["week", "month", "3months", "custom"].contains(&token.as_str()));
        prop_assert_eq!(resolve_date_range_at(Some(&token), None, None, now), Ok(None));
    }

    #[test]
    fn prop_filter_always_owner_scoped(
        period in prop_oneof![Just(None), named_period().prop_map(|(t, _)| Some(t))],
        category in category(),
        page in 1u64..50,
        limit in 1u64..100,
        now in instant(),
    ) {
        let owner = UserId::new();
        let params = ListExpensesQuery {
            period: PeriodParams {
                period: period.map(str::to_string),
                ..PeriodParams::default()
            },
            category,
            page: PageRequest::new(page, limit),
        };

        let query = ExpenseQuery::build_at(owner, &params, now).unwrap();

        prop_assert_eq!(query.filter.owner, owner);
        prop_assert_eq!(query.filter.category, category);
        prop_assert_eq!(query.filter.date_range.is_some(), period.is_some());
        prop_assert_eq!(query.skip(), (page - 1) * limit);
    }

    #[test]
    fn prop_page_meta_consistent(total in 0u64..10_000, page in 1u64..200, limit in 1u64..100) {
        let meta = PageMeta::new(PageRequest::new(page, limit), total);

        prop_assert_eq!(meta.total_pages, total.div_ceil(limit));
        prop_assert_eq!(meta.has_next, page < meta.total_pages);
        prop_assert_eq!(meta.has_prev, page > 1);
        if total == 0 {
            prop_assert_eq!(meta.total_pages, 0);
        }
    }
}
