use std::collections::BTreeSet;

use crate::ClientResult;
use crate::dataset::{Dataset, TransactionRecord};
use crate::period::types::Period;

/// `(year, month - 1)`, rolling back to December of the prior year for
/// January. Months outside 1..=12 are rejected.
pub fn previous_period(year: i32, month: u32) -> ClientResult<Period> {
    Ok(Period::new(year, month)?.previous())
}

/// Records of `period`, optionally restricted to `cost_centers`.
///
/// `None` applies no cost-center restriction. `Some` of an empty set matches
/// nothing, and records without a cost center never match a restriction.
pub fn filter_records<'a>(
    dataset: &'a Dataset,
    period: Period,
    cost_centers: Option<&BTreeSet<String>>,
) -> Vec<&'a TransactionRecord> {
    dataset
        .records
        .iter()
        .filter(|record| record.period == period)
        .filter(|record| match cost_centers {
            None => true,
            Some(allowed) => record
                .cost_center
                .as_ref()
                .is_some_and(|cost_center| allowed.contains(cost_center)),
        })
        .collect()
}

/// Current and previous subsets for one selection, both filtered with the
/// same cost-center restriction.
#[derive(Debug, Clone)]
pub struct PeriodSlices<'a> {
    pub current_period: Period,
    pub previous_period: Period,
    pub current: Vec<&'a TransactionRecord>,
    pub previous: Vec<&'a TransactionRecord>,
}

pub fn slice_periods<'a>(
    dataset: &'a Dataset,
    period: Period,
    cost_centers: Option<&BTreeSet<String>>,
) -> PeriodSlices<'a> {
    let previous_period = period.previous();
    PeriodSlices {
        current_period: period,
        previous_period,
        current: filter_records(dataset, period, cost_centers),
        previous: filter_records(dataset, previous_period, cost_centers),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::{filter_records, previous_period, slice_periods};
    use crate::dataset::{Dataset, TransactionRecord};
    use crate::period::types::Period;

    fn record(row: usize, year: i32, month: u32, cost_center: Option<&str>) -> TransactionRecord {
        let timestamp = NaiveDate::from_ymd_opt(year, month, 10)
            .and_then(|day| day.and_hms_opt(12, 0, 0))
            .unwrap_or_default();
        TransactionRecord::new(
            row,
            timestamp,
            Some("LG"),
            Some("Cash Kit"),
            Some("V1"),
            cost_center,
        )
    }

    fn allowed(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn previous_period_steps_back_within_a_year() {
        for year in [1999, 2024, 2025] {
            for month in 2..=12 {
                let previous = previous_period(year, month);
                assert!(previous.is_ok());
                if let Ok(value) = previous {
                    assert_eq!((value.year(), value.month()), (year, month - 1));
                }
            }
        }
    }

    #[test]
    fn previous_period_of_january_rolls_into_december() {
        for year in [1, 2000, 2024] {
            let previous = previous_period(year, 1);
            assert!(previous.is_ok());
            if let Ok(value) = previous {
                assert_eq!((value.year(), value.month()), (year - 1, 12));
            }
        }
    }

    #[test]
    fn previous_period_rejects_out_of_range_months() {
        for month in [0, 13, 99] {
            let result = previous_period(2024, month);
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "invalid_argument");
            }
        }
    }

    #[test]
    fn previous_period_rejects_years_outside_the_calendar() {
        for year in [i32::MIN, i32::MAX] {
            let result = previous_period(year, 1);
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "invalid_argument");
                assert!(error.message.contains(&year.to_string()));
            }
        }
    }

    #[test]
    fn filter_matches_exact_period_only() {
        let dataset = Dataset::from_records(
            "fixture",
            vec![
                record(1, 2024, 8, Some("A")),
                record(2, 2023, 8, Some("A")),
                record(3, 2024, 7, Some("A")),
            ],
        );
        let period = Period::new(2024, 8);
        assert!(period.is_ok());
        if let Ok(value) = period {
            let subset = filter_records(&dataset, value, None);
            assert_eq!(subset.len(), 1);
            assert_eq!(subset[0].row, 1);
        }
    }

    #[test]
    fn cost_center_restriction_intersects_and_empty_set_matches_nothing() {
        let dataset = Dataset::from_records(
            "fixture",
            vec![
                record(1, 2024, 8, Some("A")),
                record(2, 2024, 8, Some("B")),
                record(3, 2024, 8, None),
            ],
        );
        let period = Period::new(2024, 8);
        assert!(period.is_ok());
        if let Ok(value) = period {
            assert_eq!(filter_records(&dataset, value, Some(&allowed(&["A"]))).len(), 1);
            assert_eq!(filter_records(&dataset, value, Some(&allowed(&[]))).len(), 0);
            assert_eq!(filter_records(&dataset, value, None).len(), 3);
        }
    }

    #[test]
    fn cost_centers_absent_from_data_yield_empty_subset() {
        let dataset = Dataset::from_records(
            "fixture",
            vec![record(1, 2024, 8, Some("C")), record(2, 2024, 7, Some("C"))],
        );
        let period = Period::new(2024, 8);
        assert!(period.is_ok());
        if let Ok(value) = period {
            let slices = slice_periods(&dataset, value, Some(&allowed(&["A", "B"])));
            assert!(slices.current.is_empty());
            assert!(slices.previous.is_empty());
        }
    }

    #[test]
    fn slices_cover_the_year_boundary() {
        let dataset = Dataset::from_records(
            "fixture",
            vec![
                record(1, 2025, 1, Some("A")),
                record(2, 2024, 12, Some("A")),
                record(3, 2024, 12, Some("A")),
            ],
        );
        let period = Period::new(2025, 1);
        assert!(period.is_ok());
        if let Ok(value) = period {
            let slices = slice_periods(&dataset, value, None);
            assert_eq!(slices.current.len(), 1);
            assert_eq!(slices.previous.len(), 2);
            assert_eq!(slices.previous_period.year(), 2024);
        }
    }
}
