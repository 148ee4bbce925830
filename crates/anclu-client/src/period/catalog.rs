use std::collections::{BTreeMap, BTreeSet};

use crate::dataset::Dataset;
use crate::period::types::{MonthLocale, Period};

/// The selectable periods of a dataset: every (year, month) with at least
/// one record, plus the cost centers available for filtering.
#[derive(Debug, Clone, Default)]
pub struct PeriodCatalog {
    months_by_year: BTreeMap<i32, BTreeSet<u32>>,
    cost_centers: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    pub period: Period,
    pub name: &'static str,
}

impl PeriodCatalog {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut catalog = Self::default();
        for record in &dataset.records {
            catalog
                .months_by_year
                .entry(record.period.year())
                .or_default()
                .insert(record.period.month());
            if let Some(cost_center) = &record.cost_center {
                catalog.cost_centers.insert(cost_center.clone());
            }
        }
        catalog
    }

    pub fn is_empty(&self) -> bool {
        self.months_by_year.is_empty()
    }

    /// Years with data, most recent first.
    pub fn years(&self) -> Vec<i32> {
        self.months_by_year.keys().rev().copied().collect()
    }

    /// Months with data in `year`, in calendar order. Empty when the year
    /// has no data.
    pub fn months(&self, year: i32, locale: MonthLocale) -> Vec<MonthOption> {
        let Some(months) = self.months_by_year.get(&year) else {
            return Vec::new();
        };
        months
            .iter()
            .filter_map(|month| Period::new(year, *month).ok())
            .map(|period| MonthOption {
                period,
                name: period.month_name(locale),
            })
            .collect()
    }

    pub fn contains(&self, period: Period) -> bool {
        self.months_by_year
            .get(&period.year())
            .is_some_and(|months| months.contains(&period.month()))
    }

    pub fn cost_centers(&self) -> Vec<String> {
        self.cost_centers.iter().cloned().collect()
    }

    pub fn period_count(&self) -> usize {
        self.months_by_year.values().map(BTreeSet::len).sum()
    }

    /// The period a fresh selection lands on: the most recent year and the
    /// first month listed for it.
    pub fn default_period(&self) -> Option<Period> {
        let (year, months) = self.months_by_year.last_key_value()?;
        let month = months.first()?;
        Period::new(*year, *month).ok()
    }

    pub fn default_month(&self, year: i32) -> Option<Period> {
        let month = self.months_by_year.get(&year)?.first()?;
        Period::new(year, *month).ok()
    }
}
