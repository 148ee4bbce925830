use crate::ClientResult;
use crate::cache::DatasetCache;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{EmptyState, MonthEntry, PeriodRef, PeriodsData, YearEntry};
use crate::dataset::Dataset;
use crate::period::{MonthLocale, PeriodCatalog};

#[derive(Debug)]
pub struct PeriodsRunOptions<'a> {
    pub cache: &'a DatasetCache,
    pub year: Option<i32>,
    pub locale: MonthLocale,
}

pub fn run(options: PeriodsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let dataset = options.cache.get()?;
    success("periods", periods_data(&dataset, options.year, options.locale))
}

/// Selection options for the period controls. With `year` set, only that
/// year is listed.
pub fn periods_data(dataset: &Dataset, year: Option<i32>, locale: MonthLocale) -> PeriodsData {
    let catalog = PeriodCatalog::from_dataset(dataset);

    let years = catalog
        .years()
        .into_iter()
        .filter(|candidate| year.is_none_or(|wanted| wanted == *candidate))
        .map(|candidate| YearEntry {
            year: candidate,
            months: catalog
                .months(candidate, locale)
                .into_iter()
                .map(|option| MonthEntry {
                    month: option.period.month(),
                    name: option.name.to_string(),
                })
                .collect(),
        })
        .collect::<Vec<YearEntry>>();

    let empty_state = if catalog.is_empty() {
        Some(EmptyState::NoData)
    } else if years.is_empty() {
        Some(EmptyState::NoRecords)
    } else {
        None
    };

    PeriodsData {
        locale,
        period_count: years.iter().map(|entry| entry.months.len()).sum(),
        years,
        cost_centers: catalog.cost_centers(),
        default_period: catalog
            .default_period()
            .map(|period| PeriodRef::new(period, locale)),
        empty_state,
        dataset: dataset.summary(),
    }
}
