pub(crate) mod breakdown;

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::DEFAULT_TOP_N;
use crate::contracts::types::{EmptyState, Kpi, PeriodRef, ReportTotals, ViewModel};
use crate::dataset::{Dataset, ProductCategory, TransactionRecord};
use crate::period::{MonthLocale, Period, PeriodCatalog, compare_counts, slice_periods};
use crate::{ClientError, ClientResult};

use breakdown::{
    category_split, cost_center_key, count_category, cross_tab, daily_counts, distinct_sellers,
    rank_by, sample, seller_key, totals,
};

/// What the user picked. Unset fields fall back to the defaults a fresh
/// dashboard shows: the most recent year and its first month with data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// `None` applies no restriction; an empty set matches nothing.
    pub cost_centers: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub locale: MonthLocale,
    pub top_n: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            locale: MonthLocale::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Builds the full view for one interaction. Pure: reads `dataset`, never
/// changes it.
pub fn compute_view(
    dataset: &Dataset,
    selection: &Selection,
    options: ViewOptions,
) -> ClientResult<ViewModel> {
    if let Some(month) = selection.month
        && !(1..=12).contains(&month)
    {
        return Err(ClientError::invalid_month(month));
    }
    if options.top_n == 0 {
        return Err(ClientError::invalid_argument_for_command(
            "`top` must be at least 1.",
            Some("report"),
        ));
    }

    let catalog = PeriodCatalog::from_dataset(dataset);
    if catalog.is_empty() {
        debug!("dataset has no periods; returning empty view");
        return Ok(empty_view(dataset, selection, options, EmptyState::NoData));
    }

    let Some(period) = resolve_period(&catalog, selection)? else {
        debug!(year = ?selection.year, "selected year has no data");
        return Ok(empty_view(
            dataset,
            selection,
            options,
            EmptyState::NoRecords,
        ));
    };

    let slices = slice_periods(dataset, period, selection.cost_centers.as_ref());
    debug!(
        period = %period.label(options.locale),
        current = slices.current.len(),
        previous = slices.previous.len(),
        "computed period slices"
    );

    let current = &slices.current;
    let empty_state = current.is_empty().then_some(EmptyState::NoRecords);

    Ok(ViewModel {
        locale: options.locale,
        period: Some(PeriodRef::new(period, options.locale)),
        previous_period: Some(PeriodRef::new(slices.previous_period, options.locale)),
        cost_centers: echo_cost_centers(selection),
        empty_state,
        dataset: dataset.summary(),
        totals: totals(current),
        kpis: kpis(current, &slices.previous),
        category_split: category_split(current),
        top_brands: rank_by(current, |record| record.brand.as_str(), options.top_n),
        top_product_types: rank_by(
            current,
            |record| record.product_type.as_str(),
            options.top_n,
        ),
        top_sellers: rank_by(current, seller_key, options.top_n),
        daily: daily_counts(current),
        pivots: vec![
            cross_tab(current, "cost_center", cost_center_key),
            cross_tab(current, "brand", |record| record.brand.as_str()),
        ],
        sample: sample(current),
    })
}

fn resolve_period(catalog: &PeriodCatalog, selection: &Selection) -> ClientResult<Option<Period>> {
    match (selection.year, selection.month) {
        (Some(year), Some(month)) => Period::new(year, month).map(Some),
        (Some(year), None) => Ok(catalog.default_month(year)),
        (None, Some(month)) => match catalog.years().first() {
            Some(year) => Period::new(*year, month).map(Some),
            None => Ok(None),
        },
        (None, None) => Ok(catalog.default_period()),
    }
}

fn kpis(current: &[&TransactionRecord], previous: &[&TransactionRecord]) -> Vec<Kpi> {
    let mut output = vec![kpi(
        "records",
        "Total sales",
        len_u64(current),
        len_u64(previous),
    )];
    for category in ProductCategory::ALL {
        output.push(kpi(
            category.as_str(),
            category.label(),
            count_category(current, category),
            count_category(previous, category),
        ));
    }
    output.push(kpi(
        "active_sellers",
        "Active sellers",
        distinct_sellers(current),
        distinct_sellers(previous),
    ));
    output
}

fn kpi(metric: &str, label: &str, current: u64, previous: u64) -> Kpi {
    Kpi {
        metric: metric.to_string(),
        label: label.to_string(),
        comparison: compare_counts(current, previous),
    }
}

fn empty_view(
    dataset: &Dataset,
    selection: &Selection,
    options: ViewOptions,
    empty_state: EmptyState,
) -> ViewModel {
    ViewModel {
        locale: options.locale,
        period: None,
        previous_period: None,
        cost_centers: echo_cost_centers(selection),
        empty_state: Some(empty_state),
        dataset: dataset.summary(),
        totals: ReportTotals::default(),
        kpis: kpis(&[], &[]),
        category_split: category_split(&[]),
        top_brands: Vec::new(),
        top_product_types: Vec::new(),
        top_sellers: Vec::new(),
        daily: Vec::new(),
        pivots: Vec::new(),
        sample: Vec::new(),
    }
}

fn echo_cost_centers(selection: &Selection) -> Option<Vec<String>> {
    selection
        .cost_centers
        .as_ref()
        .map(|values| values.iter().cloned().collect())
}

fn len_u64(records: &[&TransactionRecord]) -> u64 {
    u64::try_from(records.len()).unwrap_or(u64::MAX)
}
