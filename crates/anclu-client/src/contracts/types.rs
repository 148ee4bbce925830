use serde::Serialize;

use crate::dataset::ProductCategory;
use crate::period::{Comparison, MonthLocale, Period};

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub source: String,
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub rows_excluded: usize,
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

/// Why a view has nothing to show. Reported to the renderer, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The dataset has no records with a usable timestamp.
    NoData,
    /// The selection (period and cost centers) matched no records.
    NoRecords,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRef {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub label: String,
}

impl PeriodRef {
    pub fn new(period: Period, locale: MonthLocale) -> Self {
        Self {
            year: period.year(),
            month: period.month(),
            month_name: period.month_name(locale).to_string(),
            label: period.label(locale),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthEntry {
    pub month: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearEntry {
    pub year: i32,
    pub months: Vec<MonthEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodsData {
    pub locale: MonthLocale,
    pub years: Vec<YearEntry>,
    pub cost_centers: Vec<String>,
    pub period_count: usize,
    pub default_period: Option<PeriodRef>,
    pub empty_state: Option<EmptyState>,
    pub dataset: DatasetSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    pub records: u64,
    pub equipment: u64,
    pub postpaid: u64,
    pub active_days: u64,
    pub distinct_sellers: u64,
    pub distinct_brands: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Kpi {
    pub metric: String,
    pub label: String,
    pub comparison: Comparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: ProductCategory,
    pub label: String,
    pub count: u64,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCount {
    pub rank: usize,
    pub key: String,
    pub count: u64,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
    pub equipment: u64,
    pub postpaid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotRow {
    pub key: String,
    pub counts: Vec<u64>,
    pub total: u64,
}

/// Counts of records by one row dimension against product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotTable {
    pub row_dimension: String,
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
    pub column_totals: Vec<u64>,
    pub grand_total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    pub row: usize,
    pub timestamp: String,
    pub cost_center: Option<String>,
    pub seller: Option<String>,
    pub product_type: String,
    pub brand: String,
    pub category: ProductCategory,
}

/// Everything a renderer needs for one interaction.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub locale: MonthLocale,
    pub period: Option<PeriodRef>,
    pub previous_period: Option<PeriodRef>,
    pub cost_centers: Option<Vec<String>>,
    pub empty_state: Option<EmptyState>,
    pub dataset: DatasetSummary,
    pub totals: ReportTotals,
    pub kpis: Vec<Kpi>,
    pub category_split: Vec<CategoryShare>,
    pub top_brands: Vec<RankedCount>,
    pub top_product_types: Vec<RankedCount>,
    pub top_sellers: Vec<RankedCount>,
    pub daily: Vec<DailyCount>,
    pub pivots: Vec<PivotTable>,
    pub sample: Vec<SampleRow>,
}
