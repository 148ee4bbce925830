pub mod catalog;
pub mod comparator;
pub mod delta;
pub mod types;

pub use catalog::{MonthOption, PeriodCatalog};
pub use comparator::{PeriodSlices, filter_records, previous_period, slice_periods};
pub use delta::{Comparison, Trend, compare_counts};
pub use types::{MonthLocale, Period, month_name, parse_month};
