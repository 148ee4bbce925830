pub(crate) mod input;
pub mod normalize;
pub(crate) mod parse;
pub mod timestamp;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::ClientResult;
use crate::contracts::types::DatasetSummary;
use crate::period::types::Period;

pub use input::DatasetSource;
pub use normalize::ProductCategory;
use normalize::{classify, normalize_brand, normalize_identifier, normalize_product_type};
use parse::RawRow;
use timestamp::{format_iso_date, parse_timestamp};

/// A sales transaction after normalization. `brand` and `product_type`
/// are never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub row: usize,
    pub timestamp: NaiveDateTime,
    pub period: Period,
    pub brand: String,
    pub product_type: String,
    pub category: ProductCategory,
    pub seller: Option<String>,
    pub cost_center: Option<String>,
}

impl TransactionRecord {
    pub fn new(
        row: usize,
        timestamp: NaiveDateTime,
        brand: Option<&str>,
        product_type: Option<&str>,
        seller: Option<&str>,
        cost_center: Option<&str>,
    ) -> Self {
        let product_type = normalize_product_type(product_type);
        Self {
            row,
            timestamp,
            period: Period::from_date(&timestamp),
            brand: normalize_brand(brand),
            category: classify(&product_type),
            product_type,
            seller: normalize_identifier(seller),
            cost_center: normalize_identifier(cost_center),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    fn from_raw(raw: &RawRow) -> Option<Self> {
        let timestamp = parse_timestamp(raw.timestamp.as_deref().unwrap_or(""))?;
        Some(Self::new(
            raw.row,
            timestamp,
            raw.brand.as_deref(),
            raw.product_type.as_deref(),
            raw.seller.as_deref(),
            raw.cost_center.as_deref(),
        ))
    }
}

/// The loaded, normalized dataset. Immutable once built; views borrow it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub source: String,
    pub records: Vec<TransactionRecord>,
    pub rows_read: usize,
    pub rows_excluded: usize,
}

impl Dataset {
    pub fn from_records(source: &str, records: Vec<TransactionRecord>) -> Self {
        let rows_read = records.len();
        Self {
            source: source.to_string(),
            records,
            rows_read,
            rows_excluded: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        let earliest = self.records.iter().map(TransactionRecord::date).min();
        let latest = self.records.iter().map(TransactionRecord::date).max();
        DatasetSummary {
            source: self.source.clone(),
            rows_read: self.rows_read,
            rows_loaded: self.records.len(),
            rows_excluded: self.rows_excluded,
            earliest: earliest.as_ref().map(format_iso_date),
            latest: latest.as_ref().map(format_iso_date),
        }
    }
}

pub fn load(source: &DatasetSource, delimiter: Option<u8>) -> ClientResult<Dataset> {
    let label = source.label();
    info!(source = %label, "loading sales dataset");
    let content = input::read_source(source)?;
    load_from_str(&label, &content, delimiter)
}

pub fn load_from_str(label: &str, content: &str, delimiter: Option<u8>) -> ClientResult<Dataset> {
    let raw_rows = parse::parse_rows(content, delimiter)?;
    let rows_read = raw_rows.len();

    let mut records = Vec::with_capacity(rows_read);
    for raw in &raw_rows {
        match TransactionRecord::from_raw(raw) {
            Some(record) => records.push(record),
            None => debug!(
                row = raw.row,
                value = raw.timestamp.as_deref().unwrap_or(""),
                "excluding row with unparseable timestamp"
            ),
        }
    }

    let dataset = Dataset {
        source: label.to_string(),
        rows_excluded: rows_read - records.len(),
        records,
        rows_read,
    };
    info!(
        source = %label,
        rows_read = dataset.rows_read,
        rows_loaded = dataset.records.len(),
        rows_excluded = dataset.rows_excluded,
        "sales dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::{ProductCategory, load_from_str};

    const HEADER: &str = "fec_registro,Marca,TipoProducto,vendedor,centro_costo\n";

    #[test]
    fn rows_with_bad_timestamps_are_excluded_and_counted() {
        let content = format!(
            "{HEADER}2024-08-01 09:00:00,lg,Cash Kit,V1,CC1\n\
             not-a-date,lg,Cash Kit,V1,CC1\n\
             ,samsung,Plan,V2,CC2\n\
             2024-08-02,,,V2,\n"
        );
        let dataset = load_from_str("fixture", &content, None);
        assert!(dataset.is_ok());
        if let Ok(loaded) = dataset {
            assert_eq!(loaded.rows_read, 4);
            assert_eq!(loaded.records.len(), 2);
            assert_eq!(loaded.rows_excluded, 2);
            assert_eq!(loaded.records[0].row, 1);
            assert_eq!(loaded.records[1].row, 4);
        }
    }

    #[test]
    fn loaded_records_never_have_blank_categorical_fields() {
        let content = format!("{HEADER}2024-08-02, ,  ,V2,\n");
        let dataset = load_from_str("fixture", &content, None);
        assert!(dataset.is_ok());
        if let Ok(loaded) = dataset {
            let record = &loaded.records[0];
            assert_eq!(record.brand, "NO BRAND");
            assert_eq!(record.product_type, "OTHER");
            assert_eq!(record.category, ProductCategory::Postpaid);
            assert!(record.cost_center.is_none());
        }
    }

    #[test]
    fn summary_reports_covered_date_range() {
        let content = format!(
            "{HEADER}2024-07-15,LG,Plan,V1,CC1\n2024-08-20,LG,Plan,V1,CC1\n2024-07-01,LG,Plan,V1,CC1\n"
        );
        let dataset = load_from_str("fixture", &content, None);
        assert!(dataset.is_ok());
        if let Ok(loaded) = dataset {
            let summary = loaded.summary();
            assert_eq!(summary.earliest.as_deref(), Some("2024-07-01"));
            assert_eq!(summary.latest.as_deref(), Some("2024-08-20"));
            assert_eq!(summary.rows_loaded, 3);
        }
    }
}
