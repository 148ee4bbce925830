use std::collections::HashMap;

use crate::{ClientError, ClientResult};

pub(crate) const TIMESTAMP_COLUMN: &str = "fec_registro";
pub(crate) const BRAND_COLUMN: &str = "Marca";
pub(crate) const PRODUCT_TYPE_COLUMN: &str = "TipoProducto";
pub(crate) const SELLER_COLUMN: &str = "vendedor";
pub(crate) const COST_CENTER_COLUMN: &str = "centro_costo";

pub(crate) const REQUIRED_COLUMNS: [&str; 5] = [
    TIMESTAMP_COLUMN,
    BRAND_COLUMN,
    PRODUCT_TYPE_COLUMN,
    SELLER_COLUMN,
    COST_CENTER_COLUMN,
];

/// One data line of the source file, before normalization. `row` is the
/// 1-based data row number (the header is not counted).
#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    pub(crate) row: usize,
    pub(crate) timestamp: Option<String>,
    pub(crate) brand: Option<String>,
    pub(crate) product_type: Option<String>,
    pub(crate) seller: Option<String>,
    pub(crate) cost_center: Option<String>,
}

pub(crate) fn parse_rows(content: &str, delimiter: Option<u8>) -> ClientResult<Vec<RawRow>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(content));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| ClientError::dataset_unreadable("header row", &error.to_string()))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(ClientError::dataset_schema_mismatch(
            REQUIRED_COLUMNS.iter().map(|name| name.to_string()).collect(),
            missing,
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect::<HashMap<&str, usize>>();

    let mut rows = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = result.map_err(|error| {
            ClientError::dataset_unreadable(&format!("row {}", row_index + 1), &error.to_string())
        })?;

        rows.push(RawRow {
            row: row_index + 1,
            timestamp: value_for(&record, &index_by_name, TIMESTAMP_COLUMN),
            brand: value_for(&record, &index_by_name, BRAND_COLUMN),
            product_type: value_for(&record, &index_by_name, PRODUCT_TYPE_COLUMN),
            seller: value_for(&record, &index_by_name, SELLER_COLUMN),
            cost_center: value_for(&record, &index_by_name, COST_CENTER_COLUMN),
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<&str, usize>,
    column: &str,
) -> Option<String> {
    let index = index_by_name.get(column)?;
    let value = record.get(*index)?;
    Some(value.to_string())
}

fn missing_columns(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|header| header == *required))
        .map(|required| required.to_string())
        .collect()
}

/// Semicolon-separated exports are common for Spanish-locale spreadsheets.
fn sniff_delimiter(content: &str) -> u8 {
    let Some(header_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };
    if header_line.contains(';') && !header_line.contains(',') {
        return b';';
    }
    b','
}
