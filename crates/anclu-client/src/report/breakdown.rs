use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::contracts::types::{
    CategoryShare, DailyCount, PivotRow, PivotTable, RankedCount, ReportTotals, SampleRow,
};
use crate::dataset::timestamp::format_iso_date;
use crate::dataset::{ProductCategory, TransactionRecord};
use crate::period::delta::round_one_decimal;

pub const UNASSIGNED: &str = "(unassigned)";
pub const SAMPLE_SIZE: usize = 10;

pub(crate) fn totals(records: &[&TransactionRecord]) -> ReportTotals {
    let equipment = count_category(records, ProductCategory::Equipment);
    let days = records
        .iter()
        .map(|record| record.date())
        .collect::<BTreeSet<_>>();
    let sellers = records
        .iter()
        .filter_map(|record| record.seller.as_deref())
        .collect::<BTreeSet<&str>>();
    let brands = records
        .iter()
        .map(|record| record.brand.as_str())
        .collect::<BTreeSet<&str>>();

    ReportTotals {
        records: as_count(records.len()),
        equipment,
        postpaid: as_count(records.len()) - equipment,
        active_days: as_count(days.len()),
        distinct_sellers: as_count(sellers.len()),
        distinct_brands: as_count(brands.len()),
    }
}

pub(crate) fn count_category(records: &[&TransactionRecord], category: ProductCategory) -> u64 {
    as_count(
        records
            .iter()
            .filter(|record| record.category == category)
            .count(),
    )
}

pub(crate) fn distinct_sellers(records: &[&TransactionRecord]) -> u64 {
    as_count(
        records
            .iter()
            .filter_map(|record| record.seller.as_deref())
            .collect::<BTreeSet<&str>>()
            .len(),
    )
}

pub(crate) fn category_split(records: &[&TransactionRecord]) -> Vec<CategoryShare> {
    let total = as_count(records.len());
    ProductCategory::ALL
        .iter()
        .map(|category| {
            let count = count_category(records, *category);
            CategoryShare {
                category: *category,
                label: category.label().to_string(),
                count,
                share_pct: share(count, total),
            }
        })
        .collect()
}

/// Top `limit` keys by count; ties break on the key so output is stable.
pub(crate) fn rank_by<F>(records: &[&TransactionRecord], key_fn: F, limit: usize) -> Vec<RankedCount>
where
    F: Fn(&TransactionRecord) -> &str,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        *counts.entry(key_fn(*record)).or_insert(0) += 1;
    }

    let total = as_count(records.len());
    let mut ranked = counts.into_iter().collect::<Vec<(&str, u64)>>();
    ranked.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(right.0)));

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (key, count))| RankedCount {
            rank: index + 1,
            key: key.to_string(),
            count,
            share_pct: share(count, total),
        })
        .collect()
}

pub(crate) fn daily_counts(records: &[&TransactionRecord]) -> Vec<DailyCount> {
    let mut by_day: BTreeMap<chrono::NaiveDate, (u64, u64)> = BTreeMap::new();
    for record in records {
        let slot = by_day.entry(record.date()).or_insert((0, 0));
        match record.category {
            ProductCategory::Equipment => slot.0 += 1,
            ProductCategory::Postpaid => slot.1 += 1,
        }
    }

    by_day
        .into_iter()
        .map(|(date, (equipment, postpaid))| DailyCount {
            date: format_iso_date(&date),
            count: equipment + postpaid,
            equipment,
            postpaid,
        })
        .collect()
}

/// Cross-tabulates `dimension` against product category. Rows are ordered
/// by total descending, then key.
pub(crate) fn cross_tab<F>(records: &[&TransactionRecord], dimension: &str, key_fn: F) -> PivotTable
where
    F: Fn(&TransactionRecord) -> &str,
{
    let columns = ProductCategory::ALL;
    let mut cells: HashMap<&str, Vec<u64>> = HashMap::new();
    for record in records {
        let counts = cells
            .entry(key_fn(*record))
            .or_insert_with(|| vec![0; columns.len()]);
        if let Some(index) = columns.iter().position(|column| *column == record.category) {
            counts[index] += 1;
        }
    }

    let mut rows = cells
        .into_iter()
        .map(|(key, counts)| PivotRow {
            key: key.to_string(),
            total: counts.iter().sum(),
            counts,
        })
        .collect::<Vec<PivotRow>>();
    rows.sort_by(|left, right| {
        right
            .total
            .cmp(&left.total)
            .then_with(|| left.key.cmp(&right.key))
    });

    let column_totals = (0..columns.len())
        .map(|index| rows.iter().map(|row| row.counts[index]).sum())
        .collect::<Vec<u64>>();

    PivotTable {
        row_dimension: dimension.to_string(),
        columns: columns
            .iter()
            .map(|column| column.label().to_string())
            .collect(),
        grand_total: column_totals.iter().sum(),
        column_totals,
        rows,
    }
}

pub(crate) fn sample(records: &[&TransactionRecord]) -> Vec<SampleRow> {
    records
        .iter()
        .take(SAMPLE_SIZE)
        .map(|record| SampleRow {
            row: record.row,
            timestamp: record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            cost_center: record.cost_center.clone(),
            seller: record.seller.clone(),
            product_type: record.product_type.clone(),
            brand: record.brand.clone(),
            category: record.category,
        })
        .collect()
}

pub(crate) fn seller_key(record: &TransactionRecord) -> &str {
    record.seller.as_deref().unwrap_or(UNASSIGNED)
}

pub(crate) fn cost_center_key(record: &TransactionRecord) -> &str {
    record.cost_center.as_deref().unwrap_or(UNASSIGNED)
}

fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(count as f64 / total as f64 * 100.0)
}

fn as_count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{category_split, cost_center_key, cross_tab, daily_counts, rank_by, totals};
    use crate::dataset::TransactionRecord;

    fn record(row: usize, day: u32, brand: &str, product: &str, cc: &str) -> TransactionRecord {
        let timestamp = NaiveDate::from_ymd_opt(2024, 8, day)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .unwrap_or_default();
        TransactionRecord::new(
            row,
            timestamp,
            Some(brand),
            Some(product),
            Some("V1"),
            Some(cc),
        )
    }

    fn fixture() -> Vec<TransactionRecord> {
        vec![
            record(1, 1, "lg", "Cash Kit", "A"),
            record(2, 1, "samsung", "Plan 39", "A"),
            record(3, 2, "samsung", "Replacement", "B"),
            record(4, 3, "apple", "Plan 39", "B"),
            record(5, 3, "samsung", "Plan 59", "B"),
        ]
    }

    #[test]
    fn totals_split_equipment_and_postpaid() {
        let records = fixture();
        let refs = records.iter().collect::<Vec<&TransactionRecord>>();
        let summary = totals(&refs);
        assert_eq!(summary.records, 5);
        assert_eq!(summary.equipment, 2);
        assert_eq!(summary.postpaid, 3);
        assert_eq!(summary.active_days, 3);
        assert_eq!(summary.distinct_brands, 3);
    }

    #[test]
    fn ranking_orders_by_count_then_key_and_respects_limit() {
        let records = fixture();
        let refs = records.iter().collect::<Vec<&TransactionRecord>>();
        let ranked = rank_by(&refs, |record| record.brand.as_str(), 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].key, "SAMSUNG");
        assert_eq!(ranked[0].count, 3);
        assert_eq!(ranked[0].share_pct, 60.0);
        assert_eq!(ranked[1].key, "APPLE");
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn category_split_has_zero_shares_for_empty_input() {
        let split = category_split(&[]);
        assert_eq!(split.len(), 2);
        assert!(split.iter().all(|entry| entry.count == 0 && entry.share_pct == 0.0));
    }

    #[test]
    fn daily_counts_are_date_ordered() {
        let records = fixture();
        let refs = records.iter().collect::<Vec<&TransactionRecord>>();
        let daily = daily_counts(&refs);
        let dates = daily.iter().map(|day| day.date.as_str()).collect::<Vec<&str>>();
        assert_eq!(dates, vec!["2024-08-01", "2024-08-02", "2024-08-03"]);
        assert_eq!(daily[0].equipment, 1);
        assert_eq!(daily[0].postpaid, 1);
    }

    #[test]
    fn cross_tab_totals_are_consistent() {
        let records = fixture();
        let refs = records.iter().collect::<Vec<&TransactionRecord>>();
        let pivot = cross_tab(&refs, "cost_center", cost_center_key);
        assert_eq!(pivot.columns, vec!["Equipment".to_string(), "Postpaid".to_string()]);
        assert_eq!(pivot.rows[0].key, "B");
        assert_eq!(pivot.rows[0].counts, vec![1, 2]);
        assert_eq!(pivot.column_totals, vec![2, 3]);
        assert_eq!(pivot.grand_total, 5);
    }
}
