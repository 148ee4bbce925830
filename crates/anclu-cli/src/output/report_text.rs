use std::io;

use serde_json::Value;

use super::format::{self, Column};

pub fn render_report(data: &Value) -> io::Result<String> {
    let kpis = data
        .get("kpis")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("report output requires kpis"))?;

    let mut lines = vec![
        heading(data),
        format!("Cost centers: {}", cost_center_scope(data)),
    ];

    let empty_state = data.get("empty_state").and_then(Value::as_str);
    if empty_state == Some("no_data") {
        lines.push(String::new());
        lines.push("No sales with a usable date were found.".to_string());
        lines.push("Check the date column (`fec_registro`) of the sales file.".to_string());
        push_dataset(&mut lines, data);
        return Ok(lines.join("\n"));
    }
    if data.get("period").is_none_or(Value::is_null) {
        lines.push(String::new());
        lines.push("No months with sales for the selected year.".to_string());
        lines.push("Run `anclu periods` to see the years and months available.".to_string());
        push_dataset(&mut lines, data);
        return Ok(lines.join("\n"));
    }

    lines.push(String::new());
    lines.push("Key figures:".to_string());
    lines.extend(kpi_rows(kpis));

    if empty_state == Some("no_records") {
        lines.push(String::new());
        lines.push("No sales match this period and cost-center selection.".to_string());
        push_dataset(&mut lines, data);
        return Ok(lines.join("\n"));
    }

    push_section(&mut lines, "Category split:", category_rows(data));
    push_section(
        &mut lines,
        "Top brands:",
        ranking_rows(data.get("top_brands"), "Brand"),
    );
    push_section(
        &mut lines,
        "Top product types:",
        ranking_rows(data.get("top_product_types"), "Product type"),
    );
    push_section(
        &mut lines,
        "Top sellers:",
        ranking_rows(data.get("top_sellers"), "Seller"),
    );
    push_section(&mut lines, "Daily sales:", daily_rows(data.get("daily")));

    if let Some(pivots) = data.get("pivots").and_then(Value::as_array) {
        for pivot in pivots {
            let dimension = pivot
                .get("row_dimension")
                .and_then(Value::as_str)
                .unwrap_or("group");
            push_section(
                &mut lines,
                &format!("Sales by {} and category:", dimension.replace('_', " ")),
                pivot_rows(pivot),
            );
        }
    }

    push_section(&mut lines, "Sample records:", sample_rows(data.get("sample")));
    push_dataset(&mut lines, data);

    Ok(lines.join("\n"))
}

/// Source, row counts and date coverage; shared with `periods`.
pub fn dataset_lines(dataset: Option<&Value>) -> Vec<String> {
    let Some(dataset) = dataset else {
        return Vec::new();
    };
    let count = |key: &str| dataset.get(key).and_then(Value::as_u64).unwrap_or(0);
    let mut entries = vec![
        (
            "Source:",
            dataset
                .get("source")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
        ),
        (
            "Rows:",
            format!(
                "{} loaded of {} read ({} excluded for unusable dates)",
                count("rows_loaded"),
                count("rows_read"),
                count("rows_excluded")
            ),
        ),
    ];
    if let (Some(earliest), Some(latest)) = (
        dataset.get("earliest").and_then(Value::as_str),
        dataset.get("latest").and_then(Value::as_str),
    ) {
        entries.push(("Dates:", format!("{earliest} to {latest}")));
    }

    let mut lines = vec!["Dataset:".to_string()];
    lines.extend(format::key_value_rows(&entries));
    lines
}

fn heading(data: &Value) -> String {
    let label = |key: &str| {
        data.get(key)
            .and_then(|period| period.get("label"))
            .and_then(Value::as_str)
    };
    match (label("period"), label("previous_period")) {
        (Some(current), Some(previous)) => format!("Sales report: {current} (vs {previous})"),
        (Some(current), None) => format!("Sales report: {current}"),
        _ => "Sales report".to_string(),
    }
}

fn cost_center_scope(data: &Value) -> String {
    match data.get("cost_centers").and_then(Value::as_array) {
        None => "all".to_string(),
        Some(values) if values.is_empty() => "none selected".to_string(),
        Some(values) => values
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<&str>>()
            .join(", "),
    }
}

fn push_section(lines: &mut Vec<String>, title: &str, rows: Vec<String>) {
    if rows.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(title.to_string());
    lines.extend(rows);
}

fn push_dataset(lines: &mut Vec<String>, data: &Value) {
    let dataset = dataset_lines(data.get("dataset"));
    if dataset.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.extend(dataset);
}

fn kpi_rows(kpis: &[Value]) -> Vec<String> {
    let rows = kpis
        .iter()
        .map(|kpi| {
            let comparison = kpi.get("comparison").unwrap_or(&Value::Null);
            let number = |key: &str| comparison.get(key).and_then(Value::as_u64).unwrap_or(0);
            vec![
                kpi.get("label")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                number("current_value").to_string(),
                number("previous_value").to_string(),
                change_cell(comparison),
                trend_cell(comparison),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(
        &[
            Column::left("Metric"),
            Column::right("Current"),
            Column::right("Previous"),
            Column::right("Change"),
            Column::left("Trend"),
        ],
        &rows,
    )
}

fn change_cell(comparison: &Value) -> String {
    let absolute = comparison
        .get("absolute_delta")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let relative = match comparison.get("percentage_delta").and_then(Value::as_f64) {
        Some(value) => format::signed_percent(value),
        None => "no baseline".to_string(),
    };
    format!("{} ({relative})", format::signed(absolute))
}

fn trend_cell(comparison: &Value) -> String {
    match comparison.get("trend").and_then(Value::as_str) {
        Some("increase") => "▲ up".to_string(),
        Some("decrease") => "▼ down".to_string(),
        _ => "= flat".to_string(),
    }
}

fn category_rows(data: &Value) -> Vec<String> {
    let Some(shares) = data.get("category_split").and_then(Value::as_array) else {
        return Vec::new();
    };
    let max = shares
        .iter()
        .filter_map(|share| share.get("count").and_then(Value::as_u64))
        .max()
        .unwrap_or(0);
    let width = format::bar_width(40);
    let rows = shares
        .iter()
        .map(|share| {
            let count = share.get("count").and_then(Value::as_u64).unwrap_or(0);
            vec![
                share
                    .get("label")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                count.to_string(),
                format::percent(share.get("share_pct").and_then(Value::as_f64).unwrap_or(0.0)),
                format::bar(count, max, width),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(
        &[
            Column::left("Category"),
            Column::right("Sales"),
            Column::right("Share"),
            Column::left(""),
        ],
        &rows,
    )
}

fn ranking_rows(ranking: Option<&Value>, key_label: &str) -> Vec<String> {
    let Some(entries) = ranking.and_then(Value::as_array) else {
        return Vec::new();
    };
    let max = entries
        .first()
        .and_then(|entry| entry.get("count"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let width = format::bar_width(60);
    let rows = entries
        .iter()
        .map(|entry| {
            let count = entry.get("count").and_then(Value::as_u64).unwrap_or(0);
            vec![
                entry
                    .get("rank")
                    .and_then(Value::as_u64)
                    .unwrap_or(0)
                    .to_string(),
                entry
                    .get("key")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                count.to_string(),
                format::percent(entry.get("share_pct").and_then(Value::as_f64).unwrap_or(0.0)),
                format::bar(count, max, width),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(
        &[
            Column::right("#"),
            Column::left(key_label),
            Column::right("Sales"),
            Column::right("Share"),
            Column::left(""),
        ],
        &rows,
    )
}

fn daily_rows(daily: Option<&Value>) -> Vec<String> {
    let Some(days) = daily.and_then(Value::as_array) else {
        return Vec::new();
    };
    let count = |day: &Value, key: &str| day.get(key).and_then(Value::as_u64).unwrap_or(0);
    let max = days.iter().map(|day| count(day, "count")).max().unwrap_or(0);
    let width = format::bar_width(50);
    let rows = days
        .iter()
        .map(|day| {
            vec![
                day.get("date")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                count(day, "count").to_string(),
                count(day, "equipment").to_string(),
                count(day, "postpaid").to_string(),
                format::bar(count(day, "count"), max, width),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(
        &[
            Column::left("Date"),
            Column::right("Sales"),
            Column::right("Equipment"),
            Column::right("Postpaid"),
            Column::left(""),
        ],
        &rows,
    )
}

fn pivot_rows(pivot: &Value) -> Vec<String> {
    let names = pivot
        .get("columns")
        .and_then(Value::as_array)
        .map(|columns| {
            columns
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    let Some(entries) = pivot.get("rows").and_then(Value::as_array) else {
        return Vec::new();
    };
    if entries.is_empty() {
        return Vec::new();
    }

    let counts = |value: Option<&Value>| {
        value
            .and_then(Value::as_array)
            .map(|counts| {
                counts
                    .iter()
                    .map(|count| count.as_u64().unwrap_or(0).to_string())
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default()
    };
    let total = |value: Option<&Value>| value.and_then(Value::as_u64).unwrap_or(0).to_string();

    let mut rows = entries
        .iter()
        .map(|entry| {
            let mut row = vec![
                entry
                    .get("key")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            ];
            row.extend(counts(entry.get("counts")));
            row.push(total(entry.get("total")));
            row
        })
        .collect::<Vec<Vec<String>>>();
    let mut totals = vec!["Total".to_string()];
    totals.extend(counts(pivot.get("column_totals")));
    totals.push(total(pivot.get("grand_total")));
    rows.push(totals);

    let mut columns = vec![Column::left("")];
    columns.extend(names.iter().map(|name| Column::right(name)));
    columns.push(Column::right("Total"));
    format::render_table(&columns, &rows)
}

fn sample_rows(sample: Option<&Value>) -> Vec<String> {
    let Some(entries) = sample.and_then(Value::as_array) else {
        return Vec::new();
    };
    let text = |entry: &Value, key: &str, fallback: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    };
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                text(entry, "timestamp", ""),
                text(entry, "cost_center", "-"),
                text(entry, "seller", "-"),
                text(entry, "product_type", ""),
                text(entry, "brand", ""),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(
        &[
            Column::left("Registered"),
            Column::left("Cost center"),
            Column::left("Seller"),
            Column::left("Product type"),
            Column::left("Brand"),
        ],
        &rows,
    )
}
