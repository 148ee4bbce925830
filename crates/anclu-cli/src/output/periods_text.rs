use std::io;

use serde_json::Value;

use super::report_text::dataset_lines;

pub fn render_periods(data: &Value) -> io::Result<String> {
    let years = data
        .get("years")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("periods output requires years"))?;

    if data.get("empty_state").and_then(Value::as_str) == Some("no_data") {
        let mut lines = vec![
            "No sales with a usable date were found.".to_string(),
            String::new(),
        ];
        lines.extend(dataset_lines(data.get("dataset")));
        return Ok(lines.join("\n"));
    }

    let mut lines = Vec::new();
    if years.is_empty() {
        lines.push("No months with sales for the requested year.".to_string());
    } else {
        lines.push("Available periods:".to_string());
        let label_width = years
            .iter()
            .filter_map(|entry| entry.get("year").and_then(Value::as_i64))
            .map(|year| year.to_string().len())
            .max()
            .unwrap_or(4);
        for entry in years {
            let year = entry.get("year").and_then(Value::as_i64).unwrap_or(0);
            let months = entry
                .get("months")
                .and_then(Value::as_array)
                .map(|months| {
                    months
                        .iter()
                        .filter_map(|month| month.get("name").and_then(Value::as_str))
                        .collect::<Vec<&str>>()
                        .join(", ")
                })
                .unwrap_or_default();
            lines.push(format!("  {year:<label_width$}  {months}"));
        }
    }

    if let Some(default) = data
        .get("default_period")
        .and_then(|value| value.get("label"))
        .and_then(Value::as_str)
    {
        lines.push(String::new());
        lines.push(format!("Default selection: {default}"));
    }

    let cost_centers = data
        .get("cost_centers")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_str).collect::<Vec<&str>>())
        .unwrap_or_default();
    lines.push(String::new());
    if cost_centers.is_empty() {
        lines.push("Cost centers: none recorded".to_string());
    } else {
        lines.push(format!("Cost centers ({}):", cost_centers.len()));
        lines.push(format!("  {}", cost_centers.join(", ")));
    }

    lines.push(String::new());
    lines.extend(dataset_lines(data.get("dataset")));
    lines.push(String::new());
    lines.push("Next: `anclu report --year <YEAR> --month <MONTH>`".to_string());

    Ok(lines.join("\n"))
}
