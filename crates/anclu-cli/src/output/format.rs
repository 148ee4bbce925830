use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub const fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub const fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

const INDENT: &str = "  ";
const COLUMN_GAP: &str = "  ";
const MAX_CELL_WIDTH: usize = 28;
const BAR_GLYPH: char = '#';
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(100);
    cmp::max(from_env, 40)
}

/// Bar width left over once `used` columns of text are printed.
pub fn bar_width(used: usize) -> usize {
    terminal_width()
        .saturating_sub(used)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

pub fn key_value_rows(entries: &[(&str, String)]) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|(label, value)| format!("{INDENT}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders an aligned table. Cells longer than the cap are cut with `~`.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cmp::min(cell.chars().count(), MAX_CELL_WIDTH))
                .chain([column.name.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<usize>>();

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<String>>();

    let mut output = vec![
        format_row(columns, &header, &widths),
        format_row(columns, &rule, &widths),
    ];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, &width))| {
            let value = truncate(cells.get(index).map(String::as_str).unwrap_or(""), width);
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();
    format!("{INDENT}{}", pieces.join(COLUMN_GAP)).trim_end().to_string()
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept = value.chars().take(width.saturating_sub(1)).collect::<String>();
    format!("{kept}~")
}

/// A horizontal bar scaled so that `max` fills `width`. Non-zero values
/// always get at least one glyph.
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if value == 0 || max == 0 || width == 0 {
        return String::new();
    }
    let scaled = (u128::from(value) * width as u128) / u128::from(max);
    let length = cmp::max(1, usize::try_from(scaled).unwrap_or(width));
    BAR_GLYPH.to_string().repeat(cmp::min(length, width))
}

pub fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, bar, key_value_rows, render_table, signed, signed_percent, truncate};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(&[
            ("Rows read:", "100".to_string()),
            ("Rows excluded:", "0".to_string()),
        ]);

        assert_eq!(rows[0], "  Rows read:      100");
        assert_eq!(rows[1], "  Rows excluded:  0");
    }

    #[test]
    fn table_aligns_columns_under_a_rule() {
        let rendered = render_table(
            &[Column::left("Brand"), Column::right("Sales")],
            &[
                vec!["SAMSUNG".to_string(), "90".to_string()],
                vec!["LG".to_string(), "100".to_string()],
            ],
        );

        assert_eq!(rendered[0], "  Brand    Sales");
        assert_eq!(rendered[1], "  -------  -----");
        assert_eq!(rendered[2], "  SAMSUNG     90");
        assert_eq!(rendered[3], "  LG         100");
    }

    #[test]
    fn long_cells_are_cut() {
        assert_eq!(truncate("abcdef", 4), "abc~");
        assert_eq!(truncate("ñandú", 5), "ñandú");
    }

    #[test]
    fn bars_scale_to_width() {
        assert_eq!(bar(100, 100, 10), "##########");
        assert_eq!(bar(50, 100, 10), "#####");
        assert_eq!(bar(1, 1000, 10), "#");
        assert_eq!(bar(0, 100, 10), "");
    }

    #[test]
    fn signed_values_carry_a_plus() {
        assert_eq!(signed(20), "+20");
        assert_eq!(signed(-50), "-50");
        assert_eq!(signed(0), "0");
        assert_eq!(signed_percent(20.0), "+20.0%");
        assert_eq!(signed_percent(-66.7), "-66.7%");
    }
}
