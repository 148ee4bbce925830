use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increase,
    Decrease,
    NoChange,
}

impl Trend {
    pub fn from_delta(delta: i64) -> Self {
        match delta.signum() {
            1 => Self::Increase,
            -1 => Self::Decrease,
            _ => Self::NoChange,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::NoChange => "no_change",
        }
    }
}

/// A count compared with the same count one period earlier.
///
/// `percentage_delta` is `None` exactly when `previous_value` is zero; the
/// view reports that as "no baseline".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub current_value: u64,
    pub previous_value: u64,
    pub absolute_delta: i64,
    pub percentage_delta: Option<f64>,
    pub trend: Trend,
    pub has_baseline: bool,
}

pub fn compare_counts(current_value: u64, previous_value: u64) -> Comparison {
    let absolute_delta = signed(current_value) - signed(previous_value);
    let percentage_delta = if previous_value == 0 {
        None
    } else {
        Some(round_one_decimal(
            absolute_delta as f64 / previous_value as f64 * 100.0,
        ))
    };

    Comparison {
        current_value,
        previous_value,
        absolute_delta,
        percentage_delta,
        trend: Trend::from_delta(absolute_delta),
        has_baseline: previous_value != 0,
    }
}

/// Rounds to one decimal; a result that rounds to zero is always `0.0`,
/// never `-0.0`.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
