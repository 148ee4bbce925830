use std::collections::BTreeSet;

use crate::cache::DatasetCache;
use crate::commands::report::{self, ReportRunOptions};
use crate::contracts::envelope::SuccessEnvelope;
use crate::period::parse_month;
use crate::report::{Selection, ViewOptions};
use crate::{ClientError, ClientResult};

const SESSION_KEYS: &str = "year, month, cc, top";

/// One interaction read from a session line such as
/// `year=2024 month=agosto cc=CC01,CC02 top=5`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRequest {
    pub selection: Selection,
    pub top_n: Option<usize>,
}

/// Parses one session line. Blank lines and `#` comments yield `None`.
///
/// `cc=` with no value selects an empty cost-center set.
pub fn parse_line(line: &str) -> ClientResult<Option<SessionRequest>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut request = SessionRequest::default();
    for token in trimmed.split_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            return Err(session_error(&format!(
                "Expected `key=value`, found `{token}`."
            )));
        };

        match key.to_ascii_lowercase().as_str() {
            "year" => {
                let year = value
                    .parse::<i32>()
                    .map_err(|_| session_error(&format!("`{value}` is not a valid year.")))?;
                request.selection.year = Some(year);
            }
            "month" => {
                let month = parse_month(value).ok_or_else(|| {
                    session_error(&format!(
                        "`{value}` is not a month; use 1-12 or a month name."
                    ))
                })?;
                request.selection.month = Some(month);
            }
            "cc" | "cost_center" | "centro_costo" => {
                let allowed = value
                    .split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect::<BTreeSet<String>>();
                request.selection.cost_centers = Some(allowed);
            }
            "top" => {
                let top_n = value
                    .parse::<usize>()
                    .ok()
                    .filter(|parsed| *parsed > 0)
                    .ok_or_else(|| {
                        session_error(&format!("`top` must be a positive integer, got `{value}`."))
                    })?;
                request.top_n = Some(top_n);
            }
            other => {
                return Err(session_error(&format!(
                    "Unknown session key `{other}`; expected one of: {SESSION_KEYS}."
                )));
            }
        }
    }

    Ok(Some(request))
}

/// Runs one session line against the shared cache.
pub fn run_line(
    cache: &DatasetCache,
    defaults: ViewOptions,
    line: &str,
) -> ClientResult<Option<SuccessEnvelope>> {
    let Some(request) = parse_line(line)? else {
        return Ok(None);
    };

    let view = ViewOptions {
        top_n: request.top_n.unwrap_or(defaults.top_n),
        ..defaults
    };
    report::run(ReportRunOptions {
        cache,
        selection: request.selection,
        view,
    })
    .map(Some)
}

fn session_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            format!("Write one selection per line using keys: {SESSION_KEYS}."),
            "Example: `year=2024 month=8 cc=CC01,CC02 top=5`.".to_string(),
        ],
    )
}
