use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const REPORT_HELP_COMMAND: &str = "anclu report --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `anclu {cmd} --help` for usage."),
            None => "Run `anclu --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_month(month: u32) -> Self {
        Self::invalid_argument_for_command(
            &format!("Month `{month}` is out of range; months run from 1 to 12."),
            Some("report"),
        )
        .with_data(json!({
            "month": month,
            "help_command": REPORT_HELP_COMMAND,
        }))
    }

    pub fn invalid_year(year: i32) -> Self {
        Self::invalid_argument_for_command(
            &format!("Year `{year}` is outside the supported calendar range."),
            Some("report"),
        )
        .with_data(json!({
            "year": year,
            "help_command": REPORT_HELP_COMMAND,
        }))
    }

    pub fn invalid_env_value(variable: &str, value: &str, expected: &str) -> Self {
        Self::invalid_argument_with_recovery(
            &format!("Environment variable `{variable}` has invalid value `{value}`."),
            vec![
                format!("Set `{variable}` to {expected}, or unset it to use the default."),
                "Command-line flags take precedence over environment values.".to_string(),
            ],
        )
        .with_data(json!({
            "variable": variable,
            "value": value,
        }))
    }

    pub fn dataset_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "dataset_not_found",
            &format!("Sales dataset `{location}` was not found."),
            vec![
                "Pass the CSV path with `--data <path>`.".to_string(),
                "Or set `ANCLU_DATA` to the dataset location.".to_string(),
                "Use `--data -` to read the dataset from stdin.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn dataset_unreadable(source: &str, detail: &str) -> Self {
        Self::new(
            "dataset_unreadable",
            &format!("Could not read sales dataset from `{source}`: {detail}"),
            vec!["Verify the source exists, is readable, and is a delimited text file.".to_string()],
        )
        .with_data(json!({
            "source": source,
        }))
    }

    pub fn dataset_schema_mismatch(
        required_headers: Vec<String>,
        missing_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "dataset_schema_mismatch",
            &format!(
                "Sales dataset is missing required columns: {}.",
                missing_headers.join(", ")
            ),
            vec![
                "Include every required column in the header row; extra columns are ignored."
                    .to_string(),
                "Check the delimiter with `--delimiter` if the header looks like one column."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "required_headers": required_headers,
            "missing_headers": missing_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
