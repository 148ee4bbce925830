mod error_text;
mod format;
mod json;
mod mode;
mod periods_text;
mod report_text;

use std::io;

use anclu_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

/// Session output: compact JSON lines, or text blocks split by a rule.
pub fn print_session_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_stdout_line(&json::render_success_json_line(success)?),
        OutputMode::Text => write_stdout_line(&session_block(&render_text_success(success)?)),
    }
}

pub fn print_session_failure(
    error: &ClientError,
    line_number: usize,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_stdout_line(&json::render_error_json_line(error)?),
        OutputMode::Text => write_stdout_line(&session_block(&format!(
            "Line {line_number}: {}",
            error_text::render_error(error)
        ))),
    }
}

fn session_block(body: &str) -> String {
    format!("{body}\n{}", "=".repeat(40))
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "periods" => periods_text::render_periods(&success.data),
        "report" => report_text::render_report(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
