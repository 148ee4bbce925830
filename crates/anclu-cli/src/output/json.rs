use std::io;

use anclu_client::contracts::envelope::failure_from_error;
use anclu_client::{ClientError, SuccessEnvelope};
use serde::Serialize;

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "periods" | "report" => serialize_json_pretty(success),
        _ => Err(io::Error::other(format!(
            "JSON output is not supported for command `{}`",
            success.command
        ))),
    }
}

/// One-line form used by `session --json`, one object per input line.
pub fn render_success_json_line(success: &SuccessEnvelope) -> io::Result<String> {
    serde_json::to_string(success).map_err(io::Error::other)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

pub fn render_error_json_line(error: &ClientError) -> io::Result<String> {
    serde_json::to_string(&failure_from_error(error)).map_err(io::Error::other)
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
