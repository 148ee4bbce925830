mod cli;
mod dispatch;
mod logging;
mod output;
mod session;
mod stdout_io;

use std::io;
use std::process::ExitCode;

use anclu_client::config::ReportConfig;
use anclu_client::{ClientError, DatasetCache};
use clap::{Parser, error::ErrorKind};
use session::SessionOutcome;
use stdout_io::write_stdout_text;
use tracing::debug;

const ROOT_HELP: &str = "Anclu - monthly sales report for point-of-sale exports

Usage:
  anclu <command>

Start here:
  anclu periods
  anclu report
  anclu --help
";

const TOP_LEVEL_HELP: &str = "Anclu — monthly sales report for point-of-sale exports

USAGE: anclu [--data <PATH>] [--locale es|en] <command>

Look around:
  anclu periods                                   Years, months and cost centers with sales
  anclu periods --year 2024                       Months with sales in one year

Report one month against the month before:
  anclu report                                    Latest year, first month with data
  anclu report --year 2024 --month agosto         A specific month
  anclu report --month 8 --cost-center CC01       Restrict to one or more cost centers
  anclu report --month 8 --json                   Full view as JSON

Explore several selections over one load of the data:
  printf 'month=7\\nmonth=8 cc=CC01\\n' | anclu session

Where the data comes from:
  --data <PATH>, then $ANCLU_DATA, then ./ventas_anclu.csv (`-` reads stdin).
  Set ANCLU_LOG=debug to trace loading on stderr.

Run `anclu <command> --help` for command usage.
";

fn main() -> ExitCode {
    logging::init_logging();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return handle_parse_error(&err, &raw_args),
    };
    let mode = output::mode_for_command(&cli.command);

    let config = match ReportConfig::resolve(cli.config_overrides()) {
        Ok(value) => value,
        Err(error) => return fail(&error, mode),
    };
    debug!(
        source = %config.source.label(),
        locale = config.locale.as_str(),
        top_n = config.top_n,
        "resolved report configuration"
    );
    let cache = DatasetCache::new(config.source.clone(), config.delimiter);

    if matches!(cli.command, cli::Commands::Session { .. }) {
        return run_session(&cache, &config, mode);
    }

    match dispatch::dispatch(&cli, &cache, &config) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => fail(&error, mode),
    }
}

fn run_session(
    cache: &DatasetCache,
    config: &ReportConfig,
    mode: output::OutputMode,
) -> Result<ExitCode, ExitCode> {
    let stdin = io::stdin().lock();
    match session::run(cache, config.view_options(), mode, stdin) {
        Ok(SessionOutcome::Completed { failed: 0, .. }) => Ok(ExitCode::SUCCESS),
        Ok(SessionOutcome::Completed { .. }) => Err(ExitCode::from(1)),
        Ok(SessionOutcome::Aborted(error)) => fail(&error, mode),
        Err(_) => Err(ExitCode::from(2)),
    }
}

fn fail(error: &ClientError, mode: output::OutputMode) -> Result<ExitCode, ExitCode> {
    if output::print_failure(error, mode).is_err() {
        return Err(ExitCode::from(2));
    }
    Err(exit_code_for_error(error))
}

fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> Result<ExitCode, ExitCode> {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        let text = if is_top_level_help_request(raw_args) {
            TOP_LEVEL_HELP.to_string()
        } else {
            err.to_string()
        };
        if write_stdout_text(&text).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let command_hint = if matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::UnknownArgument
            | ErrorKind::ArgumentConflict
    ) {
        command_from_args(raw_args)
    } else {
        None
    };
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error = ClientError::invalid_argument_for_command(&clean_message, command_hint);
    fail(&parse_error, infer_requested_output_mode(raw_args))
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so our "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// First known subcommand in the raw args, for the `--help` hint.
fn command_from_args(raw_args: &[String]) -> Option<&'static str> {
    raw_args
        .iter()
        .skip(1)
        .find_map(|value| match value.as_str() {
            "periods" => Some("periods"),
            "report" => Some("report"),
            "session" => Some("session"),
            _ => None,
        })
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.code.starts_with("internal_") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

#[cfg(test)]
mod tests {
    use super::{command_from_args, strip_clap_boilerplate};

    #[test]
    fn clap_boilerplate_is_removed() {
        let message = "error: invalid value '13' for '--month <MONTH>'\n\nUsage: anclu report";
        assert_eq!(
            strip_clap_boilerplate(message),
            "error: invalid value '13' for '--month <MONTH>'"
        );
    }

    #[test]
    fn command_hint_skips_flag_values() {
        let args = ["anclu", "--data", "x.csv", "report", "--month", "13"]
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<String>>();
        assert_eq!(command_from_args(&args), Some("report"));

        let none = ["anclu", "--bogus"]
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<String>>();
        assert_eq!(command_from_args(&none), None);
    }
}
