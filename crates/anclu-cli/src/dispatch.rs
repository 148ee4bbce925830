use anclu_client::commands::periods::{self, PeriodsRunOptions};
use anclu_client::commands::report::{self, ReportRunOptions};
use anclu_client::config::ReportConfig;
use anclu_client::{ClientError, ClientResult, DatasetCache, SuccessEnvelope};

use crate::cli::{Cli, Commands, report_selection};

/// Runs the one-shot commands. `session` streams its own output and is
/// handled by `session::run`.
pub fn dispatch(
    cli: &Cli,
    cache: &DatasetCache,
    config: &ReportConfig,
) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Periods { year, .. } => periods::run(PeriodsRunOptions {
            cache,
            year: *year,
            locale: config.locale,
        }),
        Commands::Report {
            year,
            month,
            cost_center,
            no_cost_center,
            ..
        } => report::run(ReportRunOptions {
            cache,
            selection: report_selection(*year, *month, cost_center, *no_cost_center),
            view: config.view_options(),
        }),
        Commands::Session { .. } => Err(ClientError::invalid_argument_for_command(
            "`session` reads selections from stdin and cannot be dispatched as a single report.",
            Some("session"),
        )),
    }
}
