use std::io::{self, BufRead};

use anclu_client::commands::session::run_line;
use anclu_client::report::ViewOptions;
use anclu_client::{ClientError, DatasetCache};
use tracing::{debug, warn};

use crate::output::{self, OutputMode};

#[derive(Debug)]
pub enum SessionOutcome {
    Completed { rendered: usize, failed: usize },
    /// The dataset itself could not be loaded; no later line can succeed.
    Aborted(ClientError),
}

pub fn stdin_conflict_error() -> ClientError {
    ClientError::invalid_argument_with_recovery(
        "`session` reads selections from stdin, so the dataset cannot come from stdin too.",
        vec![
            "Pass the sales file by path: `anclu session --data ventas.csv`.".to_string(),
            "Or set ANCLU_DATA to the file path.".to_string(),
        ],
    )
}

/// Renders one report per selection line. Selection errors are printed and
/// skipped; a dataset error ends the session.
pub fn run<R: BufRead>(
    cache: &DatasetCache,
    defaults: ViewOptions,
    mode: OutputMode,
    input: R,
) -> io::Result<SessionOutcome> {
    if cache.source().is_stdin() {
        return Ok(SessionOutcome::Aborted(stdin_conflict_error()));
    }

    let mut rendered = 0;
    let mut failed = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        match run_line(cache, defaults, &line) {
            Ok(Some(success)) => {
                output::print_session_success(&success, mode)?;
                rendered += 1;
            }
            Ok(None) => debug!(line = line_number, "skipped session line"),
            Err(error) if is_dataset_error(&error) => {
                return Ok(SessionOutcome::Aborted(error));
            }
            Err(error) => {
                warn!(line = line_number, code = %error.code, "session line rejected");
                output::print_session_failure(&error, line_number, mode)?;
                failed += 1;
            }
        }
    }

    debug!(rendered, failed, loads = cache.load_count(), "session finished");
    Ok(SessionOutcome::Completed { rendered, failed })
}

fn is_dataset_error(error: &ClientError) -> bool {
    error.code.starts_with("dataset_") || error.code.starts_with("internal_")
}
