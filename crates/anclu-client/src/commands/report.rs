use tracing::info;

use crate::ClientResult;
use crate::cache::DatasetCache;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::report::{Selection, ViewOptions, compute_view};

#[derive(Debug)]
pub struct ReportRunOptions<'a> {
    pub cache: &'a DatasetCache,
    pub selection: Selection,
    pub view: ViewOptions,
}

pub fn run(options: ReportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let dataset = options.cache.get()?;
    let view = compute_view(&dataset, &options.selection, options.view)?;
    info!(
        period = view.period.as_ref().map(|period| period.label.as_str()).unwrap_or("none"),
        records = view.totals.records,
        empty = view.empty_state.is_some(),
        "report computed"
    );
    success("report", view)
}
