//! Read-only projections of the filtered data, one per dashboard panel.

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    data::{dataset::Dataset, selection::Selection},
    error::ExplorerError,
    pipeline::{aggregate, filter},
};

pub mod charts;
pub mod summary;
pub mod table;

pub use charts::{distribution_spec, group_comparison_spec, BoxPlotSpec, HistogramSpec};
pub use summary::{summary_text, NO_DATA};
pub use table::{group_stats_table, row_table, GroupStatsTable, RowTable};

/// Every panel of the dashboard computed from a single filter pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub selection: Selection,
    pub matched: usize,
    pub summary: String,
    pub group_stats: GroupStatsTable,
    pub distribution: HistogramSpec,
    pub comparison: BoxPlotSpec,
    pub rows: RowTable,
}

/**
Runs filter and aggregation once for `selection` and builds every panel.

## Returns
The dashboard, or `InvalidFieldKind` when the selection puts a field in the wrong role.
 */
#[instrument(level = "info", skip(dataset))]
pub fn dashboard(dataset: &Dataset, selection: &Selection) -> Result<Dashboard, ExplorerError> {
    let view = filter(dataset, selection);
    let summaries = aggregate(&view, selection.measurement, selection.group)?;
    info!(
        matched = view.len(),
        groups = summaries.len(),
        "Dashboard computed"
    );
    Ok(Dashboard {
        selection: selection.clone(),
        matched: view.len(),
        summary: summary_text(&view, selection.measurement),
        group_stats: group_stats_table(summaries),
        distribution: distribution_spec(&view, selection.measurement),
        comparison: group_comparison_spec(&view, selection.measurement, selection.group),
        rows: row_table(&view, selection.measurement, selection.group),
    })
}
