use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    data::{field::Field, selection::check_kind},
    error::{ExplorerError, Role},
    pipeline::filter::FilteredView,
    util::math_utils::{mean, median, round2, std_deviation},
};

/// Group label used for records whose group value is missing.
pub const MISSING_GROUP: &str = "missing";

/// Descriptive statistics of the measurement within one group.
///
/// `None` statistics are undefined for the group (no values, or fewer than two
/// values for the standard deviation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
}

impl GroupSummary {
    fn from_values(group: String, count: usize, values: &[f64]) -> Self {
        Self {
            group,
            count,
            mean: mean(values),
            median: median(values),
            std_dev: std_deviation(values),
        }
    }

    /// Copy with every statistic rounded to two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            group: self.group.clone(),
            count: self.count,
            mean: self.mean.map(round2),
            median: self.median.map(round2),
            std_dev: self.std_dev.map(round2),
        }
    }
}

/// Group label of a record, with missing values mapped to [`MISSING_GROUP`].
pub fn group_label(record: &crate::data::record::Record, group: Field) -> &str {
    record.category(group).unwrap_or(MISSING_GROUP)
}

/**
Splits the view by `group` in first-appearance order, keeping each group's
row count and its non-missing `measurement` values.
 */
pub(crate) fn partition<'v>(
    view: &'v FilteredView<'_>,
    measurement: Field,
    group: Field,
) -> Vec<(&'v str, usize, Vec<f64>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, usize, Vec<f64>)> = Vec::new();
    for record in view.rows() {
        let label = group_label(record, group);
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push((label, 0, Vec::new()));
            groups.len() - 1
        });
        let entry = &mut groups[slot];
        entry.1 += 1;
        if let Some(value) = record.number(measurement) {
            entry.2.push(value);
        }
    }
    groups
}

/**
Computes count, mean, median and sample standard deviation of `measurement`
per value of `group`.

## Arguments
* `view` - Filtered records.
* `measurement` - Numeric column to summarise.
* `group` - Categorical column to group by.

## Returns
One summary per group in first-appearance order, or `InvalidFieldKind` when a
field does not suit its role. An empty view gives an empty vector.
 */
#[instrument(level = "debug", skip(view), fields(rows = view.len()))]
pub fn aggregate(
    view: &FilteredView<'_>,
    measurement: Field,
    group: Field,
) -> Result<Vec<GroupSummary>, ExplorerError> {
    check_kind(measurement, Role::Measurement)?;
    check_kind(group, Role::Group)?;
    let summaries: Vec<GroupSummary> = partition(view, measurement, group)
        .into_iter()
        .map(|(label, count, values)| GroupSummary::from_values(label.to_string(), count, &values))
        .collect();
    debug!(groups = summaries.len(), "Aggregated filtered view");
    Ok(summaries)
}
