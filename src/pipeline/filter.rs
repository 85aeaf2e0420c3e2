use tracing::{debug, instrument};

use crate::data::{dataset::Dataset, record::Record, selection::Selection};

/// Records of a dataset that pass the selection's predicates, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn new(rows: Vec<&'a Record>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/**
Applies the age range and, when requested, the missing-value predicate.

A record is kept iff `age_min <= age <= age_max`; with `exclude_missing` set it
must also have both the measurement and the group column present. Inverted
bounds simply match nothing.
 */
#[instrument(level = "debug", skip(dataset), fields(records = dataset.len()))]
pub fn filter<'a>(dataset: &'a Dataset, selection: &Selection) -> FilteredView<'a> {
    let rows: Vec<&Record> = dataset
        .iter()
        .filter(|record| selection.contains_age(record.age))
        .filter(|record| {
            !selection.exclude_missing
                || (record.is_present(selection.measurement) && record.is_present(selection.group))
        })
        .collect();
    debug!(kept = rows.len(), "Filtered dataset");
    FilteredView::new(rows)
}
