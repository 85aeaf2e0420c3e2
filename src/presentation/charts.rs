//! Chart specifications handed to an external renderer.
//!
//! The specs carry data, not pixels: the raw values plus enough pre-computed
//! structure (bins, box statistics) for a renderer without its own stats.

use serde::Serialize;

use crate::{
    data::field::Field,
    pipeline::{aggregate::partition, FilteredView},
    util::math_utils::{quantile_sorted, sorted},
};

/// Bin count suggested to renderers for the distribution histogram.
pub const SUGGESTED_BINS: usize = 30;

/// Whisker reach as a multiple of the interquartile range.
const WHISKER_IQR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub left: f64,
    pub right: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub field: Field,
    pub values: Vec<f64>,
    pub bins: usize,
    pub histogram: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub group: String,
    pub values: Vec<f64>,
    pub lower_whisker: f64,
    pub first_quartile: f64,
    pub median: f64,
    pub third_quartile: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSpec {
    pub measurement: Field,
    pub group: Field,
    pub boxes: Vec<BoxSummary>,
}

/// Splits values into `num_bins` equal-width bins spanning their range.
///
/// The last bin is closed on the right so the maximum is counted.
pub fn fixed_width_bins(values: &[f64], num_bins: usize) -> Vec<HistogramBin> {
    let sorted_values = sorted(values);
    let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
        return Vec::new();
    };
    if (max - min).abs() < 1e-10 {
        return vec![HistogramBin {
            left: min,
            right: max,
            count: sorted_values.len(),
        }];
    }

    let num_bins = num_bins.max(1);
    let width = (max - min) / num_bins as f64;
    let mut bins: Vec<HistogramBin> = (0..num_bins)
        .map(|i| HistogramBin {
            left: min + i as f64 * width,
            right: if i == num_bins - 1 {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    let mut current_bin = 0;
    for &value in &sorted_values {
        while current_bin < num_bins - 1 && value >= bins[current_bin].right {
            current_bin += 1;
        }
        bins[current_bin].count += 1;
    }
    bins
}

/// Histogram of the non-missing `measurement` values in the view.
pub fn distribution_spec(view: &FilteredView<'_>, measurement: Field) -> HistogramSpec {
    let values: Vec<f64> = view.iter().filter_map(|r| r.number(measurement)).collect();
    let histogram = fixed_width_bins(&values, SUGGESTED_BINS);
    HistogramSpec {
        field: measurement,
        values,
        bins: SUGGESTED_BINS,
        histogram,
    }
}

fn box_summary(group: String, values: Vec<f64>) -> Option<BoxSummary> {
    let sorted_values = sorted(&values);
    let q1 = quantile_sorted(&sorted_values, 0.25)?;
    let median = quantile_sorted(&sorted_values, 0.5)?;
    let q3 = quantile_sorted(&sorted_values, 0.75)?;
    let reach = WHISKER_IQR * (q3 - q1);
    let (low_fence, high_fence) = (q1 - reach, q3 + reach);

    let inside: Vec<f64> = sorted_values
        .iter()
        .copied()
        .filter(|v| (low_fence..=high_fence).contains(v))
        .collect();
    let lower_whisker = inside.first().copied().unwrap_or(q1);
    let upper_whisker = inside.last().copied().unwrap_or(q3);
    let outliers = values
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxSummary {
        group,
        values,
        lower_whisker,
        first_quartile: q1,
        median,
        third_quartile: q3,
        upper_whisker,
        outliers,
    })
}

/// One box per group value, in first-appearance order. Groups without any
/// numeric value have nothing to draw and are left out.
pub fn group_comparison_spec(
    view: &FilteredView<'_>,
    measurement: Field,
    group: Field,
) -> BoxPlotSpec {
    let boxes = partition(view, measurement, group)
        .into_iter()
        .filter_map(|(label, _, values)| box_summary(label.to_string(), values))
        .collect();
    BoxPlotSpec {
        measurement,
        group,
        boxes,
    }
}
