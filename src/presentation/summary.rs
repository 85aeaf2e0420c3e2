use std::fmt;

use serde::Serialize;

use crate::{
    data::field::Field,
    pipeline::FilteredView,
    util::math_utils::{mean, quantile_sorted, sorted},
};

/// Text shown in place of a summary when there is nothing to summarise.
pub const NO_DATA: &str = "no data available";

/// Five-number summary plus mean of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub min: f64,
    pub first_quartile: f64,
    pub median: f64,
    pub mean: f64,
    pub third_quartile: f64,
    pub max: f64,
    /// Rows of the view whose value was missing and therefore ignored.
    pub missing: usize,
}

const LABELS: [&str; 6] = ["Min.", "1st Qu.", "Median", "Mean", "3rd Qu.", "Max."];

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = [
            self.min,
            self.first_quartile,
            self.median,
            self.mean,
            self.third_quartile,
            self.max,
        ];
        for label in LABELS {
            write!(f, "{:>9}", label)?;
        }
        if self.missing > 0 {
            write!(f, "{:>9}", "NA's")?;
        }
        writeln!(f)?;
        for value in values {
            write!(f, "{:>9.2}", value)?;
        }
        if self.missing > 0 {
            write!(f, "{:>9}", self.missing)?;
        }
        Ok(())
    }
}

/// Summary of `field` over the view, or `None` when it has no numeric values.
pub fn summarize(view: &FilteredView<'_>, field: Field) -> Option<SummaryStats> {
    let values: Vec<f64> = view.iter().filter_map(|r| r.number(field)).collect();
    let missing = view.len() - values.len();
    let values = sorted(&values);
    Some(SummaryStats {
        min: *values.first()?,
        first_quartile: quantile_sorted(&values, 0.25)?,
        median: quantile_sorted(&values, 0.5)?,
        mean: mean(&values)?,
        third_quartile: quantile_sorted(&values, 0.75)?,
        max: *values.last()?,
        missing,
    })
}

/// Summary text for the measurement panel.
pub fn summary_text(view: &FilteredView<'_>, field: Field) -> String {
    match summarize(view, field) {
        Some(stats) => stats.to_string(),
        None => NO_DATA.to_string(),
    }
}

/// Like [`summary_text`] but for a column name that may not exist in the schema.
pub fn summary_text_for(view: &FilteredView<'_>, field_name: &str) -> String {
    match field_name.parse::<Field>() {
        Ok(field) => summary_text(view, field),
        Err(_) => NO_DATA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::{Record, RecordBuilder};

    fn records(bmis: &[Option<f64>]) -> Vec<Record> {
        bmis.iter()
            .map(|bmi| {
                let mut builder = RecordBuilder::default();
                builder.age(50.0).gender("female");
                if let Some(bmi) = bmi {
                    builder.bmi(*bmi);
                }
                builder.build().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_summarize_ignores_missing() {
        let records = records(&[Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)]);
        let view = FilteredView::new(records.iter().collect());
        let stats = summarize(&view, Field::Bmi).unwrap();
        assert_eq!(stats.min, 1.0);
        assert!((stats.first_quartile - 1.75).abs() < 1e-12);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
        assert!((stats.third_quartile - 3.25).abs() < 1e-12);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.missing, 1);
    }

    #[test]
    fn test_text_layout() {
        let records = records(&[Some(20.0), Some(22.0), Some(24.0)]);
        let view = FilteredView::new(records.iter().collect());
        let text = summary_text(&view, Field::Bmi);
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("Min.") && header.contains("3rd Qu."));
        assert!(!header.contains("NA's"));
        assert!(lines.next().unwrap().contains("22.00"));
    }

    #[test]
    fn test_empty_view_has_no_data() {
        let view = FilteredView::new(Vec::new());
        assert_eq!(summary_text(&view, Field::Bmi), NO_DATA);
    }

    #[test]
    fn test_categorical_field_has_no_data() {
        let records = records(&[Some(20.0)]);
        let view = FilteredView::new(records.iter().collect());
        assert_eq!(summary_text(&view, Field::Gender), NO_DATA);
    }

    #[test]
    fn test_unknown_column_has_no_data() {
        let records = records(&[Some(20.0)]);
        let view = FilteredView::new(records.iter().collect());
        assert_eq!(summary_text_for(&view, "Pulse"), NO_DATA);
        assert!(summary_text_for(&view, "BMI").contains("20.00"));
    }
}
