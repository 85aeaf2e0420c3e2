use std::collections::HashSet;

use common::setup_default_data;
use health_explorer::{
    data::{field::Field, selection::Selection},
    error::ExplorerError,
    pipeline::{aggregate, filter, MISSING_GROUP},
    presentation::{
        dashboard, distribution_spec, group_comparison_spec, row_table, summary_text, NO_DATA,
    },
};
use tracing::info;

mod common;

fn selections() -> Vec<Selection> {
    let mut selections = Vec::new();
    for measurement in [Field::Bmi, Field::Age, Field::Weight] {
        for group in [Field::Gender, Field::Race] {
            for exclude_missing in [true, false] {
                for (age_min, age_max) in [(0.0, 80.0), (18.0, 65.0), (40.0, 40.0), (70.0, 10.0)] {
                    selections.push(Selection {
                        measurement,
                        group,
                        exclude_missing,
                        age_min,
                        age_max,
                    });
                }
            }
        }
    }
    selections
}

#[test]
fn test_filter_respects_age_range_and_size() {
    let (dataset, _guards) = setup_default_data("filter_age_range");
    for selection in selections() {
        let view = filter(&dataset, &selection);
        assert!(view.len() <= dataset.len());
        for record in view.iter() {
            assert!(selection.age_min <= record.age && record.age <= selection.age_max);
        }
    }
}

#[test]
fn test_exclude_missing_leaves_no_gaps() {
    let (dataset, _guards) = setup_default_data("exclude_missing");
    for selection in selections().into_iter().filter(|s| s.exclude_missing) {
        let view = filter(&dataset, &selection);
        for record in view.iter() {
            assert!(record.is_present(selection.measurement));
            assert!(record.is_present(selection.group));
        }
    }
}

#[test]
fn test_group_counts_partition_the_view() {
    let (dataset, _guards) = setup_default_data("group_counts");
    for selection in selections() {
        let view = filter(&dataset, &selection);
        let summaries = aggregate(&view, selection.measurement, selection.group).unwrap();

        let distinct: HashSet<&str> = view
            .iter()
            .map(|r| r.category(selection.group).unwrap_or(MISSING_GROUP))
            .collect();
        assert!(summaries.len() <= distinct.len());
        assert_eq!(summaries.iter().map(|s| s.count).sum::<usize>(), view.len());
        assert!(summaries.iter().all(|s| s.count > 0));
        if selection.exclude_missing {
            assert!(summaries.iter().all(|s| s.group != MISSING_GROUP));
        }
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    let (dataset, _guards) = setup_default_data("idempotent");
    for selection in selections() {
        let first = filter(&dataset, &selection);
        let second = filter(&dataset, &selection);
        assert_eq!(first, second);
        assert_eq!(
            aggregate(&first, selection.measurement, selection.group).unwrap(),
            aggregate(&second, selection.measurement, selection.group).unwrap()
        );
    }
}

#[test]
fn test_working_age_selection() {
    let (dataset, _guards) = setup_default_data("working_age");
    let selection = Selection::builder()
        .measurement(Field::Bmi)
        .group(Field::Gender)
        .exclude_missing(true)
        .age_min(18.0)
        .age_max(65.0)
        .build()
        .unwrap();
    let view = filter(&dataset, &selection);
    info!("Working age view has {} records", view.len());
    assert!(!view.is_empty());
    let expected = dataset
        .iter()
        .filter(|r| (18.0..=65.0).contains(&r.age))
        .filter(|r| r.bmi.is_some() && r.gender.is_some())
        .count();
    assert_eq!(view.len(), expected);
}

#[test]
fn test_inverted_bounds_degrade_gracefully() {
    let (dataset, _guards) = setup_default_data("inverted_bounds");
    let selection = Selection::builder()
        .age_min(70.0)
        .age_max(10.0)
        .build()
        .unwrap();
    let view = filter(&dataset, &selection);
    assert!(view.is_empty());
    assert_eq!(summary_text(&view, selection.measurement), NO_DATA);
    assert!(aggregate(&view, selection.measurement, selection.group)
        .unwrap()
        .is_empty());
    assert!(distribution_spec(&view, selection.measurement).values.is_empty());
    assert!(group_comparison_spec(&view, selection.measurement, selection.group)
        .boxes
        .is_empty());
    assert!(row_table(&view, selection.measurement, selection.group).is_empty());

    let result = dashboard(&dataset, &selection).unwrap();
    assert_eq!(result.matched, 0);
    assert_eq!(result.summary, NO_DATA);
}

#[test]
fn test_same_field_for_both_roles_fails() {
    let (dataset, _guards) = setup_default_data("same_field");
    let selection = Selection::builder()
        .measurement(Field::Bmi)
        .group(Field::Bmi)
        .build()
        .unwrap();
    let view = filter(&dataset, &selection);
    let result = aggregate(&view, selection.measurement, selection.group);
    assert!(matches!(result, Err(ExplorerError::InvalidFieldKind { .. })));
    assert!(matches!(
        dashboard(&dataset, &selection),
        Err(ExplorerError::InvalidFieldKind { .. })
    ));
}

#[test]
fn test_including_missing_adds_missing_group() {
    let (dataset, _guards) = setup_default_data("missing_group");
    let selection = Selection::builder()
        .group(Field::Race)
        .exclude_missing(false)
        .build()
        .unwrap();
    let view = filter(&dataset, &selection);
    assert_eq!(view.len(), dataset.len());
    let summaries = aggregate(&view, selection.measurement, selection.group).unwrap();
    let missing = summaries
        .iter()
        .find(|s| s.group == MISSING_GROUP)
        .expect("records without race form their own group");
    assert_eq!(missing.count, dataset.iter().filter(|r| r.race.is_none()).count());
}
