use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    data::field::{Field, FieldKind},
    error::{ExplorerError, Role},
};

/// Lowest age the selection controls allow.
pub const AGE_LOWER_BOUND: f64 = 0.0;
/// Highest age the selection controls allow.
pub const AGE_UPPER_BOUND: f64 = 80.0;

/// The analysis parameters a user has currently chosen.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(build_fn(error = "ExplorerError"))]
#[serde(rename_all = "kebab-case")]
pub struct Selection {
    #[builder(default = "Field::Bmi")]
    pub measurement: Field,
    #[builder(default = "Field::Gender")]
    pub group: Field,
    #[builder(default = "true")]
    pub exclude_missing: bool,
    #[builder(default = "AGE_LOWER_BOUND")]
    pub age_min: f64,
    #[builder(default = "AGE_UPPER_BOUND")]
    pub age_max: f64,
}

impl From<derive_builder::UninitializedFieldError> for ExplorerError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        ExplorerError::SelectionBuildError(e.to_string())
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            measurement: Field::Bmi,
            group: Field::Gender,
            exclude_missing: true,
            age_min: AGE_LOWER_BOUND,
            age_max: AGE_UPPER_BOUND,
        }
    }
}

impl Selection {
    pub fn builder() -> SelectionBuilder {
        SelectionBuilder::default()
    }

    /// Whether `age` falls inside the selected range (inclusive on both ends).
    pub fn contains_age(&self, age: f64) -> bool {
        self.age_min <= age && age <= self.age_max
    }

    /// Checks the selection against the controls the dashboard offers.
    ///
    /// The pipeline itself accepts any selection; this is for inputs arriving
    /// from outside the process.
    pub fn validate(&self) -> Result<(), ExplorerError> {
        check_kind(self.measurement, Role::Measurement)?;
        check_kind(self.group, Role::Group)?;
        let in_range = |v: f64| (AGE_LOWER_BOUND..=AGE_UPPER_BOUND).contains(&v);
        if !in_range(self.age_min) || !in_range(self.age_max) || self.age_min > self.age_max {
            return Err(ExplorerError::InvalidAgeBounds {
                min: self.age_min,
                max: self.age_max,
                lower: AGE_LOWER_BOUND,
                upper: AGE_UPPER_BOUND,
            });
        }
        Ok(())
    }
}

/// Fails with `InvalidFieldKind` unless `field` suits `role`.
pub fn check_kind(field: Field, role: Role) -> Result<(), ExplorerError> {
    let expected = match role {
        Role::Measurement => FieldKind::Numeric,
        Role::Group => FieldKind::Categorical,
    };
    if field.kind() != expected {
        return Err(ExplorerError::InvalidFieldKind {
            field,
            role,
            expected,
            actual: field.kind(),
        });
    }
    Ok(())
}
