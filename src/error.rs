use std::fmt;

use crate::data::field::{Field, FieldKind};

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("Field {field} is {actual} but the {role} must be {expected}.")]
    InvalidFieldKind {
        field: Field,
        role: Role,
        expected: FieldKind,
        actual: FieldKind,
    },
    #[error("Age bounds {min}..={max} are invalid; both must lie in {lower}..={upper} with min <= max.")]
    InvalidAgeBounds {
        min: f64,
        max: f64,
        lower: f64,
        upper: f64,
    },
    #[error("Record {row} has no age value.")]
    MissingAge { row: usize },
    #[error("Dataset at {path} contains no records.")]
    EmptyDataset { path: String },
    #[error("Parse Field Error: {0}")]
    ParseFieldError(#[from] ParseFieldError),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Serde YAML Error: {0}")]
    SerdeYamlError(#[from] serde_yaml::Error),
    #[error("Selection Build Error: {0}")]
    SelectionBuildError(String),
}

/// Which slot of a selection a field was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Measurement,
    Group,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Measurement => write!(f, "measurement field"),
            Role::Group => write!(f, "group field"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseFieldError {
    #[error("Unknown field name: {0}")]
    UnknownField(String),
}
