use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseFieldError;

/// Every column of a survey record.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Field {
    Id,
    Age,
    Bmi,
    Height,
    Weight,
    TotalCholesterol,
    SystolicBp,
    DiastolicBp,
    Gender,
    Race,
    Education,
    SmokingStatus,
    DiabetesStatus,
    BmiCategory,
    AgeDecade,
}

/// Whether a column holds numbers or category labels.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Identifier,
    Numeric,
    Categorical,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Identifier => "identifier",
            FieldKind::Numeric => "numeric",
            FieldKind::Categorical => "categorical",
        };
        write!(f, "{}", s)
    }
}

impl Field {
    /// Fields offered as the measured variable.
    pub const MEASUREMENTS: [Field; 7] = [
        Field::Age,
        Field::Bmi,
        Field::Height,
        Field::Weight,
        Field::TotalCholesterol,
        Field::SystolicBp,
        Field::DiastolicBp,
    ];

    /// Fields offered as the grouping variable.
    pub const GROUPS: [Field; 7] = [
        Field::Gender,
        Field::Race,
        Field::Education,
        Field::SmokingStatus,
        Field::DiabetesStatus,
        Field::BmiCategory,
        Field::AgeDecade,
    ];

    /// Identity and demographic columns always shown in the row table.
    pub const ROW_TABLE_BASE: [Field; 5] = [
        Field::Id,
        Field::Gender,
        Field::Age,
        Field::Race,
        Field::Education,
    ];

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Id => FieldKind::Identifier,
            Field::Age
            | Field::Bmi
            | Field::Height
            | Field::Weight
            | Field::TotalCholesterol
            | Field::SystolicBp
            | Field::DiastolicBp => FieldKind::Numeric,
            Field::Gender
            | Field::Race
            | Field::Education
            | Field::SmokingStatus
            | Field::DiabetesStatus
            | Field::BmiCategory
            | Field::AgeDecade => FieldKind::Categorical,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == FieldKind::Numeric
    }

    pub fn is_categorical(&self) -> bool {
        self.kind() == FieldKind::Categorical
    }

    /// Column header used in the CSV source and on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Age => "Age",
            Field::Bmi => "BMI",
            Field::Height => "Height",
            Field::Weight => "Weight",
            Field::TotalCholesterol => "TotalCholesterol",
            Field::SystolicBp => "SystolicBP",
            Field::DiastolicBp => "DiastolicBP",
            Field::Gender => "Gender",
            Field::Race => "Race",
            Field::Education => "Education",
            Field::SmokingStatus => "SmokingStatus",
            Field::DiabetesStatus => "DiabetesStatus",
            Field::BmiCategory => "BMICategory",
            Field::AgeDecade => "AgeDecade",
        }
    }
}

// --- String Conversion ---

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ID" => Ok(Field::Id),
            "Age" => Ok(Field::Age),
            "BMI" => Ok(Field::Bmi),
            "Height" => Ok(Field::Height),
            "Weight" => Ok(Field::Weight),
            "TotalCholesterol" => Ok(Field::TotalCholesterol),
            "SystolicBP" => Ok(Field::SystolicBp),
            "DiastolicBP" => Ok(Field::DiastolicBp),
            "Gender" => Ok(Field::Gender),
            "Race" => Ok(Field::Race),
            "Education" => Ok(Field::Education),
            "SmokingStatus" => Ok(Field::SmokingStatus),
            "DiabetesStatus" => Ok(Field::DiabetesStatus),
            "BMICategory" => Ok(Field::BmiCategory),
            "AgeDecade" => Ok(Field::AgeDecade),
            _ => Err(ParseFieldError::UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// --- Serde Integration ---

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.to_string()
    }
}

impl TryFrom<String> for Field {
    type Error = ParseFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Field::from_str(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trips_through_from_str() {
        for field in Field::MEASUREMENTS.iter().chain(Field::GROUPS.iter()) {
            assert_eq!(Field::from_str(field.name()).unwrap(), *field);
        }
    }

    #[test]
    fn test_unknown_field() {
        let result = Field::from_str("Cholesterol");
        assert_eq!(
            result,
            Err(ParseFieldError::UnknownField("Cholesterol".to_string()))
        );
    }

    #[test]
    fn test_enumerations_are_disjoint_by_kind() {
        assert!(Field::MEASUREMENTS.iter().all(|f| f.is_numeric()));
        assert!(Field::GROUPS.iter().all(|f| f.is_categorical()));
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_string(&Field::SystolicBp).unwrap();
        assert_eq!(json, "\"SystolicBP\"");
        let field: Field = serde_json::from_str("\"BMICategory\"").unwrap();
        assert_eq!(field, Field::BmiCategory);
        assert!(serde_json::from_str::<Field>("\"bmi\"").is_err());
    }
}
