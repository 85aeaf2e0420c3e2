use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    data::field::Field,
    error::ExplorerError,
};

/// One participant row of the survey.
///
/// Age is always present; every other column may be missing.
#[derive(Debug, Clone, PartialEq, Builder, Serialize)]
pub struct Record {
    #[builder(default)]
    pub id: u64,
    #[builder(default)]
    pub age: f64,
    #[builder(setter(into, strip_option), default)]
    pub gender: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub race: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub education: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub smoking_status: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub diabetes_status: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub bmi_category: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub age_decade: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub bmi: Option<f64>,
    #[builder(setter(into, strip_option), default)]
    pub height: Option<f64>,
    #[builder(setter(into, strip_option), default)]
    pub weight: Option<f64>,
    #[builder(setter(into, strip_option), default)]
    pub total_cholesterol: Option<f64>,
    #[builder(setter(into, strip_option), default)]
    pub systolic_bp: Option<f64>,
    #[builder(setter(into, strip_option), default)]
    pub diastolic_bp: Option<f64>,
}

/// A single cell read out of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Integer(u64),
    Number(f64),
    Text(&'a str),
}

impl Value<'_> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            Value::Text(_) => None,
        }
    }
}

impl std::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

impl Record {
    /// Returns the value stored in `field`, or `None` when it is missing.
    pub fn value(&self, field: Field) -> Option<Value<'_>> {
        match field {
            Field::Id => Some(Value::Integer(self.id)),
            Field::Age => Some(Value::Number(self.age)),
            Field::Bmi => self.bmi.map(Value::Number),
            Field::Height => self.height.map(Value::Number),
            Field::Weight => self.weight.map(Value::Number),
            Field::TotalCholesterol => self.total_cholesterol.map(Value::Number),
            Field::SystolicBp => self.systolic_bp.map(Value::Number),
            Field::DiastolicBp => self.diastolic_bp.map(Value::Number),
            Field::Gender => self.gender.as_deref().map(Value::Text),
            Field::Race => self.race.as_deref().map(Value::Text),
            Field::Education => self.education.as_deref().map(Value::Text),
            Field::SmokingStatus => self.smoking_status.as_deref().map(Value::Text),
            Field::DiabetesStatus => self.diabetes_status.as_deref().map(Value::Text),
            Field::BmiCategory => self.bmi_category.as_deref().map(Value::Text),
            Field::AgeDecade => self.age_decade.as_deref().map(Value::Text),
        }
    }

    pub fn is_present(&self, field: Field) -> bool {
        self.value(field).is_some()
    }

    /// Numeric value of `field`; `None` for missing values and non-numeric columns.
    pub fn number(&self, field: Field) -> Option<f64> {
        if !field.is_numeric() {
            return None;
        }
        self.value(field).and_then(|v| v.as_number())
    }

    /// Category label of `field`; `None` for missing values and non-categorical columns.
    pub fn category(&self, field: Field) -> Option<&str> {
        match self.value(field) {
            Some(Value::Text(label)) => Some(label),
            _ => None,
        }
    }
}

/// Row as it appears in the CSV source, before the age check.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "Age", deserialize_with = "na_number")]
    age: Option<f64>,
    #[serde(rename = "Gender", default, deserialize_with = "na_text")]
    gender: Option<String>,
    #[serde(rename = "Race", default, deserialize_with = "na_text")]
    race: Option<String>,
    #[serde(rename = "Education", default, deserialize_with = "na_text")]
    education: Option<String>,
    #[serde(rename = "SmokingStatus", default, deserialize_with = "na_text")]
    smoking_status: Option<String>,
    #[serde(rename = "DiabetesStatus", default, deserialize_with = "na_text")]
    diabetes_status: Option<String>,
    #[serde(rename = "BMICategory", default, deserialize_with = "na_text")]
    bmi_category: Option<String>,
    #[serde(rename = "AgeDecade", default, deserialize_with = "na_text")]
    age_decade: Option<String>,
    #[serde(rename = "BMI", default, deserialize_with = "na_number")]
    bmi: Option<f64>,
    #[serde(rename = "Height", default, deserialize_with = "na_number")]
    height: Option<f64>,
    #[serde(rename = "Weight", default, deserialize_with = "na_number")]
    weight: Option<f64>,
    #[serde(rename = "TotalCholesterol", default, deserialize_with = "na_number")]
    total_cholesterol: Option<f64>,
    #[serde(rename = "SystolicBP", default, deserialize_with = "na_number")]
    systolic_bp: Option<f64>,
    #[serde(rename = "DiastolicBP", default, deserialize_with = "na_number")]
    diastolic_bp: Option<f64>,
}

impl RawRecord {
    /// Converts a parsed CSV row into a `Record`; `row` is 1-based for error messages.
    pub(crate) fn into_record(self, row: usize) -> Result<Record, ExplorerError> {
        let age = self.age.ok_or(ExplorerError::MissingAge { row })?;
        Ok(Record {
            id: self.id,
            age,
            gender: self.gender,
            race: self.race,
            education: self.education,
            smoking_status: self.smoking_status,
            diabetes_status: self.diabetes_status,
            bmi_category: self.bmi_category,
            age_decade: self.age_decade,
            bmi: self.bmi,
            height: self.height,
            weight: self.weight,
            total_cholesterol: self.total_cholesterol,
            systolic_bp: self.systolic_bp,
            diastolic_bp: self.diastolic_bp,
        })
    }
}

fn is_na(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("NA")
}

// Empty cells and the literal NA both mean "missing".
fn na_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !is_na(s)))
}

fn na_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None => Ok(None),
        Some(s) if is_na(s) => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid number: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_reads_each_kind() {
        let record = RecordBuilder::default()
            .id(7u64)
            .age(42.0)
            .gender("female")
            .bmi(27.5)
            .build()
            .unwrap();
        assert_eq!(record.value(Field::Id), Some(Value::Integer(7)));
        assert_eq!(record.number(Field::Age), Some(42.0));
        assert_eq!(record.number(Field::Bmi), Some(27.5));
        assert_eq!(record.category(Field::Gender), Some("female"));
        assert_eq!(record.value(Field::Weight), None);
        assert!(!record.is_present(Field::Race));
    }

    #[test]
    fn test_number_ignores_categorical_columns() {
        let record = RecordBuilder::default()
            .age(30.0)
            .gender("male")
            .build()
            .unwrap();
        assert_eq!(record.number(Field::Gender), None);
        assert_eq!(record.category(Field::Age), None);
    }

    #[test]
    fn test_raw_record_without_age_is_rejected() {
        let data = "ID,Age,Gender\n1,NA,male\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let raw: RawRecord = reader.deserialize().next().unwrap().unwrap();
        let result = raw.into_record(1);
        assert!(matches!(result, Err(ExplorerError::MissingAge { row: 1 })));
    }

    #[test]
    fn test_na_cells_become_missing() {
        let data = "ID,Age,Gender,BMI,Race\n3,51,NA,,  White \n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let raw: RawRecord = reader.deserialize().next().unwrap().unwrap();
        let record = raw.into_record(1).unwrap();
        assert_eq!(record.gender, None);
        assert_eq!(record.bmi, None);
        assert_eq!(record.race.as_deref(), Some("White"));
        assert_eq!(record.height, None);
    }

    #[test]
    fn test_malformed_number_fails() {
        let data = "ID,Age,BMI\n3,51,heavy\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let raw: Option<Result<RawRecord, csv::Error>> = reader.deserialize().next();
        assert!(raw.unwrap().is_err());
    }

    #[test]
    fn test_non_finite_number_fails() {
        for cell in ["NaN", "inf", "-Infinity"] {
            let data = format!("ID,Age,Weight\n3,51,{}\n", cell);
            let mut reader = csv::Reader::from_reader(data.as_bytes());
            let raw: Option<Result<RawRecord, csv::Error>> = reader.deserialize().next();
            assert!(raw.unwrap().is_err(), "{} should not parse", cell);
        }
    }
}
