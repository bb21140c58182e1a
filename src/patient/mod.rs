//! Patient entity schema and validation.
//!
//! The stored attribute set never contains the patient id (it is the
//! collection key) and never contains derived metrics; those are recomputed
//! from height and weight every time a view is assembled.

pub mod metrics;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use metrics::Verdict;

/// Patient gender, fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A patient as submitted to the create operation: id plus attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

/// The persisted attribute set, keyed by patient id in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

/// Read model: stored attributes plus derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientView {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: Verdict,
}

/// A field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

impl Patient {
    /// Checks every field-level constraint, returning the first violation.
    ///
    /// Type-level constraints (age non-negative, gender in the fixed set)
    /// are already enforced by the field types at deserialization.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError {
                field: "id",
                reason: "must not be empty",
            });
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ValidationError {
                field: "height",
                reason: "must be a positive number",
            });
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ValidationError {
                field: "weight",
                reason: "must be a positive number",
            });
        }
        Ok(())
    }

    /// Splits into the collection key and the stored attribute set.
    pub fn into_parts(self) -> (String, PatientRecord) {
        let Patient {
            id,
            name,
            age,
            gender,
            height,
            weight,
        } = self;
        (
            id,
            PatientRecord {
                name,
                age,
                gender,
                height,
                weight,
            },
        )
    }
}

impl PatientRecord {
    /// Assembles the full view, recomputing the derived metrics.
    pub fn view(&self) -> PatientView {
        let bmi = metrics::bmi(self.height, self.weight);
        PatientView {
            name: self.name.clone(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi,
            verdict: Verdict::from_bmi(bmi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Patient {
        Patient {
            id: "P001".to_string(),
            name: "John Doe".to_string(),
            age: 30,
            gender: Gender::Male,
            height: 1.755,
            weight: 70.2,
        }
    }

    #[test]
    fn valid_patient_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn empty_id_rejected() {
        let mut patient = sample();
        patient.id = "  ".to_string();
        let err = patient.validate().unwrap_err();
        assert_eq!(err.field, "id");
    }

    #[test]
    fn non_positive_height_rejected() {
        let mut patient = sample();
        patient.height = 0.0;
        assert_eq!(patient.validate().unwrap_err().field, "height");
        patient.height = -1.7;
        assert_eq!(patient.validate().unwrap_err().field, "height");
        patient.height = f64::NAN;
        assert_eq!(patient.validate().unwrap_err().field, "height");
    }

    #[test]
    fn non_positive_weight_rejected() {
        let mut patient = sample();
        patient.weight = -0.1;
        assert_eq!(patient.validate().unwrap_err().field, "weight");
        patient.weight = f64::INFINITY;
        assert_eq!(patient.validate().unwrap_err().field, "weight");
    }

    #[test]
    fn gender_parses_lowercase_only() {
        assert_eq!(
            serde_json::from_str::<Gender>("\"female\"").unwrap(),
            Gender::Female
        );
        assert!(serde_json::from_str::<Gender>("\"Female\"").is_err());
        assert!(serde_json::from_str::<Gender>("\"unknown\"").is_err());
    }

    #[test]
    fn negative_age_rejected_at_parse() {
        let json = r#"{"id":"P001","name":"John Doe","age":-5,
                       "gender":"male","height":1.755,"weight":70.2}"#;
        assert!(serde_json::from_str::<Patient>(json).is_err());
    }

    #[test]
    fn view_recomputes_derived_fields() {
        let (_, record) = sample().into_parts();
        let view = record.view();
        assert_eq!(view.bmi, 22.79);
        assert_eq!(view.verdict, Verdict::NormalWeight);
        assert_eq!(view.height, 1.755);
        assert_eq!(view.weight, 70.2);
    }

    #[test]
    fn record_serialization_excludes_derived_fields() {
        let (_, record) = sample().into_parts();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("bmi").is_none());
        assert!(value.get("verdict").is_none());
        assert!(value.get("id").is_none());
    }
}
