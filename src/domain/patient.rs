//! Patient data types for stroke risk prediction.
//!
//! Field set and option labels follow the Kaggle stroke prediction dataset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::validation::{parse_choice, parse_number, require_finite, InvalidInputError};

/// Biological sex as recorded in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Employment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkType {
    #[default]
    Private,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    #[serde(rename = "Govt_job")]
    GovtJob,
    #[serde(rename = "children")]
    Children,
    #[serde(rename = "Never_worked")]
    NeverWorked,
}

impl WorkType {
    pub const ALL: [Self; 5] = [
        Self::Private,
        Self::SelfEmployed,
        Self::GovtJob,
        Self::Children,
        Self::NeverWorked,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "Private",
            Self::SelfEmployed => "Self-employed",
            Self::GovtJob => "Govt_job",
            Self::Children => "children",
            Self::NeverWorked => "Never_worked",
        }
    }
}

/// Residence area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResidenceType {
    #[default]
    Urban,
    Rural,
}

impl ResidenceType {
    pub const ALL: [Self; 2] = [Self::Urban, Self::Rural];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Rural => "Rural",
        }
    }
}

/// Smoking history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SmokingStatus {
    #[default]
    #[serde(rename = "never smoked")]
    NeverSmoked,
    #[serde(rename = "formerly smoked")]
    FormerlySmoked,
    #[serde(rename = "smokes")]
    Smokes,
}

impl SmokingStatus {
    pub const ALL: [Self; 3] = [Self::NeverSmoked, Self::FormerlySmoked, Self::Smokes];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NeverSmoked => "never smoked",
            Self::FormerlySmoked => "formerly smoked",
            Self::Smokes => "smokes",
        }
    }
}

impl FromStr for Gender {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("gender", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for WorkType {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("workType", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for ResidenceType {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("residenceType", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for SmokingStatus {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("smokingStatus", s, &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed clinical features for a single prediction.
///
/// `residence_type` and `smoking_status` are part of the input contract but
/// carry no weight in the current formula.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFeatures {
    /// Age in years
    pub age: f64,

    pub gender: Gender,

    /// Doctor-diagnosed hypertension
    pub hypertension: bool,

    /// Any diagnosed heart disease
    pub heart_disease: bool,

    /// Average blood glucose in mg/dL
    pub avg_glucose_level: f64,

    /// Body mass index in kg/m^2
    pub bmi: f64,

    pub ever_married: bool,

    pub work_type: WorkType,

    pub residence_type: ResidenceType,

    pub smoking_status: SmokingStatus,
}

impl PatientFeatures {
    /// True when either cardiovascular flag is set.
    #[must_use]
    pub fn has_cardiovascular_history(&self) -> bool {
        self.hypertension || self.heart_disease
    }

    /// Check that the continuous fields hold finite numbers.
    ///
    /// Values are not range-checked: a negative age is accepted and scored.
    ///
    /// # Errors
    /// Returns the first non-finite field.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        require_finite("age", self.age)?;
        require_finite("avgGlucoseLevel", self.avg_glucose_level)?;
        require_finite("bmi", self.bmi)?;
        Ok(())
    }
}

/// Raw prediction form exactly as submitted: every field is a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientForm {
    pub age: String,
    pub gender: String,
    pub hypertension: String,
    pub heart_disease: String,
    pub avg_glucose_level: String,
    pub bmi: String,
    pub ever_married: String,
    pub work_type: String,
    pub residence_type: String,
    pub smoking_status: String,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self {
            age: String::new(),
            gender: Gender::Male.as_str().to_string(),
            hypertension: "0".to_string(),
            heart_disease: "0".to_string(),
            avg_glucose_level: String::new(),
            bmi: String::new(),
            ever_married: "No".to_string(),
            work_type: WorkType::Private.as_str().to_string(),
            residence_type: ResidenceType::Urban.as_str().to_string(),
            smoking_status: SmokingStatus::NeverSmoked.as_str().to_string(),
        }
    }
}

impl Zeroize for PatientForm {
    /// Overwrite every raw field buffer with zeros and leave it empty.
    fn zeroize(&mut self) {
        self.age.zeroize();
        self.gender.zeroize();
        self.hypertension.zeroize();
        self.heart_disease.zeroize();
        self.avg_glucose_level.zeroize();
        self.bmi.zeroize();
        self.ever_married.zeroize();
        self.work_type.zeroize();
        self.residence_type.zeroize();
        self.smoking_status.zeroize();
    }
}

impl PatientForm {
    /// Convert the raw strings into typed features.
    ///
    /// # Errors
    /// Returns `InvalidInputError` naming the first field that fails.
    pub fn parse(&self) -> Result<PatientFeatures, InvalidInputError> {
        Ok(PatientFeatures {
            age: parse_number("age", &self.age)?,
            gender: self.gender.parse()?,
            hypertension: parse_flag("hypertension", &self.hypertension)?,
            heart_disease: parse_flag("heartDisease", &self.heart_disease)?,
            avg_glucose_level: parse_number("avgGlucoseLevel", &self.avg_glucose_level)?,
            bmi: parse_number("bmi", &self.bmi)?,
            ever_married: parse_choice(
                "everMarried",
                &self.ever_married,
                &[true, false],
                married_label,
            )?,
            work_type: self.work_type.parse()?,
            residence_type: self.residence_type.parse()?,
            smoking_status: self.smoking_status.parse()?,
        })
    }
}

fn flag_label(flag: bool) -> &'static str {
    if flag {
        "1"
    } else {
        "0"
    }
}

fn married_label(married: bool) -> &'static str {
    if married {
        "Yes"
    } else {
        "No"
    }
}

fn parse_flag(field: &'static str, raw: &str) -> Result<bool, InvalidInputError> {
    parse_choice(field, raw, &[false, true], flag_label)
}

impl From<&PatientFeatures> for PatientForm {
    fn from(features: &PatientFeatures) -> Self {
        Self {
            age: features.age.to_string(),
            gender: features.gender.as_str().to_string(),
            hypertension: flag_label(features.hypertension).to_string(),
            heart_disease: flag_label(features.heart_disease).to_string(),
            avg_glucose_level: features.avg_glucose_level.to_string(),
            bmi: features.bmi.to_string(),
            ever_married: married_label(features.ever_married).to_string(),
            work_type: features.work_type.as_str().to_string(),
            residence_type: features.residence_type.as_str().to_string(),
            smoking_status: features.smoking_status.as_str().to_string(),
        }
    }
}
