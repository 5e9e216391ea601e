//! # StrokeSense
//!
//! Stroke risk scoring from basic patient attributes.
//!
//! This crate provides:
//! - A deterministic risk score with five selectable model variants
//! - Parsing of raw prediction-form fields into typed features
//! - Terminal UI for entering patients and reading results
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientFeatures, ModelVariant, RiskResult)
//! - `ports`: Trait definitions for the scoring backend
//! - `adapters`: Concrete implementations (fixed-weight scorer, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface
//!
//! ## Example
//!
//! ```
//! use strokesense::{score, ModelVariant, PatientForm, RiskLabel};
//!
//! let form = PatientForm {
//!     age: "25".into(),
//!     gender: "Female".into(),
//!     avg_glucose_level: "90".into(),
//!     bmi: "22".into(),
//!     work_type: "children".into(),
//!     ..Default::default()
//! };
//! let features = form.parse().unwrap();
//! let result = score(&features, ModelVariant::NaiveBayes).unwrap();
//! assert_eq!(result.risk_label, RiskLabel::Low);
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use adapters::heuristic::HeuristicScorer;
pub use application::AssessmentService;
pub use domain::{
    Assessment, InvalidInputError, ModelVariant, PatientFeatures, PatientForm, RiskLabel,
    RiskResult,
};
pub use ports::RiskScorer;

/// Score one patient with the built-in fixed-weight scorer.
///
/// # Errors
/// Returns `InvalidInputError` if age, glucose or BMI is not finite.
pub fn score(
    features: &PatientFeatures,
    variant: ModelVariant,
) -> std::result::Result<RiskResult, InvalidInputError> {
    HeuristicScorer::new().score(features, variant)
}

/// Result type for StrokeSense operations
pub type Result<T> = std::result::Result<T, StrokeSenseError>;

/// Main error type for StrokeSense
#[derive(Debug, thiserror::Error)]
pub enum StrokeSenseError {
    #[error("Invalid patient data: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("Please select a model first")]
    ModelNotSelected,

    #[error("Assessment worker failed: {0}")]
    Worker(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
