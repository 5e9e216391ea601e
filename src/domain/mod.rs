//! Domain layer: Core business types and logic.
//!
//! Pure Rust types with no I/O. All types are serializable and reject
//! malformed input at construction.

mod assessment;
mod model;
mod patient;
pub mod validation;

pub use assessment::{Assessment, RiskLabel, RiskResult, HIGH_RISK_THRESHOLD};
pub use model::ModelVariant;
pub use patient::{Gender, PatientFeatures, PatientForm, ResidenceType, SmokingStatus, WorkType};
pub use validation::InvalidInputError;
