//! Risk scorer port: Trait for turning patient features into a risk result.
//!
//! Abstracts the scoring backend from the application and UI layers.

use crate::domain::{InvalidInputError, ModelVariant, PatientFeatures, RiskResult};

/// Trait for stroke risk scoring backends.
///
/// Implementations must be pure: the same features and variant always
/// produce the same result, and no state is kept between calls.
pub trait RiskScorer: Send + Sync {
    /// Score one patient under the selected model variant.
    ///
    /// # Errors
    /// Returns `InvalidInputError` if a continuous feature is not finite.
    fn score(
        &self,
        features: &PatientFeatures,
        variant: ModelVariant,
    ) -> Result<RiskResult, InvalidInputError>;
}
