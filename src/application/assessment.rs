//! Assessment service: Orchestrates one prediction form submission.
//!
//! This service coordinates:
//! - Model selection check
//! - Form parsing
//! - Scoring via the configured `RiskScorer`
//! - Result logging

use std::sync::Arc;

use crate::domain::{Assessment, ModelVariant, PatientFeatures, PatientForm};
use crate::ports::RiskScorer;
use crate::StrokeSenseError;

/// Service for running stroke risk assessments.
///
/// Holds no per-patient state: every call is independent.
pub struct AssessmentService<S>
where
    S: RiskScorer,
{
    scorer: Arc<S>,
}

impl<S> Clone for AssessmentService<S>
where
    S: RiskScorer,
{
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
        }
    }
}

impl<S> AssessmentService<S>
where
    S: RiskScorer,
{
    /// Create a new assessment service.
    pub fn new(scorer: Arc<S>) -> Self {
        Self { scorer }
    }

    /// Assess a raw form submission.
    ///
    /// # Errors
    /// Returns `ModelNotSelected` when `variant` is `None`, or
    /// `InvalidInput` when a field fails to parse. No result is produced in
    /// either case.
    pub fn assess(
        &self,
        form: &PatientForm,
        variant: Option<ModelVariant>,
    ) -> Result<Assessment, StrokeSenseError> {
        let Some(variant) = variant else {
            tracing::warn!("Submission rejected: no model selected");
            return Err(StrokeSenseError::ModelNotSelected);
        };

        tracing::debug!("Step 1: Parsing form fields...");
        let features = form.parse().map_err(|e| {
            tracing::warn!("Submission rejected: invalid field '{}'", e.field());
            e
        })?;

        self.assess_features(&features, variant)
    }

    /// Assess already-typed features.
    ///
    /// # Errors
    /// Returns `InvalidInput` if a continuous feature is not finite.
    pub fn assess_features(
        &self,
        features: &PatientFeatures,
        variant: ModelVariant,
    ) -> Result<Assessment, StrokeSenseError> {
        tracing::debug!("Step 2: Scoring with {}...", variant);
        let result = self.scorer.score(features, variant)?;

        tracing::info!(
            "Assessment complete: model={}, risk={}, probability={}",
            variant,
            result.risk_label,
            result.percentage()
        );

        Ok(Assessment::new(variant, result))
    }
}
