//! Prediction result types.
//!
//! Represents the output of the stroke risk score.

use serde::{Deserialize, Serialize};

use super::model::ModelVariant;

/// Probability above which a patient is labelled high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.5;

/// Binary stroke risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    High,
}

impl RiskLabel {
    /// Classify a probability. The threshold is strict: exactly 0.5 is `Low`.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::High => "High risk - Consultation advised",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129), // Emerald (#10B981)
            Self::High => (244, 63, 94), // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Probability plus label for one scored patient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    /// Stroke probability (0.0 to 1.0)
    pub probability: f64,

    pub risk_label: RiskLabel,
}

impl RiskResult {
    /// Build a result, deriving the label from the probability.
    #[must_use]
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            risk_label: RiskLabel::from_probability(probability),
        }
    }

    /// Probability as a percentage with two decimals, e.g. `93.52%`.
    #[must_use]
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

/// A scored submission, stamped with the model that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub variant: ModelVariant,

    pub result: RiskResult,

    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    #[must_use]
    pub fn new(variant: ModelVariant, result: RiskResult) -> Self {
        Self {
            variant,
            result,
            assessed_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_threshold_is_strict() {
        assert_eq!(RiskResult::new(0.5).risk_label, RiskLabel::Low);
        assert_eq!(RiskResult::new(0.500_000_1).risk_label, RiskLabel::High);
        assert_eq!(RiskResult::new(0.1).risk_label, RiskLabel::Low);
        assert_eq!(RiskResult::new(0.99).risk_label, RiskLabel::High);
    }

    #[test]
    fn test_percentage_two_decimals() {
        assert_eq!(RiskResult::new(0.935_224).percentage(), "93.52%");
        assert_eq!(RiskResult::new(0.5).percentage(), "50.00%");
    }

    #[test]
    fn test_result_json() {
        let json = serde_json::to_value(RiskResult::new(0.75)).expect("Should serialize");
        assert_eq!(json["riskLabel"], "High");
        assert_eq!(json["probability"], 0.75);
    }

    #[test]
    fn test_assessment_creation() {
        let assessment = Assessment::new(ModelVariant::NaiveBayes, RiskResult::new(0.2));
        assert_eq!(assessment.variant, ModelVariant::NaiveBayes);
        assert_eq!(assessment.result.risk_label, RiskLabel::Low);
        assert!(assessment.assessed_at <= chrono::Utc::now());
    }
}
