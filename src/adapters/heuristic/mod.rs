//! Heuristic adapter: Implementation of `RiskScorer` using fixed weights.
//!
//! Pipeline for one call:
//! 1. Encode categorical fields as ordinal codes
//! 2. Normalize age, glucose and BMI with population statistics
//! 3. Weighted sum of the eight encoded features
//! 4. Multiply by the model variant's adjustment
//! 5. Logistic transform to a probability, then threshold to a label
//!
//! Everything is O(1) arithmetic with no allocation and no shared state, so
//! a single `HeuristicScorer` can be shared freely across threads.

pub mod coefficients;

use crate::domain::{
    Gender, InvalidInputError, ModelVariant, PatientFeatures, RiskResult, WorkType,
};
use crate::ports::RiskScorer;

use coefficients::{
    AGE, AVG_GLUCOSE_LEVEL, BERNOULLI_NB_FACTORS, BMI, DECISION_TREE_FACTORS, KNN_FACTOR,
    NAIVE_BAYES_FACTOR, SVM_FACTOR, WEIGHT_AGE, WEIGHT_BMI, WEIGHT_EVER_MARRIED, WEIGHT_GENDER,
    WEIGHT_GLUCOSE, WEIGHT_HEART_DISEASE, WEIGHT_HYPERTENSION, WEIGHT_WORK_TYPE,
};

/// Numeric encoding of a patient, ready for the weighted sum.
///
/// Continuous fields are already normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedFeatures {
    pub age: f64,
    pub gender: f64,
    pub hypertension: f64,
    pub heart_disease: f64,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub ever_married: f64,
    pub work_type: f64,
}

impl EncodedFeatures {
    /// Encode and normalize a patient's features.
    #[must_use]
    pub fn from_features(features: &PatientFeatures) -> Self {
        Self {
            age: AGE.apply(features.age),
            gender: gender_code(features.gender),
            hypertension: flag_code(features.hypertension),
            heart_disease: flag_code(features.heart_disease),
            avg_glucose_level: AVG_GLUCOSE_LEVEL.apply(features.avg_glucose_level),
            bmi: BMI.apply(features.bmi),
            ever_married: flag_code(features.ever_married),
            work_type: work_type_code(features.work_type),
        }
    }

    /// Weighted term per feature, in summation order: age, gender,
    /// hypertension, heart disease, glucose, BMI, married, work type.
    #[must_use]
    pub fn contributions(&self) -> [f64; 8] {
        [
            self.age * WEIGHT_AGE,
            self.gender * WEIGHT_GENDER,
            self.hypertension * WEIGHT_HYPERTENSION,
            self.heart_disease * WEIGHT_HEART_DISEASE,
            self.avg_glucose_level * WEIGHT_GLUCOSE,
            self.bmi * WEIGHT_BMI,
            self.ever_married * WEIGHT_EVER_MARRIED,
            self.work_type * WEIGHT_WORK_TYPE,
        ]
    }

    /// Unadjusted linear score.
    ///
    /// Terms are accumulated left to right from zero; the order is fixed so
    /// results stay bit-identical across releases.
    #[must_use]
    pub fn base_score(&self) -> f64 {
        self.contributions().iter().fold(0.0, |acc, term| acc + term)
    }
}

/// Male is the only gender code carrying weight.
fn gender_code(gender: Gender) -> f64 {
    match gender {
        Gender::Male => 1.0,
        Gender::Female | Gender::Other => 0.0,
    }
}

fn flag_code(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn work_type_code(work_type: WorkType) -> f64 {
    match work_type {
        WorkType::Private => 0.0,
        WorkType::SelfEmployed => 1.0,
        WorkType::GovtJob => 2.0,
        WorkType::Children => 3.0,
        WorkType::NeverWorked => 4.0,
    }
}

/// Multiplicative adjustment applied to the base score for a variant.
///
/// Always strictly positive, so it never flips the sign of the score. The
/// Decision Tree and Bernoulli NB factors switch on cardiovascular history,
/// so for a negative enough base score adding hypertension lowers the
/// probability (below -1.4625 for Decision Tree, -3.3 for Bernoulli NB).
#[must_use]
pub fn variant_adjustment(variant: ModelVariant, features: &PatientFeatures) -> f64 {
    let pick = |(with_history, without): (f64, f64)| {
        if features.has_cardiovascular_history() {
            with_history
        } else {
            without
        }
    };

    match variant {
        ModelVariant::KNearestNeighbors => KNN_FACTOR,
        ModelVariant::DecisionTree => pick(DECISION_TREE_FACTORS),
        ModelVariant::NaiveBayes => NAIVE_BAYES_FACTOR,
        ModelVariant::BernoulliNaiveBayes => pick(BERNOULLI_NB_FACTORS),
        ModelVariant::SupportVectorMachine => SVM_FACTOR,
    }
}

/// Standard logistic function.
#[must_use]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Fixed-weight stroke risk scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Adjusted score before the logistic transform.
    ///
    /// # Errors
    /// Returns `InvalidInputError` if a continuous feature is not finite.
    pub fn adjusted_score(
        &self,
        features: &PatientFeatures,
        variant: ModelVariant,
    ) -> Result<f64, InvalidInputError> {
        features.validate()?;
        let base = EncodedFeatures::from_features(features).base_score();
        Ok(base * variant_adjustment(variant, features))
    }
}

impl RiskScorer for HeuristicScorer {
    fn score(
        &self,
        features: &PatientFeatures,
        variant: ModelVariant,
    ) -> Result<RiskResult, InvalidInputError> {
        let adjusted = self.adjusted_score(features, variant)?;
        Ok(RiskResult::new(logistic(adjusted)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLabel;
    use approx::assert_abs_diff_eq;

    fn high_risk_patient() -> PatientFeatures {
        PatientFeatures {
            age: 67.0,
            gender: Gender::Male,
            hypertension: true,
            heart_disease: true,
            avg_glucose_level: 228.69,
            bmi: 36.6,
            ever_married: true,
            work_type: WorkType::Private,
            ..Default::default()
        }
    }

    /// Every normalized feature is exactly zero and every flag is off.
    fn neutral_patient() -> PatientFeatures {
        PatientFeatures {
            age: 43.22,
            gender: Gender::Female,
            avg_glucose_level: 106.14,
            bmi: 28.89,
            ever_married: false,
            work_type: WorkType::Private,
            ..Default::default()
        }
    }

    #[test]
    fn test_encoding() {
        let encoded = EncodedFeatures::from_features(&high_risk_patient());
        assert_abs_diff_eq!(encoded.age, 1.051_747, epsilon = 1e-6);
        assert_abs_diff_eq!(encoded.avg_glucose_level, 2.706_493, epsilon = 1e-6);
        assert_abs_diff_eq!(encoded.bmi, 0.982_166, epsilon = 1e-6);
        assert_eq!(encoded.gender, 1.0);
        assert_eq!(encoded.work_type, 0.0);
    }

    #[test]
    fn test_work_type_codes() {
        let codes: Vec<f64> = WorkType::ALL.iter().map(|w| work_type_code(*w)).collect();
        assert_eq!(codes, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_only_male_has_gender_weight() {
        assert_eq!(gender_code(Gender::Male), 1.0);
        assert_eq!(gender_code(Gender::Female), 0.0);
        assert_eq!(gender_code(Gender::Other), 0.0);
    }

    #[test]
    fn test_base_score() {
        let encoded = EncodedFeatures::from_features(&high_risk_patient());
        assert_abs_diff_eq!(encoded.base_score(), 2.542_719, epsilon = 1e-6);
    }

    #[test]
    fn test_contributions_sum_to_base() {
        let encoded = EncodedFeatures::from_features(&high_risk_patient());
        let terms = encoded.contributions();
        assert_abs_diff_eq!(terms[3], 0.52, epsilon = 1e-12);
        let total: f64 = terms.iter().sum();
        assert_abs_diff_eq!(total, encoded.base_score(), epsilon = 1e-12);
    }

    #[test]
    fn test_variant_adjustments() {
        let sick = high_risk_patient();
        let healthy = PatientFeatures {
            hypertension: false,
            heart_disease: false,
            ..sick
        };

        assert_eq!(variant_adjustment(ModelVariant::KNearestNeighbors, &sick), 1.2);
        assert_eq!(variant_adjustment(ModelVariant::DecisionTree, &sick), 1.3);
        assert_eq!(variant_adjustment(ModelVariant::DecisionTree, &healthy), 0.9);
        assert_eq!(variant_adjustment(ModelVariant::NaiveBayes, &sick), 0.95);
        assert_eq!(variant_adjustment(ModelVariant::BernoulliNaiveBayes, &sick), 1.1);
        assert_eq!(variant_adjustment(ModelVariant::BernoulliNaiveBayes, &healthy), 0.95);
        assert_eq!(variant_adjustment(ModelVariant::SupportVectorMachine, &healthy), 1.05);

        let only_heart = PatientFeatures {
            heart_disease: true,
            ..healthy
        };
        assert_eq!(variant_adjustment(ModelVariant::DecisionTree, &only_heart), 1.3);
    }

    #[test]
    fn test_decision_tree_hypertension_can_lower_low_base_score() {
        let without = PatientFeatures {
            age: 0.0,
            gender: Gender::Female,
            avg_glucose_level: 40.0,
            bmi: 10.0,
            ever_married: false,
            work_type: WorkType::Private,
            ..Default::default()
        };
        let with = PatientFeatures {
            hypertension: true,
            ..without
        };
        let scorer = HeuristicScorer::new();

        let p_without = scorer
            .score(&without, ModelVariant::DecisionTree)
            .unwrap()
            .probability;
        let p_with = scorer
            .score(&with, ModelVariant::DecisionTree)
            .unwrap()
            .probability;
        assert_abs_diff_eq!(p_without, 0.204_230, epsilon = 1e-6);
        assert_abs_diff_eq!(p_with, 0.201_084, epsilon = 1e-6);
        assert!(p_with < p_without);

        // The other variants still order this pair
        for variant in [
            ModelVariant::KNearestNeighbors,
            ModelVariant::NaiveBayes,
            ModelVariant::BernoulliNaiveBayes,
            ModelVariant::SupportVectorMachine,
        ] {
            let a = scorer.score(&without, variant).unwrap().probability;
            let b = scorer.score(&with, variant).unwrap().probability;
            assert!(b >= a, "{variant}");
        }
    }

    #[test]
    fn test_svm_end_to_end() {
        let result = HeuristicScorer::new()
            .score(&high_risk_patient(), ModelVariant::SupportVectorMachine)
            .expect("Should score");
        assert_abs_diff_eq!(result.probability, 0.935_224, epsilon = 1e-6);
        assert_eq!(result.risk_label, RiskLabel::High);
    }

    #[test]
    fn test_neutral_patient_is_exactly_half() {
        let scorer = HeuristicScorer::new();
        for variant in ModelVariant::ALL {
            let result = scorer.score(&neutral_patient(), variant).expect("Should score");
            assert_eq!(result.probability, 0.5);
            assert_eq!(result.risk_label, RiskLabel::Low);
        }
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let patient = PatientFeatures {
            avg_glucose_level: f64::INFINITY,
            ..high_risk_patient()
        };
        let err = HeuristicScorer::new()
            .score(&patient, ModelVariant::NaiveBayes)
            .unwrap_err();
        assert_eq!(err.field(), "avgGlucoseLevel");
    }

    #[test]
    fn test_logistic() {
        assert_eq!(logistic(0.0), 0.5);
        assert!(logistic(40.0) <= 1.0);
        assert!(logistic(-40.0) > 0.0);
        assert_abs_diff_eq!(logistic(2.0) + logistic(-2.0), 1.0, epsilon = 1e-12);
    }
}
