//! Fixed coefficients for the weighted stroke risk score.
//!
//! Population statistics and weights are hard-coded; nothing here is fitted
//! at runtime. Changing any value changes every published score.

/// Population mean and standard deviation for a continuous feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub mean: f64,
    pub std: f64,
}

impl Normalization {
    /// Standard score `(raw - mean) / std`.
    #[must_use]
    pub fn apply(&self, raw: f64) -> f64 {
        (raw - self.mean) / self.std
    }
}

pub const AGE: Normalization = Normalization {
    mean: 43.22,
    std: 22.61,
};

pub const AVG_GLUCOSE_LEVEL: Normalization = Normalization {
    mean: 106.14,
    std: 45.28,
};

pub const BMI: Normalization = Normalization {
    mean: 28.89,
    std: 7.85,
};

// === Linear weights ===
pub const WEIGHT_AGE: f64 = 0.35;
pub const WEIGHT_GENDER: f64 = 0.12;
pub const WEIGHT_HYPERTENSION: f64 = 0.45;
pub const WEIGHT_HEART_DISEASE: f64 = 0.52;
pub const WEIGHT_GLUCOSE: f64 = 0.28;
pub const WEIGHT_BMI: f64 = 0.18;
pub const WEIGHT_EVER_MARRIED: f64 = 0.15;
pub const WEIGHT_WORK_TYPE: f64 = 0.08;

// === Variant adjustments ===
pub const KNN_FACTOR: f64 = 1.2;
/// Decision tree: (with cardiovascular history, without)
pub const DECISION_TREE_FACTORS: (f64, f64) = (1.3, 0.9);
pub const NAIVE_BAYES_FACTOR: f64 = 0.95;
/// Bernoulli naive Bayes: (with cardiovascular history, without)
pub const BERNOULLI_NB_FACTORS: (f64, f64) = (1.1, 0.95);
pub const SVM_FACTOR: f64 = 1.05;
