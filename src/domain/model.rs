//! Selectable prediction models.
//!
//! Each variant is a named flavour of the same weighted score; the variant
//! only decides the final multiplicative adjustment (see
//! `adapters::heuristic`). Descriptions and accuracy figures are display
//! metadata for the model picker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{parse_choice, InvalidInputError};

/// Model selected by the user before submitting the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelVariant {
    #[serde(rename = "K-Nearest Neighbors")]
    KNearestNeighbors,
    #[serde(rename = "Decision Tree")]
    DecisionTree,
    #[serde(rename = "Naive Bayes")]
    NaiveBayes,
    #[serde(rename = "Bernoulli Naive Bayes")]
    BernoulliNaiveBayes,
    #[serde(rename = "Support Vector Machine")]
    SupportVectorMachine,
}

impl ModelVariant {
    /// All variants in picker order.
    pub const ALL: [Self; 5] = [
        Self::KNearestNeighbors,
        Self::DecisionTree,
        Self::NaiveBayes,
        Self::BernoulliNaiveBayes,
        Self::SupportVectorMachine,
    ];

    /// Display name, also the accepted spelling when parsing.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::KNearestNeighbors => "K-Nearest Neighbors",
            Self::DecisionTree => "Decision Tree",
            Self::NaiveBayes => "Naive Bayes",
            Self::BernoulliNaiveBayes => "Bernoulli Naive Bayes",
            Self::SupportVectorMachine => "Support Vector Machine",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::KNearestNeighbors => "Classification based on closest training examples",
            Self::DecisionTree => "Tree-like model of decisions",
            Self::NaiveBayes => "Probabilistic classifier based on Bayes theorem",
            Self::BernoulliNaiveBayes => "Specialized NB for binary/boolean features",
            Self::SupportVectorMachine => "Finds optimal hyperplane for classification",
        }
    }

    /// Advertised accuracy in percent. Display only; never used in scoring.
    #[must_use]
    pub fn accuracy(self) -> f64 {
        match self {
            Self::KNearestNeighbors => 95.1,
            Self::DecisionTree => 92.3,
            Self::NaiveBayes => 89.7,
            Self::BernoulliNaiveBayes => 88.5,
            Self::SupportVectorMachine => 94.2,
        }
    }
}

impl FromStr for ModelVariant {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("model", s, &Self::ALL, Self::name)
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
