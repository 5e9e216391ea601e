//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and the scoring backend.

mod risk_scorer;

pub use risk_scorer::RiskScorer;
