//! Adapters layer: Concrete implementations of ports.
//!
//! - `heuristic`: fixed-weight stroke risk scorer
//! - `sanitize`: patient-value filtering for logs

pub mod heuristic;
pub mod sanitize;
