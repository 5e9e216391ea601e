//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Model picker
//! - Patient data form
//! - Prediction result

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};
