//! Core functionality for the scroll intent classifier.
//!
//! This module contains:
//! - The rolling gesture history
//! - The ordered rule chain that decides each verdict
//! - Diagnostic reason codes

pub mod classifier;
pub mod codes;
pub mod history;

// Re-export commonly used types
pub use classifier::{IntentClassifier, Verdict};
pub use codes::ReasonCode;
pub use history::History;
