//! Verdict statistics for the scroll intent classifier.
//!
//! This module tracks how often each rule decided, so a tuning session can
//! see why events were accepted or suppressed.

pub mod log;

// Re-export commonly used types
pub use log::{create_shared_log, SharedVerdictLog, VerdictLog, VerdictStats};
