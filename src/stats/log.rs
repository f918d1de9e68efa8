//! Verdict statistics.
//!
//! Counts what the classifier decided and why, without keeping any events.

use crate::core::{ReasonCode, Verdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const REASON_COUNT: usize = ReasonCode::ALL.len();

/// Running verdict counters for one session.
#[derive(Debug)]
pub struct VerdictLog {
    /// One counter per reason code, indexed like `ReasonCode::ALL`
    by_reason: [AtomicU64; REASON_COUNT],
    /// Inputs rejected as invalid events
    rejected: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
}

impl VerdictLog {
    /// Create a new verdict log.
    pub fn new() -> Self {
        Self {
            by_reason: Default::default(),
            rejected: AtomicU64::new(0),
            session_start: Utc::now(),
        }
    }

    /// Record a verdict.
    pub fn record(&self, verdict: &Verdict) {
        self.by_reason[index_of(verdict.reason)].fetch_add(1, Ordering::Relaxed);
    }

    /// Record an input that could not be classified.
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> VerdictStats {
        let mut by_reason = BTreeMap::new();
        let mut intentional = 0;
        let mut inertial = 0;

        for (code, counter) in ReasonCode::ALL.iter().zip(self.by_reason.iter()) {
            let count = counter.load(Ordering::Relaxed);
            if count == 0 {
                continue;
            }
            if code.is_intentional() {
                intentional += count;
            } else {
                inertial += count;
            }
            by_reason.insert(code.as_str().to_string(), count);
        }

        VerdictStats {
            intentional,
            inertial,
            rejected: self.rejected.load(Ordering::Relaxed),
            by_reason,
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        let mut summary = format!(
            "Verdict Statistics:\n\
             - Intentional events: {}\n\
             - Inertial events: {}\n\
             - Rejected inputs: {}\n\
             - Session duration: {} seconds",
            stats.intentional, stats.inertial, stats.rejected, stats.session_duration_secs
        );

        if !stats.by_reason.is_empty() {
            summary.push_str("\n\nBy reason:");
            for (reason, count) in &stats.by_reason {
                summary.push_str(&format!("\n - {reason}: {count}"));
            }
        }

        summary
    }

    /// Reset all counters.
    pub fn reset(&self) {
        for counter in &self.by_reason {
            counter.store(0, Ordering::Relaxed);
        }
        self.rejected.store(0, Ordering::Relaxed);
    }
}

impl Default for VerdictLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter slot for `reason`; matches its position in `ReasonCode::ALL`.
fn index_of(reason: ReasonCode) -> usize {
    match reason {
        ReasonCode::DeltaBelowSensitivity => 0,
        ReasonCode::NoPreviousEventToCompare => 1,
        ReasonCode::PastTimestampEvent => 2,
        ReasonCode::EnoughTimePassed => 3,
        ReasonCode::NonDecreasingDeltasOfKnownHuman => 4,
        ReasonCode::HighVelocityNonDecreasingDeltas => 5,
        ReasonCode::DeltaModuleHasBeenIncreasing => 6,
        ReasonCode::AllOtherChecksFailed => 7,
    }
}

/// Snapshot of verdict statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictStats {
    pub intentional: u64,
    pub inertial: u64,
    pub rejected: u64,
    /// Count per reason code; codes that never fired are omitted
    pub by_reason: BTreeMap<String, u64>,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

impl VerdictStats {
    /// Total number of classified events.
    pub fn total(&self) -> u64 {
        self.intentional + self.inertial
    }
}

/// Thread-safe shared verdict log.
pub type SharedVerdictLog = Arc<VerdictLog>;

/// Create a new shared verdict log.
pub fn create_shared_log() -> SharedVerdictLog {
    Arc::new(VerdictLog::new())
}
