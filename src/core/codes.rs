//! Diagnostic reason codes attached to every verdict.

use serde::{Deserialize, Serialize};

/// Which rule decided a verdict.
///
/// Purely diagnostic: the boolean verdict is the whole contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// Magnitude below `sensitivity`; history untouched
    DeltaBelowSensitivity,
    /// Empty history: the first gesture of a session is trusted
    NoPreviousEventToCompare,
    /// Earlier than the last tracked event
    PastTimestampEvent,
    /// More than `delay` ms since the last tracked event
    EnoughTimePassed,
    /// First non-decaying event after a known human one
    NonDecreasingDeltasOfKnownHuman,
    /// Non-decaying motion above `high_velocity`
    HighVelocityNonDecreasingDeltas,
    /// Strictly increasing run of magnitudes
    DeltaModuleHasBeenIncreasing,
    /// Nothing fired: inertia
    AllOtherChecksFailed,
}

impl ReasonCode {
    /// All codes, in rule-chain order.
    pub const ALL: [ReasonCode; 8] = [
        ReasonCode::DeltaBelowSensitivity,
        ReasonCode::NoPreviousEventToCompare,
        ReasonCode::PastTimestampEvent,
        ReasonCode::EnoughTimePassed,
        ReasonCode::NonDecreasingDeltasOfKnownHuman,
        ReasonCode::HighVelocityNonDecreasingDeltas,
        ReasonCode::DeltaModuleHasBeenIncreasing,
        ReasonCode::AllOtherChecksFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeltaBelowSensitivity => "DELTA_BELOW_SENSITIVITY",
            Self::NoPreviousEventToCompare => "NO_PREVIOUS_EVENT_TO_COMPARE",
            Self::PastTimestampEvent => "PAST_TIMESTAMP_EVENT",
            Self::EnoughTimePassed => "ENOUGH_TIME_PASSED",
            Self::NonDecreasingDeltasOfKnownHuman => "NON_DECREASING_DELTAS_OF_KNOWN_HUMAN",
            Self::HighVelocityNonDecreasingDeltas => "HIGH_VELOCITY_NON_DECREASING_DELTAS",
            Self::DeltaModuleHasBeenIncreasing => "DELTA_MODULE_HAS_BEEN_INCREASING",
            Self::AllOtherChecksFailed => "ALL_OTHER_CHECKS_FAILED",
        }
    }

    /// The verdict this code always accompanies.
    pub fn is_intentional(&self) -> bool {
        !matches!(self, Self::DeltaBelowSensitivity | Self::AllOtherChecksFailed)
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
