//! The intent classifier.
//!
//! Each call to [`IntentClassifier::check`] normalizes one event, compares it
//! against the current gesture history and decides whether a human produced
//! it. The rules are evaluated in a fixed order and the first one that
//! matches wins:
//!
//! 1. no previous event
//! 2. event older than the last tracked one
//! 3. more than `delay` ms since the last tracked event
//! 4. magnitude did not decrease, and
//!    a. the last tracked event is the known human one, or
//!    b. both magnitudes are at least `high_velocity`, or
//!    c. the recent magnitudes form a strictly increasing run
//!
//! Anything else is inertia.

use crate::config::{ClassifierConfig, ClassifierOptions};
use crate::core::codes::ReasonCode;
use crate::core::history::History;
use crate::event::normalize::finite_time_stamp;
use crate::event::{
    biggest_delta_module, normalize, ClassifierError, NormalizedEvent, WheelEventLike,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Outcome of classifying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// `true` for deliberate input, `false` for inertia or noise
    pub intentional: bool,
    /// The rule that decided
    pub reason: ReasonCode,
}

impl From<ReasonCode> for Verdict {
    fn from(reason: ReasonCode) -> Self {
        Self {
            intentional: reason.is_intentional(),
            reason,
        }
    }
}

/// Stateful classifier for one logical input stream.
///
/// Not meant to be shared: `check` takes `&mut self`, so concurrent callers
/// must serialize access (one classifier per stream, or a
/// [`ClassifierWorker`](crate::stream::ClassifierWorker)).
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    config: ClassifierConfig,
    history: History,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::with_config(ClassifierConfig::default())
    }
}

impl IntentClassifier {
    /// Create a classifier, filling in defaults and clamping out-of-range values.
    pub fn new(options: &ClassifierOptions) -> Self {
        Self::with_config(ClassifierConfig::from(options))
    }

    /// Create a classifier from already resolved thresholds.
    ///
    /// Values are clamped again, so a hand-built config cannot bypass the floors.
    pub fn with_config(config: ClassifierConfig) -> Self {
        let config = ClassifierConfig::from(ClassifierOptions {
            sensitivity: Some(config.sensitivity),
            delay: Some(config.delay),
            high_velocity: Some(config.high_velocity),
            increasing_deltas_threshold: Some(
                i64::try_from(config.increasing_deltas_threshold).unwrap_or(i64::MAX),
            ),
        });
        Self {
            config,
            history: History::new(),
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// `[last_known_human_event, ...inertial_tail]`
    pub fn history(&self) -> &[NormalizedEvent] {
        self.history.as_slice()
    }

    /// Whether the classifier is currently following a suspected inertial tail.
    pub fn is_tracking_inertia(&self) -> bool {
        self.history.len() > 1
    }

    /// Forget the current gesture; the next event is trusted.
    pub fn reset(&mut self) {
        debug!(tracked = self.history.len(), "Resetting gesture history");
        self.history.clear();
    }

    /// Check whether `raw` is an intentional wheel event.
    ///
    /// Fails with [`ClassifierError::InvalidEvent`] when `raw` is not a
    /// recognizable wheel event; the classifier state is left untouched.
    pub fn check<E: WheelEventLike>(&mut self, raw: &E) -> Result<bool, ClassifierError> {
        self.check_with_reason(raw)
            .map(|verdict| verdict.intentional)
    }

    /// Like [`check`](Self::check), but also reports which rule decided.
    pub fn check_with_reason<E: WheelEventLike>(
        &mut self,
        raw: &E,
    ) -> Result<Verdict, ClassifierError> {
        self.classify(normalize(raw)?)
    }

    /// Classify an already normalized event.
    ///
    /// `NormalizedEvent` has public fields, so the timestamp is checked again
    /// here; a non-finite one is rejected before history is touched.
    pub fn classify(&mut self, event: NormalizedEvent) -> Result<Verdict, ClassifierError> {
        finite_time_stamp(event.time_stamp)?;

        let magnitude = biggest_delta_module(&event);
        if magnitude < self.config.sensitivity {
            trace!(magnitude, "Wheel event below sensitivity");
            return Ok(Verdict::from(ReasonCode::DeltaBelowSensitivity));
        }

        let reason = self.evaluate(&event, magnitude);
        let verdict = Verdict::from(reason);

        if verdict.intentional {
            self.history.restart(event);
        } else if !self.history.push_inertial(event) {
            trace!(
                time_stamp = event.time_stamp,
                "Dropped out-of-order event from history"
            );
        }

        trace!(
            magnitude,
            time_stamp = event.time_stamp,
            intentional = verdict.intentional,
            reason = %reason,
            tracked = self.history.len(),
            "Classified wheel event"
        );

        Ok(verdict)
    }

    fn evaluate(&self, event: &NormalizedEvent, magnitude: f64) -> ReasonCode {
        let Some(last) = self.history.last() else {
            return ReasonCode::NoPreviousEventToCompare;
        };

        if event.time_stamp < last.time_stamp {
            return ReasonCode::PastTimestampEvent;
        }

        if event.time_stamp > last.time_stamp + self.config.delay {
            return ReasonCode::EnoughTimePassed;
        }

        let prev_magnitude = biggest_delta_module(last);
        if magnitude >= prev_magnitude {
            if self.history.len() == 1 {
                return ReasonCode::NonDecreasingDeltasOfKnownHuman;
            }

            if magnitude >= self.config.high_velocity && prev_magnitude >= self.config.high_velocity
            {
                return ReasonCode::HighVelocityNonDecreasingDeltas;
            }

            let run = self.config.increasing_deltas_threshold;
            if run <= 2 || self.history.has_increasing_tail(run) {
                return ReasonCode::DeltaModuleHasBeenIncreasing;
            }
        }

        ReasonCode::AllOtherChecksFailed
    }
}
