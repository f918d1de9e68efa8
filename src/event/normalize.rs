//! Conversion of event-like input into a [`NormalizedEvent`].

use crate::event::types::{NormalizedEvent, WheelEventLike};

/// Errors reported by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// The input is not a recognizable wheel event.
    InvalidEvent(String),
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierError::InvalidEvent(e) => write!(f, "Invalid wheel event: {e}"),
        }
    }
}

impl std::error::Error for ClassifierError {}

/// Normalize a native event, or a wrapper carrying one.
///
/// Only one level of `nativeEvent` is unwrapped. Missing or NaN axes read
/// as `0.0`. The timestamp is copied verbatim but must be present and finite.
pub fn normalize(raw: &dyn WheelEventLike) -> Result<NormalizedEvent, ClassifierError> {
    let source = raw.native_event().unwrap_or(raw);

    let time_stamp = source
        .time_stamp()
        .ok_or_else(|| ClassifierError::InvalidEvent("missing timeStamp".to_string()))?;

    Ok(NormalizedEvent {
        delta_x: axis(source.delta_x()),
        delta_y: axis(source.delta_y()),
        delta_z: axis(source.delta_z()),
        time_stamp: finite_time_stamp(time_stamp)?,
    })
}

/// Reject timestamps that cannot be ordered against other events.
pub(crate) fn finite_time_stamp(time_stamp: f64) -> Result<f64, ClassifierError> {
    if time_stamp.is_finite() {
        Ok(time_stamp)
    } else {
        Err(ClassifierError::InvalidEvent(format!(
            "timeStamp is not a finite number: {time_stamp}"
        )))
    }
}

fn axis(delta: Option<f64>) -> f64 {
    delta.filter(|d| !d.is_nan()).unwrap_or(0.0)
}
