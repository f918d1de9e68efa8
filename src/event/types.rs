//! Wheel event types accepted by the classifier.
//!
//! The classifier never looks at a platform event directly. Anything exposing
//! the three delta axes and a timestamp, either itself or through one nested
//! `nativeEvent`, can be fed to it via [`WheelEventLike`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Narrow capability interface for "something that looks like a wheel event".
///
/// Accessors return `None` when the value does not carry the field at all.
/// A wrapper (e.g. a UI framework's synthetic event) exposes the platform
/// event it carries through [`WheelEventLike::native_event`].
pub trait WheelEventLike {
    fn delta_x(&self) -> Option<f64>;
    fn delta_y(&self) -> Option<f64>;
    fn delta_z(&self) -> Option<f64>;
    /// Milliseconds since a session-consistent epoch.
    fn time_stamp(&self) -> Option<f64>;

    /// The wrapped platform event, if this value is a wrapper.
    fn native_event(&self) -> Option<&dyn WheelEventLike> {
        None
    }
}

/// Canonical representation of one wheel event.
///
/// Created fresh for every classification and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_z: f64,
    pub time_stamp: f64,
}

impl NormalizedEvent {
    pub fn new(delta_x: f64, delta_y: f64, delta_z: f64, time_stamp: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            delta_z,
            time_stamp,
        }
    }
}

impl WheelEventLike for NormalizedEvent {
    fn delta_x(&self) -> Option<f64> {
        Some(self.delta_x)
    }

    fn delta_y(&self) -> Option<f64> {
        Some(self.delta_y)
    }

    fn delta_z(&self) -> Option<f64> {
        Some(self.delta_z)
    }

    fn time_stamp(&self) -> Option<f64> {
        Some(self.time_stamp)
    }
}

/// A platform wheel event as delivered by the host.
///
/// Missing axes deserialize as `0.0`; the timestamp is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelEvent {
    #[serde(default)]
    pub delta_x: f64,
    #[serde(default)]
    pub delta_y: f64,
    #[serde(default)]
    pub delta_z: f64,
    pub time_stamp: f64,
}

impl WheelEvent {
    pub fn new(delta_x: f64, delta_y: f64, delta_z: f64, time_stamp: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            delta_z,
            time_stamp,
        }
    }

    /// A plain vertical scroll, the most common wheel event.
    pub fn vertical(delta_y: f64, time_stamp: f64) -> Self {
        Self::new(0.0, delta_y, 0.0, time_stamp)
    }
}

impl WheelEventLike for WheelEvent {
    fn delta_x(&self) -> Option<f64> {
        Some(self.delta_x)
    }

    fn delta_y(&self) -> Option<f64> {
        Some(self.delta_y)
    }

    fn delta_z(&self) -> Option<f64> {
        Some(self.delta_z)
    }

    fn time_stamp(&self) -> Option<f64> {
        Some(self.time_stamp)
    }
}

/// A framework-level wrapper carrying the platform event in `native_event`.
///
/// The outer copies of the deltas are informational only; classification
/// always reads the nested native event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticWheelEvent {
    #[serde(default)]
    pub delta_x: f64,
    #[serde(default)]
    pub delta_y: f64,
    #[serde(default)]
    pub delta_z: f64,
    #[serde(default)]
    pub time_stamp: f64,
    pub native_event: WheelEvent,
}

impl From<WheelEvent> for SyntheticWheelEvent {
    fn from(native_event: WheelEvent) -> Self {
        Self {
            delta_x: native_event.delta_x,
            delta_y: native_event.delta_y,
            delta_z: native_event.delta_z,
            time_stamp: native_event.time_stamp,
            native_event,
        }
    }
}

impl WheelEventLike for SyntheticWheelEvent {
    fn delta_x(&self) -> Option<f64> {
        Some(self.delta_x)
    }

    fn delta_y(&self) -> Option<f64> {
        Some(self.delta_y)
    }

    fn delta_z(&self) -> Option<f64> {
        Some(self.delta_z)
    }

    fn time_stamp(&self) -> Option<f64> {
        Some(self.time_stamp)
    }

    fn native_event(&self) -> Option<&dyn WheelEventLike> {
        Some(&self.native_event)
    }
}

/// Dynamic JSON input, as read from a recorded event log.
///
/// Uses the platform field names (`deltaX`, `timeStamp`, `nativeEvent`).
/// Non-numeric fields read as absent.
impl WheelEventLike for Value {
    fn delta_x(&self) -> Option<f64> {
        self.get("deltaX").and_then(Value::as_f64)
    }

    fn delta_y(&self) -> Option<f64> {
        self.get("deltaY").and_then(Value::as_f64)
    }

    fn delta_z(&self) -> Option<f64> {
        self.get("deltaZ").and_then(Value::as_f64)
    }

    fn time_stamp(&self) -> Option<f64> {
        self.get("timeStamp").and_then(Value::as_f64)
    }

    fn native_event(&self) -> Option<&dyn WheelEventLike> {
        self.get("nativeEvent")
            .filter(|native| native.is_object())
            .map(|native| native as &dyn WheelEventLike)
    }
}

/// `None` models a caller passing "no event at all".
impl<E: WheelEventLike> WheelEventLike for Option<E> {
    fn delta_x(&self) -> Option<f64> {
        self.as_ref().and_then(E::delta_x)
    }

    fn delta_y(&self) -> Option<f64> {
        self.as_ref().and_then(E::delta_y)
    }

    fn delta_z(&self) -> Option<f64> {
        self.as_ref().and_then(E::delta_z)
    }

    fn time_stamp(&self) -> Option<f64> {
        self.as_ref().and_then(E::time_stamp)
    }

    fn native_event(&self) -> Option<&dyn WheelEventLike> {
        self.as_ref().and_then(E::native_event)
    }
}
