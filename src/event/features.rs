//! Scalar features derived from a single normalized event.
//!
//! All functions are pure.

use crate::event::types::NormalizedEvent;

/// Values whose magnitude is below this have no direction.
pub const SIGN_THRESHOLD: f64 = 10.0;

/// Axes where both magnitudes are below this are considered equal.
pub const VECTOR_THRESHOLD: f64 = 20.0;

/// Percentage of the previous delta an inertial event may plausibly lose.
pub const INERTIA_DECAY_PERCENT: f64 = 10.0;

/// Smallest drop that can ever count as anomalous.
const MIN_ANOMALY_DROP: f64 = 10.0;

/// `[delta_x, delta_y, delta_z]`
pub fn deltas(event: &NormalizedEvent) -> [f64; 3] {
    [event.delta_x, event.delta_y, event.delta_z]
}

/// Largest absolute delta across the three axes; the event's overall magnitude.
pub fn biggest_delta_module(event: &NormalizedEvent) -> f64 {
    deltas(event)
        .iter()
        .map(|d| d.abs())
        .fold(0.0, f64::max)
}

/// Sign of `value`, or `0` when `|value| < threshold`.
pub fn sign(value: f64, threshold: f64) -> i8 {
    if value.abs() < threshold {
        0
    } else if value > 0.0 {
        1
    } else {
        -1
    }
}

/// Whether two events still point the same way.
///
/// Per axis: both magnitudes below `threshold`, or equal [`sign`]s.
pub fn compare_vectors(a: &NormalizedEvent, b: &NormalizedEvent, threshold: f64) -> bool {
    deltas(a).iter().zip(deltas(b).iter()).all(|(&da, &db)| {
        (da.abs() < threshold && db.abs() < threshold)
            || sign(da, SIGN_THRESHOLD) == sign(db, SIGN_THRESHOLD)
    })
}

/// Whether `curr` decayed from `prev` faster than smooth inertia would.
///
/// True when any axis magnitude dropped by more than
/// `max(10, |prev| * threshold / 100)`. A drop that sharp usually means a
/// fresh push rather than coasting.
pub fn is_anomaly_inertia(prev: &NormalizedEvent, curr: &NormalizedEvent, threshold: f64) -> bool {
    deltas(prev)
        .iter()
        .zip(deltas(curr).iter())
        .any(|(&p, &c)| {
            let drop = p.abs() - c.abs();
            let max_drop = MIN_ANOMALY_DROP.max(p.abs() * threshold / 100.0);
            drop > max_drop
        })
}
