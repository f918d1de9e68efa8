//! Event normalization for the scroll intent classifier.
//!
//! This module turns whatever the host hands over (a native wheel event, a
//! framework wrapper around one, or a recorded JSON value) into a canonical
//! [`NormalizedEvent`], and derives the scalar features the classifier
//! compares. Nothing in here holds state.

pub mod features;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use features::{
    biggest_delta_module, compare_vectors, deltas, is_anomaly_inertia, sign,
    INERTIA_DECAY_PERCENT, SIGN_THRESHOLD, VECTOR_THRESHOLD,
};
pub use normalize::{normalize, ClassifierError};
pub use types::{NormalizedEvent, SyntheticWheelEvent, WheelEvent, WheelEventLike};
