//! Scroll Intent - tells deliberate wheel input apart from inertial scrolling.
//!
//! Trackpads and some mice keep emitting wheel events after the user has let
//! go, as the OS or driver simulates momentum. This library classifies each
//! event of a live stream as either *intentional* (the user spun the wheel or
//! flicked the trackpad) or *inertial* (residual decay), so a UI can react
//! immediately to the former and ignore the latter.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       Scroll Intent                        │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐      │
//! │  │    Event    │──▶│ Classifier  │──▶│   Verdict   │      │
//! │  │ (normalize) │   │ (rule chain)│   │ (+ reason)  │      │
//! │  └─────────────┘   └─────────────┘   └─────────────┘      │
//! │                           │                 │              │
//! │                           ▼                 ▼              │
//! │                    ┌─────────────┐   ┌─────────────┐      │
//! │                    │   History   │   │ Verdict Log │      │
//! │                    │  (gesture)  │   │   (stats)   │      │
//! │                    └─────────────┘   └─────────────┘      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use scroll_intent::{ClassifierOptions, IntentClassifier, WheelEvent};
//!
//! let mut classifier = IntentClassifier::new(&ClassifierOptions::default());
//!
//! // The first event of a session is always trusted.
//! assert!(classifier.check(&WheelEvent::vertical(80.0, 0.0)).unwrap());
//!
//! // A smaller delta shortly afterwards looks like momentum.
//! assert!(!classifier.check(&WheelEvent::vertical(64.0, 16.0)).unwrap());
//! ```

pub mod config;
pub mod core;
pub mod event;
pub mod stats;
pub mod stream;

// Re-export key types at crate root for convenience
pub use self::core::{History, IntentClassifier, ReasonCode, Verdict};
pub use config::{ClassifierConfig, ClassifierOptions, Config, ConfigError, OutputFormat};
pub use event::{
    normalize, ClassifierError, NormalizedEvent, SyntheticWheelEvent, WheelEvent, WheelEventLike,
};
pub use stats::{SharedVerdictLog, VerdictLog, VerdictStats};
pub use stream::{classify_event, ClassifiedEvent, ClassifierWorker, WorkerError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
