//! A classifier owned by a dedicated thread.
//!
//! `IntentClassifier::check` must not run concurrently on one instance. When
//! events for one input stream arrive from several threads, hand them to a
//! [`ClassifierWorker`] instead: it owns a single classifier and processes
//! submissions strictly in the order they were queued.

use crate::config::ClassifierConfig;
use crate::core::{IntentClassifier, Verdict};
use crate::event::{normalize, ClassifierError, NormalizedEvent, WheelEventLike};
use crate::stats::{create_shared_log, SharedVerdictLog, VerdictLog};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use serde::Serialize;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Capacity of the submission queue.
const QUEUE_CAPACITY: usize = 10_000;

type BoxedEvent = Box<dyn WheelEventLike + Send>;

/// One processed submission.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedEvent {
    /// Position in submission order, starting at 0
    pub sequence: u64,
    /// The normalized event, when the input was valid
    pub event: Option<NormalizedEvent>,
    /// The verdict, or why the input was rejected
    #[serde(serialize_with = "serialize_outcome")]
    pub outcome: Result<Verdict, ClassifierError>,
}

impl ClassifiedEvent {
    /// `Some(true)` for intentional input, `None` for rejected input.
    pub fn intentional(&self) -> Option<bool> {
        self.outcome.as_ref().ok().map(|v| v.intentional)
    }

    /// A submission that never reached the classifier.
    pub fn rejected(sequence: u64, error: ClassifierError) -> Self {
        Self {
            sequence,
            event: None,
            outcome: Err(error),
        }
    }
}

/// Normalize and classify one submission, recording the outcome in `log`.
///
/// Invalid input is logged, counted as rejected and reported back instead of
/// failing; the classifier state is left untouched in that case.
pub fn classify_event(
    classifier: &mut IntentClassifier,
    log: &VerdictLog,
    sequence: u64,
    raw: &dyn WheelEventLike,
) -> ClassifiedEvent {
    let outcome = normalize(raw)
        .and_then(|event| classifier.classify(event).map(|verdict| (event, verdict)));

    match outcome {
        Ok((event, verdict)) => {
            log.record(&verdict);
            ClassifiedEvent {
                sequence,
                event: Some(event),
                outcome: Ok(verdict),
            }
        }
        Err(e) => reject(log, sequence, e),
    }
}

/// Count and report input that could not be turned into an event at all.
pub fn reject(log: &VerdictLog, sequence: u64, error: ClassifierError) -> ClassifiedEvent {
    warn!(sequence, "Rejected wheel event: {error}");
    log.record_rejected();
    ClassifiedEvent::rejected(sequence, error)
}

fn serialize_outcome<S>(
    outcome: &Result<Verdict, ClassifierError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match outcome {
        Ok(verdict) => verdict.serialize(serializer),
        Err(e) => serializer.serialize_str(&e.to_string()),
    }
}

/// Errors that can occur while talking to a worker.
#[derive(Debug)]
pub enum WorkerError {
    /// The worker thread is gone
    Disconnected,
    /// The worker thread panicked
    Panicked,
}

impl std::fmt::Display for WorkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerError::Disconnected => write!(f, "Classifier worker is no longer running"),
            WorkerError::Panicked => write!(f, "Classifier worker panicked"),
        }
    }
}

impl std::error::Error for WorkerError {}

/// A background thread owning one classifier.
pub struct ClassifierWorker {
    sender: Option<Sender<BoxedEvent>>,
    receiver: Receiver<ClassifiedEvent>,
    log: SharedVerdictLog,
    thread_handle: Option<JoinHandle<IntentClassifier>>,
}

impl ClassifierWorker {
    /// Start a worker with its own verdict log.
    pub fn spawn(config: ClassifierConfig) -> Self {
        Self::with_log(config, create_shared_log())
    }

    /// Start a worker that records into `log`.
    pub fn with_log(config: ClassifierConfig, log: SharedVerdictLog) -> Self {
        let (sender, inbox) = bounded::<BoxedEvent>(QUEUE_CAPACITY);
        let (outbox, receiver) = unbounded();
        let worker_log = log.clone();

        let handle = thread::spawn(move || {
            let mut classifier = IntentClassifier::with_config(config);
            debug!(?config, "Classifier worker started");

            for (sequence, raw) in (0u64..).zip(inbox.iter()) {
                let classified =
                    classify_event(&mut classifier, &worker_log, sequence, raw.as_ref());

                // Nobody listening any more is not an error for the classifier.
                let _ = outbox.send(classified);
            }

            debug!("Classifier worker stopped");
            classifier
        });

        Self {
            sender: Some(sender),
            receiver,
            log,
            thread_handle: Some(handle),
        }
    }

    /// Queue an event for classification. Blocks while the queue is full.
    pub fn submit<E>(&self, event: E) -> Result<(), WorkerError>
    where
        E: WheelEventLike + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(WorkerError::Disconnected)?;
        sender
            .send(Box::new(event))
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Get the receiver for classified events.
    pub fn receiver(&self) -> &Receiver<ClassifiedEvent> {
        &self.receiver
    }

    /// Try to receive a classified event without blocking.
    pub fn try_recv(&self) -> Option<ClassifiedEvent> {
        self.receiver.try_recv().ok()
    }

    /// The verdict log this worker records into.
    pub fn log(&self) -> &SharedVerdictLog {
        &self.log
    }

    /// Stop accepting events, wait for the queue to drain and return the
    /// classifier in its final state. Results not yet received stay
    /// available through the returned receiver.
    pub fn finish(mut self) -> Result<(IntentClassifier, Receiver<ClassifiedEvent>), WorkerError> {
        self.sender.take();
        let handle = self.thread_handle.take().ok_or(WorkerError::Disconnected)?;
        let classifier = handle.join().map_err(|_| WorkerError::Panicked)?;
        Ok((classifier, self.receiver.clone()))
    }
}

impl Drop for ClassifierWorker {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}
