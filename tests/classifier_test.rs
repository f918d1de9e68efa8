//! Integration tests for the intent classifier

use scroll_intent::{
    ClassifierError, ClassifierOptions, ClassifierWorker, IntentClassifier, ReasonCode,
    SyntheticWheelEvent, WheelEvent,
};
use serde_json::{json, Value};

const INCREASING_DELTAS_THRESHOLD: i64 = 3;

/// Spacing between consecutive events in a gesture.
const STEP_MS: f64 = 20.0;

fn classifier() -> IntentClassifier {
    IntentClassifier::new(&ClassifierOptions {
        increasing_deltas_threshold: Some(INCREASING_DELTAS_THRESHOLD),
        ..Default::default()
    })
}

/// Feeds vertical deltas at a fixed spacing and collects the verdicts.
fn run(classifier: &mut IntentClassifier, start_ms: f64, deltas: &[f64]) -> Vec<bool> {
    deltas
        .iter()
        .enumerate()
        .map(|(i, &delta)| {
            let event = WheelEvent::vertical(delta, start_ms + i as f64 * STEP_MS);
            classifier.check(&event).unwrap()
        })
        .collect()
}

#[test]
fn test_sample_scenario() {
    let mut classifier = classifier();
    let deltas = [
        0.0, 80.0, -100.0, -100.0, -98.0, -96.0, -30.0, -26.0, 50.0, 60.0, 70.0, 120.0,
    ];
    let expected = [
        false, true, true, true, false, false, false, false, false, false, true, true,
    ];

    assert_eq!(run(&mut classifier, 0.0, &deltas), expected);
}

#[test]
fn test_sample_scenario_reasons() {
    let mut classifier = classifier();
    let reasons: Vec<ReasonCode> = [0.0, 80.0, -100.0, -98.0, -40.0, -50.0, -60.0, -70.0]
        .iter()
        .enumerate()
        .map(|(i, &delta)| {
            classifier
                .check_with_reason(&WheelEvent::vertical(delta, i as f64 * STEP_MS))
                .unwrap()
                .reason
        })
        .collect();

    assert_eq!(
        reasons,
        vec![
            ReasonCode::DeltaBelowSensitivity,
            ReasonCode::NoPreviousEventToCompare,
            ReasonCode::NonDecreasingDeltasOfKnownHuman,
            ReasonCode::AllOtherChecksFailed,
            ReasonCode::AllOtherChecksFailed,
            ReasonCode::AllOtherChecksFailed,
            ReasonCode::AllOtherChecksFailed,
            ReasonCode::DeltaModuleHasBeenIncreasing,
        ]
    );
}

#[test]
fn test_repeated_identical_events() {
    // Same event delivered twice keeps its verdict.
    let mut classifier = classifier();
    assert!(classifier.check(&WheelEvent::vertical(80.0, 0.0)).unwrap());

    let human = WheelEvent::vertical(-100.0, 20.0);
    assert!(classifier.check(&human).unwrap());
    assert!(classifier.check(&human).unwrap());

    let decay = WheelEvent::vertical(-98.0, 40.0);
    assert!(!classifier.check(&decay).unwrap());
    assert!(!classifier.check(&decay).unwrap());
}

#[test]
fn test_magnitude_floor_is_invisible() {
    let deltas = [80.0, 60.0, 40.0, 50.0];

    let mut reference = classifier();
    let expected = run(&mut reference, 0.0, &deltas);

    let mut classifier = classifier();
    let mut verdicts = Vec::new();
    for (i, &delta) in deltas.iter().enumerate() {
        let t = i as f64 * STEP_MS;
        // Sub-sensitivity noise between every real event.
        assert!(!classifier.check(&WheelEvent::new(1.0, -1.5, 0.5, t + 5.0)).unwrap());
        verdicts.push(classifier.check(&WheelEvent::vertical(delta, t)).unwrap());
    }

    assert_eq!(verdicts, expected);
    assert_eq!(classifier.history(), reference.history());
}

#[test]
fn test_first_event_is_always_trusted() {
    for (delta, t) in [(2.0, 0.0), (-5000.0, 1e9), (3.0, -42.0)] {
        let mut classifier = classifier();
        assert!(classifier.check(&WheelEvent::vertical(delta, t)).unwrap());
    }
}

#[test]
fn test_time_gap_resets_gesture() {
    let mut classifier = classifier();
    let delay = classifier.config().delay;

    assert!(classifier.check(&WheelEvent::vertical(80.0, 0.0)).unwrap());
    assert!(classifier
        .check(&WheelEvent::vertical(3.0, delay + 1.0))
        .unwrap());
}

#[test]
fn test_decay_is_suppressed() {
    let mut classifier = classifier();
    let delay = classifier.config().delay;

    assert!(classifier.check(&WheelEvent::vertical(80.0, 0.0)).unwrap());
    assert!(!classifier
        .check(&WheelEvent::vertical(79.0, delay / 2.0))
        .unwrap());
}

#[test]
fn test_increasing_run_recovers() {
    let mut classifier = classifier();
    assert_eq!(
        run(&mut classifier, 0.0, &[90.0, 70.0, 40.0, 20.0]),
        vec![true, false, false, false]
    );

    // A run of three increasing magnitudes; only the one completing it counts.
    assert_eq!(
        run(&mut classifier, 4.0 * STEP_MS, &[30.0, 40.0, 50.0]),
        vec![false, false, true]
    );
}

#[test]
fn test_longer_run_threshold() {
    let mut classifier = IntentClassifier::new(&ClassifierOptions {
        increasing_deltas_threshold: Some(5),
        ..Default::default()
    });
    assert_eq!(
        run(&mut classifier, 0.0, &[90.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0]),
        vec![true, false, false, false, false, false, true]
    );
}

#[test]
fn test_out_of_order_event_is_trusted() {
    let mut classifier = classifier();
    assert!(classifier.check(&WheelEvent::vertical(80.0, 20.0)).unwrap());
    assert!(classifier.check(&WheelEvent::vertical(72.0, 0.0)).unwrap());
}

#[test]
fn test_invalid_input() {
    let mut classifier = classifier();

    assert!(matches!(
        classifier.check(&Value::Null),
        Err(ClassifierError::InvalidEvent(_))
    ));
    assert!(matches!(
        classifier.check(&json!({})),
        Err(ClassifierError::InvalidEvent(_))
    ));

    // Rejected input leaves the session untouched: the next event is still first.
    let verdict = classifier
        .check_with_reason(&WheelEvent::vertical(10.0, 0.0))
        .unwrap();
    assert_eq!(verdict.reason, ReasonCode::NoPreviousEventToCompare);
}

#[test]
fn test_wrapped_and_recorded_events() {
    let mut classifier = classifier();

    let synthetic = SyntheticWheelEvent::from(WheelEvent::vertical(80.0, 0.0));
    assert!(classifier.check(&synthetic).unwrap());

    let recorded = json!({ "nativeEvent": { "deltaY": 60, "timeStamp": 20 } });
    assert!(!classifier.check(&recorded).unwrap());

    let plain = json!({ "deltaX": 0, "deltaY": 140, "deltaZ": 0, "timeStamp": 40 });
    assert!(!classifier.check(&plain).unwrap());
    assert!(classifier.is_tracking_inertia());
}

#[test]
fn test_worker_matches_direct_classifier() {
    let deltas = [
        0.0, 80.0, -100.0, -100.0, -98.0, -96.0, -30.0, -26.0, 50.0, 60.0, 70.0, 120.0,
    ];

    let mut direct = classifier();
    let expected = run(&mut direct, 0.0, &deltas);

    let worker = ClassifierWorker::spawn(*direct.config());
    for (i, &delta) in deltas.iter().enumerate() {
        worker
            .submit(WheelEvent::vertical(delta, i as f64 * STEP_MS))
            .unwrap();
    }

    let (classifier, receiver) = worker.finish().unwrap();
    let verdicts: Vec<bool> = receiver
        .try_iter()
        .map(|classified| classified.intentional().unwrap())
        .collect();

    assert_eq!(verdicts, expected);
    assert_eq!(classifier.history(), direct.history());
}

#[test]
fn test_options_from_json_with_negative_run_threshold() {
    let options: ClassifierOptions =
        serde_json::from_str(r#"{ "increasingDeltasThreshold": -1, "delay": 50 }"#)
            .unwrap();
    let mut classifier = IntentClassifier::new(&options);
    assert_eq!(classifier.config().increasing_deltas_threshold, 2);
    assert_eq!(classifier.config().delay, 50.0);

    // With the floor of 2, any non-decrease inside an inertial tail is intentional.
    let verdicts = run(&mut classifier, 0.0, &[80.0, 40.0, 30.0, 30.0]);
    assert_eq!(verdicts, vec![true, false, false, true]);
}
