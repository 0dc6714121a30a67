/*!
 * Polling Wait Integration Tests
 */

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use waitable_condition::{ConditionError, DiagnosticSink, WaitableCondition};

#[derive(Default)]
struct CountingSink {
    null_predicates: AtomicU32,
}

impl DiagnosticSink for CountingSink {
    fn report(&self, error: &ConditionError) {
        if matches!(error, ConditionError::NullPredicate) {
            self.null_predicates.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[tokio::test]
async fn test_immediately_true_returns_without_delay() {
    let condition = WaitableCondition::new();

    let start = Instant::now();
    let result = condition
        .polling_wait_with(Some(|| true), Duration::from_millis(500), Duration::from_secs(10))
        .await;

    assert!(result);
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn test_never_true_returns_false_after_timeout() {
    let condition = WaitableCondition::new();
    let evaluations = AtomicU32::new(0);

    let start = Instant::now();
    let result = condition
        .polling_wait_with(
            Some(|| {
                evaluations.fetch_add(1, Ordering::Relaxed);
                false
            }),
            Duration::from_millis(10),
            Duration::from_millis(50),
        )
        .await;

    assert!(!result);
    assert!(start.elapsed() >= Duration::from_millis(50));
    // 5 checks before each delay, plus the final re-evaluation
    assert_eq!(evaluations.load(Ordering::Relaxed), 6);
}

#[tokio::test]
async fn test_final_answer_is_fresh_evaluation() {
    let condition = WaitableCondition::new();
    let evaluations = AtomicU32::new(0);

    // False for every in-loop check, true only on the re-check after timeout
    let result = condition
        .polling_wait_with(
            Some(|| evaluations.fetch_add(1, Ordering::Relaxed) >= 3),
            Duration::from_millis(10),
            Duration::from_millis(30),
        )
        .await;

    assert!(result);
    assert_eq!(evaluations.load(Ordering::Relaxed), 4);
}

#[tokio::test]
async fn test_null_predicate_reports_and_returns_false() {
    let sink = Arc::new(CountingSink::default());
    let condition = WaitableCondition::new().with_sink(sink.clone());

    let start = Instant::now();
    let result = condition
        .polling_wait_with(None::<fn() -> bool>, Duration::from_millis(100), Duration::from_secs(10))
        .await;

    assert!(!result);
    assert!(start.elapsed() < Duration::from_millis(50));
    assert_eq!(sink.null_predicates.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_counter_driven_by_background_task() {
    let condition = WaitableCondition::new();
    let counter = Arc::new(AtomicU32::new(0));

    let ticker = counter.clone();
    let background = tokio::spawn(async move {
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            ticker.fetch_add(1, Ordering::Relaxed);
        }
    });

    let start = Instant::now();
    let result = condition
        .polling_wait_with(
            Some(|| counter.load(Ordering::Relaxed) >= 3),
            Duration::from_millis(10),
            Duration::from_millis(1000),
        )
        .await;
    let elapsed = start.elapsed();
    background.abort();

    assert!(result);
    assert!(elapsed >= Duration::from_millis(25));
    assert!(elapsed < Duration::from_millis(500));
}

#[tokio::test]
async fn test_zero_delay_still_terminates() {
    let condition = WaitableCondition::new();

    let result = condition
        .polling_wait_with(Some(|| false), Duration::ZERO, Duration::from_millis(5))
        .await;

    assert!(!result);
}

#[tokio::test]
async fn test_polling_uses_config_defaults() {
    let config = waitable_condition::ConditionConfig::default()
        .with_timeout(Duration::from_millis(30))
        .with_poll_delay(Duration::from_millis(10));
    let condition = WaitableCondition::with_config(config);
    let flag = AtomicBool::new(false);

    let start = Instant::now();
    assert!(!condition.polling_wait(|| flag.load(Ordering::Relaxed)).await);
    assert!(start.elapsed() >= Duration::from_millis(30));
    assert_eq!(condition.stats().polls, 4);
}
