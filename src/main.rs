/*!
 * Condition Demo - Main Entry Point
 *
 * Exercises both wait protocols:
 * - Timed wait completed by a background task
 * - Timed wait left to expire
 * - Polling wait on a counter bumped by a background task
 */

use anyhow::Context;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use waitable_condition::{init_tracing, ConditionConfig, WaitableCondition};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ConditionConfig::from_env().context("loading condition config")?;
    info!(
        timeout_ms = u64::try_from(config.default_timeout.as_millis()).unwrap_or(u64::MAX),
        poll_delay_ms = u64::try_from(config.poll_delay.as_millis()).unwrap_or(u64::MAX),
        "Condition demo starting"
    );

    let condition = Arc::new(WaitableCondition::with_config(config));

    // Completed early by another task
    let completer = condition.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        completer.complete();
    });
    let completed = condition.timed_wait(Duration::from_millis(1000)).await;
    info!(completed, "timed wait with completion");

    // Nobody completes this one
    let completed = condition.timed_wait(Duration::from_millis(200)).await;
    info!(completed, "timed wait without completion");

    // Polling against a counter advanced every 10ms
    let counter = Arc::new(AtomicU32::new(0));
    let ticker = counter.clone();
    let ticks = tokio::spawn(async move {
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            ticker.fetch_add(1, Ordering::Relaxed);
        }
    });
    let reached = condition
        .polling_wait_with(
            Some(|| counter.load(Ordering::Relaxed) >= 3),
            Duration::from_millis(10),
            Duration::from_millis(1000),
        )
        .await;
    info!(reached, "polling wait");
    ticks.await.context("ticker task")?;

    let stats = serde_json::to_string(&condition.stats()).context("serializing stats")?;
    info!(stats = %stats, "Condition demo finished");

    Ok(())
}
