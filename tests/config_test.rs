/*!
 * Configuration Tests
 * Environment-driven config; serialized because they mutate process env
 */

use serial_test::serial;
use std::time::Duration;
use waitable_condition::core::sync::condition::{POLL_DELAY_ENV, TIMEOUT_ENV};
use waitable_condition::{ConditionConfig, ConditionError};

fn clear_env() {
    std::env::remove_var(TIMEOUT_ENV);
    std::env::remove_var(POLL_DELAY_ENV);
}

#[test]
#[serial]
fn test_from_env_defaults_when_unset() {
    clear_env();
    assert_eq!(ConditionConfig::from_env().unwrap(), ConditionConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(TIMEOUT_ENV, "2500");
    std::env::set_var(POLL_DELAY_ENV, " 25 ");

    let config = ConditionConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.default_timeout, Duration::from_millis(2500));
    assert_eq!(config.poll_delay, Duration::from_millis(25));
}

#[test]
#[serial]
fn test_from_env_rejects_garbage() {
    clear_env();
    std::env::set_var(TIMEOUT_ENV, "ten seconds");

    let err = ConditionConfig::from_env().unwrap_err();
    clear_env();

    match err {
        ConditionError::InvalidConfig(msg) => assert!(msg.contains(TIMEOUT_ENV)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_config_json_shape() {
    let json = serde_json::to_value(ConditionConfig::short_wait()).unwrap();
    assert_eq!(json["timeout_ms"], 1000);
    assert_eq!(json["poll_delay_ms"], 10);
}
