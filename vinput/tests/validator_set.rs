use std::sync::Arc;
use std::time::Duration;

use vinput::config::Messages;
use vinput::constraints::Constraints;
use vinput::error::RuleError;
use vinput::validation::{DefaultRule, ValidatorSet, rule, rule_async};
use vinput::value::{Kind, Value};

const FAILED: &str = "validation failed";

#[tokio::test]
async fn test_default_rule_joins_messages() {
    let mut set = ValidatorSet::new();
    set.install_default(DefaultRule::new(Messages::default()));
    let constraints = Constraints::new(Kind::Text).pattern("^x").unwrap().required();

    // Empty values skip the pattern check; use a mismatching non-empty one.
    let messages = set.evaluate(&Value::from("y"), &constraints, FAILED).await;
    assert_eq!(messages, vec!["does not match pattern: ^x"]);

    let messages = set.evaluate(&Value::from(""), &constraints, FAILED).await;
    assert_eq!(messages, vec!["value cannot be empty"]);
}

#[tokio::test]
async fn test_default_installed_once_at_front() {
    let mut set = ValidatorSet::new();
    set.push(Arc::new(rule(|_, _| vec!["custom".to_string()])));
    set.install_default(DefaultRule::default());
    set.install_default(DefaultRule::default());
    assert_eq!(set.len(), 2);
    assert!(set.has_default());

    let constraints = Constraints::new(Kind::Text).required();
    let messages = set.evaluate(&Value::Null, &constraints, FAILED).await;
    assert_eq!(messages, vec!["value cannot be empty", "custom"]);
}

#[tokio::test]
async fn test_multiple_messages_from_one_validator() {
    let mut set = ValidatorSet::new();
    set.push(Arc::new(rule(|_, _| vec!["a".to_string(), "b".to_string()])));
    set.push(Arc::new(rule(|_, _| Vec::new())));
    set.push(Arc::new(rule(|_, _| vec![String::new()])));

    let messages = set.evaluate(&Value::Null, &Constraints::default(), FAILED).await;
    assert_eq!(messages, vec!["a;b"]);
}

#[tokio::test(start_paused = true)]
async fn test_results_keep_registration_order() {
    let mut set = ValidatorSet::new();
    set.push(Arc::new(rule_async(|_, _| async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(vec!["slow".to_string()])
    })));
    set.push(Arc::new(rule_async(|_, _| async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(vec!["fast".to_string()])
    })));

    let messages = set.evaluate(&Value::Null, &Constraints::default(), FAILED).await;
    assert_eq!(messages, vec!["slow", "fast"]);
}

#[tokio::test(start_paused = true)]
async fn test_validators_run_concurrently() {
    let mut set = ValidatorSet::new();
    for _ in 0..3 {
        set.push(Arc::new(rule_async(|_, _| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(Vec::new())
        })));
    }

    let start = tokio::time::Instant::now();
    set.evaluate(&Value::Null, &Constraints::default(), FAILED).await;
    assert!(start.elapsed() < Duration::from_millis(150));
}

#[tokio::test]
async fn test_failing_validator_contributes_generic_message() {
    let mut set = ValidatorSet::new();
    set.push(Arc::new(rule_async(|_, _| async {
        Err(RuleError::failed("backend down"))
    })));
    set.push(Arc::new(rule(|_, _| vec!["other".to_string()])));

    let messages = set.evaluate(&Value::Null, &Constraints::default(), FAILED).await;
    assert_eq!(messages, vec![FAILED, "other"]);
}

#[tokio::test]
async fn test_panicking_validator_does_not_abort_evaluation() {
    let mut set = ValidatorSet::new();
    set.push(Arc::new(rule(|_, _| panic!("boom"))));
    set.push(Arc::new(rule_async(|_, _| async { panic!("async boom") })));
    set.push(Arc::new(rule(|_, _| vec!["still here".to_string()])));

    let messages = set.evaluate(&Value::Null, &Constraints::default(), FAILED).await;
    assert_eq!(messages, vec![FAILED, FAILED, "still here"]);
}

#[tokio::test]
async fn test_validators_see_value_and_constraints() {
    let mut set = ValidatorSet::new();
    set.push(Arc::new(rule(|value, constraints| {
        vec![format!("{}:{}", constraints.kind, value)]
    })));

    let messages = set
        .evaluate(&Value::Number(4.0), &Constraints::new(Kind::Number), FAILED)
        .await;
    assert_eq!(messages, vec!["number:4"]);
}
