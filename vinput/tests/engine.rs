use vinput::engine::{Phase, ValidationEngine};
use vinput::validation::ValidationResult;

fn result(message: &str) -> ValidationResult {
    ValidationResult::new(vec![message.to_string()], false, "empty")
}

#[test]
fn test_starts_pristine() {
    let engine = ValidationEngine::new();
    assert_eq!(engine.phase(), Phase::Pristine);
    assert!(engine.result().is_valid());
}

#[test]
fn test_begin_then_settle() {
    let mut engine = ValidationEngine::new();
    let ticket = engine.begin();
    assert_eq!(engine.phase(), Phase::Evaluating);
    assert!(engine.settle(ticket, result("a")));
    assert_eq!(engine.phase(), Phase::Settled);
    assert_eq!(engine.result().messages, vec!["a"]);
}

#[test]
fn test_late_completion_of_older_evaluation_is_discarded() {
    let mut engine = ValidationEngine::new();
    let a = engine.begin();
    let b = engine.begin();

    assert!(engine.settle(b, result("b")));
    assert!(!engine.settle(a, result("a")));
    assert_eq!(engine.result().messages, vec!["b"]);
}

#[test]
fn test_early_completion_of_older_evaluation_is_discarded() {
    let mut engine = ValidationEngine::new();
    let a = engine.begin();
    let b = engine.begin();

    assert!(!engine.settle(a, result("a")));
    assert_eq!(engine.phase(), Phase::Evaluating);
    assert!(engine.settle(b, result("b")));
    assert_eq!(engine.result().messages, vec!["b"]);
}

#[test]
fn test_reset_invalidates_outstanding_tickets() {
    let mut engine = ValidationEngine::new();
    let ticket = engine.begin();
    engine.reset();
    assert_eq!(engine.phase(), Phase::Pristine);
    assert!(!engine.settle(ticket, result("stale")));
    assert!(engine.result().is_valid());
}

#[test]
fn test_result_flags() {
    let r = ValidationResult::new(vec!["x;empty".to_string()], false, "empty");
    assert!(r.invalid);
    assert!(r.required_empty);

    let disabled = ValidationResult::new(vec!["empty".to_string()], true, "empty");
    assert!(!disabled.invalid);
    assert!(disabled.required_empty);

    let partial = ValidationResult::new(vec!["not empty".to_string()], false, "empty");
    assert!(!partial.required_empty);
}

#[test]
fn test_result_empty_message_containing_separator() {
    let empty = "required; please fill";
    let alone = ValidationResult::new(vec![empty.to_string()], false, empty);
    assert!(alone.required_empty);

    let joined = ValidationResult::new(vec![format!("too short;{empty};bad")], false, empty);
    assert!(joined.required_empty);

    let fragment = ValidationResult::new(vec!["required".to_string()], false, empty);
    assert!(!fragment.required_empty);
}
