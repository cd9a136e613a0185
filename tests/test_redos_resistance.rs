use procdoc::content_processor::{
    annotate_for_print, classify, reconstruct_lists, sanitize, structure_plain_text, try_sanitize,
    ContentError, Environment,
};
use std::time::{Duration, Instant};

/// Debug builds are slow; this still catches anything super-linear.
const BUDGET: Duration = Duration::from_millis(250);

fn assert_fast<F: FnOnce() -> R, R>(label: &str, f: F) {
    let start = Instant::now();
    let _ = f();
    let elapsed = start.elapsed();

    println!("{label}: {elapsed:?}");
    assert!(
        elapsed < BUDGET,
        "ReDoS vulnerability detected in {label}: took {elapsed:?}"
    );
}

/// The Rust `regex` crate uses finite automata and cannot backtrack
/// catastrophically, but the pipeline also does its own scanning around
/// the matches, so adversarial inputs are still worth timing.
#[test]
fn test_redos_resistance_script_tag() {
    let adversarial = "<script ".to_string() + &"a".repeat(10000);
    assert_fast("server script strip", || sanitize(&adversarial, Environment::Server));
    assert_fast("client script strip", || sanitize(&adversarial, Environment::Client));
}

#[test]
fn test_redos_resistance_event_attribute() {
    let adversarial = "<p onclick=\"".to_string() + &"a".repeat(10000);
    assert_fast("event attribute", || sanitize(&adversarial, Environment::Server));
}

#[test]
fn test_redos_resistance_class_attribute() {
    let adversarial = "<ol class=\"".to_string() + &"a".repeat(10000);
    assert_fast("print class injection", || annotate_for_print(&adversarial));
}

#[test]
fn test_redos_resistance_list_markers() {
    let adversarial = "<div>".to_string() + &"1. a) ".repeat(5000);
    assert_fast("list markers", || reconstruct_lists(&adversarial));

    let many_lines = "a) x<br>".repeat(5000);
    assert_fast("lettered lines", || reconstruct_lists(&many_lines));
}

#[test]
fn test_redos_resistance_plain_text() {
    let adversarial = "\n \n".repeat(5000) + &"1.".repeat(5000);
    assert_fast("plain text blocks", || structure_plain_text(&adversarial));
}

#[test]
fn test_redos_resistance_classifier() {
    let adversarial = "<".repeat(20000);
    assert_fast("classifier", || classify(&adversarial));
}

#[test]
fn test_input_size_limit() {
    let too_large = "a".repeat(11 * 1024 * 1024);

    let result = try_sanitize(&too_large, Environment::Client);
    assert!(matches!(result, Err(ContentError::TooLarge { .. })));
    assert!(
        result
            .err()
            .map(|e| e.to_string().contains("too large"))
            .unwrap_or(false),
        "Error message should mention size limit"
    );
}

#[test]
fn test_oversized_input_still_renders() {
    let too_large = "<b>x</b>".repeat(2 * 1024 * 1024);
    let rendered = sanitize(&too_large, Environment::Client);

    assert!(rendered.starts_with("<p>"));
    assert!(!rendered.contains("<b>"));
}
