use std::path::Path;

use unnu_core::errors::{BenchError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("path", "results/01-01-2026_00:00:00.result")
        .with_context("reason", "example")
}

#[test]
fn config_error_surface() {
    let err = BenchError::Config(sample_info("range-step", "range step must be positive"));
    assert_eq!(err.code(), "range-step");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn process_error_surface() {
    let err = BenchError::Process(sample_info("exit-status", "benchmark exited with status 3"));
    assert_eq!(err.info().code, "exit-status");
    assert!(err.to_string().starts_with("process error: "));
}

#[test]
fn table_error_display_lists_context_and_hint() {
    let err = BenchError::Table(
        ErrorInfo::new("missing-column", "column not found")
            .with_context("column", "unnu")
            .with_hint("available columns: n,max"),
    );
    assert_eq!(
        err.to_string(),
        "table error: column not found (code: missing-column) | context: [column=unnu] | hint: available columns: n,max"
    );
}

#[test]
fn io_error_records_path_and_kind() {
    let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = BenchError::io("result-read", Path::new("missing.result"), source);
    assert_eq!(err.code(), "result-read");
    assert_eq!(err.info().context.get("path").map(String::as_str), Some("missing.result"));
    assert_eq!(err.info().context.get("kind").map(String::as_str), Some("NotFound"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = BenchError::Render(ErrorInfo::new("degenerate-points", "points are collinear"));
    let value = serde_json::to_value(&err).expect("json");
    assert_eq!(value["family"], "Render");
    assert_eq!(value["detail"]["code"], "degenerate-points");
}
