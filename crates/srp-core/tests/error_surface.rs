use srp_core::errors::{ErrorInfo, SrpError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("index", 3)
        .with_context("reason", "example")
}

#[test]
fn unsupported_spin_surface() {
    let err = SrpError::UnsupportedSpin(sample_info("U001", "spin-1 nucleus"));
    assert_eq!(err.info().code, "U001");
    assert_eq!(err.info().context.get("index").map(String::as_str), Some("3"));
}

#[test]
fn invalid_argument_surface() {
    let err = SrpError::InvalidArgument(sample_info("A001", "empty pool"));
    assert_eq!(err.info().code, "A001");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = SrpError::Reduction(sample_info("R001", "inexact weight").with_hint("check n"));
    let rendered = err.to_string();
    assert!(rendered.starts_with("reduction error: inexact weight (code: R001)"));
    assert!(rendered.contains("index=3"));
    assert!(rendered.contains("hint: check n"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = SrpError::Overflow(ErrorInfo::new("O001", "too wide"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Overflow");
    assert_eq!(json["detail"]["code"], "O001");
    let back: SrpError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
