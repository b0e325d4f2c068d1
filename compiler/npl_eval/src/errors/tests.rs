use npl_diagnostic::ErrorCode;
use npl_ir::{Span, Type};
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_message_matches_kind() {
    let err = type_mismatch(Type::Double, Type::Bool);
    assert_eq!(err.message, "type mismatch: expected double, found bool");
    assert_eq!(err.to_string(), err.kind.to_string());
}

#[test]
fn test_innermost_span_wins() {
    let err = domain_error("sqrt", "negative argument -4")
        .with_span(Span::new(3, 7))
        .with_span(Span::new(0, 20));
    assert_eq!(err.span, Some(Span::new(3, 7)));
}

#[test]
fn test_dummy_span_is_not_recorded() {
    let err = no_more_steps().with_span(Span::DUMMY);
    assert_eq!(err.span, None);
}

#[test]
fn test_error_codes() {
    assert_eq!(type_mismatch("a", "b").kind.error_code(), ErrorCode::E6001);
    assert_eq!(unknown_variable("x").kind.error_code(), ErrorCode::E6002);
    assert_eq!(domain_error("random", "x").kind.error_code(), ErrorCode::E6003);
    assert_eq!(
        out_of_world_bounds(f64::NAN, 0.0).kind.error_code(),
        ErrorCode::E6004
    );
    assert_eq!(no_more_steps().kind.error_code(), ErrorCode::E6005);
    assert_eq!(unbound().kind.error_code(), ErrorCode::E6006);
}

#[test]
fn test_to_diagnostic() {
    let diag = unknown_variable("ghost")
        .with_span(Span::new(5, 10))
        .to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E6002);
    assert_eq!(diag.message, "unknown variable: ghost");
    assert_eq!(diag.primary_span(), Some(Span::new(5, 10)));
}
