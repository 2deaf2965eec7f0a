use super::src::error::{make_diagnostic, make_related_information, DiagnosticNode};
use super::src::error_code::ErrorCode;
use super::src::util::{ng_error_code, replace_ts_with_ng_in_errors};
use ts::{DiagnosticCategory, TextSpan};

#[test]
fn ng_error_codes_live_in_the_negative_namespace() {
    assert_eq!(ng_error_code(ErrorCode::ComponentMissingTemplate), -992001);
    assert_eq!(ng_error_code(ErrorCode::ImportCycleDetected), -993003);
    assert_eq!(ng_error_code(ErrorCode::InlineTcbRequired), -998900);
}

#[test]
fn replaces_ts_prefix_for_framework_codes() {
    let formatted = "\u{001b}[93mTS-992001: \u{001b}[0m missing template";
    let replaced = replace_ts_with_ng_in_errors(formatted);
    assert!(replaced.contains("NG2001"), "got: {}", replaced);
    assert!(!replaced.contains("TS-99"), "got: {}", replaced);
}

#[test]
fn diagnostics_are_constructible_without_a_checker() {
    let node = DiagnosticNode::new("/app/cmp.ts", TextSpan::new(10, 5));
    let related = make_related_information(&node, "declared here".to_string());
    let diag = make_diagnostic(
        ErrorCode::SymbolNotExported,
        &node,
        "not exported".into(),
        Some(vec![related]),
        DiagnosticCategory::Error,
    );
    assert_eq!(diag.code, -996002);
    assert_eq!(diag.start, 10);
    assert_eq!(diag.length, 5);
    assert_eq!(diag.file.as_deref(), Some("/app/cmp.ts"));
    assert_eq!(diag.related_information.unwrap().len(), 1);
}
