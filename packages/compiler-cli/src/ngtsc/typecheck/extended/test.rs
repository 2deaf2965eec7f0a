use std::collections::HashMap;

use super::src::extended_template_checker::{all_checks, ExtendedTemplateChecker};
use crate::ngtsc::diagnostics::ng_error_code;
use crate::ngtsc::diagnostics::ErrorCode;
use crate::ngtsc::typecheck::api::api::TemplateSourceMapping;
use angular_compiler::template_parser::{parse_template, ParseTemplateOptions};
use ts::{Declaration, DiagnosticCategory};

fn check(template: &str) -> Vec<ts::Diagnostic> {
    check_with_severities(template, HashMap::new())
}

fn check_with_severities(
    template: &str,
    severities: HashMap<String, DiagnosticCategory>,
) -> Vec<ts::Diagnostic> {
    let parsed = parse_template(template, "/app/cmp.html", &ParseTemplateOptions::default());
    assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
    let component = Declaration::class("TestCmp", "/app/cmp.ts");
    let mapping = TemplateSourceMapping::External {
        template_url: "/app/cmp.html".to_string(),
        component: crate::ngtsc::diagnostics::DiagnosticNode::new(
            "/app/cmp.ts",
            ts::TextSpan::default(),
        ),
    };
    let checker = ExtendedTemplateChecker::new(all_checks(), severities);
    checker.get_diagnostics_for_component(&component, &mapping, &parsed.nodes)
}

#[test]
fn flags_invalid_banana_in_box() {
    let diags = check(r#"<input ([value])="name">"#);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ng_error_code(ErrorCode::InvalidBananaInBox));
    assert_eq!(diags[0].category, DiagnosticCategory::Warning);
    let message = diags[0].message_text.to_string();
    assert!(message.contains("[(value)]"), "got: {}", message);
    assert_eq!(diags[0].file.as_deref(), Some("/app/cmp.html"));
}

#[test]
fn correct_two_way_binding_is_clean() {
    assert!(check(r#"<input [(value)]="name">"#).is_empty());
}

#[test]
fn flags_text_attribute_that_should_be_binding() {
    let diags = check(r#"<div attr.role="button"></div>"#);
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].code,
        ng_error_code(ErrorCode::TextAttributeNotBinding)
    );
    let message = diags[0].message_text.to_string();
    assert!(message.contains("[attr.role]"), "got: {}", message);
}

#[test]
fn plain_attributes_are_clean() {
    assert!(check(r#"<div role="button" class="big"></div>"#).is_empty());
}

#[test]
fn severity_is_configurable_per_check_name() {
    let mut severities = HashMap::new();
    severities.insert(
        "invalidBananaInBox".to_string(),
        DiagnosticCategory::Error,
    );
    let diags = check_with_severities(r#"<input ([value])="name">"#, severities);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].category, DiagnosticCategory::Error);
}

#[test]
fn nested_and_structural_nodes_are_visited_once() {
    // The banana sits on an element wrapped by structural shorthand; the
    // traversal must not double-report it through the inline template.
    let diags = check(r#"<div *ngIf="shown"><input ([value])="name"></div>"#);
    assert_eq!(diags.len(), 1);
}

#[test]
fn ng_template_bindings_are_visited() {
    let diags = check(r#"<ng-template attr.role="note"></ng-template>"#);
    assert_eq!(diags.len(), 1);
}
