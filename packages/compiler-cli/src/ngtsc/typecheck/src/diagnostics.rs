//! Helpers for producing diagnostics attributed to template source.

use angular_compiler::expression_parser::ast::AbsoluteSourceSpan;
use angular_compiler::parse_util::ParseSourceSpan;

use super::super::api::api::TemplateSourceMapping;
use crate::ngtsc::diagnostics::{ng_error_code, ErrorCode};
use ts::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

/// Create a diagnostic for a template span, attributed through `mapping`
/// to the location the user actually wrote.
pub fn make_template_diagnostic(
    mapping: &TemplateSourceMapping,
    span: AbsoluteSourceSpan,
    category: DiagnosticCategory,
    code: ErrorCode,
    message: impl Into<String>,
    related_information: Option<Vec<DiagnosticRelatedInformation>>,
) -> Diagnostic {
    let (file, start) = mapping.to_source_position(span.start);
    Diagnostic {
        category,
        code: ng_error_code(code),
        file: Some(file),
        start: Some(start),
        length: Some(span.end - span.start),
        message_text: message.into().into(),
        related_information,
    }
}

/// Template-relative span of a parsed source span.
pub fn to_absolute_span(span: &ParseSourceSpan) -> AbsoluteSourceSpan {
    AbsoluteSourceSpan::new(span.start.offset, span.end.offset)
}
