//! Ensures the two-way binding syntax is correct: `([foo])` is parsed as
//! an event binding named `[foo]`, almost certainly a typo for `[(foo)]`.

use super::super::api::{CheckNode, TemplateCheckWithVisitor, TemplateContext};
use crate::ngtsc::diagnostics::{ErrorCode, ExtendedTemplateDiagnosticName};
use ts::{Declaration, Diagnostic};

#[derive(Debug, Default)]
pub struct InvalidBananaInBoxCheck;

impl TemplateCheckWithVisitor for InvalidBananaInBoxCheck {
    fn code(&self) -> ErrorCode {
        ErrorCode::InvalidBananaInBox
    }

    fn name(&self) -> ExtendedTemplateDiagnosticName {
        ExtendedTemplateDiagnosticName::InvalidBananaInBox
    }

    fn visit_node(
        &self,
        ctx: &TemplateContext<'_>,
        _component: &Declaration,
        node: CheckNode<'_>,
    ) -> Vec<Diagnostic> {
        let CheckNode::BoundEvent(event) = node else {
            return Vec::new();
        };
        let name = event.name.as_str();
        if !name.starts_with('[') || !name.ends_with(']') {
            return Vec::new();
        }
        let inner = &name[1..name.len() - 1];
        let bound_syntax = event.source_span.text();
        let expected = bound_syntax.replace(&format!("([{}])", inner), &format!("[({})]", inner));
        vec![ctx.make_template_diagnostic(
            self.name(),
            &event.source_span,
            format!(
                "In the two-way binding syntax the parentheses should be inside the brackets, \
                 e.g. '{}'.",
                expected
            ),
        )]
    }
}
