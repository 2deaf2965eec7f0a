//! Flags text attributes such as `attr.id="x"`, `class.active="true"` or
//! `style.width="100px"` which were almost certainly meant to be bindings
//! written with square brackets.

use super::super::api::{CheckNode, TemplateCheckWithVisitor, TemplateContext};
use crate::ngtsc::diagnostics::{ErrorCode, ExtendedTemplateDiagnosticName};
use ts::{Declaration, Diagnostic};

#[derive(Debug, Default)]
pub struct TextAttributeNotBindingCheck;

impl TemplateCheckWithVisitor for TextAttributeNotBindingCheck {
    fn code(&self) -> ErrorCode {
        ErrorCode::TextAttributeNotBinding
    }

    fn name(&self) -> ExtendedTemplateDiagnosticName {
        ExtendedTemplateDiagnosticName::TextAttributeNotBinding
    }

    fn visit_node(
        &self,
        ctx: &TemplateContext<'_>,
        _component: &Declaration,
        node: CheckNode<'_>,
    ) -> Vec<Diagnostic> {
        let CheckNode::TextAttribute(attribute) = node else {
            return Vec::new();
        };
        let name = attribute.name.as_str();
        if !(name.starts_with("attr.") || name.starts_with("class.") || name.starts_with("style."))
        {
            return Vec::new();
        }
        vec![ctx.make_template_diagnostic(
            self.name(),
            &attribute.source_span,
            format!(
                "Attribute, style, and class bindings should be enclosed with square braces, \
                 e.g. '[{}]=\"{}\"'.",
                name, attribute.value
            ),
        )]
    }
}
