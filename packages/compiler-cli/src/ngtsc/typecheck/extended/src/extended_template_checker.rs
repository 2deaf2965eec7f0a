//! Runs the registered extended template checks over a component's
//! template.

use std::collections::HashMap;

use super::super::api::{TemplateCheck, TemplateContext};
use crate::ngtsc::typecheck::api::api::TemplateSourceMapping;
use angular_compiler::render3::r3_ast::R3Node;
use ts::{Declaration, Diagnostic, DiagnosticCategory};

pub struct ExtendedTemplateChecker {
    checks: Vec<Box<dyn TemplateCheck>>,
    /// Per-check severity, keyed by the check's stable name. Checks not
    /// present here report at their default severity.
    severities: HashMap<String, DiagnosticCategory>,
}

impl ExtendedTemplateChecker {
    pub fn new(
        checks: Vec<Box<dyn TemplateCheck>>,
        severities: HashMap<String, DiagnosticCategory>,
    ) -> Self {
        ExtendedTemplateChecker { checks, severities }
    }

    pub fn get_diagnostics_for_component(
        &self,
        component: &Declaration,
        mapping: &TemplateSourceMapping,
        template: &[R3Node],
    ) -> Vec<Diagnostic> {
        let ctx = TemplateContext::new(component, mapping, &self.severities);
        let mut diagnostics = Vec::new();
        for check in &self.checks {
            diagnostics.extend(check.run(&ctx, component, template));
        }
        diagnostics
    }
}

/// The default set of extended checks.
pub fn all_checks() -> Vec<Box<dyn TemplateCheck>> {
    vec![
        Box::new(super::super::checks::invalid_banana_in_box::InvalidBananaInBoxCheck),
        Box::new(
            super::super::checks::text_attribute_not_binding::TextAttributeNotBindingCheck,
        ),
    ]
}
