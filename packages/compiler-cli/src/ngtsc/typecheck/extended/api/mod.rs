//! Extended template check API.
//!
//! A check is a named, coded rule over template and expression nodes. The
//! shared visitor walks every node exactly once and asks each check's
//! `visit_node` for diagnostics, so a new check costs one method, not a
//! new traversal.

use std::collections::HashMap;

use angular_compiler::expression_parser::ast::AST;
use angular_compiler::render3::r3_ast::{
    AttributeNode, BoundAttribute, BoundEvent, BoundText, Element, R3Node, Reference, Template,
    Text, TextAttribute, Variable,
};

use crate::ngtsc::diagnostics::{ExtendedTemplateDiagnosticName, ErrorCode};
use crate::ngtsc::typecheck::api::api::TemplateSourceMapping;
use crate::ngtsc::typecheck::src::diagnostics::{make_template_diagnostic, to_absolute_span};
use angular_compiler::parse_util::ParseSourceSpan;
use ts::{Declaration, Diagnostic, DiagnosticCategory};

/// Context handed to checks; diagnostic construction goes through
/// `make_template_diagnostic` so severity configuration is looked up
/// uniformly by the check's registered name.
pub struct TemplateContext<'a> {
    pub component: &'a Declaration,
    pub mapping: &'a TemplateSourceMapping,
    severities: &'a HashMap<String, DiagnosticCategory>,
}

impl<'a> TemplateContext<'a> {
    pub fn new(
        component: &'a Declaration,
        mapping: &'a TemplateSourceMapping,
        severities: &'a HashMap<String, DiagnosticCategory>,
    ) -> Self {
        TemplateContext {
            component,
            mapping,
            severities,
        }
    }

    pub fn make_template_diagnostic(
        &self,
        name: ExtendedTemplateDiagnosticName,
        span: &ParseSourceSpan,
        message: impl Into<String>,
    ) -> Diagnostic {
        let category = self
            .severities
            .get(name.as_str())
            .copied()
            .unwrap_or(DiagnosticCategory::Warning);
        make_template_diagnostic(
            self.mapping,
            to_absolute_span(span),
            category,
            name.error_code(),
            message,
            None,
        )
    }
}

/// A node handed to `visit_node`.
#[derive(Debug, Clone, Copy)]
pub enum CheckNode<'a> {
    Element(&'a Element),
    Template(&'a Template),
    Text(&'a Text),
    BoundText(&'a BoundText),
    TextAttribute(&'a TextAttribute),
    BoundAttribute(&'a BoundAttribute),
    BoundEvent(&'a BoundEvent),
    Reference(&'a Reference),
    Variable(&'a Variable),
    Expression(&'a AST),
}

/// A named, coded template-level static check.
pub trait TemplateCheck {
    fn code(&self) -> ErrorCode;
    fn name(&self) -> ExtendedTemplateDiagnosticName;
    fn run(
        &self,
        ctx: &TemplateContext<'_>,
        component: &Declaration,
        template: &[R3Node],
    ) -> Vec<Diagnostic>;
}

/// Checks implemented against the shared recursive traversal. The blanket
/// `TemplateCheck` impl supplies `run`.
pub trait TemplateCheckWithVisitor {
    fn code(&self) -> ErrorCode;
    fn name(&self) -> ExtendedTemplateDiagnosticName;
    fn visit_node(
        &self,
        ctx: &TemplateContext<'_>,
        component: &Declaration,
        node: CheckNode<'_>,
    ) -> Vec<Diagnostic>;
}

impl<T: TemplateCheckWithVisitor> TemplateCheck for T {
    fn code(&self) -> ErrorCode {
        TemplateCheckWithVisitor::code(self)
    }

    fn name(&self) -> ExtendedTemplateDiagnosticName {
        TemplateCheckWithVisitor::name(self)
    }

    fn run(
        &self,
        ctx: &TemplateContext<'_>,
        component: &Declaration,
        template: &[R3Node],
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        visit_nodes(self, ctx, component, template, &mut diagnostics);
        diagnostics
    }
}

fn visit_nodes<T: TemplateCheckWithVisitor + ?Sized>(
    check: &T,
    ctx: &TemplateContext<'_>,
    component: &Declaration,
    nodes: &[R3Node],
    out: &mut Vec<Diagnostic>,
) {
    for node in nodes {
        match node {
            R3Node::Text(text) => {
                out.extend(check.visit_node(ctx, component, CheckNode::Text(text)));
            }
            R3Node::BoundText(text) => {
                out.extend(check.visit_node(ctx, component, CheckNode::BoundText(text)));
                visit_expression(check, ctx, component, &text.value.ast, out);
            }
            R3Node::Element(element) => {
                out.extend(check.visit_node(ctx, component, CheckNode::Element(element)));
                visit_bindings(
                    check,
                    ctx,
                    component,
                    &element.attributes,
                    &element.inputs,
                    &element.outputs,
                    out,
                );
                for reference in &element.references {
                    out.extend(check.visit_node(ctx, component, CheckNode::Reference(reference)));
                }
                visit_nodes(check, ctx, component, &element.children, out);
            }
            R3Node::Template(template) => {
                out.extend(check.visit_node(ctx, component, CheckNode::Template(template)));
                // For a real <ng-template>, its own bindings are visited
                // here. Structural-shorthand templates skip them: the same
                // nodes are visited with the host element below.
                if !template.is_inline {
                    visit_bindings(
                        check,
                        ctx,
                        component,
                        &template.attributes,
                        &template.inputs,
                        &template.outputs,
                        out,
                    );
                    for attr in &template.template_attrs {
                        match attr {
                            AttributeNode::Text(text) => {
                                out.extend(check.visit_node(
                                    ctx,
                                    component,
                                    CheckNode::TextAttribute(text),
                                ));
                            }
                            AttributeNode::Bound(bound) => {
                                out.extend(check.visit_node(
                                    ctx,
                                    component,
                                    CheckNode::BoundAttribute(bound),
                                ));
                                visit_expression(check, ctx, component, &bound.value.ast, out);
                            }
                        }
                    }
                }
                for variable in &template.variables {
                    out.extend(check.visit_node(ctx, component, CheckNode::Variable(variable)));
                }
                for reference in &template.references {
                    out.extend(check.visit_node(ctx, component, CheckNode::Reference(reference)));
                }
                visit_nodes(check, ctx, component, &template.children, out);
            }
        }
    }
}

fn visit_bindings<T: TemplateCheckWithVisitor + ?Sized>(
    check: &T,
    ctx: &TemplateContext<'_>,
    component: &Declaration,
    attributes: &[TextAttribute],
    inputs: &[BoundAttribute],
    outputs: &[BoundEvent],
    out: &mut Vec<Diagnostic>,
) {
    for attribute in attributes {
        out.extend(check.visit_node(ctx, component, CheckNode::TextAttribute(attribute)));
    }
    for input in inputs {
        out.extend(check.visit_node(ctx, component, CheckNode::BoundAttribute(input)));
        visit_expression(check, ctx, component, &input.value.ast, out);
    }
    for output in outputs {
        out.extend(check.visit_node(ctx, component, CheckNode::BoundEvent(output)));
        visit_expression(check, ctx, component, &output.handler.ast, out);
    }
}

fn visit_expression<T: TemplateCheckWithVisitor + ?Sized>(
    check: &T,
    ctx: &TemplateContext<'_>,
    component: &Declaration,
    ast: &AST,
    out: &mut Vec<Diagnostic>,
) {
    out.extend(check.visit_node(ctx, component, CheckNode::Expression(ast)));
    for child in ast.children() {
        visit_expression(check, ctx, component, child, out);
    }
}
