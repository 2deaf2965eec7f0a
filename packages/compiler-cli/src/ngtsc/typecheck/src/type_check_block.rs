//! Type-check block generation.
//!
//! Lowers a component's template into a synthetic code fragment that
//! references the component's declared type, while recording a
//! template-span to generated-span table. The table is the source of truth
//! for mapping diagnostics on the fragment back onto template source.

use std::collections::HashMap;
use std::fmt::Write;
use std::rc::Rc;

use angular_compiler::expression_parser::ast::{AbsoluteSourceSpan, AST};
use angular_compiler::render3::r3_ast::{AttributeNode, R3Node};

use super::super::api::api::{TemplateId, TypeCheckingConfig};
use crate::ngtsc::diagnostics::ErrorCode;
use ts::{Declaration, DeclarationId, TextSpan};

/// One row of the position-mapping table: a span in the generated fragment
/// and the template span it was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanMapEntry {
    pub generated: TextSpan,
    pub template: AbsoluteSourceSpan,
}

/// The generated type-checking fragment for a single component. Offsets in
/// `span_map` are local to `text`; assembling a type-check file shifts
/// them.
#[derive(Debug, Clone)]
pub struct TypeCheckBlock {
    pub component: DeclarationId,
    pub fn_name: String,
    pub text: String,
    pub span_map: Vec<SpanMapEntry>,
    pub template_id: TemplateId,
}

impl TypeCheckBlock {
    /// The generated span recorded for exactly `template_span`, if any.
    pub fn generated_span_for(&self, template_span: &AbsoluteSourceSpan) -> Option<TextSpan> {
        self.span_map
            .iter()
            .find(|entry| &entry.template == template_span)
            .map(|entry| entry.generated)
    }
}

/// Template-level problems discovered during generation which are not type
/// errors of the synthetic fragment itself (e.g. an unknown pipe).
#[derive(Debug, Default)]
pub struct OutOfBandDiagnosticRecorder {
    pub records: Vec<OobRecord>,
}

#[derive(Debug, Clone)]
pub struct OobRecord {
    pub template_id: TemplateId,
    pub span: AbsoluteSourceSpan,
    pub code: ErrorCode,
    pub message: String,
}

impl OutOfBandDiagnosticRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing_pipe(&mut self, template_id: TemplateId, name: &str, span: AbsoluteSourceSpan) {
        self.records.push(OobRecord {
            template_id,
            span,
            code: ErrorCode::MissingPipe,
            message: format!("No pipe found with name '{}'.", name),
        });
    }
}

pub struct TcbGenerator<'a> {
    config: &'a TypeCheckingConfig,
    pipes: &'a HashMap<String, Rc<Declaration>>,
    oob: &'a mut OutOfBandDiagnosticRecorder,
}

impl<'a> TcbGenerator<'a> {
    pub fn new(
        config: &'a TypeCheckingConfig,
        pipes: &'a HashMap<String, Rc<Declaration>>,
        oob: &'a mut OutOfBandDiagnosticRecorder,
    ) -> Self {
        TcbGenerator { config, pipes, oob }
    }

    pub fn generate(
        &mut self,
        component: &Declaration,
        nodes: &[R3Node],
        template_id: TemplateId,
    ) -> TypeCheckBlock {
        let name = component
            .name
            .clone()
            .unwrap_or_else(|| "anonymous".to_string());
        let mut block = TypeCheckBlock {
            component: component.id(),
            fn_name: format!("_tcb_{}", name),
            text: String::new(),
            span_map: Vec::new(),
            template_id,
        };
        let _ = writeln!(block.text, "function _tcb_{}(this: {}) {{", name, name);
        self.emit_nodes(&mut block, nodes);
        block.text.push_str("}\n");
        block
    }

    fn emit_nodes(&mut self, block: &mut TypeCheckBlock, nodes: &[R3Node]) {
        for node in nodes {
            match node {
                R3Node::Text(_) => {}
                R3Node::BoundText(text) => {
                    self.emit_statement(block, &text.value.ast);
                }
                R3Node::Element(element) => {
                    for input in &element.inputs {
                        self.emit_statement(block, &input.value.ast);
                    }
                    for output in &element.outputs {
                        self.emit_handler(block, &output.handler.ast);
                    }
                    self.emit_nodes(block, &element.children);
                }
                R3Node::Template(template) => {
                    for attr in &template.template_attrs {
                        if let AttributeNode::Bound(bound) = attr {
                            self.emit_statement(block, &bound.value.ast);
                        }
                    }
                    for input in &template.inputs {
                        self.emit_statement(block, &input.value.ast);
                    }
                    for output in &template.outputs {
                        self.emit_handler(block, &output.handler.ast);
                    }
                    if self.config.check_template_bodies {
                        self.emit_nodes(block, &template.children);
                    }
                }
            }
        }
    }

    fn emit_statement(&mut self, block: &mut TypeCheckBlock, ast: &AST) {
        block.text.push_str("  \"\" + (");
        self.emit_expression(block, ast);
        block.text.push_str(");\n");
    }

    fn emit_handler(&mut self, block: &mut TypeCheckBlock, ast: &AST) {
        block.text.push_str("  ($event: any) => { (");
        self.emit_expression(block, ast);
        block.text.push_str("); };\n");
    }

    /// Renders `ast` into the block text, recording span-map rows for each
    /// property name and each full sub-expression.
    fn emit_expression(&mut self, block: &mut TypeCheckBlock, ast: &AST) {
        let start = block.text.len();
        match ast {
            AST::EmptyExpr(_) => block.text.push_str("undefined"),
            AST::ImplicitReceiver(_) | AST::ThisReceiver(_) => block.text.push_str("this"),
            AST::LiteralPrimitive(lit) => {
                use angular_compiler::expression_parser::ast::LiteralValue;
                match &lit.value {
                    LiteralValue::Null => block.text.push_str("null"),
                    LiteralValue::Undefined => block.text.push_str("undefined"),
                    LiteralValue::Bool(b) => {
                        let _ = write!(block.text, "{}", b);
                    }
                    LiteralValue::Num(n) => {
                        let _ = write!(block.text, "{}", n);
                    }
                    LiteralValue::Str(s) => {
                        let _ = write!(block.text, "\"{}\"", s.replace('"', "\\\""));
                    }
                }
            }
            AST::PropertyRead(read) => {
                self.emit_expression(block, &read.receiver);
                block.text.push('.');
                self.record_name(block, &read.name, read.name_span);
            }
            AST::SafePropertyRead(read) => {
                self.emit_expression(block, &read.receiver);
                block.text.push_str("?.");
                self.record_name(block, &read.name, read.name_span);
            }
            AST::PropertyWrite(write_node) => {
                block.text.push('(');
                self.emit_expression(block, &write_node.receiver);
                block.text.push('.');
                self.record_name(block, &write_node.name, write_node.name_span);
                block.text.push_str(" = ");
                self.emit_expression(block, &write_node.value);
                block.text.push(')');
            }
            AST::KeyedRead(read) => {
                self.emit_expression(block, &read.receiver);
                block.text.push('[');
                self.emit_expression(block, &read.key);
                block.text.push(']');
            }
            AST::Call(call) => {
                self.emit_expression(block, &call.receiver);
                block.text.push('(');
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        block.text.push_str(", ");
                    }
                    self.emit_expression(block, arg);
                }
                block.text.push(')');
            }
            AST::SafeCall(call) => {
                self.emit_expression(block, &call.receiver);
                block.text.push_str("?.(");
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        block.text.push_str(", ");
                    }
                    self.emit_expression(block, arg);
                }
                block.text.push(')');
            }
            AST::Binary(binary) => {
                block.text.push('(');
                self.emit_expression(block, &binary.left);
                let _ = write!(block.text, " {} ", binary.operation);
                self.emit_expression(block, &binary.right);
                block.text.push(')');
            }
            AST::Conditional(cond) => {
                block.text.push('(');
                self.emit_expression(block, &cond.condition);
                block.text.push_str(" ? ");
                self.emit_expression(block, &cond.true_exp);
                block.text.push_str(" : ");
                self.emit_expression(block, &cond.false_exp);
                block.text.push(')');
            }
            AST::PrefixNot(not) => {
                block.text.push('!');
                self.emit_expression(block, &not.expression);
            }
            AST::Unary(unary) => {
                block.text.push_str(&unary.operator);
                self.emit_expression(block, &unary.expr);
            }
            AST::NonNullAssert(assert) => {
                block.text.push('(');
                self.emit_expression(block, &assert.expression);
                block.text.push_str(")!");
            }
            AST::LiteralArray(array) => {
                block.text.push('[');
                for (i, expr) in array.expressions.iter().enumerate() {
                    if i > 0 {
                        block.text.push_str(", ");
                    }
                    self.emit_expression(block, expr);
                }
                block.text.push(']');
            }
            AST::Interpolation(interp) => {
                block.text.push_str("\"\"");
                for expr in &interp.expressions {
                    block.text.push_str(" + (");
                    self.emit_expression(block, expr);
                    block.text.push(')');
                }
            }
            AST::Chain(chain) => {
                for (i, expr) in chain.expressions.iter().enumerate() {
                    if i > 0 {
                        block.text.push_str(", ");
                    }
                    self.emit_expression(block, expr);
                }
            }
            AST::BindingPipe(pipe) => {
                if !self.pipes.contains_key(&pipe.name) {
                    self.oob
                        .missing_pipe(block.template_id, &pipe.name, pipe.name_span);
                }
                block.text.push('(');
                self.emit_expression(block, &pipe.exp);
                block.text.push(')');
                for arg in &pipe.args {
                    block.text.push_str(", (");
                    self.emit_expression(block, arg);
                    block.text.push(')');
                }
            }
        }
        block.span_map.push(SpanMapEntry {
            generated: TextSpan::new(start, block.text.len() - start),
            template: ast.source_span(),
        });
    }

    fn record_name(&self, block: &mut TypeCheckBlock, name: &str, name_span: AbsoluteSourceSpan) {
        let start = block.text.len();
        block.text.push_str(name);
        block.span_map.push(SpanMapEntry {
            generated: TextSpan::new(start, name.len()),
            template: name_span,
        });
    }
}
