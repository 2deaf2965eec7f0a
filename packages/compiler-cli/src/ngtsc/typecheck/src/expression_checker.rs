//! Checks template expressions against the component's declared type.
//!
//! This is the analysis the synthetic fragment exists to represent: every
//! diagnostic produced here is positioned by template span, then routed
//! through the fragment's span table so it surfaces exactly like a
//! host-language diagnostic on the generated code would.

use std::collections::HashSet;

use angular_compiler::expression_parser::ast::{AbsoluteSourceSpan, AST};
use angular_compiler::render3::r3_ast::{AttributeNode, R3Node};

use super::super::api::api::TypeCheckingConfig;
use ts::{Declaration, Type, TypeChecker};

/// Diagnostic code used for missing members, mirroring the host language's
/// own "property does not exist" error. Positive: host namespace.
pub const PROPERTY_DOES_NOT_EXIST: i32 = 2339;

#[derive(Debug, Clone, PartialEq)]
pub struct TcbTypeError {
    pub template_span: AbsoluteSourceSpan,
    pub code: i32,
    pub message: String,
}

pub struct ExpressionChecker<'a> {
    component: &'a Declaration,
    checker: &'a TypeChecker,
    config: &'a TypeCheckingConfig,
}

impl<'a> ExpressionChecker<'a> {
    pub fn new(
        component: &'a Declaration,
        checker: &'a TypeChecker,
        config: &'a TypeCheckingConfig,
    ) -> Self {
        ExpressionChecker {
            component,
            checker,
            config,
        }
    }

    pub fn check_template(&self, nodes: &[R3Node]) -> Vec<TcbTypeError> {
        let mut errors = Vec::new();
        let mut scope = HashSet::new();
        scope.insert("$event".to_string());
        self.check_nodes(nodes, &scope, &mut errors);
        errors
    }

    fn check_nodes(
        &self,
        nodes: &[R3Node],
        scope: &HashSet<String>,
        errors: &mut Vec<TcbTypeError>,
    ) {
        for node in nodes {
            match node {
                R3Node::Text(_) => {}
                R3Node::BoundText(text) => {
                    self.check_expr(&text.value.ast, scope, errors);
                }
                R3Node::Element(element) => {
                    if self.config.check_type_of_input_bindings {
                        for input in &element.inputs {
                            self.check_expr(&input.value.ast, scope, errors);
                        }
                    }
                    for output in &element.outputs {
                        self.check_expr(&output.handler.ast, scope, errors);
                    }
                    let mut child_scope = scope.clone();
                    for reference in &element.references {
                        child_scope.insert(reference.name.clone());
                    }
                    self.check_nodes(&element.children, &child_scope, errors);
                }
                R3Node::Template(template) => {
                    for attr in &template.template_attrs {
                        if let AttributeNode::Bound(bound) = attr {
                            self.check_expr(&bound.value.ast, scope, errors);
                        }
                    }
                    if self.config.check_type_of_input_bindings {
                        for input in &template.inputs {
                            self.check_expr(&input.value.ast, scope, errors);
                        }
                    }
                    for output in &template.outputs {
                        self.check_expr(&output.handler.ast, scope, errors);
                    }
                    if self.config.check_template_bodies {
                        let mut child_scope = scope.clone();
                        for variable in &template.variables {
                            child_scope.insert(variable.name.clone());
                        }
                        for reference in &template.references {
                            child_scope.insert(reference.name.clone());
                        }
                        self.check_nodes(&template.children, &child_scope, errors);
                    }
                }
            }
        }
    }

    fn check_expr(
        &self,
        ast: &AST,
        scope: &HashSet<String>,
        errors: &mut Vec<TcbTypeError>,
    ) -> Type {
        use angular_compiler::expression_parser::ast::LiteralValue;
        match ast {
            AST::EmptyExpr(_) => Type::Any,
            AST::ImplicitReceiver(_) | AST::ThisReceiver(_) => Type::Reference {
                name: self
                    .component
                    .name
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
                args: Vec::new(),
            },
            AST::LiteralPrimitive(lit) => match &lit.value {
                LiteralValue::Null => Type::Null,
                LiteralValue::Undefined => Type::Undefined,
                LiteralValue::Bool(_) => Type::Boolean,
                LiteralValue::Num(_) => Type::Number,
                LiteralValue::Str(_) => Type::String,
            },
            AST::PropertyRead(read) => self.check_member_access(
                &read.receiver,
                &read.name,
                read.name_span,
                scope,
                errors,
            ),
            AST::SafePropertyRead(read) => self.check_member_access(
                &read.receiver,
                &read.name,
                read.name_span,
                scope,
                errors,
            ),
            AST::PropertyWrite(write) => {
                self.check_member_access(&write.receiver, &write.name, write.name_span, scope, errors);
                self.check_expr(&write.value, scope, errors)
            }
            AST::KeyedRead(read) => {
                self.check_expr(&read.receiver, scope, errors);
                self.check_expr(&read.key, scope, errors);
                Type::Any
            }
            AST::Call(call) => {
                let receiver_type = self.check_expr(&call.receiver, scope, errors);
                for arg in &call.args {
                    self.check_expr(arg, scope, errors);
                }
                receiver_type
            }
            AST::SafeCall(call) => {
                let receiver_type = self.check_expr(&call.receiver, scope, errors);
                for arg in &call.args {
                    self.check_expr(arg, scope, errors);
                }
                receiver_type
            }
            AST::Binary(binary) => {
                let left = self.check_expr(&binary.left, scope, errors);
                let right = self.check_expr(&binary.right, scope, errors);
                match binary.operation.as_str() {
                    "+" => {
                        if left == Type::String || right == Type::String {
                            Type::String
                        } else if left == Type::Number && right == Type::Number {
                            Type::Number
                        } else {
                            Type::Any
                        }
                    }
                    "-" | "*" | "/" | "%" => Type::Number,
                    "==" | "!=" | "===" | "!==" | "<" | ">" | "<=" | ">=" => Type::Boolean,
                    _ => Type::Any,
                }
            }
            AST::Conditional(cond) => {
                self.check_expr(&cond.condition, scope, errors);
                let t = self.check_expr(&cond.true_exp, scope, errors);
                let f = self.check_expr(&cond.false_exp, scope, errors);
                if t == f {
                    t
                } else {
                    Type::Any
                }
            }
            AST::PrefixNot(not) => {
                self.check_expr(&not.expression, scope, errors);
                Type::Boolean
            }
            AST::Unary(unary) => {
                self.check_expr(&unary.expr, scope, errors);
                Type::Number
            }
            AST::NonNullAssert(assert) => self.check_expr(&assert.expression, scope, errors),
            AST::LiteralArray(array) => {
                for expr in &array.expressions {
                    self.check_expr(expr, scope, errors);
                }
                Type::Any
            }
            AST::Interpolation(interp) => {
                for expr in &interp.expressions {
                    self.check_expr(expr, scope, errors);
                }
                Type::String
            }
            AST::Chain(chain) => {
                let mut last = Type::Any;
                for expr in &chain.expressions {
                    last = self.check_expr(expr, scope, errors);
                }
                last
            }
            AST::BindingPipe(pipe) => {
                self.check_expr(&pipe.exp, scope, errors);
                for arg in &pipe.args {
                    self.check_expr(arg, scope, errors);
                }
                Type::Any
            }
        }
    }

    fn check_member_access(
        &self,
        receiver: &AST,
        name: &str,
        name_span: AbsoluteSourceSpan,
        scope: &HashSet<String>,
        errors: &mut Vec<TcbTypeError>,
    ) -> Type {
        if receiver.is_implicit_receiver() && scope.contains(name) {
            return Type::Any;
        }
        let receiver_type = self.check_expr(receiver, scope, errors);
        match receiver_type {
            Type::Reference { name: type_name, .. } => {
                let decl = if Some(type_name.as_str())
                    == self.component.name.as_deref()
                {
                    Some(self.component.clone())
                } else {
                    self.checker
                        .find_declaration(&type_name)
                        .map(|rc| (*rc).clone())
                };
                let Some(decl) = decl else {
                    return Type::Any;
                };
                match decl.member(name) {
                    // For methods the stored type node is the return type,
                    // which is what a call of the member propagates.
                    Some(member) => member
                        .type_node
                        .as_ref()
                        .map(Type::from_type_node)
                        .unwrap_or(Type::Any),
                    None => {
                        errors.push(TcbTypeError {
                            template_span: name_span,
                            code: PROPERTY_DOES_NOT_EXIST,
                            message: format!(
                                "Property '{}' does not exist on type '{}'.",
                                name, type_name
                            ),
                        });
                        Type::Any
                    }
                }
            }
            _ => Type::Any,
        }
    }
}
