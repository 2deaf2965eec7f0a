//! Expression Parser
//!
//! Recursive-descent parser for Angular template expressions. Bindings
//! disallow chains and assignments; actions (event handlers) allow both.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::parse_util::{ParseError, ParseLocation, ParseSourceFile, ParseSourceSpan};

static INTERPOLATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([\s\S]*?)\}\}").unwrap());

pub struct Parser;

impl Parser {
    pub fn parse_binding(input: &str, location: &str, absolute_offset: usize) -> ASTWithSource {
        let mut parse = ParseAst::new(input, location, absolute_offset, false);
        let ast = parse.parse_chain();
        ASTWithSource::new(
            ast,
            Some(input.to_string()),
            location,
            absolute_offset,
            parse.errors,
        )
    }

    pub fn parse_action(input: &str, location: &str, absolute_offset: usize) -> ASTWithSource {
        let mut parse = ParseAst::new(input, location, absolute_offset, true);
        let ast = parse.parse_chain();
        ASTWithSource::new(
            ast,
            Some(input.to_string()),
            location,
            absolute_offset,
            parse.errors,
        )
    }

    /// Splits `{{ expr }}` interpolations out of `input` and parses each
    /// expression. Returns `None` when the text contains no interpolation.
    pub fn parse_interpolation(
        input: &str,
        location: &str,
        absolute_offset: usize,
    ) -> Option<ASTWithSource> {
        let mut strings = Vec::new();
        let mut expressions = Vec::new();
        let mut errors = Vec::new();
        let mut last_end = 0;

        for capture in INTERPOLATION.captures_iter(input) {
            let whole = capture.get(0).unwrap();
            let inner = capture.get(1).unwrap();
            strings.push(input[last_end..whole.start()].to_string());
            let expr_offset = absolute_offset + inner.start();
            let mut parse = ParseAst::new(inner.as_str(), location, expr_offset, false);
            let ast = parse.parse_chain();
            errors.extend(parse.errors);
            expressions.push(ast);
            last_end = whole.end();
        }
        if expressions.is_empty() {
            return None;
        }
        strings.push(input[last_end..].to_string());

        let span = ParseSpan::new(0, input.chars().count());
        let interpolation = AST::Interpolation(Interpolation {
            span,
            source_span: span.to_absolute(absolute_offset),
            strings,
            expressions,
        });
        Some(ASTWithSource::new(
            interpolation,
            Some(input.to_string()),
            location,
            absolute_offset,
            errors,
        ))
    }
}

struct ParseAst {
    tokens: Vec<Token>,
    index: usize,
    input_length: usize,
    location: String,
    absolute_offset: usize,
    allow_assignment: bool,
    errors: Vec<ParseError>,
}

impl ParseAst {
    fn new(input: &str, location: &str, absolute_offset: usize, allow_assignment: bool) -> Self {
        ParseAst {
            tokens: Lexer::tokenize(input),
            index: 0,
            input_length: input.chars().count(),
            location: location.to_string(),
            absolute_offset,
            allow_assignment,
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next(&self) -> Token {
        self.tokens
            .get(self.index)
            .cloned()
            .unwrap_or_else(|| Token {
                index: self.input_length,
                end: self.input_length,
                kind: TokenKind::Character,
                num_value: 0.0,
                str_value: String::new(),
            })
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn input_index(&self) -> usize {
        self.peek().map(|t| t.index).unwrap_or(self.input_length)
    }

    fn consume_optional_character(&mut self, c: char) -> bool {
        if self.next().is_character(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.next().is_operator(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_character(&mut self, c: char) {
        if !self.consume_optional_character(c) {
            self.error(format!("Missing expected {}", c));
        }
    }

    fn error(&mut self, message: String) {
        let at = self.input_index();
        let file = ParseSourceFile::new("", self.location.clone());
        let span = ParseSourceSpan::new(
            ParseLocation::new(std::rc::Rc::clone(&file), at, 0, at),
            ParseLocation::new(file, at, 0, at),
        );
        self.errors.push(ParseError::new(
            span,
            format!("Parser Error: {} at column {} in [{}]", message, at, self.location),
        ));
    }

    fn span(&self, start: usize) -> ParseSpan {
        let end = self
            .tokens
            .get(self.index.saturating_sub(1))
            .map(|t| t.end)
            .unwrap_or(self.input_length);
        ParseSpan::new(start, end)
    }

    fn abs(&self, span: ParseSpan) -> AbsoluteSourceSpan {
        span.to_absolute(self.absolute_offset)
    }

    fn parse_chain(&mut self) -> AST {
        let start = self.input_index();
        let mut exprs = Vec::new();
        while self.index < self.tokens.len() {
            exprs.push(self.parse_pipe());
            if self.consume_optional_character(';') {
                if !self.allow_assignment {
                    self.error("Binding expression cannot contain chained expression".to_string());
                }
                while self.consume_optional_character(';') {}
            } else if self.index < self.tokens.len() {
                let unconsumed = self.next();
                self.error(format!("Unexpected token '{}'", unconsumed));
                break;
            }
        }
        match exprs.len() {
            0 => {
                let span = ParseSpan::new(start, start);
                AST::EmptyExpr(EmptyExpr {
                    span,
                    source_span: self.abs(span),
                })
            }
            1 => exprs.into_iter().next().unwrap(),
            _ => {
                let span = self.span(start);
                AST::Chain(Chain {
                    span,
                    source_span: self.abs(span),
                    expressions: exprs,
                })
            }
        }
    }

    fn parse_pipe(&mut self) -> AST {
        let start = self.input_index();
        let mut result = self.parse_expression();
        while self.consume_optional_operator("|") {
            let name_token = self.next();
            let name_start = name_token.index;
            let name = if name_token.is_identifier() {
                self.advance();
                name_token.str_value.clone()
            } else {
                self.error("Expected identifier for pipe name".to_string());
                String::new()
            };
            let name_span = AbsoluteSourceSpan::new(
                self.absolute_offset + name_start,
                self.absolute_offset + name_start + name.chars().count(),
            );
            let mut args = Vec::new();
            while self.consume_optional_character(':') {
                args.push(self.parse_expression());
            }
            let span = self.span(start);
            result = AST::BindingPipe(BindingPipe {
                span,
                source_span: self.abs(span),
                name_span,
                exp: Box::new(result),
                name,
                args,
            });
        }
        result
    }

    fn parse_expression(&mut self) -> AST {
        self.parse_conditional()
    }

    fn parse_conditional(&mut self) -> AST {
        let start = self.input_index();
        let condition = self.parse_logical_or();
        if self.consume_optional_operator("?") {
            let true_exp = self.parse_pipe();
            self.expect_character(':');
            let false_exp = self.parse_pipe();
            let span = self.span(start);
            AST::Conditional(Conditional {
                span,
                source_span: self.abs(span),
                condition: Box::new(condition),
                true_exp: Box::new(true_exp),
                false_exp: Box::new(false_exp),
            })
        } else {
            condition
        }
    }

    fn parse_logical_or(&mut self) -> AST {
        let start = self.input_index();
        let mut left = self.parse_logical_and();
        while self.consume_optional_operator("||") || self.consume_optional_operator("??") {
            // `??` and `||` share precedence here; mixing requires parens
            // in the host language but the template parser is permissive.
            let op = self.tokens[self.index - 1].str_value.clone();
            let right = self.parse_logical_and();
            let span = self.span(start);
            left = AST::Binary(Binary {
                span,
                source_span: self.abs(span),
                operation: op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        left
    }

    fn parse_logical_and(&mut self) -> AST {
        self.parse_binary(0)
    }

    const BINARY_LEVELS: &'static [&'static [&'static str]] = &[
        &["&&"],
        &["==", "!=", "===", "!=="],
        &["<", ">", "<=", ">="],
        &["+", "-"],
        &["*", "/", "%"],
    ];

    fn parse_binary(&mut self, level: usize) -> AST {
        if level >= Self::BINARY_LEVELS.len() {
            return self.parse_prefix();
        }
        let start = self.input_index();
        let mut left = self.parse_binary(level + 1);
        loop {
            let op = Self::BINARY_LEVELS[level]
                .iter()
                .find(|op| self.next().is_operator(op))
                .copied();
            let Some(op) = op else { break };
            self.advance();
            let right = self.parse_binary(level + 1);
            let span = self.span(start);
            left = AST::Binary(Binary {
                span,
                source_span: self.abs(span),
                operation: op.to_string(),
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        left
    }

    fn parse_prefix(&mut self) -> AST {
        let start = self.input_index();
        if self.consume_optional_operator("!") {
            let expression = self.parse_prefix();
            let span = self.span(start);
            return AST::PrefixNot(PrefixNot {
                span,
                source_span: self.abs(span),
                expression: Box::new(expression),
            });
        }
        for op in ["-", "+"] {
            if self.consume_optional_operator(op) {
                let expr = self.parse_prefix();
                let span = self.span(start);
                return AST::Unary(Unary {
                    span,
                    source_span: self.abs(span),
                    operator: op.to_string(),
                    expr: Box::new(expr),
                });
            }
        }
        self.parse_call_chain()
    }

    fn parse_call_chain(&mut self) -> AST {
        let start = self.input_index();
        let mut result = self.parse_primary();
        loop {
            if self.consume_optional_character('.') {
                result = self.parse_access_member(result, start, false);
            } else if self.consume_optional_operator("?.") {
                if self.consume_optional_character('(') {
                    result = self.finish_call(result, start, true);
                } else {
                    result = self.parse_access_member(result, start, true);
                }
            } else if self.consume_optional_character('[') {
                let key = self.parse_pipe();
                self.expect_character(']');
                let span = self.span(start);
                result = AST::KeyedRead(KeyedRead {
                    span,
                    source_span: self.abs(span),
                    receiver: Box::new(result),
                    key: Box::new(key),
                });
            } else if self.consume_optional_character('(') {
                result = self.finish_call(result, start, false);
            } else if self.consume_optional_operator("!") {
                let span = self.span(start);
                result = AST::NonNullAssert(NonNullAssert {
                    span,
                    source_span: self.abs(span),
                    expression: Box::new(result),
                });
            } else {
                return result;
            }
        }
    }

    fn finish_call(&mut self, receiver: AST, start: usize, safe: bool) -> AST {
        let args_start = self.input_index();
        let mut args = Vec::new();
        if !self.next().is_character(')') {
            loop {
                args.push(self.parse_pipe());
                if !self.consume_optional_character(',') {
                    break;
                }
            }
        }
        let args_end = self.input_index();
        self.expect_character(')');
        let span = self.span(start);
        let argument_span = AbsoluteSourceSpan::new(
            self.absolute_offset + args_start,
            self.absolute_offset + args_end,
        );
        if safe {
            AST::SafeCall(SafeCall {
                span,
                source_span: self.abs(span),
                receiver: Box::new(receiver),
                args,
                argument_span,
            })
        } else {
            AST::Call(Call {
                span,
                source_span: self.abs(span),
                receiver: Box::new(receiver),
                args,
                argument_span,
            })
        }
    }

    fn parse_access_member(&mut self, receiver: AST, start: usize, safe: bool) -> AST {
        let token = self.next();
        let name = if token.is_identifier() {
            self.advance();
            token.str_value.clone()
        } else {
            self.error("Expected identifier for property access".to_string());
            String::new()
        };
        let name_span = AbsoluteSourceSpan::new(
            self.absolute_offset + token.index,
            self.absolute_offset + token.index + name.chars().count(),
        );

        if !safe && self.allow_assignment && self.next().is_operator("=") {
            self.advance();
            let value = self.parse_conditional();
            let span = self.span(start);
            return AST::PropertyWrite(PropertyWrite {
                span,
                source_span: self.abs(span),
                name_span,
                receiver: Box::new(receiver),
                name,
                value: Box::new(value),
            });
        }

        let span = self.span(start);
        if safe {
            AST::SafePropertyRead(SafePropertyRead {
                span,
                source_span: self.abs(span),
                name_span,
                receiver: Box::new(receiver),
                name,
            })
        } else {
            AST::PropertyRead(PropertyRead {
                span,
                source_span: self.abs(span),
                name_span,
                receiver: Box::new(receiver),
                name,
            })
        }
    }

    fn parse_primary(&mut self) -> AST {
        let start = self.input_index();
        let token = self.next();

        if self.consume_optional_character('(') {
            let result = self.parse_pipe();
            self.expect_character(')');
            return result;
        }

        match token.kind {
            TokenKind::Keyword => {
                self.advance();
                let span = self.span(start);
                let source_span = self.abs(span);
                match token.str_value.as_str() {
                    "this" => AST::ThisReceiver(ThisReceiver { span, source_span }),
                    "true" => AST::LiteralPrimitive(LiteralPrimitive {
                        span,
                        source_span,
                        value: LiteralValue::Bool(true),
                    }),
                    "false" => AST::LiteralPrimitive(LiteralPrimitive {
                        span,
                        source_span,
                        value: LiteralValue::Bool(false),
                    }),
                    "null" => AST::LiteralPrimitive(LiteralPrimitive {
                        span,
                        source_span,
                        value: LiteralValue::Null,
                    }),
                    _ => AST::LiteralPrimitive(LiteralPrimitive {
                        span,
                        source_span,
                        value: LiteralValue::Undefined,
                    }),
                }
            }
            TokenKind::Identifier => {
                // Unqualified reads receive the implicit receiver.
                let span = ParseSpan::new(start, start);
                let receiver = AST::ImplicitReceiver(ImplicitReceiver {
                    span,
                    source_span: self.abs(span),
                });
                self.parse_access_member_with_receiver(receiver, start)
            }
            TokenKind::Number => {
                self.advance();
                let span = self.span(start);
                AST::LiteralPrimitive(LiteralPrimitive {
                    span,
                    source_span: self.abs(span),
                    value: LiteralValue::Num(token.num_value),
                })
            }
            TokenKind::String => {
                self.advance();
                let span = self.span(start);
                AST::LiteralPrimitive(LiteralPrimitive {
                    span,
                    source_span: self.abs(span),
                    value: LiteralValue::Str(token.str_value.clone()),
                })
            }
            TokenKind::Character if token.is_character('[') => {
                self.advance();
                let mut expressions = Vec::new();
                if !self.next().is_character(']') {
                    loop {
                        expressions.push(self.parse_pipe());
                        if !self.consume_optional_character(',') {
                            break;
                        }
                    }
                }
                self.expect_character(']');
                let span = self.span(start);
                AST::LiteralArray(LiteralArray {
                    span,
                    source_span: self.abs(span),
                    expressions,
                })
            }
            TokenKind::Error => {
                self.error(token.str_value.clone());
                self.advance();
                let span = self.span(start);
                AST::EmptyExpr(EmptyExpr {
                    span,
                    source_span: self.abs(span),
                })
            }
            _ => {
                if self.index >= self.tokens.len() {
                    self.error("Unexpected end of expression".to_string());
                } else {
                    self.error(format!("Unexpected token {}", token));
                    self.advance();
                }
                let span = self.span(start);
                AST::EmptyExpr(EmptyExpr {
                    span,
                    source_span: self.abs(span),
                })
            }
        }
    }

    fn parse_access_member_with_receiver(&mut self, receiver: AST, start: usize) -> AST {
        self.parse_access_member(receiver, start, false)
    }
}
