//! Angular Expression AST
//!
//! AST node types for Angular template expressions. Spans come in two
//! flavors: `span` is relative to the start of the parsed expression,
//! `source_span` is absolute within the containing template.

use crate::parse_util::ParseError;

/// Span relative to the start of the expression being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }

    pub fn to_absolute(&self, absolute_offset: usize) -> AbsoluteSourceSpan {
        AbsoluteSourceSpan::new(absolute_offset + self.start, absolute_offset + self.end)
    }
}

/// Absolute character span within the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteSourceSpan {
    pub start: usize,
    pub end: usize,
}

impl AbsoluteSourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        AbsoluteSourceSpan { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AST {
    EmptyExpr(EmptyExpr),
    ImplicitReceiver(ImplicitReceiver),
    ThisReceiver(ThisReceiver),
    Chain(Chain),
    Conditional(Conditional),
    PropertyRead(PropertyRead),
    SafePropertyRead(SafePropertyRead),
    PropertyWrite(PropertyWrite),
    KeyedRead(KeyedRead),
    BindingPipe(BindingPipe),
    LiteralPrimitive(LiteralPrimitive),
    LiteralArray(LiteralArray),
    Interpolation(Interpolation),
    Binary(Binary),
    PrefixNot(PrefixNot),
    Unary(Unary),
    NonNullAssert(NonNullAssert),
    Call(Call),
    SafeCall(SafeCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyExpr {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// The component instance: receiver of unqualified property reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplicitReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Explicit `this`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThisReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// `a; b; c`
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<AST>,
}

/// `cond ? a : b`
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

/// `receiver.name`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

/// `receiver?.name`
#[derive(Debug, Clone, PartialEq)]
pub struct SafePropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

/// `receiver.name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyWrite {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
    pub value: Box<AST>,
}

/// `receiver[key]`
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

/// `expression | pipeName:arg0:arg1`
#[derive(Debug, Clone, PartialEq)]
pub struct BindingPipe {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub exp: Box<AST>,
    pub name: String,
    pub args: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Undefined,
    Bool(bool),
    Num(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralPrimitive {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralArray {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<AST>,
}

/// `{{ a }} text {{ b }}` — alternating strings and expressions; there is
/// always one more string than expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub strings: Vec<String>,
    pub expressions: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

/// `!expr`
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixNot {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

/// `-expr` / `+expr`
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operator: String,
    pub expr: Box<AST>,
}

/// `expr!`
#[derive(Debug, Clone, PartialEq)]
pub struct NonNullAssert {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

/// `receiver(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
    pub argument_span: AbsoluteSourceSpan,
}

/// `receiver?.(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct SafeCall {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
    pub argument_span: AbsoluteSourceSpan,
}

impl AST {
    pub fn span(&self) -> ParseSpan {
        match self {
            AST::EmptyExpr(n) => n.span,
            AST::ImplicitReceiver(n) => n.span,
            AST::ThisReceiver(n) => n.span,
            AST::Chain(n) => n.span,
            AST::Conditional(n) => n.span,
            AST::PropertyRead(n) => n.span,
            AST::SafePropertyRead(n) => n.span,
            AST::PropertyWrite(n) => n.span,
            AST::KeyedRead(n) => n.span,
            AST::BindingPipe(n) => n.span,
            AST::LiteralPrimitive(n) => n.span,
            AST::LiteralArray(n) => n.span,
            AST::Interpolation(n) => n.span,
            AST::Binary(n) => n.span,
            AST::PrefixNot(n) => n.span,
            AST::Unary(n) => n.span,
            AST::NonNullAssert(n) => n.span,
            AST::Call(n) => n.span,
            AST::SafeCall(n) => n.span,
        }
    }

    pub fn source_span(&self) -> AbsoluteSourceSpan {
        match self {
            AST::EmptyExpr(n) => n.source_span,
            AST::ImplicitReceiver(n) => n.source_span,
            AST::ThisReceiver(n) => n.source_span,
            AST::Chain(n) => n.source_span,
            AST::Conditional(n) => n.source_span,
            AST::PropertyRead(n) => n.source_span,
            AST::SafePropertyRead(n) => n.source_span,
            AST::PropertyWrite(n) => n.source_span,
            AST::KeyedRead(n) => n.source_span,
            AST::BindingPipe(n) => n.source_span,
            AST::LiteralPrimitive(n) => n.source_span,
            AST::LiteralArray(n) => n.source_span,
            AST::Interpolation(n) => n.source_span,
            AST::Binary(n) => n.source_span,
            AST::PrefixNot(n) => n.source_span,
            AST::Unary(n) => n.source_span,
            AST::NonNullAssert(n) => n.source_span,
            AST::Call(n) => n.source_span,
            AST::SafeCall(n) => n.source_span,
        }
    }

    /// Direct sub-expressions, in source order. Drives the shared
    /// template-check traversal.
    pub fn children(&self) -> Vec<&AST> {
        match self {
            AST::EmptyExpr(_) | AST::ImplicitReceiver(_) | AST::ThisReceiver(_) => Vec::new(),
            AST::LiteralPrimitive(_) => Vec::new(),
            AST::Chain(n) => n.expressions.iter().collect(),
            AST::Conditional(n) => vec![&n.condition, &n.true_exp, &n.false_exp],
            AST::PropertyRead(n) => vec![&n.receiver],
            AST::SafePropertyRead(n) => vec![&n.receiver],
            AST::PropertyWrite(n) => vec![&n.receiver, &n.value],
            AST::KeyedRead(n) => vec![&n.receiver, &n.key],
            AST::BindingPipe(n) => {
                let mut children: Vec<&AST> = vec![&n.exp];
                children.extend(n.args.iter());
                children
            }
            AST::LiteralArray(n) => n.expressions.iter().collect(),
            AST::Interpolation(n) => n.expressions.iter().collect(),
            AST::Binary(n) => vec![&n.left, &n.right],
            AST::PrefixNot(n) => vec![&n.expression],
            AST::Unary(n) => vec![&n.expr],
            AST::NonNullAssert(n) => vec![&n.expression],
            AST::Call(n) => {
                let mut children: Vec<&AST> = vec![&n.receiver];
                children.extend(n.args.iter());
                children
            }
            AST::SafeCall(n) => {
                let mut children: Vec<&AST> = vec![&n.receiver];
                children.extend(n.args.iter());
                children
            }
        }
    }

    pub fn is_implicit_receiver(&self) -> bool {
        matches!(self, AST::ImplicitReceiver(_) | AST::ThisReceiver(_))
    }
}

/// An expression AST plus the raw source it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ASTWithSource {
    pub ast: AST,
    pub source: Option<String>,
    pub location: String,
    pub absolute_offset: usize,
    pub errors: Vec<ParseError>,
}

impl ASTWithSource {
    pub fn new(
        ast: AST,
        source: Option<String>,
        location: impl Into<String>,
        absolute_offset: usize,
        errors: Vec<ParseError>,
    ) -> Self {
        ASTWithSource {
            ast,
            source,
            location: location.into(),
            absolute_offset,
            errors,
        }
    }
}
