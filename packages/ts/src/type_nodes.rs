//! Syntactic type nodes.
//!
//! These mirror the type annotations of the host language closely enough for
//! the type-check-block generator to re-emit them into synthetic code. A
//! node optionally carries its original position; cloned nodes produced by
//! emission clear positions on literals so downstream tooling sources their
//! text from the synthesized node.

use crate::node::TextSpan;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Reference(TypeReference),
    Import(ImportTypeNode),
    Literal(LiteralTypeNode),
    Keyword(KeywordTypeNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    pub name: String,
    pub type_args: Vec<TypeNode>,
    pub position: Option<TextSpan>,
}

/// An `import('specifier').Qualifier` dynamic type reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportTypeNode {
    pub specifier: String,
    pub qualifier: String,
    pub type_args: Vec<TypeNode>,
    pub position: Option<TextSpan>,
}

/// A literal type (`'a'`, `42`, `true`) kept as raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralTypeNode {
    pub text: String,
    pub position: Option<TextSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTypeNode {
    pub keyword: TypeKeyword,
    pub position: Option<TextSpan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    Any,
    Unknown,
    String,
    Number,
    Boolean,
    Void,
    Null,
    Undefined,
    Object,
    Never,
}

impl TypeKeyword {
    pub fn text(&self) -> &'static str {
        match self {
            TypeKeyword::Any => "any",
            TypeKeyword::Unknown => "unknown",
            TypeKeyword::String => "string",
            TypeKeyword::Number => "number",
            TypeKeyword::Boolean => "boolean",
            TypeKeyword::Void => "void",
            TypeKeyword::Null => "null",
            TypeKeyword::Undefined => "undefined",
            TypeKeyword::Object => "object",
            TypeKeyword::Never => "never",
        }
    }
}

impl TypeNode {
    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference(TypeReference {
            name: name.into(),
            type_args: Vec::new(),
            position: None,
        })
    }

    pub fn reference_with_args(name: impl Into<String>, type_args: Vec<TypeNode>) -> Self {
        TypeNode::Reference(TypeReference {
            name: name.into(),
            type_args,
            position: None,
        })
    }

    pub fn import_type(specifier: impl Into<String>, qualifier: impl Into<String>) -> Self {
        TypeNode::Import(ImportTypeNode {
            specifier: specifier.into(),
            qualifier: qualifier.into(),
            type_args: Vec::new(),
            position: None,
        })
    }

    pub fn literal(text: impl Into<String>, position: Option<TextSpan>) -> Self {
        TypeNode::Literal(LiteralTypeNode {
            text: text.into(),
            position,
        })
    }

    pub fn keyword(keyword: TypeKeyword) -> Self {
        TypeNode::Keyword(KeywordTypeNode {
            keyword,
            position: None,
        })
    }

    pub fn any() -> Self {
        Self::keyword(TypeKeyword::Any)
    }

    pub fn position(&self) -> Option<TextSpan> {
        match self {
            TypeNode::Reference(r) => r.position,
            TypeNode::Import(i) => i.position,
            TypeNode::Literal(l) => l.position,
            TypeNode::Keyword(k) => k.position,
        }
    }

    pub fn type_args(&self) -> &[TypeNode] {
        match self {
            TypeNode::Reference(r) => &r.type_args,
            TypeNode::Import(i) => &i.type_args,
            _ => &[],
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Reference(r) => {
                write!(f, "{}", r.name)?;
                write_args(f, &r.type_args)
            }
            TypeNode::Import(i) => {
                write!(f, "import('{}').{}", i.specifier, i.qualifier)?;
                write_args(f, &i.type_args)
            }
            TypeNode::Literal(l) => write!(f, "{}", l.text),
            TypeNode::Keyword(k) => write!(f, "{}", k.keyword.text()),
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[TypeNode]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    write!(f, "<")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, ">")
}
