//! TypeScript-compatible interfaces and types for the Angular compiler.
//! This crate serves as a shared compatibility layer: the declaration and
//! diagnostic model that the rest of the compiler analyzes, independent of
//! the concrete syntax tree the sources were parsed with.

use std::cmp::Ordering;
use std::fmt;

pub mod node;
pub mod program;
pub mod type_checker;
pub mod type_nodes;

pub use node::*;
pub use program::*;
pub use type_checker::*;
pub use type_nodes::*;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptTarget {
    ES5,
    ES2015,
    ES2020,
    ES2022,
    ESNext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    CommonJS,
    ES2015,
    ES2020,
    ESNext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

// --- Diagnostic Structures ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticMessageChain {
    String(String),
    Chain {
        message_text: String,
        category: DiagnosticCategory,
        code: i32,
        next: Option<Vec<DiagnosticMessageChain>>,
    },
}

impl DiagnosticMessageChain {
    pub fn new(message: impl Into<String>) -> Self {
        Self::String(message.into())
    }
}

impl From<String> for DiagnosticMessageChain {
    fn from(s: String) -> Self {
        DiagnosticMessageChain::String(s)
    }
}

impl From<&str> for DiagnosticMessageChain {
    fn from(s: &str) -> Self {
        DiagnosticMessageChain::String(s.to_string())
    }
}

impl fmt::Display for DiagnosticMessageChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticMessageChain::String(s) => write!(f, "{}", s),
            DiagnosticMessageChain::Chain { message_text, .. } => write!(f, "{}", message_text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRelatedInformation {
    pub category: DiagnosticCategory,
    pub code: i32,
    pub file: Option<String>,
    pub start: Option<usize>,
    pub length: Option<usize>,
    pub message_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: i32,
    pub file: Option<String>,
    pub start: Option<usize>,
    pub length: Option<usize>,
    pub message_text: DiagnosticMessageChain,
    pub related_information: Option<Vec<DiagnosticRelatedInformation>>,
}

/// A diagnostic which is guaranteed to carry a file position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticWithLocation {
    pub category: DiagnosticCategory,
    pub code: i32,
    pub file: Option<String>,
    pub start: usize,
    pub length: usize,
    pub message_text: DiagnosticMessageChain,
    pub related_information: Option<Vec<DiagnosticRelatedInformation>>,
}

impl From<DiagnosticWithLocation> for Diagnostic {
    fn from(d: DiagnosticWithLocation) -> Self {
        Diagnostic {
            category: d.category,
            code: d.code,
            file: d.file,
            start: Some(d.start),
            length: Some(d.length),
            message_text: d.message_text,
            related_information: d.related_information,
        }
    }
}

/// Stable ordering for snapshot tests: by file, then position, then code.
pub fn compare_diagnostics(a: &Diagnostic, b: &Diagnostic) -> Ordering {
    a.file
        .cmp(&b.file)
        .then(a.start.cmp(&b.start))
        .then(a.code.cmp(&b.code))
        .then(a.category.cmp(&b.category))
}

pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(compare_diagnostics);
}

// --- Utilities ---

pub fn make_diagnostic_chain(
    message_text: String,
    next: Option<Vec<DiagnosticMessageChain>>,
) -> DiagnosticMessageChain {
    DiagnosticMessageChain::Chain {
        category: DiagnosticCategory::Message,
        code: 0,
        message_text,
        next,
    }
}

pub fn add_diagnostic_chain(
    message_text: DiagnosticMessageChain,
    add: Vec<DiagnosticMessageChain>,
) -> DiagnosticMessageChain {
    match message_text {
        DiagnosticMessageChain::String(s) => make_diagnostic_chain(s, Some(add)),
        DiagnosticMessageChain::Chain {
            message_text,
            category,
            code,
            next,
        } => {
            let mut next_vec = next.unwrap_or_default();
            next_vec.extend(add);
            DiagnosticMessageChain::Chain {
                message_text,
                category,
                code,
                next: Some(next_vec),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_sort_stably_by_file_then_position() {
        let mk = |file: &str, start: usize, code: i32| Diagnostic {
            category: DiagnosticCategory::Error,
            code,
            file: Some(file.to_string()),
            start: Some(start),
            length: Some(1),
            message_text: "boom".into(),
            related_information: None,
        };
        let mut diags = vec![mk("/b.ts", 0, 1), mk("/a.ts", 9, 2), mk("/a.ts", 3, 3)];
        sort_diagnostics(&mut diags);
        let order: Vec<_> = diags
            .iter()
            .map(|d| (d.file.clone().unwrap(), d.start.unwrap()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("/a.ts".to_string(), 3),
                ("/a.ts".to_string(), 9),
                ("/b.ts".to_string(), 0)
            ]
        );
    }

    #[test]
    fn chains_append_to_existing_next() {
        let chain = make_diagnostic_chain("outer".to_string(), None);
        let chain = add_diagnostic_chain(chain, vec!["inner".into()]);
        match chain {
            DiagnosticMessageChain::Chain { next, .. } => {
                assert_eq!(next.unwrap().len(), 1);
            }
            _ => panic!("expected chain"),
        }
    }
}
