//! Type emission feasibility and emission.
//!
//! A type node can be re-emitted into generated code only if every type
//! reference it contains (including all generic type arguments,
//! recursively) can be referenced from the generated location. Emission
//! clones the node, substituting each reference's name with a
//! context-appropriate qualified name; the input tree is never modified.

use thiserror::Error;
use ts::{KeywordTypeNode, LiteralTypeNode, TypeNode, TypeReference};

/// Whether `ty` could be emitted by a `TypeEmitter` whose translator
/// accepts exactly the references accepted by `can_emit`.
///
/// An `import(...)` dynamic type reference is never emittable.
pub fn can_emit_type(ty: &TypeNode, can_emit: &dyn Fn(&TypeReference) -> bool) -> bool {
    match ty {
        TypeNode::Import(_) => false,
        TypeNode::Reference(reference) => {
            can_emit(reference)
                && reference
                    .type_args
                    .iter()
                    .all(|arg| can_emit_type(arg, can_emit))
        }
        TypeNode::Literal(_) | TypeNode::Keyword(_) => true,
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TypeEmissionError {
    #[error("Unable to emit a reference to type '{0}' from the generated location")]
    UnresolvedReference(String),
    #[error("Dynamic import() type references cannot be emitted")]
    ImportType,
}

/// Emits type nodes into a different context by rewriting type-reference
/// names through a caller-supplied translator.
pub struct TypeEmitter<'a> {
    /// Resolves a type reference to the name it has at the emission site
    /// (e.g. through a generated namespace import), or `None` when the
    /// reference cannot be emitted there.
    translator: &'a dyn Fn(&TypeReference) -> Option<String>,
}

impl<'a> TypeEmitter<'a> {
    pub fn new(translator: &'a dyn Fn(&TypeReference) -> Option<String>) -> Self {
        TypeEmitter { translator }
    }

    /// Clone-and-substitute. Side-effect free on `ty` and idempotent when
    /// the translator is stable under its own output.
    pub fn emit_type(&self, ty: &TypeNode) -> Result<TypeNode, TypeEmissionError> {
        match ty {
            TypeNode::Import(_) => Err(TypeEmissionError::ImportType),
            TypeNode::Reference(reference) => {
                let name = (self.translator)(reference).ok_or_else(|| {
                    TypeEmissionError::UnresolvedReference(reference.name.clone())
                })?;
                let mut type_args = Vec::with_capacity(reference.type_args.len());
                for arg in &reference.type_args {
                    type_args.push(self.emit_type(arg)?);
                }
                Ok(TypeNode::Reference(TypeReference {
                    name,
                    type_args,
                    // The emitted reference belongs to the generated file,
                    // not the original source.
                    position: None,
                }))
            }
            TypeNode::Literal(literal) => {
                // Positions are cleared so the host toolchain sources the
                // literal text from the synthesized node instead of the
                // original file's offsets.
                Ok(TypeNode::Literal(LiteralTypeNode {
                    text: literal.text.clone(),
                    position: None,
                }))
            }
            TypeNode::Keyword(keyword) => Ok(TypeNode::Keyword(KeywordTypeNode {
                keyword: keyword.keyword,
                position: None,
            })),
        }
    }
}
