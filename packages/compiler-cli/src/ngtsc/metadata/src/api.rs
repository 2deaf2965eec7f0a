//! Metadata value objects derived from declarations.

use ts::TextSpan;

/// A single constructor dependency: the token to inject, as written in the
/// parameter's type position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtorDependency {
    pub token: String,
    pub span: TextSpan,
}

/// A class's constructor dependency list, or a marker that the constructor
/// cannot be analyzed for injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectableMeta {
    Deps(Vec<CtorDependency>),
    Invalid,
}

impl InjectableMeta {
    pub fn is_valid(&self) -> bool {
        matches!(self, InjectableMeta::Deps(_))
    }

    pub fn deps(&self) -> Option<&[CtorDependency]> {
        match self {
            InjectableMeta::Deps(deps) => Some(deps),
            InjectableMeta::Invalid => None,
        }
    }
}
