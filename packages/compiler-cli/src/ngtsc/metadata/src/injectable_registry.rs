// Injectable Registry
//
// Registry of classes that can be constructed via dependency injection,
// with their derived constructor dependency lists.

use std::cell::RefCell;
use std::collections::HashMap;

use super::api::{CtorDependency, InjectableMeta};
use crate::ngtsc::reflection::ReflectionHost;
use ts::{Declaration, DeclarationId, TypeNode};

/// Caches `InjectableMeta` per declaration for the lifetime of one program
/// snapshot. Declarations analyzed in a separate compilation unit have no
/// registered entry; those fall back to structural inspection through the
/// reflection host.
#[derive(Default)]
pub struct InjectableClassRegistry {
    classes: RefCell<HashMap<DeclarationId, InjectableMeta>>,
}

impl InjectableClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_injectable(&self, decl: &Declaration, meta: InjectableMeta) {
        self.classes.borrow_mut().insert(decl.id(), meta);
    }

    pub fn is_registered(&self, decl: &Declaration) -> bool {
        self.classes.borrow().contains_key(&decl.id())
    }

    /// Cached metadata if present, otherwise computed structurally, cached,
    /// and returned. Once computed for a declaration within one snapshot
    /// the result never changes.
    pub fn get_injectable_meta(
        &self,
        decl: &Declaration,
        host: &dyn ReflectionHost,
    ) -> InjectableMeta {
        if let Some(meta) = self.classes.borrow().get(&decl.id()) {
            return meta.clone();
        }
        let meta = compute_injectable_meta(decl, host);
        self.classes
            .borrow_mut()
            .insert(decl.id(), meta.clone());
        meta
    }
}

fn compute_injectable_meta(decl: &Declaration, host: &dyn ReflectionHost) -> InjectableMeta {
    let Some(params) = host.get_constructor_parameters(decl) else {
        // No explicit constructor: injectable with no dependencies.
        return InjectableMeta::Deps(Vec::new());
    };
    let mut deps = Vec::new();
    for param in params {
        match &param.type_node {
            Some(TypeNode::Reference(reference)) => deps.push(CtorDependency {
                token: reference.name.clone(),
                span: param.span,
            }),
            // A parameter without an injectable type annotation makes the
            // whole constructor unusable for DI.
            _ => return InjectableMeta::Invalid,
        }
    }
    InjectableMeta::Deps(deps)
}
