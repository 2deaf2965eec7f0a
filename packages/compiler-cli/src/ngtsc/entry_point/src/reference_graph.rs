// Reference Graph
//
// Directed graph of "declaration A makes declaration B visible to
// consumers", fed during analysis and consulted by the private-export
// checker.

use indexmap::{IndexMap, IndexSet};
use std::cell::RefCell;
use std::rc::Rc;

use crate::ngtsc::imports::Reference;
use crate::ngtsc::metadata::ReferencesRegistry;
use ts::{Declaration, DeclarationId};

#[derive(Default)]
pub struct ReferenceGraph {
    references: IndexMap<DeclarationId, IndexSet<DeclarationId>>,
    nodes: IndexMap<DeclarationId, Rc<Declaration>>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, from: &Rc<Declaration>, to: &Rc<Declaration>) {
        self.nodes.insert(from.id(), Rc::clone(from));
        self.nodes.insert(to.id(), Rc::clone(to));
        self.references.entry(from.id()).or_default().insert(to.id());
    }

    pub fn node(&self, id: &DeclarationId) -> Option<&Rc<Declaration>> {
        self.nodes.get(id)
    }

    /// Transitive closure of references from `target`, including `target`
    /// itself.
    pub fn transitive_references_of(&self, target: &DeclarationId) -> IndexSet<DeclarationId> {
        let mut set = IndexSet::new();
        self.collect_transitive_references(&mut set, target);
        set
    }

    fn collect_transitive_references(
        &self,
        set: &mut IndexSet<DeclarationId>,
        target: &DeclarationId,
    ) {
        if set.insert(target.clone()) {
            if let Some(refs) = self.references.get(target) {
                for reference in refs {
                    self.collect_transitive_references(set, reference);
                }
            }
        }
    }

    /// A path of declarations from `from` to `to` through the graph, used
    /// to explain how a declaration became visible. `None` when no path is
    /// recorded.
    pub fn path_from(&self, from: &DeclarationId, to: &DeclarationId) -> Option<Vec<Rc<Declaration>>> {
        self.collect_path(from, to, &mut IndexSet::new())
    }

    fn collect_path(
        &self,
        from: &DeclarationId,
        to: &DeclarationId,
        seen: &mut IndexSet<DeclarationId>,
    ) -> Option<Vec<Rc<Declaration>>> {
        if !seen.insert(from.clone()) {
            return None;
        }
        let node = self.nodes.get(from)?;
        if from == to {
            return Some(vec![Rc::clone(node)]);
        }
        for reference in self.references.get(from)? {
            if let Some(mut rest) = self.collect_path(reference, to, seen) {
                rest.insert(0, Rc::clone(node));
                return Some(rest);
            }
        }
        None
    }
}

/// `ReferencesRegistry` implementation that feeds a `ReferenceGraph`
/// during analysis.
#[derive(Default)]
pub struct ReferenceGraphAdapter {
    graph: RefCell<ReferenceGraph>,
}

impl ReferenceGraphAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_graph(self) -> ReferenceGraph {
        self.graph.into_inner()
    }

    pub fn with_graph<R>(&self, f: impl FnOnce(&ReferenceGraph) -> R) -> R {
        f(&self.graph.borrow())
    }
}

impl ReferencesRegistry for ReferenceGraphAdapter {
    fn add(&self, source: &Declaration, references: &[Reference]) {
        let mut graph = self.graph.borrow_mut();
        let source = Rc::new(source.clone());
        for reference in references {
            graph.add(&source, &reference.node);
        }
    }
}
