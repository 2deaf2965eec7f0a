//! Cycle analysis over the import graph.
//!
//! `would_create_cycle` probes whether a prospective edge closes a cycle
//! without inserting it; `record_synthetic_import` is the separate,
//! explicit commit step and invalidates the memoized reachability.

use super::imports::ImportGraph;
use crate::ngtsc::file_system::AbsoluteFsPath;
use std::cell::RefCell;
use std::collections::HashMap;
use ts::SourceFile;

pub struct CycleAnalyzer<'a> {
    import_graph: &'a ImportGraph<'a>,
    cached_results: RefCell<Option<CycleResults>>,
}

impl<'a> CycleAnalyzer<'a> {
    pub fn new(import_graph: &'a ImportGraph<'a>) -> Self {
        Self {
            import_graph,
            cached_results: RefCell::new(None),
        }
    }

    /// Would an import from `from` to `to` create a cycle?
    /// Returns the cycle for diagnostic reporting when it would.
    pub fn would_create_cycle(&self, from: &SourceFile, to: &SourceFile) -> Option<Cycle> {
        self.would_create_cycle_paths(
            &AbsoluteFsPath::from(&from.file_name),
            &AbsoluteFsPath::from(&to.file_name),
        )
    }

    pub fn would_create_cycle_paths(
        &self,
        from: &AbsoluteFsPath,
        to: &AbsoluteFsPath,
    ) -> Option<Cycle> {
        // Reachability is memoized per `from` file: repeated probes from the
        // same origin reuse prior traversal results.
        let mut cache = self.cached_results.borrow_mut();
        let reset_cache = match &*cache {
            Some(results) => &results.from != from,
            None => true,
        };
        if reset_cache {
            *cache = Some(CycleResults::new(from.clone()));
        }

        // The edge from -> to is cyclic iff `from` is reachable from `to`.
        let results = cache.as_mut().unwrap();
        if results.would_be_cyclic(self.import_graph, to) {
            Some(Cycle::new(self.import_graph, from.clone(), to.clone()))
        } else {
            None
        }
    }

    /// Commit a synthetic edge. The memoized reachability is dropped since
    /// the graph changed.
    pub fn record_synthetic_import(&self, from: &SourceFile, to: &SourceFile) {
        self.record_synthetic_import_paths(
            &AbsoluteFsPath::from(&from.file_name),
            &AbsoluteFsPath::from(&to.file_name),
        );
    }

    pub fn record_synthetic_import_paths(&self, from: &AbsoluteFsPath, to: &AbsoluteFsPath) {
        self.cached_results.replace(None);
        self.import_graph.add_synthetic_import(from, to);
    }
}

/// An ordered path of files forming an import cycle.
#[derive(Debug)]
pub struct Cycle {
    pub from: AbsoluteFsPath,
    pub to: AbsoluteFsPath,
    path: Vec<AbsoluteFsPath>,
}

impl Cycle {
    fn new(import_graph: &ImportGraph<'_>, from: AbsoluteFsPath, to: AbsoluteFsPath) -> Self {
        let path = std::iter::once(from.clone())
            .chain(
                import_graph
                    .find_path(&to, &from)
                    .unwrap_or_default()
                    .into_iter(),
            )
            .collect();
        Self { from, to, path }
    }

    pub fn get_path(&self) -> &[AbsoluteFsPath] {
        &self.path
    }
}

#[derive(Clone, Copy, PartialEq)]
enum CycleState {
    Cyclic,
    Acyclic,
}

struct CycleResults {
    from: AbsoluteFsPath,
    results: HashMap<AbsoluteFsPath, CycleState>,
}

impl CycleResults {
    fn new(from: AbsoluteFsPath) -> Self {
        Self {
            from,
            results: HashMap::new(),
        }
    }

    fn would_be_cyclic(&mut self, import_graph: &ImportGraph<'_>, sf: &AbsoluteFsPath) -> bool {
        if let Some(&state) = self.results.get(sf) {
            return state == CycleState::Cyclic;
        }
        if sf == &self.from {
            return true;
        }

        // Assume acyclic until proven otherwise; this terminates recursion
        // on cycles elsewhere in the graph.
        self.results.insert(sf.clone(), CycleState::Acyclic);

        for imported in import_graph.imports_of_path(sf) {
            if self.would_be_cyclic(import_graph, &imported) {
                self.results.insert(sf.clone(), CycleState::Cyclic);
                return true;
            }
        }
        false
    }
}

/// What to do when a cycle would be introduced by a generated import.
pub enum CycleHandlingStrategy {
    UseRemoteScoping,
    Error,
}
