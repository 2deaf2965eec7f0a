// Incremental Compilation
//
// Decides, for each file of a new program, whether its prior analysis can
// be reused, and accumulates the state that the next compilation will
// resume from. Reuse is keyed on file-content hashes; a modified resource
// file invalidates every source file whose components registered it.

use std::collections::HashSet;

use super::api::IncrementalState;
use ts::{Program, SourceFile};

#[derive(Debug)]
pub struct IncrementalCompilation {
    next_state: IncrementalState,
    reusable_files: HashSet<String>,
}

impl IncrementalCompilation {
    /// No prior information: everything is analyzed from scratch.
    pub fn fresh() -> Self {
        IncrementalCompilation {
            next_state: IncrementalState::new(),
            reusable_files: HashSet::new(),
        }
    }

    pub fn incremental(
        old_state: &IncrementalState,
        new_program: &Program,
        modified_resource_files: &HashSet<String>,
    ) -> Self {
        let mut reusable_files = HashSet::new();
        for sf in new_program.source_files() {
            if !old_state.was_analyzed(&sf.file_name) {
                continue;
            }
            if old_state.version_of(&sf.file_name) != Some(sf.version.as_str()) {
                continue;
            }
            let resources_changed = old_state
                .resource_dependencies
                .get(&sf.file_name)
                .map(|deps| deps.iter().any(|dep| modified_resource_files.contains(dep)))
                .unwrap_or(false);
            if resources_changed {
                continue;
            }
            reusable_files.insert(sf.file_name.clone());
        }

        // Carry forward the still-fresh portion of the old state; stale
        // entries are rebuilt as files are re-analyzed.
        let mut next_state = IncrementalState::new();
        for file in &reusable_files {
            next_state.analyzed_files.insert(file.clone());
            if let Some(version) = old_state.version_of(file) {
                next_state
                    .file_versions
                    .insert(file.clone(), version.to_string());
            }
            if let Some(deps) = old_state.resource_dependencies.get(file) {
                next_state
                    .resource_dependencies
                    .insert(file.clone(), deps.clone());
            }
        }

        IncrementalCompilation {
            next_state,
            reusable_files,
        }
    }

    pub fn needs_analysis(&self, file_name: &str) -> bool {
        !self.reusable_files.contains(file_name)
    }

    pub fn record_analyzed(&mut self, sf: &SourceFile, resource_dependencies: Vec<String>) {
        self.next_state
            .file_versions
            .insert(sf.file_name.clone(), sf.version.clone());
        self.next_state.analyzed_files.insert(sf.file_name.clone());
        if !resource_dependencies.is_empty() {
            self.next_state
                .resource_dependencies
                .insert(sf.file_name.clone(), resource_dependencies);
        }
    }

    pub fn state(&self) -> &IncrementalState {
        &self.next_state
    }

    pub fn into_state(self) -> IncrementalState {
        self.next_state
    }

    pub fn reusable_file_count(&self) -> usize {
        self.reusable_files.len()
    }
}
