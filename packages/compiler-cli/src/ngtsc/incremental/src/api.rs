// Incremental API
//
// Serializable state of a prior compilation, sufficient to decide which
// files of a new program can reuse their previous analysis. Tools that
// discard the compiler between runs persist this and resume from it.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementalState {
    /// Content identity (hash) per analyzed source file.
    pub file_versions: HashMap<String, String>,
    /// Files whose analysis completed successfully.
    pub analyzed_files: HashSet<String>,
    /// External resource paths each source file's components depend on.
    /// Lets a from-state compilation map "this resource changed" back to
    /// affected files without a live resource registry.
    pub resource_dependencies: HashMap<String, Vec<String>>,
}

impl IncrementalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_analyzed(&self, file: &str) -> bool {
        self.analyzed_files.contains(file)
    }

    pub fn version_of(&self, file: &str) -> Option<&str> {
        self.file_versions.get(file).map(String::as_str)
    }
}
