//! Program model: an immutable snapshot of lowered source files.

use crate::node::SourceFile;
use crate::{ModuleKind, ScriptTarget};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::rc::Rc;

/// Host-language compiler options, trimmed to the surface the Angular
/// pipeline consults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilerOptions {
    pub strict: Option<bool>,
    pub strict_null_checks: Option<bool>,
    pub target: Option<ScriptTarget>,
    pub module: Option<ModuleKind>,
    pub base_url: Option<String>,
    pub paths: Option<HashMap<String, Vec<String>>>,
    pub root_dir: Option<String>,
    pub out_dir: Option<String>,
    pub no_emit: Option<bool>,
    pub skip_lib_check: Option<bool>,
    pub incremental: Option<bool>,
    pub declaration: Option<bool>,
}

/// A program is an ordered, immutable set of source files. Analysis phases
/// hold an `Rc<Program>`; snapshot replacement is the only "mutation".
#[derive(Debug, Default)]
pub struct Program {
    source_files: IndexMap<String, Rc<SourceFile>>,
}

impl Program {
    pub fn new(files: Vec<SourceFile>) -> Self {
        let mut source_files = IndexMap::new();
        for file in files {
            source_files.insert(file.file_name.clone(), Rc::new(file));
        }
        Program { source_files }
    }

    pub fn from_rc_files(files: Vec<Rc<SourceFile>>) -> Self {
        let mut source_files = IndexMap::new();
        for file in files {
            source_files.insert(file.file_name.clone(), file);
        }
        Program { source_files }
    }

    pub fn get_source_file(&self, file_name: &str) -> Option<&Rc<SourceFile>> {
        self.source_files.get(file_name)
    }

    pub fn source_files(&self) -> impl Iterator<Item = &Rc<SourceFile>> {
        self.source_files.values()
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.source_files.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.source_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_files.is_empty()
    }
}
