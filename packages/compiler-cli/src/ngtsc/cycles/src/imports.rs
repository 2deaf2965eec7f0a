//! Import graph over the program's source files.
//!
//! Imports are discovered by parsing each file's text on first query and
//! cached per path. Synthetic edges can be added for imports the compiler
//! intends to generate but which do not exist in the sources yet.

use crate::ngtsc::file_system::{AbsoluteFsPath, PathManipulation, ReadonlyFileSystem};
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use ts::SourceFile;

pub struct ImportGraph<'a> {
    fs: &'a dyn ReadonlyFileSystem,
    imports: RefCell<HashMap<AbsoluteFsPath, HashSet<AbsoluteFsPath>>>,
}

impl<'a> ImportGraph<'a> {
    pub fn new(fs: &'a dyn ReadonlyFileSystem) -> Self {
        Self {
            fs,
            imports: RefCell::new(HashMap::new()),
        }
    }

    pub fn imports_of(&self, sf: &SourceFile) -> HashSet<AbsoluteFsPath> {
        self.imports_of_path(&AbsoluteFsPath::from(&sf.file_name))
    }

    pub fn imports_of_path(&self, path: &AbsoluteFsPath) -> HashSet<AbsoluteFsPath> {
        let mut cache = self.imports.borrow_mut();
        if let Some(imports) = cache.get(path) {
            return imports.clone();
        }
        let imports = self.scan_imports(path);
        cache.insert(path.clone(), imports.clone());
        imports
    }

    fn scan_imports(&self, path: &AbsoluteFsPath) -> HashSet<AbsoluteFsPath> {
        let content = match self.fs.read_file(path) {
            Ok(c) => c,
            Err(_) => return HashSet::new(),
        };

        let mut imports = HashSet::new();
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(path.as_path())
            .unwrap_or_default()
            .with_typescript(true);
        let ret = Parser::new(&allocator, &content, source_type).parse();

        let parent_str = self.fs.dirname(path.as_str());

        for stmt in &ret.program.body {
            let module_specifier = match stmt {
                oxc_ast::ast::Statement::ImportDeclaration(decl) => {
                    if decl.import_kind.is_value() {
                        Some(decl.source.value.to_string())
                    } else {
                        None
                    }
                }
                oxc_ast::ast::Statement::ExportNamedDeclaration(decl) => {
                    if decl.export_kind.is_value() {
                        decl.source.as_ref().map(|s| s.value.to_string())
                    } else {
                        None
                    }
                }
                oxc_ast::ast::Statement::ExportAllDeclaration(decl) => {
                    if decl.export_kind.is_value() {
                        Some(decl.source.value.to_string())
                    } else {
                        None
                    }
                }
                _ => None,
            };

            // Only relative specifiers participate in cycle analysis;
            // package imports can never point back into the program.
            if let Some(specifier) = module_specifier {
                if specifier.starts_with('.') {
                    let resolved_str = self.fs.join(&parent_str, &[&specifier]);
                    let resolved = if resolved_str.ends_with(".ts") {
                        AbsoluteFsPath::new(resolved_str)
                    } else {
                        AbsoluteFsPath::new(format!("{}.ts", resolved_str))
                    };
                    imports.insert(resolved);
                }
            }
        }
        imports
    }

    /// Find an import path from `start` to `end`, as a breadth first search
    /// so the shortest path is returned for diagnostics.
    pub fn find_path(
        &self,
        start: &AbsoluteFsPath,
        end: &AbsoluteFsPath,
    ) -> Option<Vec<AbsoluteFsPath>> {
        if start == end {
            return Some(vec![start.clone()]);
        }

        let mut found = HashSet::new();
        found.insert(start.clone());
        let mut parents: HashMap<AbsoluteFsPath, AbsoluteFsPath> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(start.clone());

        while let Some(current) = queue.pop_front() {
            for imported in self.imports_of_path(&current) {
                if !found.contains(&imported) {
                    parents.insert(imported.clone(), current.clone());

                    if &imported == end {
                        let mut path = Vec::new();
                        let mut curr = Some(imported);
                        while let Some(c) = curr {
                            curr = parents.get(&c).cloned();
                            path.push(c);
                        }
                        path.reverse();
                        return Some(path);
                    }

                    found.insert(imported.clone());
                    queue.push_back(imported);
                }
            }
        }
        None
    }

    /// Record an import from `sf` to `imported` that is not present in the
    /// sources but will be generated, so later probes see it.
    pub fn add_synthetic_import(&self, sf: &AbsoluteFsPath, imported: &AbsoluteFsPath) {
        // Force the scan of the real imports first so the synthetic edge is
        // not clobbered by a later lazy scan.
        self.imports_of_path(sf);
        self.imports
            .borrow_mut()
            .entry(sf.clone())
            .or_default()
            .insert(imported.clone());
    }
}
