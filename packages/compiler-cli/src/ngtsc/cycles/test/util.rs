//! Builds a mock file system from a compact graph description.
//!
//! `"a:b,c;b;c"` creates `/a.ts` importing `./b` and `./c`, plus empty
//! `/b.ts` and `/c.ts`.

use crate::ngtsc::file_system::testing::MockFileSystem;
use crate::ngtsc::file_system::AbsoluteFsPath;
use ts::SourceFile;

pub fn create_fs_from_graph(graph: &str) -> MockFileSystem {
    let fs = MockFileSystem::new();
    for entry in graph.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (name, deps) = match entry.split_once(':') {
            Some((name, deps)) => (name, deps),
            None => (entry, ""),
        };
        let mut contents = String::new();
        for dep in deps.split(',').filter(|d| !d.is_empty()) {
            // A leading `*` in the fixture notation marks an import that
            // only exists for side effects; both forms are value imports.
            let dep = dep.trim_start_matches('*');
            contents.push_str(&format!("import './{}';\n", dep));
        }
        fs.add_file(&format!("/{}.ts", name), &contents);
    }
    fs
}

pub fn source_file(name: &str) -> SourceFile {
    SourceFile::new(format!("/{}.ts", name), "")
}

pub fn import_path_to_string(path: &[AbsoluteFsPath]) -> String {
    path.iter()
        .map(|p| {
            p.as_str()
                .trim_start_matches('/')
                .trim_end_matches(".ts")
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(",")
}
