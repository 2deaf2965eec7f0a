//! Fully in-memory file system for deterministic tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use super::super::src::types::{
    AbsoluteFsPath, FileSystem, PathManipulation, ReadonlyFileSystem,
};

#[derive(Debug)]
pub struct MockFileSystem {
    files: RefCell<HashMap<AbsoluteFsPath, String>>,
    cwd: AbsoluteFsPath,
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystem {
    pub fn new() -> Self {
        MockFileSystem {
            files: RefCell::new(HashMap::new()),
            cwd: AbsoluteFsPath::new("/".to_string()),
        }
    }

    pub fn init(files: &[(&str, &str)]) -> Self {
        let fs = Self::new();
        for (path, contents) in files {
            fs.add_file(path, contents);
        }
        fs
    }

    pub fn add_file(&self, path: &str, contents: &str) {
        self.files
            .borrow_mut()
            .insert(AbsoluteFsPath::new(path.to_string()), contents.to_string());
    }

    pub fn file_count(&self) -> usize {
        self.files.borrow().len()
    }
}

impl PathManipulation for MockFileSystem {
    fn pwd(&self) -> AbsoluteFsPath {
        self.cwd.clone()
    }
}

impl ReadonlyFileSystem for MockFileSystem {
    fn is_case_sensitive(&self) -> bool {
        true
    }

    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("File not found: {}", path))
        })
    }
}

impl FileSystem for MockFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8], exclusive: bool) -> io::Result<()> {
        let mut files = self.files.borrow_mut();
        if exclusive && files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("File already exists: {}", path),
            ));
        }
        files.insert(path.clone(), String::from_utf8_lossy(data).to_string());
        Ok(())
    }

    fn remove_file(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        self.files.borrow_mut().remove(path).map(|_| ()).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("File not found: {}", path))
        })
    }

    fn ensure_dir(&self, _path: &AbsoluteFsPath) -> io::Result<()> {
        Ok(())
    }
}
