//! File system backed by the real OS, paths normalized to POSIX form.

use std::fs;
use std::io;

use super::types::{AbsoluteFsPath, FileSystem, PathManipulation, ReadonlyFileSystem};
use super::util::normalize_separators;

#[derive(Debug, Default)]
pub struct NativeFileSystem {
    case_sensitive: bool,
}

impl NativeFileSystem {
    pub fn new() -> Self {
        NativeFileSystem {
            case_sensitive: !cfg!(windows),
        }
    }
}

impl PathManipulation for NativeFileSystem {
    fn pwd(&self) -> AbsoluteFsPath {
        let cwd = std::env::current_dir().unwrap_or_else(|_| "/".into());
        AbsoluteFsPath::new(normalize_separators(&cwd.to_string_lossy()))
    }
}

impl ReadonlyFileSystem for NativeFileSystem {
    fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        path.as_path().exists()
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        fs::read_to_string(path.as_path())
    }
}

impl FileSystem for NativeFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8], exclusive: bool) -> io::Result<()> {
        if exclusive {
            use std::io::Write;
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path.as_path())?;
            file.write_all(data)
        } else {
            fs::write(path.as_path(), data)
        }
    }

    fn remove_file(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        fs::remove_file(path.as_path())
    }

    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        fs::create_dir_all(path.as_path())
    }
}
