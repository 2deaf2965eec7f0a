//! File-system abstraction used throughout the compiler.
//!
//! All analysis code works against these traits with an injected instance,
//! never against the OS directly, so behavior is deterministic and
//! mockable. Paths are normalized to POSIX form.

use std::io;
use std::path::Path;

use super::util::normalize_separators;

/// A fully qualified path in the file system, in POSIX form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsoluteFsPath(String);

impl AbsoluteFsPath {
    pub fn new(path: String) -> Self {
        AbsoluteFsPath(normalize_separators(&path))
    }

    pub fn from<P: AsRef<Path>>(path: P) -> Self {
        Self::new(path.as_ref().to_string_lossy().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for AbsoluteFsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for AbsoluteFsPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl std::fmt::Display for AbsoluteFsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A path that's relative to another (unspecified) root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment(String);

impl PathSegment {
    pub fn new(path: String) -> Self {
        PathSegment(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path manipulation, implemented uniformly over POSIX-form strings so the
/// native and mock file systems behave identically.
pub trait PathManipulation {
    fn extname(&self, path: &str) -> String {
        match path.rsplit('/').next().and_then(|base| base.rfind('.')) {
            Some(0) | None => String::new(),
            Some(i) => path.rsplit('/').next().unwrap()[i..].to_string(),
        }
    }

    fn is_rooted(&self, path: &str) -> bool {
        let normalized = normalize_separators(path);
        normalized.starts_with('/')
            || (normalized.len() >= 2 && normalized.as_bytes()[1] == b':')
    }

    fn dirname(&self, file: &str) -> String {
        let normalized = normalize_separators(file);
        match normalized.rfind('/') {
            Some(0) => "/".to_string(),
            Some(i) => normalized[..i].to_string(),
            None => ".".to_string(),
        }
    }

    fn basename(&self, file_path: &str, extension: Option<&str>) -> PathSegment {
        let normalized = normalize_separators(file_path);
        let base = normalized.rsplit('/').next().unwrap_or("").to_string();
        let base = match extension {
            Some(ext) if base.ends_with(ext) => base[..base.len() - ext.len()].to_string(),
            _ => base,
        };
        PathSegment::new(base)
    }

    fn join(&self, base_path: &str, paths: &[&str]) -> String {
        let mut joined = normalize_separators(base_path);
        for p in paths {
            let p = normalize_separators(p);
            if self.is_rooted(&p) {
                joined = p;
            } else {
                if !joined.ends_with('/') {
                    joined.push('/');
                }
                joined.push_str(&p);
            }
        }
        self.normalize(&joined)
    }

    fn normalize(&self, path: &str) -> String {
        let normalized = normalize_separators(path);
        let rooted = normalized.starts_with('/');
        let mut segments: Vec<&str> = Vec::new();
        for segment in normalized.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if matches!(segments.last(), Some(&s) if s != "..") {
                        segments.pop();
                    } else if !rooted {
                        segments.push("..");
                    }
                }
                other => segments.push(other),
            }
        }
        let body = segments.join("/");
        if rooted {
            format!("/{}", body)
        } else if body.is_empty() {
            ".".to_string()
        } else {
            body
        }
    }

    fn resolve(&self, paths: &[&str]) -> AbsoluteFsPath {
        let mut result = self.pwd().into_string();
        for p in paths {
            if self.is_rooted(p) {
                result = normalize_separators(p);
            } else {
                result = self.join(&result, &[p]);
            }
        }
        AbsoluteFsPath::new(self.normalize(&result))
    }

    fn relative(&self, from: &str, to: &str) -> String {
        let from = self.normalize(from);
        let to = self.normalize(to);
        let from_segments: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
        let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();
        let common = from_segments
            .iter()
            .zip(to_segments.iter())
            .take_while(|(a, b)| a == b)
            .count();
        let mut segments: Vec<String> = Vec::new();
        for _ in common..from_segments.len() {
            segments.push("..".to_string());
        }
        for segment in &to_segments[common..] {
            segments.push((*segment).to_string());
        }
        if segments.is_empty() {
            ".".to_string()
        } else {
            segments.join("/")
        }
    }

    fn pwd(&self) -> AbsoluteFsPath;
}

/// Read-only file-system operations.
pub trait ReadonlyFileSystem: PathManipulation {
    fn is_case_sensitive(&self) -> bool;
    fn exists(&self, path: &AbsoluteFsPath) -> bool;
    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String>;
}

/// A basic interface to abstract the underlying file-system.
pub trait FileSystem: ReadonlyFileSystem {
    /// Writes `data` to `path`. With `exclusive` set, fails if the file
    /// already exists; this is the primitive the lock-file protocol
    /// builds on.
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8], exclusive: bool) -> io::Result<()>;
    fn remove_file(&self, path: &AbsoluteFsPath) -> io::Result<()>;
    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()>;
}
