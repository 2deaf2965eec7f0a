//! Resource Loader
//!
//! Resolves and loads external template/style resources. Resolution and
//! loading are split so the synchronous type-checking phase can consume
//! content that was warmed into the cache up front: `resolve` is pure path
//! logic, `preload` performs the read into an explicit cache, and `load`
//! is a synchronous cache hit.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use thiserror::Error;

use crate::ngtsc::file_system::{AbsoluteFsPath, PathManipulation, ReadonlyFileSystem};

/// Extensions the style preprocessor chain rewrites to `.css` before the
/// build output is consulted.
const CSS_PREPROCESSOR_EXT: &[&str] = &[".scss", ".sass", ".less", ".styl"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Template,
    Style,
}

#[derive(Debug, Clone)]
pub struct ResourceLoaderContext {
    pub resource_type: ResourceType,
    pub containing_file: String,
}

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Could not find resource {url} relative to {from}")]
    NotFound { url: String, from: String },
}

pub struct AdapterResourceLoader<'a> {
    fs: &'a dyn ReadonlyFileSystem,
    can_preload: bool,
    can_preprocess: bool,
    cache: RefCell<HashMap<AbsoluteFsPath, String>>,
}

impl<'a> AdapterResourceLoader<'a> {
    pub fn new(fs: &'a dyn ReadonlyFileSystem) -> Self {
        AdapterResourceLoader {
            fs,
            can_preload: true,
            can_preprocess: false,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn can_preload(&self) -> bool {
        self.can_preload
    }

    pub fn can_preprocess(&self) -> bool {
        self.can_preprocess
    }

    /// Pure path resolution. Style resources written for a preprocessor
    /// fall back to their emitted `.css` neighbor.
    pub fn resolve(&self, url: &str, from_file: &str) -> Result<AbsoluteFsPath, ResourceError> {
        let base = self.fs.dirname(from_file);
        let direct = AbsoluteFsPath::new(self.fs.join(&base, &[url]));
        if self.fs.exists(&direct) {
            return Ok(direct);
        }
        for ext in CSS_PREPROCESSOR_EXT {
            if let Some(stem) = direct.as_str().strip_suffix(ext) {
                let fallback = AbsoluteFsPath::new(format!("{}.css", stem));
                if self.fs.exists(&fallback) {
                    return Ok(fallback);
                }
            }
        }
        Err(ResourceError::NotFound {
            url: url.to_string(),
            from: from_file.to_string(),
        })
    }

    /// Warms the cache for `resolved_url`. Returns `None` when there is
    /// nothing to do: the resource is already cached, or preloading is
    /// unsupported.
    pub fn preload(
        &self,
        resolved_url: &AbsoluteFsPath,
        _context: &ResourceLoaderContext,
    ) -> Option<io::Result<()>> {
        if !self.can_preload || self.cache.borrow().contains_key(resolved_url) {
            return None;
        }
        match self.fs.read_file(resolved_url) {
            Ok(content) => {
                self.cache.borrow_mut().insert(resolved_url.clone(), content);
                Some(Ok(()))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Content transform for inline resources. Identity when preprocessing
    /// is not supported.
    pub fn preprocess_inline(
        &self,
        data: &str,
        _context: &ResourceLoaderContext,
    ) -> Result<String, ResourceError> {
        Ok(data.to_string())
    }

    /// Synchronous read, expected to hit the cache populated by `preload`.
    /// Falls back to the file system for callers that skipped preloading.
    pub fn load(&self, resolved_url: &AbsoluteFsPath) -> io::Result<String> {
        if let Some(cached) = self.cache.borrow().get(resolved_url) {
            return Ok(cached.clone());
        }
        let content = self.fs.read_file(resolved_url)?;
        self.cache
            .borrow_mut()
            .insert(resolved_url.clone(), content.clone());
        Ok(content)
    }

    /// Drops cached content, e.g. when resource files changed on disk.
    pub fn invalidate(&self) {
        self.cache.borrow_mut().clear();
    }
}
