//! Lock file primitive.
//!
//! Cross-process mutual exclusion via file existence: presence means
//! locked, content is the holder's PID, removal unlocks. This coordinates
//! separate OS processes, not in-process concurrency.

use std::io;
use thiserror::Error;

use crate::ngtsc::file_system::{AbsoluteFsPath, FileSystem, PathManipulation};

pub const LOCK_FILE_NAME: &str = "__ngtsc_lock_file__";

/// Process exit code used when lock acquisition times out, so the CLI can
/// map it to a documented exit status.
pub const LOCK_TIMEOUT_EXIT_CODE: i32 = 177;

#[derive(Error, Debug)]
pub enum LockError {
    #[error(
        "Timed out waiting {attempts} times for another process (pid: {pid}) to release the \
         lock file at {path}. (If you are sure no other process is using the lock, you can \
         remove the file manually.)"
    )]
    Timeout {
        pid: String,
        path: String,
        attempts: u32,
        exit_code: i32,
    },

    #[error(
        "Failed to acquire the lock at {path}: another process (pid: {pid}) already holds it."
    )]
    AlreadyLocked { pid: String, path: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub struct LockFile<'a> {
    fs: &'a dyn FileSystem,
    pub path: AbsoluteFsPath,
    pub pid: String,
}

impl<'a> LockFile<'a> {
    pub fn new(fs: &'a dyn FileSystem, directory: &AbsoluteFsPath) -> Self {
        let path = AbsoluteFsPath::new(fs.join(directory.as_str(), &[LOCK_FILE_NAME]));
        LockFile {
            fs,
            path,
            pid: std::process::id().to_string(),
        }
    }

    /// For tests simulating a foreign process.
    pub fn with_pid(mut self, pid: impl Into<String>) -> Self {
        self.pid = pid.into();
        self
    }

    /// Attempt to take the lock. Fails if it is already held.
    pub fn write(&self) -> io::Result<()> {
        self.fs.write_file(&self.path, self.pid.as_bytes(), true)
    }

    /// The PID of the current holder, if any.
    pub fn read(&self) -> Option<String> {
        self.fs.read_file(&self.path).ok()
    }

    /// Release the lock. An already-removed lock file is benign: cleanup is
    /// idempotent. Other I/O errors propagate.
    pub fn remove(&self) -> io::Result<()> {
        match self.fs.remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
