//! Non-waiting locker: fails immediately when the lock is held, reporting
//! the holder's PID.

use super::lock_file::{LockError, LockFile};

pub struct SyncLocker<'a> {
    lock_file: LockFile<'a>,
}

impl<'a> SyncLocker<'a> {
    pub fn new(lock_file: LockFile<'a>) -> Self {
        SyncLocker { lock_file }
    }

    /// Run `work` while holding the lock; never waits for a holder.
    pub fn lock<T>(&self, work: impl FnOnce() -> T) -> Result<T, LockError> {
        self.create()?;
        let result = work();
        self.lock_file.remove()?;
        Ok(result)
    }

    fn create(&self) -> Result<(), LockError> {
        match self.lock_file.write() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                let pid = self
                    .lock_file
                    .read()
                    .unwrap_or_else(|| "{unknown}".to_string());
                Err(LockError::AlreadyLocked {
                    pid,
                    path: self.lock_file.path.to_string(),
                })
            }
            Err(e) => Err(LockError::Io(e)),
        }
    }
}
