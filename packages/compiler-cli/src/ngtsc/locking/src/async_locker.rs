//! Polling locker.
//!
//! Waits for a held lock with a bounded retry budget
//! (`retry_delay_ms * retry_attempts`). The budget resets when the
//! observed holder PID changes mid-wait, since that counts as progress: a
//! new process acquired and will presumably release in turn.

use std::thread;
use std::time::Duration;

use super::lock_file::{LockError, LockFile, LOCK_TIMEOUT_EXIT_CODE};
use crate::ngtsc::logging::Logger;

pub struct AsyncLocker<'a> {
    lock_file: LockFile<'a>,
    logger: &'a dyn Logger,
    retry_delay_ms: u64,
    retry_attempts: u32,
}

impl<'a> AsyncLocker<'a> {
    pub fn new(
        lock_file: LockFile<'a>,
        logger: &'a dyn Logger,
        retry_delay_ms: u64,
        retry_attempts: u32,
    ) -> Self {
        AsyncLocker {
            lock_file,
            logger,
            retry_delay_ms,
            retry_attempts,
        }
    }

    /// Run `work` while holding the lock. The lock is released afterwards
    /// even if `work` produced an error value.
    pub fn lock<T>(&self, work: impl FnOnce() -> T) -> Result<T, LockError> {
        self.create()?;
        let result = work();
        self.lock_file.remove()?;
        Ok(result)
    }

    fn create(&self) -> Result<(), LockError> {
        let mut attempts = 0;
        let mut last_pid: Option<String> = None;
        loop {
            match self.lock_file.write() {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() != std::io::ErrorKind::AlreadyExists => {
                    return Err(LockError::Io(e))
                }
                Err(_) => {}
            }

            let pid = self.lock_file.read().unwrap_or_else(|| "{unknown}".to_string());
            if last_pid.as_deref() != Some(pid.as_str()) {
                // A different holder than last observed: restart the budget.
                attempts = 0;
                self.logger.info(&format!(
                    "Another process, with id {}, is currently running the compiler.\n\
                     Waiting up to {}s for it to finish.\n\
                     (If you are sure no other process is using the lock, you can remove \
                     the file at {} manually.)",
                    pid,
                    (self.retry_delay_ms * u64::from(self.retry_attempts)) / 1000,
                    self.lock_file.path
                ));
                last_pid = Some(pid.clone());
            }

            attempts += 1;
            if attempts > self.retry_attempts {
                return Err(LockError::Timeout {
                    pid,
                    path: self.lock_file.path.to_string(),
                    attempts: self.retry_attempts,
                    exit_code: LOCK_TIMEOUT_EXIT_CODE,
                });
            }
            thread::sleep(Duration::from_millis(self.retry_delay_ms));
        }
    }
}
