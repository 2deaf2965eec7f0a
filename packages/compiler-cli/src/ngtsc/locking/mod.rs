pub mod src {
    pub mod async_locker;
    pub mod lock_file;
    pub mod sync_locker;
}

#[cfg(test)]
mod test;

pub use src::async_locker::AsyncLocker;
pub use src::lock_file::{LockError, LockFile, LOCK_FILE_NAME, LOCK_TIMEOUT_EXIT_CODE};
pub use src::sync_locker::SyncLocker;
