use std::thread;
use std::time::Duration;

use super::src::async_locker::AsyncLocker;
use super::src::lock_file::{LockError, LockFile, LOCK_FILE_NAME, LOCK_TIMEOUT_EXIT_CODE};
use super::src::sync_locker::SyncLocker;
use crate::ngtsc::file_system::testing::MockFileSystem;
use crate::ngtsc::file_system::{AbsoluteFsPath, NativeFileSystem};
use crate::ngtsc::logging::NullLogger;

fn mock_dir() -> AbsoluteFsPath {
    AbsoluteFsPath::new("/project".to_string())
}

#[test]
fn lock_file_write_read_remove_round_trip() {
    let fs = MockFileSystem::new();
    let lock = LockFile::new(&fs, &mock_dir()).with_pid("1234");

    assert!(lock.read().is_none());
    lock.write().unwrap();
    assert_eq!(lock.read().as_deref(), Some("1234"));
    assert!(lock.write().is_err());

    lock.remove().unwrap();
    // Cleanup is idempotent: removing an already-removed lock is benign.
    lock.remove().unwrap();
    assert!(lock.read().is_none());
}

#[test]
fn sync_locker_runs_work_and_releases() {
    let fs = MockFileSystem::new();
    let locker = SyncLocker::new(LockFile::new(&fs, &mock_dir()).with_pid("1"));
    let value = locker.lock(|| 42).unwrap();
    assert_eq!(value, 42);
    // Lock was released: a second acquisition succeeds.
    assert_eq!(locker.lock(|| 43).unwrap(), 43);
}

#[test]
fn sync_locker_fails_immediately_with_holder_pid() {
    let fs = MockFileSystem::new();
    let holder = LockFile::new(&fs, &mock_dir()).with_pid("8888");
    holder.write().unwrap();

    let locker = SyncLocker::new(LockFile::new(&fs, &mock_dir()).with_pid("9999"));
    let err = locker.lock(|| ()).unwrap_err();
    match &err {
        LockError::AlreadyLocked { pid, .. } => assert_eq!(pid, "8888"),
        other => panic!("expected AlreadyLocked, got {:?}", other),
    }
    assert!(err.to_string().contains("8888"));
}

#[test]
fn async_locker_times_out_with_holder_pid_and_exit_code() {
    let fs = MockFileSystem::new();
    let holder = LockFile::new(&fs, &mock_dir()).with_pid("7777");
    holder.write().unwrap();

    let logger = NullLogger::new();
    let locker = AsyncLocker::new(
        LockFile::new(&fs, &mock_dir()).with_pid("1111"),
        &logger,
        2,
        3,
    );
    let err = locker.lock(|| ()).unwrap_err();
    match err {
        LockError::Timeout {
            pid,
            attempts,
            exit_code,
            ..
        } => {
            assert_eq!(pid, "7777");
            assert_eq!(attempts, 3);
            assert_eq!(exit_code, LOCK_TIMEOUT_EXIT_CODE);
        }
        other => panic!("expected Timeout, got {:?}", other),
    }
}

#[test]
fn async_locker_acquires_after_holder_releases_within_budget() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = AbsoluteFsPath::from(tmp.path());
    let lock_path = dir.as_str().to_string();

    let holder_thread = {
        let lock_path = lock_path.clone();
        thread::spawn(move || {
            let fs = NativeFileSystem::new();
            let lock =
                LockFile::new(&fs, &AbsoluteFsPath::new(lock_path)).with_pid("first-holder");
            lock.write().unwrap();
            thread::sleep(Duration::from_millis(60));
            lock.remove().unwrap();
        })
    };

    // Give the holder a moment to take the lock.
    thread::sleep(Duration::from_millis(10));

    let fs = NativeFileSystem::new();
    let logger = NullLogger::new();
    // Budget (20ms x 20) comfortably exceeds the 60ms hold.
    let locker = AsyncLocker::new(
        LockFile::new(&fs, &AbsoluteFsPath::new(lock_path)).with_pid("second"),
        &logger,
        20,
        20,
    );
    let value = locker.lock(|| "acquired").unwrap();
    assert_eq!(value, "acquired");

    holder_thread.join().unwrap();
}

#[test]
fn lock_file_path_uses_well_known_name() {
    let fs = MockFileSystem::new();
    let lock = LockFile::new(&fs, &mock_dir());
    assert_eq!(
        lock.path.as_str(),
        format!("/project/{}", LOCK_FILE_NAME)
    );
}
