use super::testing::MockFileSystem;
use super::{AbsoluteFsPath, FileSystem, PathManipulation, ReadonlyFileSystem};
use crate::ngtsc::file_system::strip_extension;

#[test]
fn normalize_collapses_dots_and_parent_segments() {
    let fs = MockFileSystem::new();
    assert_eq!(fs.normalize("/a/./b/../c.ts"), "/a/c.ts");
    assert_eq!(fs.normalize("a//b/"), "a/b");
    assert_eq!(fs.normalize("/.."), "/");
}

#[test]
fn join_resets_on_rooted_segments() {
    let fs = MockFileSystem::new();
    assert_eq!(fs.join("/a/b", &["c.ts"]), "/a/b/c.ts");
    assert_eq!(fs.join("/a/b", &["/x", "y"]), "/x/y");
    assert_eq!(fs.join("/a", &["./b", "../c"]), "/a/c");
}

#[test]
fn dirname_and_basename() {
    let fs = MockFileSystem::new();
    assert_eq!(fs.dirname("/a/b/c.ts"), "/a/b");
    assert_eq!(fs.dirname("/c.ts"), "/");
    assert_eq!(fs.basename("/a/b/c.ts", None).as_str(), "c.ts");
    assert_eq!(fs.basename("/a/b/c.ts", Some(".ts")).as_str(), "c");
}

#[test]
fn relative_walks_up_shared_prefix() {
    let fs = MockFileSystem::new();
    assert_eq!(fs.relative("/a/b/c", "/a/b/d/e"), "../d/e");
    assert_eq!(fs.relative("/a", "/a"), ".");
}

#[test]
fn windows_separators_are_normalized() {
    let path = AbsoluteFsPath::new("C:\\app\\main.ts".to_string());
    assert_eq!(path.as_str(), "C:/app/main.ts");
}

#[test]
fn strip_extension_handles_dts() {
    assert_eq!(strip_extension("/a/b.d.ts"), "/a/b");
    assert_eq!(strip_extension("/a/b.ts"), "/a/b");
    assert_eq!(strip_extension("/a/b.css"), "/a/b.css");
}

#[test]
fn mock_fs_round_trips_files() {
    let fs = MockFileSystem::init(&[("/a.ts", "export class A {}")]);
    let path = AbsoluteFsPath::new("/a.ts".to_string());
    assert!(fs.exists(&path));
    assert_eq!(fs.read_file(&path).unwrap(), "export class A {}");
    assert!(fs.read_file(&AbsoluteFsPath::new("/missing.ts".to_string())).is_err());
}

#[test]
fn mock_fs_exclusive_write_fails_on_existing_file() {
    let fs = MockFileSystem::new();
    let path = AbsoluteFsPath::new("/lock".to_string());
    fs.write_file(&path, b"1", true).unwrap();
    assert!(fs.write_file(&path, b"2", true).is_err());
    fs.remove_file(&path).unwrap();
    fs.write_file(&path, b"2", true).unwrap();
}
