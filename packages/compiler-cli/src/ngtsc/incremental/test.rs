use std::collections::HashSet;

use super::src::api::IncrementalState;
use super::src::compilation::IncrementalCompilation;
use super::src::strategy::{
    IncrementalBuildStrategy, NoopIncrementalBuildStrategy, TrackedIncrementalBuildStrategy,
};
use ts::{Program, SourceFile};

fn file(name: &str, version: &str) -> SourceFile {
    SourceFile::new(name, "").with_version(version)
}

fn analyzed_state(files: &[(&str, &str)]) -> IncrementalState {
    let mut state = IncrementalState::new();
    for (name, version) in files {
        state.file_versions.insert(name.to_string(), version.to_string());
        state.analyzed_files.insert(name.to_string());
    }
    state
}

#[test]
fn fresh_compilation_reuses_nothing() {
    let compilation = IncrementalCompilation::fresh();
    assert!(compilation.needs_analysis("/a.ts"));
    assert_eq!(compilation.reusable_file_count(), 0);
}

#[test]
fn unchanged_files_are_reused() {
    let old = analyzed_state(&[("/a.ts", "v1"), ("/b.ts", "v1")]);
    let program = Program::new(vec![file("/a.ts", "v1"), file("/b.ts", "v2")]);
    let compilation = IncrementalCompilation::incremental(&old, &program, &HashSet::new());

    assert!(!compilation.needs_analysis("/a.ts"));
    // Content hash changed.
    assert!(compilation.needs_analysis("/b.ts"));
    // Files never seen before need analysis too.
    assert!(compilation.needs_analysis("/new.ts"));
}

#[test]
fn modified_resources_invalidate_owning_files() {
    let mut old = analyzed_state(&[("/cmp.ts", "v1"), ("/other.ts", "v1")]);
    old.resource_dependencies
        .insert("/cmp.ts".to_string(), vec!["/cmp.html".to_string()]);

    let program = Program::new(vec![file("/cmp.ts", "v1"), file("/other.ts", "v1")]);
    let modified: HashSet<String> = ["/cmp.html".to_string()].into_iter().collect();
    let compilation = IncrementalCompilation::incremental(&old, &program, &modified);

    assert!(compilation.needs_analysis("/cmp.ts"));
    assert!(!compilation.needs_analysis("/other.ts"));
}

#[test]
fn next_state_carries_forward_fresh_entries_and_new_analysis() {
    let mut old = analyzed_state(&[("/a.ts", "v1")]);
    old.resource_dependencies
        .insert("/a.ts".to_string(), vec!["/a.html".to_string()]);
    let program = Program::new(vec![file("/a.ts", "v1"), file("/b.ts", "v1")]);
    let mut compilation = IncrementalCompilation::incremental(&old, &program, &HashSet::new());

    let b = file("/b.ts", "v1");
    compilation.record_analyzed(&b, vec!["/b.css".to_string()]);

    let state = compilation.state();
    assert!(state.was_analyzed("/a.ts"));
    assert!(state.was_analyzed("/b.ts"));
    assert_eq!(state.version_of("/b.ts"), Some("v1"));
    assert_eq!(
        state.resource_dependencies.get("/a.ts").unwrap(),
        &vec!["/a.html".to_string()]
    );
    assert_eq!(
        state.resource_dependencies.get("/b.ts").unwrap(),
        &vec!["/b.css".to_string()]
    );
}

#[test]
fn state_serializes_and_deserializes() {
    let mut state = analyzed_state(&[("/a.ts", "v1")]);
    state
        .resource_dependencies
        .insert("/a.ts".to_string(), vec!["/a.html".to_string()]);

    let json = serde_json::to_string(&state).unwrap();
    let restored: IncrementalState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, restored);
}

#[test]
fn tracked_strategy_round_trips_state_noop_drops_it() {
    let state = analyzed_state(&[("/a.ts", "v1")]);

    let tracked = TrackedIncrementalBuildStrategy::new();
    assert!(tracked.get_incremental_state().is_none());
    tracked.set_incremental_state(state.clone());
    assert_eq!(tracked.get_incremental_state(), Some(state.clone()));

    let noop = NoopIncrementalBuildStrategy;
    noop.set_incremental_state(state);
    assert!(noop.get_incremental_state().is_none());
}
