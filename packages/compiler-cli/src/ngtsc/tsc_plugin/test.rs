use super::src::host::SimplePluginCompilerHost;
use super::src::plugin::NgTscPlugin;
use crate::ngtsc::core::NgCompilerOptions;
use crate::ngtsc::file_system::testing::MockFileSystem;
use crate::ngtsc::file_system::AbsoluteFsPath;

fn host_fixture(fs: &MockFileSystem) -> SimplePluginCompilerHost<'_> {
    SimplePluginCompilerHost::new(
        fs,
        vec![AbsoluteFsPath::new("/app/cmp.ts".to_string())],
        AbsoluteFsPath::new("/app".to_string()),
    )
}

fn component_fs() -> MockFileSystem {
    MockFileSystem::init(&[(
        "/app/cmp.ts",
        r#"
import {Component} from '@angular/core';

@Component({
  selector: 'app-cmp',
  template: '<div>{{title}}</div>',
})
export class Cmp {
  title: string;
}
"#,
    )])
}

#[test]
fn setup_compilation_reports_scaffolding_files() {
    let fs = component_fs();
    let host = host_fixture(&fs);
    let mut plugin = NgTscPlugin::new(NgCompilerOptions::default());

    let setup = plugin.setup_compilation(&host);
    assert!(setup
        .ignore_for_diagnostics
        .contains("/app/cmp.ngtypecheck.ts"));
    assert!(setup.ignore_for_emit.contains("/app/cmp.ngtypecheck.ts"));

    assert!(plugin.get_diagnostics(None).is_empty());
    assert!(plugin.get_option_diagnostics().is_empty());
    assert_eq!(plugin.get_next_program().len(), 1);
    let _ = plugin.create_transformers();
}

#[test]
fn per_file_diagnostics_are_scoped() {
    let fs = MockFileSystem::init(&[(
        "/app/cmp.ts",
        r#"
import {Component} from '@angular/core';

@Component({
  selector: 'app-cmp',
  template: '<div>{{missing}}</div>',
})
export class Cmp {}
"#,
    )]);
    let host = host_fixture(&fs);
    let mut plugin = NgTscPlugin::new(NgCompilerOptions::default());
    plugin.setup_compilation(&host);

    assert_eq!(plugin.get_diagnostics(Some("/app/cmp.ts")).len(), 1);
    assert!(plugin.get_diagnostics(Some("/app/unrelated.ts")).is_empty());
}

#[test]
#[should_panic(expected = "lifecycle error")]
fn diagnostics_before_setup_is_a_lifecycle_error() {
    let plugin = NgTscPlugin::new(NgCompilerOptions::default());
    plugin.get_diagnostics(None);
}

#[test]
fn missing_entry_point_is_an_option_diagnostic() {
    let fs = component_fs();
    let host = host_fixture(&fs);
    let mut plugin = NgTscPlugin::new(NgCompilerOptions {
        entry_point: Some("/app/index.ts".to_string()),
        ..NgCompilerOptions::default()
    });
    plugin.setup_compilation(&host);
    assert_eq!(plugin.get_option_diagnostics().len(), 1);
}
