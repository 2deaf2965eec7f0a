//! Project configuration file (`angular.json`-style) read by `ngc`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::ngtsc::core::NgCompilerOptions;
use ts::DiagnosticCategory;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub source_root: Option<String>,
    /// Source file globs, relative to the config file.
    pub files: Option<Vec<String>>,
    pub entry_point: Option<String>,
    pub angular_compiler_options: Option<AngularCompilerOptionsConfig>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AngularCompilerOptionsConfig {
    pub strict_templates: Option<bool>,
    pub check_template_bodies: Option<bool>,
    pub preserve_whitespaces: Option<bool>,
    /// Per-check severity: `"error"`, `"warning"`, or `"suppress"`.
    pub extended_diagnostics: Option<HashMap<String, String>>,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ProjectConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn to_compiler_options(&self) -> NgCompilerOptions {
        let mut options = NgCompilerOptions {
            entry_point: self.entry_point.clone(),
            ..NgCompilerOptions::default()
        };
        if let Some(ng) = &self.angular_compiler_options {
            if let Some(strict) = ng.strict_templates {
                options.strict_templates = strict;
            }
            if let Some(bodies) = ng.check_template_bodies {
                options.check_template_bodies = bodies;
            }
            if let Some(preserve) = ng.preserve_whitespaces {
                options.preserve_whitespaces = preserve;
            }
            if let Some(extended) = &ng.extended_diagnostics {
                for (name, severity) in extended {
                    let category = match severity.as_str() {
                        "error" => DiagnosticCategory::Error,
                        "warning" => DiagnosticCategory::Warning,
                        _ => DiagnosticCategory::Suggestion,
                    };
                    options.extended_diagnostics.insert(name.clone(), category);
                }
            }
        }
        options
    }
}

pub fn load_project_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    ProjectConfig::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_config() {
        let json = r#"{
            "sourceRoot": "src",
            "files": ["src/**/*.ts"],
            "entryPoint": "src/index.ts",
            "angularCompilerOptions": {
                "strictTemplates": false,
                "extendedDiagnostics": {"invalidBananaInBox": "error"}
            }
        }"#;
        let config: ProjectConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.source_root.as_deref(), Some("src"));

        let options = config.to_compiler_options();
        assert!(!options.strict_templates);
        assert_eq!(
            options.extended_diagnostics.get("invalidBananaInBox"),
            Some(&DiagnosticCategory::Error)
        );
        assert_eq!(options.entry_point.as_deref(), Some("src/index.ts"));
    }
}
