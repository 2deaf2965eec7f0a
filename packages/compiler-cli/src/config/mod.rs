pub mod project;

pub use project::{load_project_config, ProjectConfig};
