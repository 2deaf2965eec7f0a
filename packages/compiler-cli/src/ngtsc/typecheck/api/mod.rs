pub mod api;
pub mod checker;

pub use api::{InliningMode, TcbLocation, TemplateId, TemplateSourceMapping, TypeCheckingConfig};
pub use checker::TemplateTypeChecker;
