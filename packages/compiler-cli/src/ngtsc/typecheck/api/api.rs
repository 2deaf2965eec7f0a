//! Template type-checking API types.

use crate::ngtsc::diagnostics::DiagnosticNode;

/// Configuration of the template type-checking engine.
#[derive(Debug, Clone)]
pub struct TypeCheckingConfig {
    /// Whether expressions in input bindings and interpolations are
    /// checked against the component's type.
    pub check_type_of_input_bindings: bool,
    /// Whether embedded template bodies (`<ng-template>`, structural
    /// shorthand) are checked.
    pub check_template_bodies: bool,
    /// How TCBs for unexported classes are handled.
    pub inlining: InliningMode,
}

impl Default for TypeCheckingConfig {
    fn default() -> Self {
        TypeCheckingConfig {
            check_type_of_input_bindings: true,
            check_template_bodies: true,
            inlining: InliningMode::Inline,
        }
    }
}

/// How a type-checking environment handles operations which require
/// inlining code into user files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InliningMode {
    /// Inline operations are supported.
    Inline,
    /// Inline operations are not supported; requiring one is an error with
    /// a specific diagnostic code.
    Error,
}

/// Identity of one checked template within its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(pub u32);

/// How positions inside a template's text map back to user source.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSourceMapping {
    /// The template is inline in the component source; template offsets
    /// are relative to `base_offset` within that file.
    Direct {
        file_name: String,
        base_offset: usize,
    },
    /// The template lives in its own file; template offsets are file
    /// offsets. The component node is kept for secondary attribution.
    External {
        template_url: String,
        component: DiagnosticNode,
    },
}

impl TemplateSourceMapping {
    /// The (file, offset) a template-relative offset corresponds to.
    pub fn to_source_position(&self, template_offset: usize) -> (String, usize) {
        match self {
            TemplateSourceMapping::Direct {
                file_name,
                base_offset,
            } => (file_name.clone(), base_offset + template_offset),
            TemplateSourceMapping::External { template_url, .. } => {
                (template_url.clone(), template_offset)
            }
        }
    }
}

/// A position inside generated type-checking code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcbLocation {
    pub tcb_file_name: String,
    pub position: usize,
}

/// Everything the type checker needs to know about one component's
/// template: the parsed nodes, how template offsets map to user source,
/// and the directives the component uses.
#[derive(Debug, Clone)]
pub struct CheckableTemplate {
    pub nodes: Vec<angular_compiler::render3::r3_ast::R3Node>,
    pub mapping: TemplateSourceMapping,
    pub directives: Vec<std::rc::Rc<ts::Declaration>>,
}
