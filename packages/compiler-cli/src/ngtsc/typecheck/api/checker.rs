//! Public interface of the template type checker.

use std::rc::Rc;

use super::api::{TcbLocation, TemplateSourceMapping};
use crate::ngtsc::typecheck::src::checker::TypeCheckProgram;
use crate::ngtsc::typecheck::src::type_check_block::TypeCheckBlock;
use angular_compiler::expression_parser::ast::AbsoluteSourceSpan;
use ts::{DeclarationId, Diagnostic, SourceFile};

pub trait TemplateTypeChecker {
    /// The generated type-checking fragment for `component`, or `None` if
    /// generation was not applicable (no template, or blocked by an
    /// inlining requirement).
    fn get_type_check_block(&self, component: &DeclarationId) -> Option<Rc<TypeCheckBlock>>;

    /// All template diagnostics for the components declared in `sf`.
    ///
    /// Every component analyzed in the same logical batch shares one
    /// synthetic program; see `type_check_program`.
    fn get_diagnostics_for_file(&self, sf: &SourceFile) -> Vec<Diagnostic>;

    /// Maps a position inside generated type-checking code back to the
    /// template source span it was generated from. `None` for positions in
    /// compiler-generated boilerplate.
    fn get_template_mapping_at_tcb_location(
        &self,
        location: &TcbLocation,
    ) -> Option<(TemplateSourceMapping, AbsoluteSourceSpan)>;

    /// The synthetic program shared by the current batch. Callers may
    /// compare snapshots by `Rc` identity.
    fn type_check_program(&self) -> Rc<TypeCheckProgram>;
}
