//! Template type checker implementation.
//!
//! Owns the registered templates for one program snapshot and builds the
//! synthetic type-check program lazily, exactly once: every diagnostic
//! request in the same batch observes the identical program object.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use angular_compiler::expression_parser::ast::AbsoluteSourceSpan;

use super::super::api::api::{
    CheckableTemplate, TcbLocation, TemplateSourceMapping, TypeCheckingConfig,
};
use super::super::api::checker::TemplateTypeChecker;
use super::context::TypeCheckContext;
pub use super::context::{TypeCheckFile, TypeCheckProgram};
use super::type_check_block::TypeCheckBlock;
use ts::{sort_diagnostics, Declaration, DeclarationId, Diagnostic, Program, SourceFile, TypeChecker};

struct CheckState {
    program: Rc<TypeCheckProgram>,
    diagnostics_by_file: IndexMap<String, Vec<Diagnostic>>,
}

pub struct TemplateTypeCheckerImpl {
    checker: TypeChecker,
    config: TypeCheckingConfig,
    pipes: HashMap<String, Rc<Declaration>>,
    templates: IndexMap<DeclarationId, (Rc<Declaration>, CheckableTemplate)>,
    state: RefCell<Option<Rc<CheckState>>>,
}

impl TemplateTypeCheckerImpl {
    pub fn new(
        program: Rc<Program>,
        config: TypeCheckingConfig,
        pipes: HashMap<String, Rc<Declaration>>,
    ) -> Self {
        TemplateTypeCheckerImpl {
            checker: TypeChecker::new(program),
            config,
            pipes,
            templates: IndexMap::new(),
            state: RefCell::new(None),
        }
    }

    /// Register a component's template. Must happen before the first
    /// diagnostic request of the batch.
    pub fn register_template(&mut self, component: &Rc<Declaration>, template: CheckableTemplate) {
        self.templates
            .insert(component.id(), (Rc::clone(component), template));
        // Registration invalidates any previously built batch.
        *self.state.borrow_mut() = None;
    }

    fn ensure_checked(&self) -> Rc<CheckState> {
        if let Some(state) = self.state.borrow().as_ref() {
            return Rc::clone(state);
        }
        let mut context = TypeCheckContext::new(&self.config, &self.checker, &self.pipes);
        for (component, template) in self.templates.values() {
            context.add_template(component, template);
        }
        let (program, diagnostics_by_file) = context.finalize();
        let state = Rc::new(CheckState {
            program: Rc::new(program),
            diagnostics_by_file,
        });
        *self.state.borrow_mut() = Some(Rc::clone(&state));
        state
    }
}

impl TemplateTypeChecker for TemplateTypeCheckerImpl {
    fn get_type_check_block(&self, component: &DeclarationId) -> Option<Rc<TypeCheckBlock>> {
        let state = self.ensure_checked();
        for file in state.program.files.values() {
            if let Some(block) = file.tcbs.get(component) {
                return Some(Rc::clone(block));
            }
        }
        None
    }

    fn get_diagnostics_for_file(&self, sf: &SourceFile) -> Vec<Diagnostic> {
        let state = self.ensure_checked();
        let mut diagnostics = state
            .diagnostics_by_file
            .get(&sf.file_name)
            .cloned()
            .unwrap_or_default();
        sort_diagnostics(&mut diagnostics);
        diagnostics
    }

    fn get_template_mapping_at_tcb_location(
        &self,
        location: &TcbLocation,
    ) -> Option<(TemplateSourceMapping, AbsoluteSourceSpan)> {
        let state = self.ensure_checked();
        state.program.template_mapping_at(location)
    }

    fn type_check_program(&self) -> Rc<TypeCheckProgram> {
        Rc::clone(&self.ensure_checked().program)
    }
}
