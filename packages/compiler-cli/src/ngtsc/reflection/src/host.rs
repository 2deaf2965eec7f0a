//! Reflection host abstraction.
//!
//! The analysis pipeline queries declarations exclusively through this
//! trait, so the same logic runs against freshly lowered sources and
//! pre-built declaration tables alike. Missing information is reported as
//! `None`/empty; passing a node of the wrong kind is a caller bug and
//! panics.

use std::rc::Rc;
use ts::{ClassMember, Declaration, DeclarationKind, DecoratorNode, ParameterNode};

pub trait ReflectionHost {
    /// Decorators applied to a declaration; empty when undecorated.
    fn get_decorators_of_declaration<'a>(&self, declaration: &'a Declaration) -> &'a [DecoratorNode];

    /// Members of a class-like declaration.
    ///
    /// Panics if `clazz` is not a class or interface.
    fn get_members_of_class<'a>(&self, clazz: &'a Declaration) -> &'a [ClassMember];

    /// Constructor parameters, or `None` when the class declares no
    /// explicit constructor.
    fn get_constructor_parameters<'a>(
        &self,
        clazz: &'a Declaration,
    ) -> Option<&'a [ParameterNode]>;

    fn is_class(&self, node: &Declaration) -> bool;

    fn has_base_class(&self, clazz: &Declaration) -> bool;

    fn get_base_class_identifier(&self, clazz: &Declaration) -> Option<String>;

    fn get_generic_arity_of_class(&self, clazz: &Declaration) -> Option<usize>;

    fn is_statically_exported(&self, decl: &Declaration) -> bool;

    /// De-aliased exports of a module, or `None` when the file is not part
    /// of the current program.
    fn get_exports_of_module(&self, file_name: &str) -> Option<Vec<Rc<Declaration>>>;
}

pub(super) fn assert_class_like(clazz: &Declaration) {
    if !matches!(
        clazz.kind,
        DeclarationKind::Class | DeclarationKind::Interface
    ) {
        panic!(
            "Reflection host contract violation: expected a class-like declaration, got {} {}",
            clazz.kind.descriptor(),
            clazz.name.as_deref().unwrap_or("<anonymous>")
        );
    }
}
