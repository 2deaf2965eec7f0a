//! A structural type checker over the declaration model.
//!
//! This is not a full host-language checker; it covers the surface the
//! template type-checking engine relies on: member lookup on class-like
//! declarations, keyword/reference types, simple assignability, and
//! de-aliased export resolution for entry-point analysis.

use crate::node::{ClassMemberKind, Declaration, ExportEntry, SourceFile};
use crate::program::Program;
use crate::type_nodes::{TypeKeyword, TypeNode};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Resolved (non-syntactic) type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Any,
    Unknown,
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Void,
    Never,
    Reference { name: String, args: Vec<Type> },
}

impl Type {
    pub fn from_type_node(node: &TypeNode) -> Type {
        match node {
            TypeNode::Keyword(k) => match k.keyword {
                TypeKeyword::Any => Type::Any,
                TypeKeyword::Unknown => Type::Unknown,
                TypeKeyword::String => Type::String,
                TypeKeyword::Number => Type::Number,
                TypeKeyword::Boolean => Type::Boolean,
                TypeKeyword::Void => Type::Void,
                TypeKeyword::Null => Type::Null,
                TypeKeyword::Undefined => Type::Undefined,
                TypeKeyword::Never => Type::Never,
                TypeKeyword::Object => Type::Reference {
                    name: "object".to_string(),
                    args: Vec::new(),
                },
            },
            TypeNode::Reference(r) => Type::Reference {
                name: r.name.clone(),
                args: r.type_args.iter().map(Type::from_type_node).collect(),
            },
            TypeNode::Import(i) => Type::Reference {
                name: i.qualifier.clone(),
                args: i.type_args.iter().map(Type::from_type_node).collect(),
            },
            TypeNode::Literal(l) => {
                let text = l.text.trim();
                if text.starts_with('\'') || text.starts_with('"') {
                    Type::String
                } else if text == "true" || text == "false" {
                    Type::Boolean
                } else if text.parse::<f64>().is_ok() {
                    Type::Number
                } else {
                    Type::Any
                }
            }
        }
    }

    /// Structural assignability: `any`/`unknown` absorb everything, `any`
    /// is assignable everywhere, otherwise kinds must agree.
    pub fn is_assignable_to(&self, target: &Type) -> bool {
        match (self, target) {
            (Type::Any, _) | (_, Type::Any) | (_, Type::Unknown) => true,
            (Type::Never, _) => true,
            (Type::Reference { name: a, .. }, Type::Reference { name: b, .. }) => a == b,
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => write!(f, "any"),
            Type::Unknown => write!(f, "unknown"),
            Type::String => write!(f, "string"),
            Type::Number => write!(f, "number"),
            Type::Boolean => write!(f, "boolean"),
            Type::Null => write!(f, "null"),
            Type::Undefined => write!(f, "undefined"),
            Type::Void => write!(f, "void"),
            Type::Never => write!(f, "never"),
            Type::Reference { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
        }
    }
}

/// Export-resolution and member-typing queries over one program snapshot.
#[derive(Debug)]
pub struct TypeChecker {
    program: Rc<Program>,
}

impl TypeChecker {
    pub fn new(program: Rc<Program>) -> Self {
        TypeChecker { program }
    }

    pub fn program(&self) -> &Rc<Program> {
        &self.program
    }

    /// All declarations reachable by importing `file_name`, with re-export
    /// aliases resolved back to the declarations they name.
    pub fn get_exports_of_module(&self, file_name: &str) -> Vec<Rc<Declaration>> {
        let mut seen_files = HashSet::new();
        let mut out = Vec::new();
        let mut seen_decls = HashSet::new();
        self.collect_exports(file_name, &mut seen_files, &mut seen_decls, &mut out);
        out
    }

    fn collect_exports(
        &self,
        file_name: &str,
        seen_files: &mut HashSet<String>,
        seen_decls: &mut HashSet<crate::node::DeclarationId>,
        out: &mut Vec<Rc<Declaration>>,
    ) {
        if !seen_files.insert(file_name.to_string()) {
            return;
        }
        let Some(sf) = self.program.get_source_file(file_name) else {
            return;
        };
        for decl in &sf.declarations {
            if decl.is_exported && seen_decls.insert(decl.id()) {
                out.push(Rc::clone(decl));
            }
        }
        for entry in &sf.exports {
            match entry {
                ExportEntry::Named { local_name, .. } => {
                    if let Some(decl) = sf.declaration(local_name) {
                        if seen_decls.insert(decl.id()) {
                            out.push(Rc::clone(decl));
                        }
                    }
                }
                ExportEntry::Reexport {
                    local_name, module, ..
                } => {
                    if let Some(decl) = self.resolve_export(module, local_name, &mut HashSet::new())
                    {
                        if seen_decls.insert(decl.id()) {
                            out.push(decl);
                        }
                    }
                }
                ExportEntry::Star { module } => {
                    self.collect_exports(module, seen_files, seen_decls, out);
                }
            }
        }
    }

    /// Resolve the declaration behind `exported_name` in `file_name`,
    /// following aliases through re-export chains.
    pub fn resolve_export(
        &self,
        file_name: &str,
        exported_name: &str,
        visiting: &mut HashSet<String>,
    ) -> Option<Rc<Declaration>> {
        if !visiting.insert(file_name.to_string()) {
            return None;
        }
        let sf = self.program.get_source_file(file_name)?;
        if let Some(decl) = sf.declaration(exported_name) {
            if decl.is_exported {
                return Some(Rc::clone(decl));
            }
        }
        for entry in &sf.exports {
            match entry {
                ExportEntry::Named {
                    exported_name: en,
                    local_name,
                } if en == exported_name => {
                    return sf.declaration(local_name).map(Rc::clone);
                }
                ExportEntry::Reexport {
                    exported_name: en,
                    local_name,
                    module,
                } if en == exported_name => {
                    return self.resolve_export(module, local_name, visiting);
                }
                ExportEntry::Star { module } => {
                    if let Some(found) = self.resolve_export(module, exported_name, visiting) {
                        return Some(found);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Find a declaration by name anywhere in the program.
    pub fn find_declaration(&self, name: &str) -> Option<Rc<Declaration>> {
        for sf in self.program.source_files() {
            if let Some(decl) = sf.declaration(name) {
                return Some(Rc::clone(decl));
            }
        }
        None
    }

    /// Type of a named member of a class-like declaration. Methods yield
    /// their return type. `None` when the member does not exist.
    pub fn get_type_of_member(&self, decl: &Declaration, member: &str) -> Option<Type> {
        let m = decl.member(member)?;
        if m.kind == ClassMemberKind::Constructor {
            return None;
        }
        Some(
            m.type_node
                .as_ref()
                .map(Type::from_type_node)
                .unwrap_or(Type::Any),
        )
    }

    pub fn source_file_of(&self, decl: &Declaration) -> Option<&Rc<SourceFile>> {
        self.program.get_source_file(&decl.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Declaration, ExportEntry, SourceFile};
    use crate::type_nodes::TypeNode;

    fn entry_point_program() -> Program {
        let internal = SourceFile::new("/internal.ts", "")
            .with_declaration(Declaration::class("HiddenDir", "/internal.ts"))
            .with_declaration(Declaration::class("PublicDir", "/internal.ts").exported());
        let index = SourceFile::new("/index.ts", "")
            .with_export(ExportEntry::Reexport {
                exported_name: "RenamedDir".to_string(),
                local_name: "PublicDir".to_string(),
                module: "/internal.ts".to_string(),
            })
            .with_declaration(Declaration::class("Entry", "/index.ts").exported());
        Program::new(vec![internal, index])
    }

    #[test]
    fn resolves_aliased_reexports_to_original_declaration() {
        let checker = TypeChecker::new(Rc::new(entry_point_program()));
        let exports = checker.get_exports_of_module("/index.ts");
        let names: Vec<_> = exports.iter().map(|d| d.name.clone().unwrap()).collect();
        assert!(names.contains(&"Entry".to_string()));
        // The alias resolves back to the declaration named PublicDir.
        assert!(names.contains(&"PublicDir".to_string()));
        assert!(!names.contains(&"RenamedDir".to_string()));
    }

    #[test]
    fn member_types_resolve_through_type_nodes() {
        let decl = Declaration::class("Cmp", "/cmp.ts")
            .with_member(crate::node::ClassMember::property(
                "title",
                TypeNode::keyword(crate::type_nodes::TypeKeyword::String),
            ));
        let checker = TypeChecker::new(Rc::new(Program::new(vec![])));
        assert_eq!(checker.get_type_of_member(&decl, "title"), Some(Type::String));
        assert_eq!(checker.get_type_of_member(&decl, "missing"), None);
    }
}
