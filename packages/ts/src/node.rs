//! Declaration-level source model.
//!
//! Sources are lowered into this representation by a syntax adapter (the
//! compiler-cli ships an oxc-based one); tests construct it directly. The
//! analysis pipeline never sees the concrete parse tree.

use bitflags::bitflags;
use std::fmt;
use std::rc::Rc;

use crate::type_nodes::TypeNode;

/// Half-open span of text within a source file, in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    pub fn new(start: usize, length: usize) -> Self {
        TextSpan { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE = 0;
        const AMBIENT = 1 << 0;
        const SYNTHESIZED = 1 << 1;
        const EXPORT_DEFAULT = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Interface,
    Function,
    Variable,
    Enum,
}

impl DeclarationKind {
    /// Human-readable descriptor used in diagnostics.
    pub fn descriptor(&self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Function => "function",
            DeclarationKind::Variable => "variable",
            DeclarationKind::Enum => "enum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassMemberKind {
    Constructor,
    Getter,
    Setter,
    Property,
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassMemberAccessLevel {
    PublicWritable,
    PublicReadonly,
    Protected,
    Private,
}

/// A single `name: value` pair inside a decorator's object-literal argument.
/// The span points at the value expression so diagnostics can be attributed
/// to e.g. the `templateUrl` string rather than the whole decorator.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaProperty {
    pub name: String,
    pub value: MetaValue,
    pub span: TextSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Str(String),
    Bool(bool),
    Num(f64),
    Array(Vec<MetaValue>),
    Object(Vec<(String, MetaValue)>),
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Metadata extracted from an instance of a decorator on a declaration.
/// Angular decorators take a single object-literal argument; its properties
/// are stored flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorNode {
    pub name: String,
    pub properties: Vec<MetaProperty>,
    pub span: TextSpan,
}

impl DecoratorNode {
    pub fn new(name: impl Into<String>, span: TextSpan) -> Self {
        DecoratorNode {
            name: name.into(),
            properties: Vec::new(),
            span,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: MetaValue) -> Self {
        let span = self.span;
        self.properties.push(MetaProperty {
            name: name.into(),
            value,
            span,
        });
        self
    }

    pub fn with_property_at(
        mut self,
        name: impl Into<String>,
        value: MetaValue,
        span: TextSpan,
    ) -> Self {
        self.properties.push(MetaProperty {
            name: name.into(),
            value,
            span,
        });
        self
    }

    pub fn property(&self, name: &str) -> Option<&MetaProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNode {
    pub name: Option<String>,
    pub type_node: Option<TypeNode>,
    pub decorators: Vec<DecoratorNode>,
    pub span: TextSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub kind: ClassMemberKind,
    pub name: String,
    pub access_level: ClassMemberAccessLevel,
    pub is_static: bool,
    /// Property type, or method return type.
    pub type_node: Option<TypeNode>,
    /// Constructor and method parameters.
    pub parameters: Vec<ParameterNode>,
    pub decorators: Vec<DecoratorNode>,
    pub span: TextSpan,
}

impl ClassMember {
    pub fn property(name: impl Into<String>, type_node: TypeNode) -> Self {
        ClassMember {
            kind: ClassMemberKind::Property,
            name: name.into(),
            access_level: ClassMemberAccessLevel::PublicWritable,
            is_static: false,
            type_node: Some(type_node),
            parameters: Vec::new(),
            decorators: Vec::new(),
            span: TextSpan::default(),
        }
    }

    pub fn method(name: impl Into<String>, return_type: TypeNode) -> Self {
        ClassMember {
            kind: ClassMemberKind::Method,
            name: name.into(),
            access_level: ClassMemberAccessLevel::PublicWritable,
            is_static: false,
            type_node: Some(return_type),
            parameters: Vec::new(),
            decorators: Vec::new(),
            span: TextSpan::default(),
        }
    }

    pub fn constructor(parameters: Vec<ParameterNode>) -> Self {
        ClassMember {
            kind: ClassMemberKind::Constructor,
            name: "constructor".to_string(),
            access_level: ClassMemberAccessLevel::PublicWritable,
            is_static: false,
            type_node: None,
            parameters,
            decorators: Vec::new(),
            span: TextSpan::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<TypeNode>,
    pub span: TextSpan,
}

/// Identity of a declaration within one program snapshot: defining file plus
/// the offset of the declaration node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationId {
    pub file_name: String,
    pub offset: usize,
    pub name: String,
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.file_name)
    }
}

/// A class-like construct discovered during lowering. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    /// Absent for e.g. `export default class { }`.
    pub name: Option<String>,
    pub file_name: String,
    pub is_exported: bool,
    pub span: TextSpan,
    pub name_span: TextSpan,
    pub flags: NodeFlags,
    pub decorators: Vec<DecoratorNode>,
    pub members: Vec<ClassMember>,
    pub type_parameters: Vec<TypeParameter>,
    /// Base class identifier, when present.
    pub heritage: Option<String>,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Declaration {
            kind,
            name: Some(name.into()),
            file_name: file_name.into(),
            is_exported: false,
            span: TextSpan::default(),
            name_span: TextSpan::default(),
            flags: NodeFlags::NONE,
            decorators: Vec::new(),
            members: Vec::new(),
            type_parameters: Vec::new(),
            heritage: None,
        }
    }

    pub fn class(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Class, name, file_name)
    }

    pub fn interface(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Interface, name, file_name)
    }

    pub fn exported(mut self) -> Self {
        self.is_exported = true;
        self
    }

    pub fn at(mut self, span: TextSpan) -> Self {
        self.span = span;
        self.name_span = span;
        self
    }

    pub fn with_decorator(mut self, decorator: DecoratorNode) -> Self {
        self.decorators.push(decorator);
        self
    }

    pub fn with_member(mut self, member: ClassMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_type_parameter(mut self, name: impl Into<String>, constraint: Option<TypeNode>) -> Self {
        self.type_parameters.push(TypeParameter {
            name: name.into(),
            constraint,
            span: self.span,
        });
        self
    }

    pub fn id(&self) -> DeclarationId {
        DeclarationId {
            file_name: self.file_name.clone(),
            offset: self.span.start,
            name: self.name.clone().unwrap_or_else(|| "<anonymous>".to_string()),
        }
    }

    pub fn decorator(&self, name: &str) -> Option<&DecoratorNode> {
        self.decorators.iter().find(|d| d.name == name)
    }

    pub fn member(&self, name: &str) -> Option<&ClassMember> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn constructor_member(&self) -> Option<&ClassMember> {
        self.members
            .iter()
            .find(|m| m.kind == ClassMemberKind::Constructor)
    }
}

/// An export binding of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEntry {
    /// `export { local as exported }` within the same file.
    Named {
        exported_name: String,
        local_name: String,
    },
    /// `export { local as exported } from 'module'`.
    Reexport {
        exported_name: String,
        local_name: String,
        module: String,
    },
    /// `export * from 'module'`.
    Star { module: String },
}

/// A source file lowered to declaration granularity.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
    /// Content identity, used for incremental reuse decisions.
    pub version: String,
    pub is_declaration_file: bool,
    pub declarations: Vec<Rc<Declaration>>,
    pub exports: Vec<ExportEntry>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile {
            file_name: file_name.into(),
            text: text.into(),
            version: String::new(),
            is_declaration_file: false,
            declarations: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(Rc::new(declaration));
        self
    }

    pub fn with_export(mut self, export: ExportEntry) -> Self {
        self.exports.push(export);
        self
    }

    pub fn declaration(&self, name: &str) -> Option<&Rc<Declaration>> {
        self.declarations
            .iter()
            .find(|d| d.name.as_deref() == Some(name))
    }
}
