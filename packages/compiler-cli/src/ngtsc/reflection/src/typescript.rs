//! TypeScript syntax adapter.
//!
//! Lowers parsed TypeScript sources into the `ts` crate's declaration
//! model, and implements `ReflectionHost` over a lowered program. This is
//! the only place (besides the import scanner) that touches the concrete
//! parse tree.

use oxc_allocator::Allocator;
use oxc_ast::ast as oxc;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};
use std::rc::Rc;

use super::host::{assert_class_like, ReflectionHost};
use ts::{
    ClassMember, ClassMemberAccessLevel, ClassMemberKind, Declaration, DeclarationKind,
    DecoratorNode, ExportEntry, MetaProperty, MetaValue, ParameterNode, Program, SourceFile,
    TextSpan, TypeChecker, TypeKeyword, TypeNode, TypeParameter,
};

/// `ReflectionHost` over a lowered program.
pub struct TsReflectionHost {
    checker: TypeChecker,
}

impl TsReflectionHost {
    pub fn new(program: Rc<Program>) -> Self {
        TsReflectionHost {
            checker: TypeChecker::new(program),
        }
    }
}

impl ReflectionHost for TsReflectionHost {
    fn get_decorators_of_declaration<'a>(&self, declaration: &'a Declaration) -> &'a [DecoratorNode] {
        &declaration.decorators
    }

    fn get_members_of_class<'a>(&self, clazz: &'a Declaration) -> &'a [ClassMember] {
        assert_class_like(clazz);
        &clazz.members
    }

    fn get_constructor_parameters<'a>(
        &self,
        clazz: &'a Declaration,
    ) -> Option<&'a [ParameterNode]> {
        assert_class_like(clazz);
        clazz
            .constructor_member()
            .map(|ctor| ctor.parameters.as_slice())
    }

    fn is_class(&self, node: &Declaration) -> bool {
        node.kind == DeclarationKind::Class
    }

    fn has_base_class(&self, clazz: &Declaration) -> bool {
        clazz.heritage.is_some()
    }

    fn get_base_class_identifier(&self, clazz: &Declaration) -> Option<String> {
        clazz.heritage.clone()
    }

    fn get_generic_arity_of_class(&self, clazz: &Declaration) -> Option<usize> {
        if clazz.kind != DeclarationKind::Class {
            return None;
        }
        Some(clazz.type_parameters.len())
    }

    fn is_statically_exported(&self, decl: &Declaration) -> bool {
        decl.is_exported
    }

    fn get_exports_of_module(&self, file_name: &str) -> Option<Vec<Rc<Declaration>>> {
        self.checker.program().get_source_file(file_name)?;
        Some(self.checker.get_exports_of_module(file_name))
    }
}

/// Parses `text` and lowers it to declaration granularity.
pub fn lower_source_file(text: &str, file_name: &str) -> SourceFile {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(file_name)
        .unwrap_or_default()
        .with_typescript(true);
    let ret = Parser::new(&allocator, text, source_type).parse();

    let lowering = Lowering { text, file_name };
    let mut sf = SourceFile::new(file_name, text);
    sf.is_declaration_file = file_name.ends_with(".d.ts");

    for stmt in &ret.program.body {
        match stmt {
            oxc::Statement::ExportNamedDeclaration(export) => {
                if let Some(decl) = &export.declaration {
                    if let Some(lowered) = lowering.lower_declaration(decl, true) {
                        sf.declarations.push(Rc::new(lowered));
                    }
                } else {
                    let module = export
                        .source
                        .as_ref()
                        .map(|s| lowering.resolve_specifier(&s.value));
                    for spec in &export.specifiers {
                        let local_name = module_export_name(&spec.local);
                        let exported_name = module_export_name(&spec.exported);
                        sf.exports.push(match &module {
                            Some(module) => ExportEntry::Reexport {
                                exported_name,
                                local_name,
                                module: module.clone(),
                            },
                            None => ExportEntry::Named {
                                exported_name,
                                local_name,
                            },
                        });
                    }
                }
            }
            oxc::Statement::ExportAllDeclaration(export) => {
                if export.export_kind.is_value() {
                    sf.exports.push(ExportEntry::Star {
                        module: lowering.resolve_specifier(&export.source.value),
                    });
                }
            }
            oxc::Statement::ClassDeclaration(class) => {
                sf.declarations.push(Rc::new(lowering.lower_class(class, false)));
            }
            oxc::Statement::TSInterfaceDeclaration(iface) => {
                sf.declarations
                    .push(Rc::new(lowering.lower_interface(iface, false)));
            }
            oxc::Statement::FunctionDeclaration(func) => {
                if let Some(lowered) = lowering.lower_function(func, false) {
                    sf.declarations.push(Rc::new(lowered));
                }
            }
            oxc::Statement::TSEnumDeclaration(en) => {
                sf.declarations.push(Rc::new(lowering.lower_enum(en, false)));
            }
            oxc::Statement::VariableDeclaration(var) => {
                if let Some(lowered) = lowering.lower_variable(var, false) {
                    sf.declarations.push(Rc::new(lowered));
                }
            }
            _ => {}
        }
    }
    sf
}

fn module_export_name(name: &oxc::ModuleExportName) -> String {
    match name {
        oxc::ModuleExportName::IdentifierName(n) => n.name.to_string(),
        oxc::ModuleExportName::IdentifierReference(n) => n.name.to_string(),
        oxc::ModuleExportName::StringLiteral(s) => s.value.to_string(),
    }
}

struct Lowering<'a> {
    text: &'a str,
    file_name: &'a str,
}

impl<'a> Lowering<'a> {
    fn span(&self, span: oxc_span::Span) -> TextSpan {
        TextSpan::new(span.start as usize, (span.end - span.start) as usize)
    }

    /// Basic relative resolution: `./x` imports `x.ts` next to the
    /// importing file. Non-relative specifiers are kept verbatim.
    fn resolve_specifier(&self, specifier: &str) -> String {
        if !specifier.starts_with('.') {
            return specifier.to_string();
        }
        let dir = match self.file_name.rfind('/') {
            Some(i) => &self.file_name[..i],
            None => "",
        };
        let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
        for part in specifier.split('/') {
            match part {
                "." | "" => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        let joined = format!("/{}", segments.join("/"));
        if joined.ends_with(".ts") {
            joined
        } else {
            format!("{}.ts", joined)
        }
    }

    fn lower_declaration(
        &self,
        decl: &oxc::Declaration<'a>,
        exported: bool,
    ) -> Option<Declaration> {
        match decl {
            oxc::Declaration::ClassDeclaration(class) => Some(self.lower_class(class, exported)),
            oxc::Declaration::TSInterfaceDeclaration(iface) => {
                Some(self.lower_interface(iface, exported))
            }
            oxc::Declaration::FunctionDeclaration(func) => self.lower_function(func, exported),
            oxc::Declaration::TSEnumDeclaration(en) => Some(self.lower_enum(en, exported)),
            oxc::Declaration::VariableDeclaration(var) => self.lower_variable(var, exported),
            _ => None,
        }
    }

    fn lower_interface(
        &self,
        iface: &oxc::TSInterfaceDeclaration<'a>,
        exported: bool,
    ) -> Declaration {
        let mut lowered = Declaration::new(
            DeclarationKind::Interface,
            iface.id.name.to_string(),
            self.file_name,
        );
        lowered.is_exported = exported;
        lowered.span = self.span(iface.span);
        lowered.name_span = self.span(iface.id.span);
        if let Some(type_params) = &iface.type_parameters {
            for param in &type_params.params {
                lowered.type_parameters.push(TypeParameter {
                    name: param.name.name.to_string(),
                    constraint: param.constraint.as_ref().map(|c| self.lower_type(c)),
                    span: self.span(param.span),
                });
            }
        }
        lowered
    }

    fn lower_function(&self, func: &oxc::Function<'a>, exported: bool) -> Option<Declaration> {
        let id = func.id.as_ref()?;
        let mut lowered =
            Declaration::new(DeclarationKind::Function, id.name.to_string(), self.file_name);
        lowered.is_exported = exported;
        lowered.span = self.span(func.span);
        lowered.name_span = self.span(id.span);
        Some(lowered)
    }

    fn lower_enum(&self, en: &oxc::TSEnumDeclaration<'a>, exported: bool) -> Declaration {
        let mut lowered = Declaration::new(
            DeclarationKind::Enum,
            en.id.name.to_string(),
            self.file_name,
        );
        lowered.is_exported = exported;
        lowered.span = self.span(en.span);
        lowered.name_span = self.span(en.id.span);
        lowered
    }

    fn lower_variable(
        &self,
        var: &oxc::VariableDeclaration<'a>,
        exported: bool,
    ) -> Option<Declaration> {
        // Only the first declarator is modeled; multi-declarator statements
        // are rare in component sources.
        let declarator = var.declarations.first()?;
        let name = match &declarator.id.kind {
            oxc::BindingPatternKind::BindingIdentifier(id) => id.name.to_string(),
            _ => return None,
        };
        let mut lowered = Declaration::new(DeclarationKind::Variable, name, self.file_name);
        lowered.is_exported = exported;
        lowered.span = self.span(var.span);
        Some(lowered)
    }

    fn lower_class(&self, class: &oxc::Class<'a>, exported: bool) -> Declaration {
        let name = class
            .id
            .as_ref()
            .map(|id| id.name.to_string())
            .unwrap_or_default();
        let mut lowered = Declaration::new(DeclarationKind::Class, name, self.file_name);
        if class.id.is_none() {
            lowered.name = None;
        }
        lowered.is_exported = exported;
        lowered.span = self.span(class.span);
        if let Some(id) = &class.id {
            lowered.name_span = self.span(id.span);
        }
        lowered.decorators = self.lower_decorators(&class.decorators);

        if let Some(type_params) = &class.type_parameters {
            for param in &type_params.params {
                lowered.type_parameters.push(TypeParameter {
                    name: param.name.name.to_string(),
                    constraint: param.constraint.as_ref().map(|c| self.lower_type(c)),
                    span: self.span(param.span),
                });
            }
        }

        if let Some(oxc::Expression::Identifier(base)) = &class.super_class {
            lowered.heritage = Some(base.name.to_string());
        }

        for element in &class.body.body {
            match element {
                oxc::ClassElement::MethodDefinition(method) => {
                    let name = property_key_name(&method.key);
                    let kind = match method.kind {
                        oxc::MethodDefinitionKind::Constructor => ClassMemberKind::Constructor,
                        oxc::MethodDefinitionKind::Method => ClassMemberKind::Method,
                        oxc::MethodDefinitionKind::Get => ClassMemberKind::Getter,
                        oxc::MethodDefinitionKind::Set => ClassMemberKind::Setter,
                    };
                    let mut parameters = Vec::new();
                    for param in &method.value.params.items {
                        parameters.push(ParameterNode {
                            name: match &param.pattern.kind {
                                oxc::BindingPatternKind::BindingIdentifier(id) => {
                                    Some(id.name.to_string())
                                }
                                _ => None,
                            },
                            type_node: param
                                .pattern
                                .type_annotation
                                .as_ref()
                                .map(|t| self.lower_type(&t.type_annotation)),
                            decorators: self.lower_decorators(&param.decorators),
                            span: self.span(param.span),
                        });
                    }
                    lowered.members.push(ClassMember {
                        kind,
                        name,
                        access_level: accessibility_of(method.accessibility, false),
                        is_static: method.r#static,
                        type_node: method
                            .value
                            .return_type
                            .as_ref()
                            .map(|t| self.lower_type(&t.type_annotation)),
                        parameters,
                        decorators: self.lower_decorators(&method.decorators),
                        span: self.span(method.span),
                    });
                }
                oxc::ClassElement::PropertyDefinition(prop) => {
                    lowered.members.push(ClassMember {
                        kind: ClassMemberKind::Property,
                        name: property_key_name(&prop.key),
                        access_level: accessibility_of(prop.accessibility, prop.readonly),
                        is_static: prop.r#static,
                        type_node: prop
                            .type_annotation
                            .as_ref()
                            .map(|t| self.lower_type(&t.type_annotation)),
                        parameters: Vec::new(),
                        decorators: self.lower_decorators(&prop.decorators),
                        span: self.span(prop.span),
                    });
                }
                _ => {}
            }
        }
        lowered
    }

    fn lower_decorators(&self, decorators: &[oxc::Decorator<'a>]) -> Vec<DecoratorNode> {
        let mut lowered = Vec::new();
        for decorator in decorators {
            match &decorator.expression {
                oxc::Expression::CallExpression(call) => {
                    let name = match &call.callee {
                        oxc::Expression::Identifier(ident) => ident.name.to_string(),
                        _ => continue,
                    };
                    let mut node = DecoratorNode::new(name, self.span(decorator.span));
                    // Angular decorators take a single object-literal
                    // argument; its properties are flattened.
                    if let Some(oxc::Expression::ObjectExpression(obj)) =
                        call.arguments.first().and_then(|arg| arg.as_expression())
                    {
                        for property in &obj.properties {
                            if let oxc::ObjectPropertyKind::ObjectProperty(p) = property {
                                if let Some(value) = self.lower_meta_value(&p.value) {
                                    node.properties.push(MetaProperty {
                                        name: property_key_name(&p.key),
                                        value,
                                        span: self.span(p.value.span()),
                                    });
                                }
                            }
                        }
                    }
                    lowered.push(node);
                }
                oxc::Expression::Identifier(ident) => {
                    lowered.push(DecoratorNode::new(
                        ident.name.to_string(),
                        self.span(decorator.span),
                    ));
                }
                _ => {}
            }
        }
        lowered
    }

    fn lower_meta_value(&self, expr: &oxc::Expression<'a>) -> Option<MetaValue> {
        match expr {
            oxc::Expression::StringLiteral(s) => Some(MetaValue::Str(s.value.to_string())),
            // Identifier references (e.g. entries of an `imports` array)
            // are kept by name.
            oxc::Expression::Identifier(id) => Some(MetaValue::Str(id.name.to_string())),
            oxc::Expression::BooleanLiteral(b) => Some(MetaValue::Bool(b.value)),
            oxc::Expression::NumericLiteral(n) => Some(MetaValue::Num(n.value)),
            oxc::Expression::TemplateLiteral(t) => {
                let quasi = t.quasis.first()?;
                let text = quasi
                    .value
                    .cooked
                    .as_ref()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| quasi.value.raw.to_string());
                Some(MetaValue::Str(text))
            }
            oxc::Expression::ArrayExpression(arr) => Some(MetaValue::Array(
                arr.elements
                    .iter()
                    .filter_map(|e| e.as_expression())
                    .filter_map(|e| self.lower_meta_value(e))
                    .collect(),
            )),
            _ => None,
        }
    }

    fn lower_type(&self, ty: &oxc::TSType<'a>) -> TypeNode {
        match ty {
            oxc::TSType::TSStringKeyword(_) => TypeNode::keyword(TypeKeyword::String),
            oxc::TSType::TSNumberKeyword(_) => TypeNode::keyword(TypeKeyword::Number),
            oxc::TSType::TSBooleanKeyword(_) => TypeNode::keyword(TypeKeyword::Boolean),
            oxc::TSType::TSAnyKeyword(_) => TypeNode::keyword(TypeKeyword::Any),
            oxc::TSType::TSUnknownKeyword(_) => TypeNode::keyword(TypeKeyword::Unknown),
            oxc::TSType::TSVoidKeyword(_) => TypeNode::keyword(TypeKeyword::Void),
            oxc::TSType::TSNullKeyword(_) => TypeNode::keyword(TypeKeyword::Null),
            oxc::TSType::TSUndefinedKeyword(_) => TypeNode::keyword(TypeKeyword::Undefined),
            oxc::TSType::TSNeverKeyword(_) => TypeNode::keyword(TypeKeyword::Never),
            oxc::TSType::TSObjectKeyword(_) => TypeNode::keyword(TypeKeyword::Object),
            oxc::TSType::TSTypeReference(reference) => {
                let name = match &reference.type_name {
                    oxc::TSTypeName::IdentifierReference(ident) => ident.name.to_string(),
                    oxc::TSTypeName::QualifiedName(qualified) => qualified.right.name.to_string(),
                    oxc::TSTypeName::ThisExpression(_) => "this".to_string(),
                };
                let type_args = reference
                    .type_arguments
                    .as_ref()
                    .map(|args| args.params.iter().map(|p| self.lower_type(p)).collect())
                    .unwrap_or_default();
                let mut node = TypeNode::reference_with_args(name, type_args);
                if let TypeNode::Reference(r) = &mut node {
                    r.position = Some(self.span(reference.span));
                }
                node
            }
            oxc::TSType::TSImportType(import) => {
                // Recover specifier/qualifier from the raw text; the shape
                // is always `import('<spec>').<qualifier>`.
                let span = import.span();
                let raw = &self.text[span.start as usize..span.end as usize];
                let specifier = raw
                    .split_once('\'')
                    .or_else(|| raw.split_once('"'))
                    .map(|(_, rest)| {
                        rest.split(['\'', '"']).next().unwrap_or_default().to_string()
                    })
                    .unwrap_or_default();
                let qualifier = raw
                    .rsplit_once('.')
                    .map(|(_, q)| q.trim().to_string())
                    .unwrap_or_default();
                let mut node = TypeNode::import_type(specifier, qualifier);
                if let TypeNode::Import(i) = &mut node {
                    i.position = Some(self.span(span));
                }
                node
            }
            oxc::TSType::TSLiteralType(_) => {
                let span = ty.span();
                TypeNode::literal(
                    self.text[span.start as usize..span.end as usize].to_string(),
                    Some(self.span(span)),
                )
            }
            _ => TypeNode::any(),
        }
    }
}

fn property_key_name(key: &oxc::PropertyKey) -> String {
    match key {
        oxc::PropertyKey::StaticIdentifier(id) => id.name.to_string(),
        oxc::PropertyKey::Identifier(id) => id.name.to_string(),
        oxc::PropertyKey::PrivateIdentifier(id) => id.name.to_string(),
        oxc::PropertyKey::StringLiteral(lit) => lit.value.to_string(),
        _ => "unknown".to_string(),
    }
}

fn accessibility_of(
    accessibility: Option<oxc::TSAccessibility>,
    readonly: bool,
) -> ClassMemberAccessLevel {
    match accessibility {
        Some(oxc::TSAccessibility::Private) => ClassMemberAccessLevel::Private,
        Some(oxc::TSAccessibility::Protected) => ClassMemberAccessLevel::Protected,
        _ if readonly => ClassMemberAccessLevel::PublicReadonly,
        _ => ClassMemberAccessLevel::PublicWritable,
    }
}
