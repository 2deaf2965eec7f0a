//! Type-checking context.
//!
//! Accumulates per-file type-check blocks for all components of one
//! program snapshot, decides inlining feasibility up front, and assembles
//! the synthetic type-check program plus the diagnostics that fall out of
//! generation and expression checking.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::rc::Rc;

use angular_compiler::expression_parser::ast::AbsoluteSourceSpan;

use super::super::api::api::{
    CheckableTemplate, InliningMode, TcbLocation, TemplateId, TemplateSourceMapping,
    TypeCheckingConfig,
};
use super::expression_checker::{ExpressionChecker, TcbTypeError};
use super::type_check_block::{
    OutOfBandDiagnosticRecorder, TcbGenerator, TypeCheckBlock,
};
use super::type_emitter::can_emit_type;
use crate::ngtsc::diagnostics::{
    make_diagnostic, make_related_information, DiagnosticNode, ErrorCode,
};
use crate::ngtsc::file_system::strip_extension;
use ts::{
    Declaration, DeclarationId, Diagnostic, DiagnosticCategory, TextSpan, TypeChecker,
};

/// A span row of an assembled type-check file: generated file offsets
/// mapped back to a template span.
#[derive(Debug, Clone)]
pub struct FileSpanEntry {
    pub generated: TextSpan,
    pub template_id: TemplateId,
    pub template: AbsoluteSourceSpan,
}

/// One synthetic file holding the TCBs for all components of a user file.
#[derive(Debug)]
pub struct TypeCheckFile {
    pub file_name: String,
    pub text: String,
    pub entries: Vec<FileSpanEntry>,
    pub tcbs: HashMap<DeclarationId, Rc<TypeCheckBlock>>,
    /// Offset of each component's TCB within `text`.
    pub block_offsets: HashMap<DeclarationId, usize>,
}

/// The whole synthetic program of one batch. Shared by reference across
/// every per-file diagnostic request of the batch.
#[derive(Debug, Default)]
pub struct TypeCheckProgram {
    pub files: IndexMap<String, TypeCheckFile>,
    pub mappings: HashMap<TemplateId, TemplateSourceMapping>,
}

impl TypeCheckProgram {
    /// Inverse lookup over the span tables: which template span does a
    /// generated position correspond to? Pure function of the tables.
    pub fn template_mapping_at(
        &self,
        location: &TcbLocation,
    ) -> Option<(TemplateSourceMapping, AbsoluteSourceSpan)> {
        let file = self.files.get(&location.tcb_file_name)?;
        let entry = file
            .entries
            .iter()
            .filter(|entry| {
                entry.generated.start <= location.position
                    && location.position < entry.generated.end()
            })
            // Prefer the tightest enclosing span.
            .min_by_key(|entry| entry.generated.length)?;
        let mapping = self.mappings.get(&entry.template_id)?.clone();
        Some((mapping, entry.template))
    }
}

struct PendingBlock {
    component: Rc<Declaration>,
    block: Rc<TypeCheckBlock>,
    errors: Vec<TcbTypeError>,
}

pub struct TypeCheckContext<'a> {
    config: &'a TypeCheckingConfig,
    checker: &'a TypeChecker,
    pipes: &'a HashMap<String, Rc<Declaration>>,
    pending: IndexMap<String, Vec<PendingBlock>>,
    /// Diagnostics produced during generation itself (inlining
    /// requirements, out-of-band records), grouped by user file.
    eager_diagnostics: IndexMap<String, Vec<Diagnostic>>,
    mappings: HashMap<TemplateId, TemplateSourceMapping>,
    oob: OutOfBandDiagnosticRecorder,
    next_template_id: u32,
}

impl<'a> TypeCheckContext<'a> {
    pub fn new(
        config: &'a TypeCheckingConfig,
        checker: &'a TypeChecker,
        pipes: &'a HashMap<String, Rc<Declaration>>,
    ) -> Self {
        TypeCheckContext {
            config,
            checker,
            pipes,
            pending: IndexMap::new(),
            eager_diagnostics: IndexMap::new(),
            mappings: HashMap::new(),
            oob: OutOfBandDiagnosticRecorder::new(),
            next_template_id: 0,
        }
    }

    /// Register one component's template for checking. Inlining
    /// requirements surface here as diagnostics, not crashes, and suppress
    /// TCB generation for the component.
    pub fn add_template(&mut self, component: &Rc<Declaration>, template: &CheckableTemplate) {
        let template_id = TemplateId(self.next_template_id);
        self.next_template_id += 1;
        self.mappings.insert(template_id, template.mapping.clone());

        // Both inlining requirements are outcomes of the same question:
        // can this reference be emitted outside its original file?
        if !self.can_reference_declaration(component) {
            if self.config.inlining == InliningMode::Error {
                self.push_eager(
                    &component.file_name,
                    make_diagnostic(
                        ErrorCode::InlineTcbRequired,
                        &DiagnosticNode::new(component.file_name.clone(), component.name_span),
                        "This component requires inline template type-checking, which is not \
                         supported by the current environment."
                            .into(),
                        None,
                        DiagnosticCategory::Error,
                    )
                    .into(),
                );
                return;
            }
            // Inline mode: the TCB is generated as if it were placed in
            // the component's own file, so no import is needed.
        }

        for directive in &template.directives {
            if self.type_ctor_requires_inline(directive)
                && self.config.inlining == InliningMode::Error
            {
                let related = make_related_information(
                    &DiagnosticNode::new(directive.file_name.clone(), directive.name_span),
                    format!(
                        "Requires an inline type constructor for {}.",
                        directive.name.as_deref().unwrap_or("<anonymous>")
                    ),
                );
                self.push_eager(
                    &component.file_name,
                    make_diagnostic(
                        ErrorCode::InlineTypeCtorRequired,
                        &DiagnosticNode::new(component.file_name.clone(), component.name_span),
                        "This component uses a directive which requires an inline type \
                         constructor, which is not supported by the current environment."
                            .into(),
                        Some(vec![related]),
                        DiagnosticCategory::Error,
                    )
                    .into(),
                );
                return;
            }
        }

        let mut generator = TcbGenerator::new(self.config, self.pipes, &mut self.oob);
        let block = Rc::new(generator.generate(component, &template.nodes, template_id));

        let expression_checker = ExpressionChecker::new(component, self.checker, self.config);
        let errors = expression_checker.check_template(&template.nodes);

        self.pending
            .entry(component.file_name.clone())
            .or_default()
            .push(PendingBlock {
                component: Rc::clone(component),
                block,
                errors,
            });
    }

    /// Whether `decl` can be referenced from a synthetic file outside its
    /// own: it must be exported.
    fn can_reference_declaration(&self, decl: &Declaration) -> bool {
        decl.is_exported
    }

    /// A directive needs an inline type constructor when any of its
    /// generic bounds cannot be emitted from an external location.
    fn type_ctor_requires_inline(&self, directive: &Declaration) -> bool {
        if directive.type_parameters.is_empty() {
            return false;
        }
        let local_type_params: Vec<&str> = directive
            .type_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        let predicate = |reference: &ts::TypeReference| -> bool {
            if local_type_params.contains(&reference.name.as_str()) {
                return true;
            }
            match self.checker.find_declaration(&reference.name) {
                Some(decl) => decl.is_exported,
                None => false,
            }
        };
        directive.type_parameters.iter().any(|param| {
            param
                .constraint
                .as_ref()
                .map(|constraint| !can_emit_type(constraint, &predicate))
                .unwrap_or(false)
        })
    }

    fn push_eager(&mut self, file: &str, diagnostic: Diagnostic) {
        self.eager_diagnostics
            .entry(file.to_string())
            .or_default()
            .push(diagnostic);
    }

    /// Assemble the synthetic program and translate all recorded errors
    /// through it onto template source spans.
    pub fn finalize(mut self) -> (TypeCheckProgram, IndexMap<String, Vec<Diagnostic>>) {
        let mut program = TypeCheckProgram {
            files: IndexMap::new(),
            mappings: self.mappings.clone(),
        };
        let mut diagnostics = self.eager_diagnostics.clone();
        let mut pending_errors: Vec<(String, usize, Rc<TypeCheckBlock>, Vec<TcbTypeError>)> =
            Vec::new();

        for (user_file, blocks) in std::mem::take(&mut self.pending) {
            let tc_file_name = format!("{}.ngtypecheck.ts", strip_extension(&user_file));
            let mut file = TypeCheckFile {
                file_name: tc_file_name.clone(),
                text: String::new(),
                entries: Vec::new(),
                tcbs: HashMap::new(),
                block_offsets: HashMap::new(),
            };
            for pending in blocks {
                let offset = file.text.len();
                file.text.push_str(&pending.block.text);
                for row in &pending.block.span_map {
                    file.entries.push(FileSpanEntry {
                        generated: TextSpan::new(row.generated.start + offset, row.generated.length),
                        template_id: pending.block.template_id,
                        template: row.template,
                    });
                }
                file.block_offsets
                    .insert(pending.component.id(), offset);
                file.tcbs
                    .insert(pending.component.id(), Rc::clone(&pending.block));
                pending_errors.push((
                    tc_file_name.clone(),
                    offset,
                    Rc::clone(&pending.block),
                    pending.errors,
                ));
            }
            program.files.insert(tc_file_name, file);
        }

        // Expression errors: forward each template span into the generated
        // fragment, then invert through the assembled table. Attribution is
        // always to the template, never to the fragment's own coordinates.
        for (tc_file_name, offset, block, errors) in pending_errors {
            for error in errors {
                let Some(local) = block.generated_span_for(&error.template_span) else {
                    continue;
                };
                let location = TcbLocation {
                    tcb_file_name: tc_file_name.clone(),
                    position: offset + local.start,
                };
                let Some((mapping, template_span)) = program.template_mapping_at(&location)
                else {
                    continue;
                };
                let (file, start) = mapping.to_source_position(template_span.start);
                let diagnostic = Diagnostic {
                    category: DiagnosticCategory::Error,
                    code: error.code,
                    file: Some(file.clone()),
                    start: Some(start),
                    length: Some(template_span.end - template_span.start),
                    message_text: error.message.clone().into(),
                    related_information: None,
                };
                diagnostics
                    .entry(self.owning_user_file(&tc_file_name))
                    .or_default()
                    .push(diagnostic);
            }
        }

        // Out-of-band records (e.g. missing pipes) map straight through the
        // template source mapping.
        for record in &self.oob.records {
            let Some(mapping) = program.mappings.get(&record.template_id) else {
                continue;
            };
            let (file, start) = mapping.to_source_position(record.span.start);
            let diagnostic = make_diagnostic(
                record.code,
                &DiagnosticNode::new(
                    file,
                    TextSpan::new(start, record.span.end - record.span.start),
                ),
                record.message.clone().into(),
                None,
                DiagnosticCategory::Error,
            );
            let owner = match mapping {
                TemplateSourceMapping::Direct { file_name, .. } => file_name.clone(),
                TemplateSourceMapping::External { component, .. } => component.file_name.clone(),
            };
            diagnostics.entry(owner).or_default().push(diagnostic.into());
        }

        (program, diagnostics)
    }

    fn owning_user_file(&self, tc_file_name: &str) -> String {
        tc_file_name
            .strip_suffix(".ngtypecheck.ts")
            .map(|stem| format!("{}.ts", stem))
            .unwrap_or_else(|| tc_file_name.to_string())
    }
}
