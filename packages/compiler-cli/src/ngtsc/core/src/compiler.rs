//! The compiler orchestrator.
//!
//! `NgCompiler::from_ticket` is a pure function of one compilation ticket:
//! it runs the analysis phase over the ticket's program (reusing what the
//! ticket's incremental kind allows), populates the registries, gates
//! cyclic imports, and prepares the template type checker. Diagnostic
//! queries afterwards are read-only.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use angular_compiler::render3::r3_ast::R3Node;
use angular_compiler::template_parser::{parse_template, ParseTemplateOptions};

use super::options::NgCompilerOptions;
use crate::ngtsc::cycles::{CycleAnalyzer, ImportGraph};
use crate::ngtsc::diagnostics::{
    make_diagnostic, DiagnosticNode, ErrorCode,
};
use crate::ngtsc::entry_point::{check_for_private_exports, ReferenceGraph};
use crate::ngtsc::file_system::{strip_extension, AbsoluteFsPath, ReadonlyFileSystem};
use crate::ngtsc::incremental::src::ticket::TicketKind;
use crate::ngtsc::incremental::{CompilationTicket, IncrementalCompilation, IncrementalState};
use crate::ngtsc::metadata::{InjectableClassRegistry, Resource, ResourceRegistry};
use crate::ngtsc::perf::{PerfEvent, PerfPhase, PerfRecorder};
use crate::ngtsc::reflection::TsReflectionHost;
use crate::ngtsc::resource::{AdapterResourceLoader, ResourceLoaderContext, ResourceType};
use crate::ngtsc::typecheck::extended::{all_checks, ExtendedTemplateChecker};
use crate::ngtsc::typecheck::{
    CheckableTemplate, InliningMode, TemplateSourceMapping, TemplateTypeChecker,
    TemplateTypeCheckerImpl, TypeCheckingConfig,
};
use ts::{
    sort_diagnostics, Declaration, DiagnosticCategory, MetaValue, Program, SourceFile, TypeChecker,
};

struct AnalyzedComponent {
    declaration: Rc<Declaration>,
    mapping: TemplateSourceMapping,
    nodes: Vec<R3Node>,
}

pub struct NgCompiler {
    program: Rc<Program>,
    options: NgCompilerOptions,
    perf: Rc<dyn PerfRecorder>,
    incremental: IncrementalCompilation,
    resource_registry: ResourceRegistry,
    injectable_registry: InjectableClassRegistry,
    reference_graph: ReferenceGraph,
    template_type_checker: Option<TemplateTypeCheckerImpl>,
    extended_checker: ExtendedTemplateChecker,
    components: Vec<AnalyzedComponent>,
    analysis_diagnostics: IndexMap<String, Vec<ts::Diagnostic>>,
    ignore_for_diagnostics: HashSet<String>,
    ignore_for_emit: HashSet<String>,
}

impl NgCompiler {
    pub fn from_ticket(ticket: CompilationTicket, fs: &dyn ReadonlyFileSystem) -> NgCompiler {
        let CompilationTicket {
            kind,
            new_program,
            options,
            incremental_strategy,
            program_driver: _program_driver,
            perf_recorder,
            use_poisoned_data: _use_poisoned_data,
            enable_template_type_checker,
        } = ticket;

        let previous_phase = perf_recorder.phase(PerfPhase::Analysis);

        let incremental = match &kind {
            TicketKind::Fresh => IncrementalCompilation::fresh(),
            TicketKind::IncrementalFromProgram {
                old_state,
                modified_resource_files,
                ..
            }
            | TicketKind::IncrementalFromState {
                old_state,
                modified_resource_files,
            }
            | TicketKind::ResourceChange {
                old_state,
                modified_resource_files,
            } => IncrementalCompilation::incremental(
                old_state,
                &new_program,
                modified_resource_files,
            ),
        };

        let mut compiler = NgCompiler {
            program: Rc::clone(&new_program),
            perf: Rc::clone(&perf_recorder),
            incremental,
            resource_registry: ResourceRegistry::new(),
            injectable_registry: InjectableClassRegistry::new(),
            reference_graph: ReferenceGraph::new(),
            template_type_checker: None,
            extended_checker: ExtendedTemplateChecker::new(
                all_checks(),
                options.extended_diagnostics.clone(),
            ),
            components: Vec::new(),
            analysis_diagnostics: IndexMap::new(),
            ignore_for_diagnostics: HashSet::new(),
            ignore_for_emit: HashSet::new(),
            options,
        };
        compiler.analyze(fs, enable_template_type_checker);
        incremental_strategy.set_incremental_state(compiler.incremental.state().clone());
        perf_recorder.phase(previous_phase);
        compiler
    }

    fn analyze(&mut self, fs: &dyn ReadonlyFileSystem, enable_template_type_checker: bool) {
        let host = TsReflectionHost::new(Rc::clone(&self.program));
        let checker = TypeChecker::new(Rc::clone(&self.program));
        let loader = AdapterResourceLoader::new(fs);
        let import_graph = ImportGraph::new(fs);
        let cycle_analyzer = CycleAnalyzer::new(&import_graph);

        let pipes = self.collect_pipes();

        let source_files: Vec<Rc<SourceFile>> =
            self.program.source_files().map(Rc::clone).collect();
        for sf in &source_files {
            if sf.is_declaration_file {
                continue;
            }
            if self.incremental.needs_analysis(&sf.file_name) {
                self.perf.event(PerfEvent::AnalyzeFile);
            } else {
                self.perf.event(PerfEvent::SourceFileReuse);
            }

            let mut resource_deps: Vec<String> = Vec::new();
            for decl in &sf.declarations {
                if decl.decorator("Component").is_none() {
                    continue;
                }
                self.perf.event(PerfEvent::AnalyzeComponent);
                self.analyze_component(
                    sf,
                    decl,
                    &host,
                    &checker,
                    &loader,
                    &cycle_analyzer,
                    &mut resource_deps,
                );
            }
            let incremental = &mut self.incremental;
            incremental.record_analyzed(sf, resource_deps);
        }

        // The type checker batch covers every analyzed component.
        if enable_template_type_checker {
            let config = TypeCheckingConfig {
                check_type_of_input_bindings: self.options.strict_templates,
                check_template_bodies: self.options.check_template_bodies,
                inlining: if self.options.use_inline_type_check_blocks {
                    InliningMode::Inline
                } else {
                    InliningMode::Error
                },
            };
            let mut ttc =
                TemplateTypeCheckerImpl::new(Rc::clone(&self.program), config, pipes);
            for component in &self.components {
                let directives = self
                    .component_directives(&component.declaration, &checker);
                ttc.register_template(
                    &component.declaration,
                    CheckableTemplate {
                        nodes: component.nodes.clone(),
                        mapping: component.mapping.clone(),
                        directives,
                    },
                );
            }
            self.template_type_checker = Some(ttc);
        }

        // Never carried over from a prior compiler: the synthetic
        // type-check files belong to this instance only.
        self.ignore_for_diagnostics = self
            .program
            .file_names()
            .map(|name| format!("{}.ngtypecheck.ts", strip_extension(name)))
            .collect();
        self.ignore_for_emit = self.ignore_for_diagnostics.clone();
    }

    #[allow(clippy::too_many_arguments)]
    fn analyze_component(
        &mut self,
        sf: &Rc<SourceFile>,
        decl: &Rc<Declaration>,
        host: &TsReflectionHost,
        checker: &TypeChecker,
        loader: &AdapterResourceLoader<'_>,
        cycle_analyzer: &CycleAnalyzer<'_>,
        resource_deps: &mut Vec<String>,
    ) {
        let component_decorator = decl.decorator("Component").unwrap().clone();

        // Derived constructor metadata is cached for later DI validation.
        self.injectable_registry.get_injectable_meta(decl, host);

        let (template_text, mapping, template_resource) = match (
            component_decorator.property("template"),
            component_decorator.property("templateUrl"),
        ) {
            (Some(inline), _) => {
                let text = inline.value.as_str().unwrap_or_default().to_string();
                let mapping = TemplateSourceMapping::Direct {
                    file_name: sf.file_name.clone(),
                    // Skip the opening quote of the template string.
                    base_offset: inline.span.start + 1,
                };
                let resource =
                    Resource::inline(DiagnosticNode::new(sf.file_name.clone(), inline.span));
                (text, mapping, resource)
            }
            (None, Some(url_prop)) => {
                let url = url_prop.value.as_str().unwrap_or_default();
                let expression = DiagnosticNode::new(sf.file_name.clone(), url_prop.span);
                match loader.resolve(url, &sf.file_name) {
                    Ok(resolved) => {
                        let context = ResourceLoaderContext {
                            resource_type: ResourceType::Template,
                            containing_file: sf.file_name.clone(),
                        };
                        loader.preload(&resolved, &context);
                        let text = loader.load(&resolved).unwrap_or_default();
                        resource_deps.push(resolved.as_str().to_string());
                        let mapping = TemplateSourceMapping::External {
                            template_url: resolved.as_str().to_string(),
                            component: expression.clone(),
                        };
                        (
                            text,
                            mapping,
                            Resource::external(resolved, expression),
                        )
                    }
                    Err(e) => {
                        self.push_diagnostic(
                            &sf.file_name,
                            make_diagnostic(
                                ErrorCode::ComponentResourceNotFound,
                                &expression,
                                e.to_string().into(),
                                None,
                                DiagnosticCategory::Error,
                            )
                            .into(),
                        );
                        return;
                    }
                }
            }
            (None, None) => {
                self.push_diagnostic(
                    &sf.file_name,
                    make_diagnostic(
                        ErrorCode::ComponentMissingTemplate,
                        &DiagnosticNode::new(sf.file_name.clone(), decl.name_span),
                        "component is missing a template".into(),
                        None,
                        DiagnosticCategory::Error,
                    )
                    .into(),
                );
                return;
            }
        };

        let mut styles = Vec::new();
        if let Some(style_urls) = component_decorator.property("styleUrls") {
            if let Some(urls) = style_urls.value.as_array() {
                for url in urls.iter().filter_map(MetaValue::as_str) {
                    let expression =
                        DiagnosticNode::new(sf.file_name.clone(), style_urls.span);
                    match loader.resolve(url, &sf.file_name) {
                        Ok(resolved) => {
                            resource_deps.push(resolved.as_str().to_string());
                            styles.push(Resource::external(resolved, expression));
                        }
                        Err(e) => {
                            self.push_diagnostic(
                                &sf.file_name,
                                make_diagnostic(
                                    ErrorCode::ComponentResourceNotFound,
                                    &expression,
                                    e.to_string().into(),
                                    None,
                                    DiagnosticCategory::Error,
                                )
                                .into(),
                            );
                        }
                    }
                }
            }
        }

        self.resource_registry.register_template(template_resource, decl);
        for style in styles {
            self.resource_registry.register_style(style, decl);
        }

        // Imported directives: record visibility edges and gate the
        // import against cycles before it is committed.
        for directive in self.component_directives(decl, checker) {
            self.reference_graph.add(decl, &directive);
            if directive.file_name == decl.file_name {
                continue;
            }
            let from = AbsoluteFsPath::new(decl.file_name.clone());
            let to = AbsoluteFsPath::new(directive.file_name.clone());
            if let Some(cycle) = cycle_analyzer.would_create_cycle_paths(&from, &to) {
                let path = cycle
                    .get_path()
                    .iter()
                    .map(|p| p.as_str().to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                self.push_diagnostic(
                    &sf.file_name,
                    make_diagnostic(
                        ErrorCode::ImportCycleDetected,
                        &DiagnosticNode::new(sf.file_name.clone(), decl.name_span),
                        format!(
                            "Unable to import directive {}. The import would create a \
                             cycle: {}",
                            directive.name.as_deref().unwrap_or("<anonymous>"),
                            path
                        )
                        .into(),
                        None,
                        DiagnosticCategory::Error,
                    )
                    .into(),
                );
            } else {
                cycle_analyzer.record_synthetic_import_paths(&from, &to);
            }
        }

        let parsed = parse_template(
            &template_text,
            match &mapping {
                TemplateSourceMapping::Direct { file_name, .. } => file_name,
                TemplateSourceMapping::External { template_url, .. } => template_url,
            },
            &ParseTemplateOptions {
                preserve_whitespaces: self.options.preserve_whitespaces,
            },
        );
        // Template syntax errors are user diagnostics, not parse aborts.
        for error in &parsed.errors {
            let (file, start) = mapping.to_source_position(error.span.start.offset);
            self.push_diagnostic(
                &sf.file_name,
                make_diagnostic(
                    ErrorCode::TemplateParseError,
                    &DiagnosticNode::new(file, ts::TextSpan::new(start, error.span.len().max(1))),
                    error.msg.clone().into(),
                    None,
                    DiagnosticCategory::Error,
                )
                .into(),
            );
        }

        self.components.push(AnalyzedComponent {
            declaration: Rc::clone(decl),
            mapping,
            nodes: parsed.nodes,
        });
    }

    /// Declarations named in the component's `imports` metadata.
    fn component_directives(
        &self,
        decl: &Declaration,
        checker: &TypeChecker,
    ) -> Vec<Rc<Declaration>> {
        let Some(decorator) = decl.decorator("Component") else {
            return Vec::new();
        };
        let Some(imports) = decorator.property("imports") else {
            return Vec::new();
        };
        let Some(names) = imports.value.as_array() else {
            return Vec::new();
        };
        names
            .iter()
            .filter_map(MetaValue::as_str)
            .filter_map(|name| checker.find_declaration(name))
            .collect()
    }

    fn collect_pipes(&self) -> HashMap<String, Rc<Declaration>> {
        let mut pipes = HashMap::new();
        for sf in self.program.source_files() {
            for decl in &sf.declarations {
                if let Some(pipe) = decl.decorator("Pipe") {
                    if let Some(name) = pipe.property("name").and_then(|p| p.value.as_str()) {
                        pipes.insert(name.to_string(), Rc::clone(decl));
                    }
                }
            }
        }
        pipes
    }

    fn push_diagnostic(&mut self, file: &str, diagnostic: ts::Diagnostic) {
        self.analysis_diagnostics
            .entry(file.to_string())
            .or_default()
            .push(diagnostic);
    }

    /// All diagnostics of the compilation: analysis, template type
    /// checking, extended checks, and (for full-program compilations with
    /// an entry point) private-export validation.
    pub fn get_diagnostics(&self) -> Vec<ts::Diagnostic> {
        let previous = self.perf.phase(PerfPhase::TtcDiagnostics);
        let mut diagnostics: Vec<ts::Diagnostic> = Vec::new();
        for diags in self.analysis_diagnostics.values() {
            diagnostics.extend(diags.iter().cloned());
        }
        if let Some(ttc) = &self.template_type_checker {
            for sf in self.program.source_files() {
                diagnostics.extend(ttc.get_diagnostics_for_file(sf));
            }
        }
        for component in &self.components {
            diagnostics.extend(self.extended_checker.get_diagnostics_for_component(
                &component.declaration,
                &component.mapping,
                &component.nodes,
            ));
        }
        if let Some(entry_point) = &self.options.entry_point {
            let checker = TypeChecker::new(Rc::clone(&self.program));
            diagnostics.extend(check_for_private_exports(
                entry_point,
                &checker,
                &self.reference_graph,
            ));
        }
        sort_diagnostics(&mut diagnostics);
        self.perf.phase(previous);
        diagnostics
    }

    pub fn get_diagnostics_for_file(&self, file_name: &str) -> Vec<ts::Diagnostic> {
        let mut diagnostics = self
            .analysis_diagnostics
            .get(file_name)
            .cloned()
            .unwrap_or_default();
        if let Some(ttc) = &self.template_type_checker {
            if let Some(sf) = self.program.get_source_file(file_name) {
                diagnostics.extend(ttc.get_diagnostics_for_file(sf));
            }
        }
        for component in &self.components {
            if component.declaration.file_name == file_name {
                diagnostics.extend(self.extended_checker.get_diagnostics_for_component(
                    &component.declaration,
                    &component.mapping,
                    &component.nodes,
                ));
            }
        }
        sort_diagnostics(&mut diagnostics);
        diagnostics
    }

    pub fn program(&self) -> &Rc<Program> {
        &self.program
    }

    pub fn options(&self) -> &NgCompilerOptions {
        &self.options
    }

    pub fn resource_registry(&self) -> &ResourceRegistry {
        &self.resource_registry
    }

    pub fn template_type_checker(&self) -> Option<&TemplateTypeCheckerImpl> {
        self.template_type_checker.as_ref()
    }

    pub fn incremental_state(&self) -> &IncrementalState {
        self.incremental.state()
    }

    /// Compiler-internal scaffolding files, recomputed per instance.
    pub fn ignore_for_diagnostics(&self) -> &HashSet<String> {
        &self.ignore_for_diagnostics
    }

    pub fn ignore_for_emit(&self) -> &HashSet<String> {
        &self.ignore_for_emit
    }
}
