use std::collections::HashMap;
use std::rc::Rc;

use crate::ngtsc::diagnostics::{ng_error_code, DiagnosticNode, ErrorCode};
use crate::ngtsc::typecheck::api::api::{
    CheckableTemplate, InliningMode, TcbLocation, TemplateSourceMapping, TypeCheckingConfig,
};
use crate::ngtsc::typecheck::api::checker::TemplateTypeChecker;
use crate::ngtsc::typecheck::src::checker::TemplateTypeCheckerImpl;
use crate::ngtsc::typecheck::src::expression_checker::PROPERTY_DOES_NOT_EXIST;
use angular_compiler::template_parser::{parse_template, ParseTemplateOptions};
use ts::{ClassMember, Declaration, Program, SourceFile, TextSpan, TypeKeyword, TypeNode};

fn component(name: &str, file: &str, exported: bool) -> Rc<Declaration> {
    let decl = Declaration::class(name, file)
        .at(TextSpan::new(0, name.len()))
        .with_member(ClassMember::property(
            "title",
            TypeNode::keyword(TypeKeyword::String),
        ))
        .with_member(ClassMember::property(
            "count",
            TypeNode::keyword(TypeKeyword::Number),
        ));
    Rc::new(if exported { decl.exported() } else { decl })
}

fn template_for(component_file: &str, template: &str) -> CheckableTemplate {
    let url = format!("{}.html", component_file.trim_end_matches(".ts"));
    let parsed = parse_template(template, &url, &ParseTemplateOptions::default());
    assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
    CheckableTemplate {
        nodes: parsed.nodes,
        mapping: TemplateSourceMapping::External {
            template_url: url,
            component: DiagnosticNode::new(component_file, TextSpan::default()),
        },
        directives: Vec::new(),
    }
}

fn program_for(decls: &[&Rc<Declaration>]) -> Rc<Program> {
    let mut by_file: HashMap<String, SourceFile> = HashMap::new();
    for decl in decls {
        by_file
            .entry(decl.file_name.clone())
            .or_insert_with(|| SourceFile::new(decl.file_name.clone(), ""))
            .declarations
            .push(Rc::clone(decl));
    }
    Rc::new(Program::new(by_file.into_values().collect()))
}

fn checker_with(
    config: TypeCheckingConfig,
    components: Vec<(Rc<Declaration>, CheckableTemplate)>,
) -> TemplateTypeCheckerImpl {
    let decls: Vec<&Rc<Declaration>> = components.iter().map(|(c, _)| c).collect();
    let program = program_for(&decls);
    let mut checker = TemplateTypeCheckerImpl::new(program, config, HashMap::new());
    for (component, template) in components {
        checker.register_template(&component, template);
    }
    checker
}

#[test]
fn valid_template_produces_no_diagnostics() {
    let cmp = component("HelloCmp", "/app/hello.ts", true);
    let template = template_for("/app/hello.ts", "<div>{{title}}</div>");
    let checker = checker_with(TypeCheckingConfig::default(), vec![(Rc::clone(&cmp), template)]);

    let sf = SourceFile::new("/app/hello.ts", "");
    assert!(checker.get_diagnostics_for_file(&sf).is_empty());
    assert!(checker.get_type_check_block(&cmp.id()).is_some());
}

#[test]
fn unknown_property_is_reported_at_the_template_span() {
    let cmp = component("HelloCmp", "/app/hello.ts", true);
    let template_text = "<div>{{missing}}</div>";
    let template = template_for("/app/hello.ts", template_text);
    let checker = checker_with(TypeCheckingConfig::default(), vec![(Rc::clone(&cmp), template)]);

    let sf = SourceFile::new("/app/hello.ts", "");
    let diags = checker.get_diagnostics_for_file(&sf);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, PROPERTY_DOES_NOT_EXIST);
    // Attributed to the template file, at the offset of `missing`.
    assert_eq!(diags[0].file.as_deref(), Some("/app/hello.html"));
    let start = diags[0].start.unwrap();
    assert_eq!(
        &template_text[start..start + "missing".len()],
        "missing"
    );
}

#[test]
fn batching_reuses_one_synthetic_program_across_files() {
    let cmp_a = component("ACmp", "/app/a.ts", true);
    let cmp_b = component("BCmp", "/app/b.ts", true);
    let checker = checker_with(
        TypeCheckingConfig::default(),
        vec![
            (Rc::clone(&cmp_a), template_for("/app/a.ts", "<div>{{title}}</div>")),
            (Rc::clone(&cmp_b), template_for("/app/b.ts", "<p>{{count}}</p>")),
        ],
    );

    let _ = checker.get_diagnostics_for_file(&SourceFile::new("/app/a.ts", ""));
    let first = checker.type_check_program();
    let _ = checker.get_diagnostics_for_file(&SourceFile::new("/app/b.ts", ""));
    let second = checker.type_check_program();
    assert!(
        Rc::ptr_eq(&first, &second),
        "synthetic program was rebuilt between files of one batch"
    );
    // Both components contributed their own type-check file.
    assert_eq!(first.files.len(), 2);
}

#[test]
fn unexported_component_under_no_inlining_gets_exactly_one_tcb_diagnostic() {
    let cmp = component("PrivateCmp", "/app/private.ts", false);
    let template = template_for("/app/private.ts", "<div>{{title}}</div>");
    let config = TypeCheckingConfig {
        inlining: InliningMode::Error,
        ..TypeCheckingConfig::default()
    };
    let checker = checker_with(config, vec![(Rc::clone(&cmp), template)]);

    let diags = checker.get_diagnostics_for_file(&SourceFile::new("/app/private.ts", ""));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ng_error_code(ErrorCode::InlineTcbRequired));
    // Generation was suppressed, not crashed.
    assert!(checker.get_type_check_block(&cmp.id()).is_none());
}

#[test]
fn exported_component_with_same_template_is_clean_under_no_inlining() {
    let cmp = component("PublicCmp", "/app/public.ts", true);
    let template = template_for("/app/public.ts", "<div>{{title}}</div>");
    let config = TypeCheckingConfig {
        inlining: InliningMode::Error,
        ..TypeCheckingConfig::default()
    };
    let checker = checker_with(config, vec![(Rc::clone(&cmp), template)]);

    let diags = checker.get_diagnostics_for_file(&SourceFile::new("/app/public.ts", ""));
    assert!(diags.is_empty(), "got: {:?}", diags);
}

#[test]
fn unexported_component_generates_under_inline_mode() {
    let cmp = component("PrivateCmp", "/app/private.ts", false);
    let template = template_for("/app/private.ts", "<div>{{title}}</div>");
    let checker = checker_with(TypeCheckingConfig::default(), vec![(Rc::clone(&cmp), template)]);
    assert!(checker.get_type_check_block(&cmp.id()).is_some());
}

#[test]
fn generic_directive_over_unexported_interface_requires_type_ctor_inlining() {
    let cmp = component("HostCmp", "/app/host.ts", true);

    // The interface the directive is bounded over is NOT exported.
    let hidden_iface = Rc::new(
        Declaration::interface("Hidden", "/app/dir.ts").at(TextSpan::new(200, 6)),
    );
    let directive = Rc::new(
        Declaration::class("GenericDir", "/app/dir.ts")
            .at(TextSpan::new(0, 10))
            .exported()
            .with_type_parameter("T", Some(TypeNode::reference("Hidden"))),
    );

    let mut template = template_for("/app/host.ts", "<div>{{title}}</div>");
    template.directives.push(Rc::clone(&directive));

    let decls = vec![&cmp, &directive, &hidden_iface];
    let program = program_for(&decls);
    let config = TypeCheckingConfig {
        inlining: InliningMode::Error,
        ..TypeCheckingConfig::default()
    };
    let mut checker = TemplateTypeCheckerImpl::new(program, config, HashMap::new());
    checker.register_template(&cmp, template);

    let diags = checker.get_diagnostics_for_file(&SourceFile::new("/app/host.ts", ""));
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].code,
        ng_error_code(ErrorCode::InlineTypeCtorRequired)
    );
    // Related information points at the directive's own declaration file.
    let related = diags[0].related_information.as_ref().unwrap();
    assert_eq!(related[0].file.as_deref(), Some("/app/dir.ts"));
}

#[test]
fn generic_directive_over_exported_interface_is_clean() {
    let cmp = component("HostCmp", "/app/host.ts", true);
    let visible_iface = Rc::new(
        Declaration::interface("Visible", "/app/dir.ts")
            .at(TextSpan::new(200, 7))
            .exported(),
    );
    let directive = Rc::new(
        Declaration::class("GenericDir", "/app/dir.ts")
            .at(TextSpan::new(0, 10))
            .exported()
            .with_type_parameter("T", Some(TypeNode::reference("Visible"))),
    );

    let mut template = template_for("/app/host.ts", "<div>{{title}}</div>");
    template.directives.push(Rc::clone(&directive));

    let decls = vec![&cmp, &directive, &visible_iface];
    let program = program_for(&decls);
    let config = TypeCheckingConfig {
        inlining: InliningMode::Error,
        ..TypeCheckingConfig::default()
    };
    let mut checker = TemplateTypeCheckerImpl::new(program, config, HashMap::new());
    checker.register_template(&cmp, template);

    assert!(checker
        .get_diagnostics_for_file(&SourceFile::new("/app/host.ts", ""))
        .is_empty());
}

#[test]
fn tcb_positions_map_back_to_template_spans() {
    let cmp = component("HelloCmp", "/app/hello.ts", true);
    let template_text = "<div>{{title}}</div>";
    let template = template_for("/app/hello.ts", template_text);
    let checker = checker_with(TypeCheckingConfig::default(), vec![(Rc::clone(&cmp), template)]);

    let block = checker.get_type_check_block(&cmp.id()).unwrap();
    // Find the generated span of the `title` read via the block's map.
    let title_offset = template_text.find("title").unwrap();
    let entry = block
        .span_map
        .iter()
        .find(|entry| entry.template.start == title_offset && entry.template.end == title_offset + 5)
        .expect("no span-map row for `title`");

    let location = TcbLocation {
        tcb_file_name: "/app/hello.ngtypecheck.ts".to_string(),
        position: entry.generated.start,
    };
    let (mapping, span) = checker
        .get_template_mapping_at_tcb_location(&location)
        .expect("location did not map");
    assert_eq!(span.start, title_offset);
    match mapping {
        TemplateSourceMapping::External { template_url, .. } => {
            assert_eq!(template_url, "/app/hello.html")
        }
        other => panic!("expected external mapping, got {:?}", other),
    }

    // A position inside generated boilerplate maps to nothing.
    let boilerplate = TcbLocation {
        tcb_file_name: "/app/hello.ngtypecheck.ts".to_string(),
        position: 0,
    };
    assert!(checker
        .get_template_mapping_at_tcb_location(&boilerplate)
        .is_none());
}

#[test]
fn missing_pipe_is_reported_out_of_band() {
    let cmp = component("HelloCmp", "/app/hello.ts", true);
    let template = template_for("/app/hello.ts", "<div>{{title | uppercase}}</div>");
    let checker = checker_with(TypeCheckingConfig::default(), vec![(Rc::clone(&cmp), template)]);

    let diags = checker.get_diagnostics_for_file(&SourceFile::new("/app/hello.ts", ""));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ng_error_code(ErrorCode::MissingPipe));
    assert!(diags[0].message_text.to_string().contains("uppercase"));
}
