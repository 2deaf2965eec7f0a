use std::rc::Rc;

use super::src::private_export_checker::check_for_private_exports;
use super::src::reference_graph::{ReferenceGraph, ReferenceGraphAdapter};
use crate::ngtsc::imports::Reference;
use crate::ngtsc::metadata::ReferencesRegistry;
use ts::{Declaration, Program, SourceFile, TextSpan, TypeChecker};

fn decl(name: &str, file: &str, offset: usize) -> Declaration {
    Declaration::class(name, file).at(TextSpan::new(offset, name.len()))
}

/// Entry point exporting a module class M which references (but does not
/// export) directive D.
fn fixture() -> (Rc<Program>, ReferenceGraph, Rc<Declaration>, Rc<Declaration>) {
    let module = Rc::new(decl("EntryModule", "/lib/module.ts", 0).exported());
    let directive = Rc::new(decl("HiddenDir", "/lib/module.ts", 100));

    let module_sf = {
        let mut sf = SourceFile::new("/lib/module.ts", "");
        sf.declarations.push(Rc::clone(&module));
        sf.declarations.push(Rc::clone(&directive));
        sf
    };
    let index_sf = SourceFile::new("/lib/index.ts", "").with_export(ts::ExportEntry::Reexport {
        exported_name: "EntryModule".to_string(),
        local_name: "EntryModule".to_string(),
        module: "/lib/module.ts".to_string(),
    });

    let program = Rc::new(Program::from_rc_files(vec![
        Rc::new(module_sf),
        Rc::new(index_sf),
    ]));

    let mut graph = ReferenceGraph::new();
    graph.add(&module, &directive);
    (program, graph, module, directive)
}

#[test]
fn reports_visible_but_unexported_declaration() {
    let (program, graph, _module, directive) = fixture();
    let checker = TypeChecker::new(program);
    let diags = check_for_private_exports("/lib/index.ts", &checker, &graph);

    assert_eq!(diags.len(), 1);
    let message = diags[0].message_text.to_string();
    assert!(message.contains("HiddenDir"), "got: {}", message);
    assert!(message.contains("class"), "got: {}", message);
    assert!(
        message.contains("EntryModule -> HiddenDir"),
        "missing visibility chain: {}",
        message
    );
    assert_eq!(diags[0].start, Some(directive.name_span.start));
}

#[test]
fn exported_declarations_are_not_reported() {
    let module = Rc::new(decl("EntryModule", "/lib/module.ts", 0).exported());
    let directive = Rc::new(decl("PublicDir", "/lib/module.ts", 100).exported());
    let mut sf = SourceFile::new("/lib/module.ts", "");
    sf.declarations.push(Rc::clone(&module));
    sf.declarations.push(Rc::clone(&directive));
    let program = Rc::new(Program::from_rc_files(vec![Rc::new(sf)]));

    let mut graph = ReferenceGraph::new();
    graph.add(&module, &directive);

    let checker = TypeChecker::new(program);
    assert!(check_for_private_exports("/lib/module.ts", &checker, &graph).is_empty());
}

#[test]
fn each_offender_is_reported_exactly_once() {
    // Two exported modules both make the same hidden directive visible.
    let module_a = Rc::new(decl("ModuleA", "/lib/m.ts", 0).exported());
    let module_b = Rc::new(decl("ModuleB", "/lib/m.ts", 50).exported());
    let hidden = Rc::new(decl("HiddenDir", "/lib/m.ts", 100));

    let mut sf = SourceFile::new("/lib/m.ts", "");
    sf.declarations.push(Rc::clone(&module_a));
    sf.declarations.push(Rc::clone(&module_b));
    sf.declarations.push(Rc::clone(&hidden));
    let program = Rc::new(Program::from_rc_files(vec![Rc::new(sf)]));

    let mut graph = ReferenceGraph::new();
    graph.add(&module_a, &hidden);
    graph.add(&module_b, &hidden);

    let checker = TypeChecker::new(program);
    let diags = check_for_private_exports("/lib/m.ts", &checker, &graph);
    assert_eq!(diags.len(), 1);
}

#[test]
fn reference_graph_adapter_records_edges() {
    let source = decl("Owner", "/lib/owner.ts", 0);
    let target = Rc::new(decl("Target", "/lib/target.ts", 0));
    let adapter = ReferenceGraphAdapter::new();
    adapter.add(&source, &[Reference::new(Rc::clone(&target))]);

    adapter.with_graph(|graph| {
        let refs = graph.transitive_references_of(&source.id());
        assert!(refs.contains(&target.id()));
    });
}

#[test]
fn transitive_references_include_indirect_targets() {
    let a = Rc::new(decl("A", "/x.ts", 0));
    let b = Rc::new(decl("B", "/x.ts", 10));
    let c = Rc::new(decl("C", "/x.ts", 20));
    let mut graph = ReferenceGraph::new();
    graph.add(&a, &b);
    graph.add(&b, &c);

    let refs = graph.transitive_references_of(&a.id());
    assert!(refs.contains(&c.id()));

    let path = graph.path_from(&a.id(), &c.id()).unwrap();
    let names: Vec<_> = path.iter().map(|d| d.name.clone().unwrap()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}
