use super::src::host::ReflectionHost;
use super::src::typescript::{lower_source_file, TsReflectionHost};
use std::rc::Rc;
use ts::{ClassMemberKind, DeclarationKind, MetaValue, Program, TypeNode};

const COMPONENT_SOURCE: &str = r#"
import {Component} from '@angular/core';
import {Dep} from './dep';

@Component({
  selector: 'app-hello',
  template: '<div>{{title}}</div>',
  styleUrls: ['./hello.css'],
})
export class HelloCmp {
  title: string;
  count: number;

  constructor(private dep: Dep) {}

  reload(): void {}
}

class Helper {}
"#;

#[test]
fn lowers_decorated_exported_classes() {
    let sf = lower_source_file(COMPONENT_SOURCE, "/app/hello.ts");
    let hello = sf.declaration("HelloCmp").expect("HelloCmp not lowered");
    assert!(hello.is_exported);
    assert_eq!(hello.kind, DeclarationKind::Class);

    let component = hello.decorator("Component").expect("missing @Component");
    assert_eq!(
        component.property("selector").unwrap().value.as_str(),
        Some("app-hello")
    );
    let style_urls = component.property("styleUrls").unwrap();
    match &style_urls.value {
        MetaValue::Array(items) => assert_eq!(items[0].as_str(), Some("./hello.css")),
        other => panic!("expected array, got {:?}", other),
    }

    let helper = sf.declaration("Helper").unwrap();
    assert!(!helper.is_exported);
    assert!(helper.decorators.is_empty());
}

#[test]
fn lowers_members_and_constructor_parameters() {
    let sf = lower_source_file(COMPONENT_SOURCE, "/app/hello.ts");
    let hello = Rc::clone(sf.declaration("HelloCmp").unwrap());
    let program = Rc::new(Program::from_rc_files(vec![Rc::new(sf)]));
    let host = TsReflectionHost::new(program);

    let members = host.get_members_of_class(&hello);
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert!(names.contains(&"title"));
    assert!(names.contains(&"reload"));

    let title = hello.member("title").unwrap();
    assert_eq!(title.kind, ClassMemberKind::Property);
    assert!(matches!(title.type_node, Some(TypeNode::Keyword(_))));

    let params = host.get_constructor_parameters(&hello).unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name.as_deref(), Some("dep"));
}

#[test]
fn absent_constructor_reports_none_not_panic() {
    let sf = lower_source_file("export class NoCtor { x: number; }", "/app/a.ts");
    let decl = Rc::clone(sf.declaration("NoCtor").unwrap());
    let host = TsReflectionHost::new(Rc::new(Program::from_rc_files(vec![Rc::new(sf)])));
    assert!(host.get_constructor_parameters(&decl).is_none());
}

#[test]
#[should_panic(expected = "class-like")]
fn member_query_on_function_is_a_contract_violation() {
    let sf = lower_source_file("export function f(): void {}", "/app/f.ts");
    let decl = Rc::clone(sf.declaration("f").unwrap());
    let host = TsReflectionHost::new(Rc::new(Program::from_rc_files(vec![Rc::new(sf)])));
    host.get_members_of_class(&decl);
}

#[test]
fn resolves_exports_with_aliases() {
    let dep = lower_source_file("export class Dep {}", "/app/dep.ts");
    let index = lower_source_file("export {Dep as PublicDep} from './dep';", "/app/index.ts");
    let program = Rc::new(Program::from_rc_files(vec![Rc::new(dep), Rc::new(index)]));
    let host = TsReflectionHost::new(program);

    let exports = host.get_exports_of_module("/app/index.ts").unwrap();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].name.as_deref(), Some("Dep"));
    assert!(host.get_exports_of_module("/app/missing.ts").is_none());
}

#[test]
fn lowers_generic_classes_and_import_types() {
    let source = r#"
export class Container<T extends Item> {
  value: T;
  hidden: import('./secret').Hidden;
}
export interface Item { id: number; }
"#;
    let sf = lower_source_file(source, "/app/container.ts");
    let container = Rc::clone(sf.declaration("Container").unwrap());
    let host = TsReflectionHost::new(Rc::new(Program::from_rc_files(vec![Rc::new(sf)])));

    assert_eq!(host.get_generic_arity_of_class(&container), Some(1));
    assert_eq!(container.type_parameters[0].name, "T");
    assert!(container.type_parameters[0].constraint.is_some());

    let hidden = container.member("hidden").unwrap();
    match &hidden.type_node {
        Some(TypeNode::Import(import)) => {
            assert_eq!(import.specifier, "./secret");
            assert_eq!(import.qualifier, "Hidden");
        }
        other => panic!("expected import type, got {:?}", other),
    }
}
