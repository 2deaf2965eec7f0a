use angular_compiler::render3::r3_ast::*;
use angular_compiler::template_parser::{parse_template, ParseTemplateOptions};

fn parse(template: &str) -> Vec<R3Node> {
    let parsed = parse_template(template, "/app/test.html", &ParseTemplateOptions::default());
    assert!(
        parsed.errors.is_empty(),
        "unexpected errors: {:?}",
        parsed.errors
    );
    parsed.nodes
}

fn first_element(nodes: &[R3Node]) -> &Element {
    match &nodes[0] {
        R3Node::Element(e) => e,
        other => panic!("expected element, got {:?}", other),
    }
}

#[test]
fn parses_nested_elements_and_text() {
    let nodes = parse("<div><span>hi</span></div>");
    let div = first_element(&nodes);
    assert_eq!(div.name, "div");
    assert_eq!(div.children.len(), 1);
    match &div.children[0] {
        R3Node::Element(span) => {
            assert_eq!(span.name, "span");
            match &span.children[0] {
                R3Node::Text(text) => assert_eq!(text.value, "hi"),
                other => panic!("expected text, got {:?}", other),
            }
        }
        other => panic!("expected span, got {:?}", other),
    }
}

#[test]
fn interpolated_text_becomes_bound_text() {
    let nodes = parse("<div>{{greeting}}</div>");
    let div = first_element(&nodes);
    assert!(matches!(div.children[0], R3Node::BoundText(_)));
}

#[test]
fn classifies_property_bindings() {
    let nodes = parse(r#"<input [value]="name">"#);
    let input = first_element(&nodes);
    assert_eq!(input.inputs.len(), 1);
    assert_eq!(input.inputs[0].name, "value");
    assert_eq!(input.inputs[0].binding_type, BindingType::Property);
}

#[test]
fn classifies_attribute_class_and_style_bindings() {
    let nodes = parse(r#"<div [attr.role]="r" [class.active]="a" [style.width.px]="w"></div>"#);
    let div = first_element(&nodes);
    let kinds: Vec<(String, BindingType, Option<String>)> = div
        .inputs
        .iter()
        .map(|i| (i.name.clone(), i.binding_type, i.unit.clone()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("role".to_string(), BindingType::Attribute, None),
            ("active".to_string(), BindingType::Class, None),
            ("width".to_string(), BindingType::Style, Some("px".to_string())),
        ]
    );
}

#[test]
fn classifies_event_bindings() {
    let nodes = parse(r#"<button (click)="save()">Go</button>"#);
    let button = first_element(&nodes);
    assert_eq!(button.outputs.len(), 1);
    assert_eq!(button.outputs[0].name, "click");
    assert_eq!(button.outputs[0].event_type, ParsedEventType::Regular);
}

#[test]
fn two_way_binding_desugars_into_input_and_change_event() {
    let nodes = parse(r#"<input [(value)]="name">"#);
    let input = first_element(&nodes);
    assert_eq!(input.inputs.len(), 1);
    assert_eq!(input.inputs[0].name, "value");
    assert_eq!(input.outputs.len(), 1);
    assert_eq!(input.outputs[0].name, "valueChange");
    assert_eq!(input.outputs[0].event_type, ParsedEventType::TwoWay);
}

#[test]
fn invalid_banana_in_box_parses_as_event_with_bracketed_name() {
    let parsed = parse_template(
        r#"<input ([value])="name">"#,
        "/app/test.html",
        &ParseTemplateOptions::default(),
    );
    let input = first_element(&parsed.nodes);
    assert_eq!(input.outputs.len(), 1);
    assert_eq!(input.outputs[0].name, "[value]");
}

#[test]
fn parses_local_references() {
    let nodes = parse(r#"<input #box value="x">"#);
    let input = first_element(&nodes);
    assert_eq!(input.references.len(), 1);
    assert_eq!(input.references[0].name, "box");
    assert_eq!(input.attributes.len(), 1);
    assert_eq!(input.attributes[0].name, "value");
}

#[test]
fn structural_shorthand_wraps_element_in_inline_template() {
    let nodes = parse(r#"<div *ngIf="visible">shown</div>"#);
    match &nodes[0] {
        R3Node::Template(template) => {
            assert!(template.is_inline);
            assert_eq!(template.tag_name.as_deref(), Some("div"));
            assert_eq!(template.template_attrs.len(), 1);
            match &template.template_attrs[0] {
                AttributeNode::Bound(bound) => assert_eq!(bound.name, "ngIf"),
                other => panic!("expected bound template attr, got {:?}", other),
            }
            assert!(matches!(template.children[0], R3Node::Element(_)));
        }
        other => panic!("expected template, got {:?}", other),
    }
}

#[test]
fn ng_template_parses_with_variables() {
    let nodes = parse(r#"<ng-template let-item="ctx"><span>{{item}}</span></ng-template>"#);
    match &nodes[0] {
        R3Node::Template(template) => {
            assert!(!template.is_inline);
            assert_eq!(template.tag_name.as_deref(), Some("ng-template"));
            assert_eq!(template.variables.len(), 1);
            assert_eq!(template.variables[0].name, "item");
        }
        other => panic!("expected template, got {:?}", other),
    }
}

#[test]
fn attribute_interpolation_promotes_to_property_binding() {
    let nodes = parse(r#"<img alt="Photo of {{name}}">"#);
    let img = first_element(&nodes);
    assert!(img.attributes.is_empty());
    assert_eq!(img.inputs.len(), 1);
    assert_eq!(img.inputs[0].name, "alt");
}

#[test]
fn void_elements_do_not_consume_following_siblings() {
    let nodes = parse("<div><br><span>after</span></div>");
    let div = first_element(&nodes);
    assert_eq!(div.children.len(), 2);
}

#[test]
fn mismatched_closing_tag_reports_error() {
    let parsed = parse_template(
        "<div><span></div>",
        "/app/test.html",
        &ParseTemplateOptions::default(),
    );
    assert!(!parsed.errors.is_empty());
}

#[test]
fn spans_cover_the_source_text() {
    let source = r#"<div [title]="t">x</div>"#;
    let nodes = parse(source);
    let div = first_element(&nodes);
    assert_eq!(div.source_span.text(), source);
    assert_eq!(div.inputs[0].key_span.text(), "[title]");
}
