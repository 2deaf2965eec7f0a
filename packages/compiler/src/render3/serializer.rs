//! Compact JSON serializer for template ASTs, used by snapshot-style tests
//! and debug tooling.

use serde_json::{json, Value};

use super::r3_ast::*;

pub fn serialize_nodes(nodes: &[R3Node]) -> Value {
    Value::Array(nodes.iter().map(serialize_node).collect())
}

fn serialize_node(node: &R3Node) -> Value {
    match node {
        R3Node::Text(t) => json!({ "kind": "text", "value": t.value }),
        R3Node::BoundText(t) => json!({
            "kind": "boundText",
            "source": t.value.source,
        }),
        R3Node::Element(e) => json!({
            "kind": "element",
            "name": e.name,
            "attributes": e.attributes.iter().map(serialize_text_attribute).collect::<Vec<_>>(),
            "inputs": e.inputs.iter().map(serialize_bound_attribute).collect::<Vec<_>>(),
            "outputs": e.outputs.iter().map(serialize_bound_event).collect::<Vec<_>>(),
            "references": e.references.iter().map(|r| json!({ "name": r.name, "value": r.value })).collect::<Vec<_>>(),
            "children": serialize_nodes(&e.children),
        }),
        R3Node::Template(t) => json!({
            "kind": "template",
            "tagName": t.tag_name,
            "inline": t.is_inline,
            "attributes": t.attributes.iter().map(serialize_text_attribute).collect::<Vec<_>>(),
            "inputs": t.inputs.iter().map(serialize_bound_attribute).collect::<Vec<_>>(),
            "outputs": t.outputs.iter().map(serialize_bound_event).collect::<Vec<_>>(),
            "templateAttrs": t.template_attrs.iter().map(|a| match a {
                AttributeNode::Text(t) => serialize_text_attribute(t),
                AttributeNode::Bound(b) => serialize_bound_attribute(b),
            }).collect::<Vec<_>>(),
            "variables": t.variables.iter().map(|v| json!({ "name": v.name, "value": v.value })).collect::<Vec<_>>(),
            "references": t.references.iter().map(|r| json!({ "name": r.name, "value": r.value })).collect::<Vec<_>>(),
            "children": serialize_nodes(&t.children),
        }),
    }
}

fn serialize_text_attribute(attr: &TextAttribute) -> Value {
    json!({ "name": attr.name, "value": attr.value })
}

fn serialize_bound_attribute(attr: &BoundAttribute) -> Value {
    json!({
        "name": attr.name,
        "type": format!("{:?}", attr.binding_type),
        "source": attr.value.source,
    })
}

fn serialize_bound_event(event: &BoundEvent) -> Value {
    json!({
        "name": event.name,
        "type": format!("{:?}", event.event_type),
        "source": event.handler.source,
    })
}
