//! Template Parser
//!
//! Parses component template markup into the render3 AST: element
//! structure, binding attributes (`[x]`, `(y)`, `[(z)]`, `*structural`),
//! local references, and interpolated text.

use std::rc::Rc;

use crate::expression_parser::parser::Parser;
use crate::parse_util::{ParseError, ParseSourceFile, ParseSourceSpan};
use crate::render3::r3_ast::*;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, Default)]
pub struct ParseTemplateOptions {
    pub preserve_whitespaces: bool,
}

#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    pub nodes: Vec<R3Node>,
    pub errors: Vec<ParseError>,
    pub source: Rc<ParseSourceFile>,
}

pub fn parse_template(source: &str, url: &str, options: &ParseTemplateOptions) -> ParsedTemplate {
    let file = ParseSourceFile::new(source, url);
    let mut parser = TemplateParser {
        file: Rc::clone(&file),
        source,
        pos: 0,
        errors: Vec::new(),
        preserve_whitespaces: options.preserve_whitespaces,
    };
    let nodes = parser.parse_nodes(None);
    ParsedTemplate {
        nodes,
        errors: parser.errors,
        source: file,
    }
}

struct TemplateParser<'a> {
    file: Rc<ParseSourceFile>,
    source: &'a str,
    pos: usize,
    errors: Vec<ParseError>,
    preserve_whitespaces: bool,
}

impl<'a> TemplateParser<'a> {
    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn span(&self, start: usize, end: usize) -> ParseSourceSpan {
        ParseSourceSpan::from_offsets(&self.file, start, end)
    }

    fn error(&mut self, start: usize, end: usize, msg: impl Into<String>) {
        let span = self.span(start, end);
        self.errors.push(ParseError::new(span, msg));
    }

    fn parse_nodes(&mut self, until_close: Option<&str>) -> Vec<R3Node> {
        let mut nodes = Vec::new();
        while self.pos < self.source.len() {
            if self.rest().starts_with("</") {
                if until_close.is_some() {
                    return nodes;
                }
                let start = self.pos;
                let close_end = self
                    .rest()
                    .find('>')
                    .map(|i| self.pos + i + 1)
                    .unwrap_or(self.source.len());
                self.error(start, close_end, "Unexpected closing tag");
                self.pos = close_end;
            } else if self.rest().starts_with("<!--") {
                match self.rest().find("-->") {
                    Some(i) => self.pos += i + 3,
                    None => {
                        let start = self.pos;
                        self.pos = self.source.len();
                        self.error(start, self.source.len(), "Unterminated comment");
                    }
                }
            } else if self.rest().starts_with('<') {
                if let Some(node) = self.parse_element() {
                    nodes.push(node);
                }
            } else {
                if let Some(node) = self.parse_text() {
                    nodes.push(node);
                }
            }
        }
        if let Some(tag) = until_close {
            self.error(
                self.source.len(),
                self.source.len(),
                format!("Unclosed tag <{}>", tag),
            );
        }
        nodes
    }

    fn parse_text(&mut self) -> Option<R3Node> {
        let start = self.pos;
        let end = self
            .rest()
            .find('<')
            .map(|i| self.pos + i)
            .unwrap_or(self.source.len());
        let text = &self.source[start..end];
        self.pos = end;

        let span = self.span(start, end);
        if let Some(interpolation) =
            Parser::parse_interpolation(text, &self.file.url, start)
        {
            self.errors.extend(interpolation.errors.iter().cloned());
            return Some(R3Node::BoundText(BoundText {
                value: interpolation,
                source_span: span,
            }));
        }
        if !self.preserve_whitespaces && text.trim().is_empty() {
            return None;
        }
        Some(R3Node::Text(Text {
            value: text.to_string(),
            source_span: span,
        }))
    }

    fn parse_element(&mut self) -> Option<R3Node> {
        let element_start = self.pos;
        self.pos += 1; // consume '<'
        let tag_start = self.pos;
        while self
            .rest()
            .starts_with(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == ':')
        {
            self.pos += 1;
        }
        let tag_name = self.source[tag_start..self.pos].to_string();
        if tag_name.is_empty() {
            self.error(element_start, self.pos, "Expected tag name after '<'");
            self.pos = self.source.len();
            return None;
        }

        let mut raw_attrs = Vec::new();
        let mut is_self_closing = false;
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("/>") {
                self.pos += 2;
                is_self_closing = true;
                break;
            }
            if self.rest().starts_with('>') {
                self.pos += 1;
                break;
            }
            if self.pos >= self.source.len() {
                self.error(element_start, self.pos, format!("Unterminated tag <{}>", tag_name));
                break;
            }
            match self.parse_raw_attribute() {
                Some(attr) => raw_attrs.push(attr),
                None => break,
            }
        }
        let start_tag_end = self.pos;
        let start_source_span = self.span(element_start, start_tag_end);

        let is_void = VOID_ELEMENTS.contains(&tag_name.as_str());
        let mut children = Vec::new();
        let mut end_source_span = None;
        let mut element_end = start_tag_end;

        if !is_self_closing && !is_void {
            children = self.parse_nodes(Some(&tag_name));
            // At a closing tag (any closing tag) or EOF here.
            if self.rest().starts_with("</") {
                let close_start = self.pos;
                let close_end = self
                    .rest()
                    .find('>')
                    .map(|i| self.pos + i + 1)
                    .unwrap_or(self.source.len());
                let close_name = self.source[close_start + 2..close_end.saturating_sub(1)].trim();
                if close_name != tag_name {
                    self.error(
                        close_start,
                        close_end,
                        format!("Expected closing tag </{}> but found </{}>", tag_name, close_name),
                    );
                }
                self.pos = close_end;
                end_source_span = Some(self.span(close_start, close_end));
                element_end = close_end;
            }
        }

        let source_span = self.span(element_start, element_end);
        Some(self.build_node(
            tag_name,
            raw_attrs,
            children,
            is_self_closing,
            source_span,
            start_source_span,
            end_source_span,
        ))
    }

    fn skip_whitespace(&mut self) {
        while self.rest().starts_with(|c: char| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn parse_raw_attribute(&mut self) -> Option<RawAttribute> {
        let key_start = self.pos;
        while self.rest().starts_with(|c: char| {
            !c.is_whitespace() && c != '=' && c != '>' && c != '/' && c != '<'
        }) {
            self.pos += 1;
        }
        if self.pos == key_start {
            // Stuck on an unexpected character; skip it to make progress.
            self.error(key_start, key_start + 1, "Unexpected character in tag");
            self.pos += 1;
            return None;
        }
        let name = self.source[key_start..self.pos].to_string();
        let key_end = self.pos;

        self.skip_whitespace();
        let mut value = String::new();
        let mut value_start = self.pos;
        let mut value_end = self.pos;
        if self.rest().starts_with('=') {
            self.pos += 1;
            self.skip_whitespace();
            if let Some(quote) = self.rest().chars().next().filter(|&c| c == '"' || c == '\'') {
                self.pos += 1;
                value_start = self.pos;
                match self.rest().find(quote) {
                    Some(i) => {
                        value_end = self.pos + i;
                        value = self.source[value_start..value_end].to_string();
                        self.pos = value_end + 1;
                    }
                    None => {
                        self.error(value_start, self.source.len(), "Unterminated attribute value");
                        self.pos = self.source.len();
                    }
                }
            } else {
                value_start = self.pos;
                while self.rest().starts_with(|c: char| {
                    !c.is_whitespace() && c != '>' && c != '/'
                }) {
                    self.pos += 1;
                }
                value_end = self.pos;
                value = self.source[value_start..value_end].to_string();
            }
        }

        Some(RawAttribute {
            name,
            value,
            key_span: (key_start, key_end),
            value_span: (value_start, value_end),
            source_span: (key_start, self.pos),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_node(
        &mut self,
        tag_name: String,
        raw_attrs: Vec<RawAttribute>,
        children: Vec<R3Node>,
        is_self_closing: bool,
        source_span: ParseSourceSpan,
        start_source_span: ParseSourceSpan,
        end_source_span: Option<ParseSourceSpan>,
    ) -> R3Node {
        let is_ng_template = tag_name == "ng-template";
        let mut attributes = Vec::new();
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        let mut references = Vec::new();
        let mut variables = Vec::new();
        let mut structural: Option<BoundAttribute> = None;

        for raw in raw_attrs {
            self.classify_attribute(
                raw,
                is_ng_template,
                &mut attributes,
                &mut inputs,
                &mut outputs,
                &mut references,
                &mut variables,
                &mut structural,
            );
        }

        if is_ng_template {
            return R3Node::Template(Template {
                tag_name: Some(tag_name),
                attributes,
                inputs,
                outputs,
                template_attrs: Vec::new(),
                children,
                references,
                variables,
                is_inline: false,
                source_span,
                start_source_span,
                end_source_span,
            });
        }

        let element = Element {
            name: tag_name.clone(),
            attributes,
            inputs,
            outputs,
            children,
            references,
            is_self_closing,
            source_span: source_span.clone(),
            start_source_span: start_source_span.clone(),
            end_source_span: end_source_span.clone(),
        };

        match structural {
            None => R3Node::Element(element),
            Some(template_binding) => {
                // Structural shorthand desugars to a surrounding template
                // whose nodes are marked as inline-generated.
                R3Node::Template(Template {
                    tag_name: Some(tag_name),
                    attributes: Vec::new(),
                    inputs: Vec::new(),
                    outputs: Vec::new(),
                    template_attrs: vec![AttributeNode::Bound(template_binding)],
                    children: vec![R3Node::Element(element)],
                    references: Vec::new(),
                    variables: Vec::new(),
                    is_inline: true,
                    source_span,
                    start_source_span,
                    end_source_span,
                })
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn classify_attribute(
        &mut self,
        raw: RawAttribute,
        is_ng_template: bool,
        attributes: &mut Vec<TextAttribute>,
        inputs: &mut Vec<BoundAttribute>,
        outputs: &mut Vec<BoundEvent>,
        references: &mut Vec<Reference>,
        variables: &mut Vec<Variable>,
        structural: &mut Option<BoundAttribute>,
    ) {
        let name = raw.name.clone();
        let source_span = self.span(raw.source_span.0, raw.source_span.1);
        let key_span = self.span(raw.key_span.0, raw.key_span.1);
        let value_span = if raw.value_span.0 == raw.value_span.1 {
            None
        } else {
            Some(self.span(raw.value_span.0, raw.value_span.1))
        };

        // Structural directive shorthand: *dir="expr".
        if let Some(dir_name) = name.strip_prefix('*') {
            let binding = self.bound_attribute(
                dir_name.to_string(),
                BindingType::Property,
                None,
                &raw,
                source_span,
                key_span,
                value_span,
            );
            if structural.is_some() {
                self.error(
                    raw.source_span.0,
                    raw.source_span.1,
                    "Can't have multiple template bindings on one element",
                );
            } else {
                *structural = Some(binding);
            }
            return;
        }

        // Two-way binding: [(x)] or bindon-x.
        let two_way_name = name
            .strip_prefix("[(")
            .and_then(|n| n.strip_suffix(")]"))
            .or_else(|| name.strip_prefix("bindon-"));
        if let Some(inner) = two_way_name {
            let inner = inner.to_string();
            inputs.push(self.bound_attribute(
                inner.clone(),
                BindingType::Property,
                None,
                &raw,
                source_span.clone(),
                key_span.clone(),
                value_span.clone(),
            ));
            let handler = Parser::parse_action(
                &format!("{} = $event", raw.value),
                &self.file.url,
                raw.value_span.0,
            );
            self.errors.extend(handler.errors.iter().cloned());
            outputs.push(BoundEvent {
                name: format!("{}Change", inner),
                event_type: ParsedEventType::TwoWay,
                handler,
                target: None,
                phase: None,
                source_span,
                handler_span: value_span.clone().unwrap_or_else(|| key_span.clone()),
                key_span,
            });
            return;
        }

        // Property binding: [x] or bind-x.
        let property_name = name
            .strip_prefix('[')
            .and_then(|n| n.strip_suffix(']'))
            .or_else(|| name.strip_prefix("bind-"));
        if let Some(inner) = property_name {
            let (binding_name, binding_type, unit) = classify_property_name(inner);
            inputs.push(self.bound_attribute(
                binding_name,
                binding_type,
                unit,
                &raw,
                source_span,
                key_span,
                value_span,
            ));
            return;
        }

        // Event binding: (y) or on-y. An invalid "banana in a box"
        // `([x])` lands here with the brackets kept in the name.
        let event_name = name
            .strip_prefix('(')
            .and_then(|n| n.strip_suffix(')'))
            .or_else(|| name.strip_prefix("on-"));
        if let Some(inner) = event_name {
            let handler = Parser::parse_action(&raw.value, &self.file.url, raw.value_span.0);
            self.errors.extend(handler.errors.iter().cloned());
            outputs.push(BoundEvent {
                name: inner.to_string(),
                event_type: ParsedEventType::Regular,
                handler,
                target: None,
                phase: None,
                source_span,
                handler_span: value_span.clone().unwrap_or_else(|| key_span.clone()),
                key_span,
            });
            return;
        }

        // Local reference: #ref or ref-x.
        let reference_name = name
            .strip_prefix('#')
            .or_else(|| name.strip_prefix("ref-"));
        if let Some(inner) = reference_name {
            references.push(Reference {
                name: inner.to_string(),
                value: raw.value.clone(),
                source_span,
                key_span,
                value_span,
            });
            return;
        }

        // Template input variable: let-x (only valid on <ng-template>).
        if let Some(inner) = name.strip_prefix("let-") {
            if !is_ng_template {
                self.error(
                    raw.source_span.0,
                    raw.source_span.1,
                    "\"let-\" is only supported on ng-template elements",
                );
            } else {
                variables.push(Variable {
                    name: inner.to_string(),
                    value: raw.value.clone(),
                    source_span,
                    key_span,
                    value_span,
                });
            }
            return;
        }

        // Plain attribute; interpolation in the value promotes it to a
        // property binding.
        if let Some(interpolation) =
            Parser::parse_interpolation(&raw.value, &self.file.url, raw.value_span.0)
        {
            self.errors.extend(interpolation.errors.iter().cloned());
            inputs.push(BoundAttribute {
                name,
                binding_type: BindingType::Property,
                value: interpolation,
                unit: None,
                source_span,
                key_span,
                value_span,
            });
            return;
        }

        attributes.push(TextAttribute {
            name,
            value: raw.value,
            source_span,
            key_span: Some(key_span),
            value_span,
        });
    }

    fn bound_attribute(
        &mut self,
        name: String,
        binding_type: BindingType,
        unit: Option<String>,
        raw: &RawAttribute,
        source_span: ParseSourceSpan,
        key_span: ParseSourceSpan,
        value_span: Option<ParseSourceSpan>,
    ) -> BoundAttribute {
        let value = Parser::parse_binding(&raw.value, &self.file.url, raw.value_span.0);
        self.errors.extend(value.errors.iter().cloned());
        BoundAttribute {
            name,
            binding_type,
            value,
            unit,
            source_span,
            key_span,
            value_span,
        }
    }
}

/// Splits `attr.`, `class.`, `style.` and `@animation` prefixes off a
/// property-binding name.
fn classify_property_name(name: &str) -> (String, BindingType, Option<String>) {
    if let Some(rest) = name.strip_prefix("attr.") {
        (rest.to_string(), BindingType::Attribute, None)
    } else if let Some(rest) = name.strip_prefix("class.") {
        (rest.to_string(), BindingType::Class, None)
    } else if let Some(rest) = name.strip_prefix("style.") {
        match rest.split_once('.') {
            Some((style, unit)) => (
                style.to_string(),
                BindingType::Style,
                Some(unit.to_string()),
            ),
            None => (rest.to_string(), BindingType::Style, None),
        }
    } else if let Some(rest) = name.strip_prefix('@') {
        (rest.to_string(), BindingType::Animation, None)
    } else {
        (name.to_string(), BindingType::Property, None)
    }
}

struct RawAttribute {
    name: String,
    value: String,
    key_span: (usize, usize),
    value_span: (usize, usize),
    source_span: (usize, usize),
}
