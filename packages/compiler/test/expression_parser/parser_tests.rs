use angular_compiler::expression_parser::ast::{LiteralValue, AST};
use angular_compiler::expression_parser::parser::Parser;

fn parse(input: &str) -> AST {
    let result = Parser::parse_binding(input, "/test.html", 0);
    assert!(
        result.errors.is_empty(),
        "unexpected errors: {:?}",
        result.errors
    );
    result.ast
}

#[test]
fn parses_property_read_on_implicit_receiver() {
    match parse("title") {
        AST::PropertyRead(read) => {
            assert_eq!(read.name, "title");
            assert!(read.receiver.is_implicit_receiver());
        }
        other => panic!("expected PropertyRead, got {:?}", other),
    }
}

#[test]
fn parses_property_chains() {
    match parse("user.address.city") {
        AST::PropertyRead(read) => {
            assert_eq!(read.name, "city");
            match *read.receiver {
                AST::PropertyRead(inner) => assert_eq!(inner.name, "address"),
                other => panic!("expected nested PropertyRead, got {:?}", other),
            }
        }
        other => panic!("expected PropertyRead, got {:?}", other),
    }
}

#[test]
fn parses_method_calls_with_args() {
    match parse("load(1, 'two')") {
        AST::Call(call) => {
            assert_eq!(call.args.len(), 2);
            match &call.args[1] {
                AST::LiteralPrimitive(lit) => {
                    assert_eq!(lit.value, LiteralValue::Str("two".to_string()))
                }
                other => panic!("expected string literal, got {:?}", other),
            }
        }
        other => panic!("expected Call, got {:?}", other),
    }
}

#[test]
fn parses_binary_precedence() {
    // 1 + 2 * 3 must parse as 1 + (2 * 3).
    match parse("1 + 2 * 3") {
        AST::Binary(add) => {
            assert_eq!(add.operation, "+");
            match *add.right {
                AST::Binary(mul) => assert_eq!(mul.operation, "*"),
                other => panic!("expected Binary rhs, got {:?}", other),
            }
        }
        other => panic!("expected Binary, got {:?}", other),
    }
}

#[test]
fn parses_conditionals() {
    match parse("ok ? a : b") {
        AST::Conditional(_) => {}
        other => panic!("expected Conditional, got {:?}", other),
    }
}

#[test]
fn parses_pipes_with_arguments() {
    match parse("amount | currency:'EUR'") {
        AST::BindingPipe(pipe) => {
            assert_eq!(pipe.name, "currency");
            assert_eq!(pipe.args.len(), 1);
        }
        other => panic!("expected BindingPipe, got {:?}", other),
    }
}

#[test]
fn parses_safe_navigation() {
    match parse("user?.name") {
        AST::SafePropertyRead(read) => assert_eq!(read.name, "name"),
        other => panic!("expected SafePropertyRead, got {:?}", other),
    }
}

#[test]
fn binding_rejects_chains() {
    let result = Parser::parse_binding("a; b", "/test.html", 0);
    assert!(!result.errors.is_empty());
}

#[test]
fn action_allows_assignment() {
    let result = Parser::parse_action("value = $event", "/test.html", 0);
    assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
    match result.ast {
        AST::PropertyWrite(write) => assert_eq!(write.name, "value"),
        other => panic!("expected PropertyWrite, got {:?}", other),
    }
}

#[test]
fn interpolation_splits_strings_and_expressions() {
    let result = Parser::parse_interpolation("Hello {{first}} {{last}}!", "/test.html", 0).unwrap();
    match result.ast {
        AST::Interpolation(interp) => {
            assert_eq!(interp.strings, vec!["Hello ", " ", "!"]);
            assert_eq!(interp.expressions.len(), 2);
        }
        other => panic!("expected Interpolation, got {:?}", other),
    }
}

#[test]
fn interpolation_absent_returns_none() {
    assert!(Parser::parse_interpolation("static text", "/test.html", 0).is_none());
}

#[test]
fn interpolation_expression_offsets_are_absolute() {
    let result = Parser::parse_interpolation("ab {{cd}}", "/test.html", 100).unwrap();
    match result.ast {
        AST::Interpolation(interp) => {
            let span = interp.expressions[0].source_span();
            // "cd" starts 5 characters into the text.
            assert_eq!(span.start, 105);
        }
        other => panic!("expected Interpolation, got {:?}", other),
    }
}

#[test]
fn name_spans_point_at_the_accessed_property() {
    let result = Parser::parse_binding("user.name", "/test.html", 10);
    match result.ast {
        AST::PropertyRead(read) => {
            assert_eq!(read.name_span.start, 15);
            assert_eq!(read.name_span.end, 19);
        }
        other => panic!("expected PropertyRead, got {:?}", other),
    }
}
