use angular_compiler::expression_parser::lexer::{Lexer, TokenKind};
use pretty_assertions::assert_eq;

#[test]
fn tokenizes_identifiers_and_keywords() {
    let tokens = Lexer::tokenize("items this true");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].str_value, "items");
    assert_eq!(tokens[1].kind, TokenKind::Keyword);
    assert_eq!(tokens[2].kind, TokenKind::Keyword);
}

#[test]
fn tokenizes_numbers_including_fractions() {
    let tokens = Lexer::tokenize("42 3.14 .5 1_000");
    let values: Vec<f64> = tokens.iter().map(|t| t.num_value).collect();
    assert_eq!(values, vec![42.0, 3.14, 0.5, 1000.0]);
}

#[test]
fn tokenizes_strings_with_escapes() {
    let tokens = Lexer::tokenize(r#"'a\'b' "c\nd""#);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].str_value, "a'b");
    assert_eq!(tokens[1].str_value, "c\nd");
}

#[test]
fn unterminated_string_is_an_error_token() {
    let tokens = Lexer::tokenize("'abc");
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Error);
}

#[test]
fn tokenizes_compound_operators() {
    let tokens = Lexer::tokenize("a !== b && c ?. d ?? e");
    let ops: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Operator)
        .map(|t| t.str_value.as_str())
        .collect();
    assert_eq!(ops, vec!["!==", "&&", "?.", "??"]);
}

#[test]
fn records_token_offsets() {
    let tokens = Lexer::tokenize("ab + cd");
    assert_eq!((tokens[0].index, tokens[0].end), (0, 2));
    assert_eq!((tokens[1].index, tokens[1].end), (3, 4));
    assert_eq!((tokens[2].index, tokens[2].end), (5, 7));
}
