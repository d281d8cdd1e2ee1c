//! Unit tests for the lexer module.
//!
//! Covers keywords, identifiers, literals, operators, comments and the
//! error raised for characters outside the language.

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.qk".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("class def extends new return if elif else while typecase and or not true false none"),
        vec![
            TokenKind::Class,
            TokenKind::Def,
            TokenKind::Extends,
            TokenKind::New,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Elif,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Typecase,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::True,
            TokenKind::False,
            TokenKind::NoneLiteral,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase classy".to_string();
    let tokens = tokenize(source, Some("test.qk".to_string())).unwrap();

    let values: Vec<&str> = tokens[..6].iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar", "baz_123", "_underscore", "CamelCase", "classy"]);
    assert!(tokens[..6].iter().all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 0 100".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "100");
}

#[test]
fn test_tokenize_string_escapes() {
    let tokens = tokenize(r#""a\tb" "say \"hi\"\n""#.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\tb");
    assert_eq!(tokens[1].value, "say \"hi\"\n");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("= == < <= > >= + - * / . ; : , ( ) { }"),
        vec![
            TokenKind::Assignment,
            TokenKind::Equals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Dot,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("x // trailing comment\n/* block\ncomment */ y"),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_token_spans_are_byte_offsets() {
    let tokens = tokenize("x = \"hi\";".to_string(), None).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].span.start.0, 2);
    assert_eq!(tokens[2].span.start.0, 4);
    assert_eq!(tokens[2].span.end.0, 8);
    assert_eq!(tokens[3].span.start.0, 8);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("x = 1 @ 2;".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 6);
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}
