// tests/lexer_tests.rs

use doc_expr::ast::{Symbol, Token};
use doc_expr::lexer::{Lexer, tokenize};
use doc_expr::Error;
use rstest::rstest;

fn symbols(input: &str) -> Vec<Symbol> {
    tokenize(input).unwrap().iter().map(|t| t.symbol).collect()
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_empty_input_yields_no_tokens() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("   \n\t").unwrap().is_empty());
}

#[test]
fn test_simple_assignment() {
    let tokens = Lexer::new("id = 10").tokenize().unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new(Symbol::String, "id"),
            Token::keyword(Symbol::Assign),
            Token::new(Symbol::Int, "10"),
        ]
    );
}

#[rstest]
#[case("=", Symbol::Assign)]
#[case("==", Symbol::Eql)]
#[case("!=", Symbol::Neq)]
#[case(",", Symbol::List)]
#[case("-", Symbol::Neg)]
#[case("(", Symbol::Open)]
#[case(")", Symbol::Close)]
#[case("AND", Symbol::And)]
#[case("and", Symbol::And)]
#[case("Or", Symbol::Or)]
fn test_single_keyword(#[case] input: &str, #[case] expected: Symbol) {
    assert_eq!(symbols(input), vec![expected]);
}

#[test]
fn test_keywords_carry_canonical_text() {
    let tokens = tokenize("a and b").unwrap();
    assert_eq!(tokens[1].text, "AND");
}

#[test]
fn test_keyword_prefix_inside_identifier_is_not_a_keyword() {
    assert_eq!(symbols("android"), vec![Symbol::String]);
    assert_eq!(symbols("order"), vec![Symbol::String]);
}

// ============================================================================
// Numbers
// ============================================================================

#[rstest]
#[case("42", Symbol::Int, "42")]
#[case("2.5", Symbol::Float, "2.5")]
#[case(".5", Symbol::Float, ".5")]
#[case("1e3", Symbol::Float, "1e3")]
#[case("1E-2", Symbol::Float, "1E-2")]
#[case("6.02e+23", Symbol::Float, "6.02e+23")]
fn test_numbers(#[case] input: &str, #[case] symbol: Symbol, #[case] text: &str) {
    assert_eq!(tokenize(input).unwrap(), vec![Token::new(symbol, text)]);
}

#[test]
fn test_exponent_without_digits_is_not_consumed() {
    assert_eq!(
        tokenize("1e").unwrap(),
        vec![Token::new(Symbol::Int, "1"), Token::new(Symbol::String, "e")]
    );
}

#[test]
fn test_minus_before_number_is_separate_token() {
    assert_eq!(symbols("a = -5"), vec![Symbol::String, Symbol::Assign, Symbol::Neg, Symbol::Int]);
}

// ============================================================================
// Strings
// ============================================================================

#[rstest]
#[case(r#""wd-20""#, "wd-20")]
#[case("'tree'", "tree")]
#[case(r#""a\"b""#, "a\"b")]
#[case(r"'it\'s'", "it's")]
#[case(r#""tab\there""#, "tab\there")]
#[case(r#""back\\slash""#, "back\\slash")]
#[case(r"`raw\n`", "raw\\n")]
#[case(r#""""#, "")]
fn test_strings(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(tokenize(input).unwrap(), vec![Token::quoted(expected)]);
}

#[test]
fn test_quoted_keyword_stays_a_string() {
    assert_eq!(tokenize("'AND'").unwrap(), vec![Token::new(Symbol::String, "AND")]);
    assert_eq!(tokenize("\"=\"").unwrap(), vec![Token::new(Symbol::String, "=")]);
}

#[rstest]
#[case(r#""abc"#, "literal not terminated")]
#[case("'abc\n'", "literal not terminated")]
#[case("`abc", "literal not terminated")]
#[case(r#""\q""#, "invalid char escape")]
#[case("/* open", "comment not terminated")]
fn test_scan_errors(#[case] input: &str, #[case] message: &str) {
    match tokenize(input) {
        Err(Error::Syntax(msg)) => assert_eq!(msg, message),
        other => panic!("expected syntax error for {input:?}, got {other:?}"),
    }
}

#[test]
fn test_first_scan_error_wins() {
    let err = tokenize(r#""\q" "open"#).unwrap_err();
    assert_eq!(err.message(), "invalid char escape");
}

// ============================================================================
// Comments and glyph runs
// ============================================================================

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        symbols("a // trailing\n= /* inline */ 1"),
        vec![Symbol::String, Symbol::Assign, Symbol::Int]
    );
}

#[test]
fn test_lone_slash_is_a_string() {
    assert_eq!(
        tokenize("a/b").unwrap(),
        vec![
            Token::new(Symbol::String, "a"),
            Token::new(Symbol::String, "/"),
            Token::new(Symbol::String, "b"),
        ]
    );
}

#[test]
fn test_longest_operator_wins() {
    assert_eq!(symbols("a==b"), vec![Symbol::String, Symbol::Eql, Symbol::String]);
    assert_eq!(symbols("a=-1"), vec![Symbol::String, Symbol::Assign, Symbol::Neg, Symbol::Int]);
}

#[test]
fn test_unknown_glyphs_split_at_next_keyword() {
    let tokens = tokenize("x&&(y)").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new(Symbol::String, "x"),
            Token::new(Symbol::String, "&&"),
            Token::keyword(Symbol::Open),
            Token::new(Symbol::String, "y"),
            Token::keyword(Symbol::Close),
        ]
    );
}

#[test]
fn test_parentheses_without_spaces() {
    assert_eq!(
        symbols("(a=1),b"),
        vec![
            Symbol::Open,
            Symbol::String,
            Symbol::Assign,
            Symbol::Int,
            Symbol::Close,
            Symbol::List,
            Symbol::String,
        ]
    );
}

#[test]
fn test_unicode_identifiers() {
    assert_eq!(
        tokenize("größe = 1").unwrap()[0],
        Token::new(Symbol::String, "größe")
    );
}
