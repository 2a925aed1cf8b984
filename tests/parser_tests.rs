// tests/parser_tests.rs

use doc_expr::ast::{BinaryOp, Node, Symbol};
use doc_expr::lexer::tokenize;
use doc_expr::parser::{Parser, parse};
use doc_expr::{Error, ErrorKind, Literal};
use rstest::rstest;

fn v(literal: impl Into<Literal>) -> Node {
    Node::value(literal)
}

fn assign(field: &str, value: impl Into<Literal>) -> Node {
    Node::binary(BinaryOp::Assign, v(field), v(value))
}

// ============================================================================
// Precedence and associativity
// ============================================================================

#[test]
fn test_assignment_binds_tighter_than_conjunction() {
    let ast = parse("id = 10 and step = 1").unwrap();
    assert_eq!(
        ast,
        Node::binary(BinaryOp::And, assign("id", 10), assign("step", 1))
    );
}

#[test]
fn test_list_associates_left() {
    let ast = parse("a, b, c").unwrap();
    assert_eq!(
        ast,
        Node::binary(
            BinaryOp::List,
            Node::binary(BinaryOp::List, v("a"), v("b")),
            v("c"),
        )
    );
}

#[test]
fn test_and_or_share_binding_power() {
    let ast = parse("a = 1 OR b = 2 AND c = 3").unwrap();
    assert_eq!(
        ast,
        Node::binary(
            BinaryOp::And,
            Node::binary(BinaryOp::Or, assign("a", 1), assign("b", 2)),
            assign("c", 3),
        )
    );
}

#[test]
fn test_comparison_binds_tighter_than_conjunction() {
    let ast = parse("a == b, c != 'd'").unwrap();
    assert_eq!(
        ast,
        Node::binary(
            BinaryOp::List,
            Node::binary(BinaryOp::Equal, v("a"), v("b")),
            Node::binary(BinaryOp::NotEqual, v("c"), v("d")),
        )
    );
}

#[test]
fn test_group_overrides_precedence() {
    let ast = parse("x = 1 AND (a = 1 OR b = 2)").unwrap();
    assert_eq!(
        ast,
        Node::binary(
            BinaryOp::And,
            assign("x", 1),
            Node::group(Node::binary(BinaryOp::Or, assign("a", 1), assign("b", 2))),
        )
    );
}

#[test]
fn test_nested_groups() {
    let ast = parse("((id = 10))").unwrap();
    assert_eq!(ast, Node::group(Node::group(assign("id", 10))));
}

// ============================================================================
// Literals
// ============================================================================

#[rstest]
#[case("a = 10", Literal::Int(10))]
#[case("a = -5", Literal::Int(-5))]
#[case("a = 2.5", Literal::Float(2.5))]
#[case("a = -0.25", Literal::Float(-0.25))]
#[case("a = 1e3", Literal::Float(1000.0))]
#[case("a = 'wd-20'", Literal::String("wd-20".into()))]
#[case("a = `and`", Literal::String("and".into()))]
fn test_value_literals(#[case] input: &str, #[case] expected: Literal) {
    assert_eq!(parse(input).unwrap(), Node::binary(BinaryOp::Assign, v("a"), Node::Value(expected)));
}

#[test]
fn test_single_value() {
    assert_eq!(parse("id").unwrap(), v("id"));
    assert_eq!(parse("42").unwrap(), v(42));
}

#[test]
fn test_integer_overflow_is_syntax_error() {
    let err = parse("a = 99999999999999999999").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(err.message().contains("99999999999999999999"), "{err}");
}

// ============================================================================
// Errors
// ============================================================================

#[rstest]
#[case("", "premature stop")]
#[case("id =", "premature stop")]
#[case("a AND", "premature stop")]
#[case("(id = 10", "missing close for `(`")]
#[case("id = 10)", "unmatched `)`")]
#[case(")", "unmatched `)`")]
#[case("()", "unmatched `)`")]
#[case("= 10", "missing left operand for `=`")]
#[case("AND b", "missing left operand for `AND`")]
#[case("a = -b", "missing number after `-`, found `b`")]
#[case("a = -", "premature stop after `-`")]
fn test_parse_errors(#[case] input: &str, #[case] message: &str) {
    match parse(input) {
        Err(Error::Parse(msg)) => assert!(msg.contains(message), "{input:?}: {msg}"),
        other => panic!("expected parse error for {input:?}, got {other:?}"),
    }
}

#[rstest]
#[case("id = 10 and form = wd-20", "`-` after `wd`")]
#[case("id = 10 && form = wd20", "`&&` after `10`")]
#[case("form = two words", "`words` after `two`")]
#[case("(a = 1) b", "`b` after `)`")]
fn test_juxtaposed_operands_are_syntax_errors(#[case] input: &str, #[case] fragment: &str) {
    match parse(input) {
        Err(Error::Syntax(msg)) => {
            assert!(msg.contains(fragment), "{input:?}: {msg}");
            assert!(msg.contains("quote values"), "{msg}");
        }
        other => panic!("expected syntax error for {input:?}, got {other:?}"),
    }
}

#[test]
fn test_quoted_multi_token_value_is_accepted() {
    let ast = parse(r#"id = 10 AND form = "wd-20""#).unwrap();
    assert_eq!(
        ast,
        Node::binary(BinaryOp::And, assign("id", 10), assign("form", "wd-20"))
    );
}

#[test]
fn test_lexer_errors_surface_from_parse() {
    let err = parse("a = 'open").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

// ============================================================================
// Parser engine
// ============================================================================

#[test]
fn test_peek_past_end_is_illegal() {
    let mut parser = Parser::new(tokenize("a").unwrap());
    assert_eq!(parser.peek().symbol, Symbol::String);
    assert!(parser.next().is_some());
    assert_eq!(parser.peek().symbol, Symbol::Illegal);
    assert!(parser.next().is_none());
}

#[test]
fn test_parse_tree_shape() {
    let mut parser = Parser::new(tokenize("a = 1").unwrap());
    let tree = parser.parse().unwrap();
    assert_eq!(tree.symbol(), Symbol::Assign);
    assert_eq!(tree.text(), "=");
    let children: Vec<&str> = tree.children().iter().map(|c| c.text()).collect();
    assert_eq!(children, vec!["a", "1"]);
}
