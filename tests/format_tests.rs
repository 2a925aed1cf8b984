// tests/format_tests.rs

use std::sync::Arc;

use doc_expr::{
    DefaultFormat, Error, ErrorKind, Extract, Fact, Format, KeywordFormat, Literal, LiteralKind,
    Result, parse, with_defaults,
};
use rstest::rstest;

fn render(input: &str) -> Result<String> {
    parse(input)?.render(&DefaultFormat)
}

/// Renders only `AND`; every other keyword is unsupported.
struct AndOnly;

impl Format for AndOnly {
    fn keyword(&self, name: &str) -> Option<String> {
        (name == "AND").then(|| " & ".to_owned())
    }

    fn value(&self, literal: &Literal) -> Result<String> {
        Ok(literal.to_string())
    }
}

/// Refuses to render any value, naming it in the error.
struct NoValues;

impl Format for NoValues {
    fn keyword(&self, name: &str) -> Option<String> {
        DefaultFormat.keyword(name)
    }

    fn value(&self, literal: &Literal) -> Result<String> {
        Err(Error::Mismatch(format!("no {literal}")))
    }
}

// ============================================================================
// Default rendering
// ============================================================================

#[rstest]
#[case("id = 10 and step = 1", "id = 10 AND step = 1")]
#[case(r#"id = "tree""#, "id = tree")]
#[case("(id = 10)", "(id = 10)")]
#[case("id,  form", "id, form")]
#[case(r#"id = 10 AND form = "wd-20""#, "id = 10 AND form = wd-20")]
#[case("a or b", "a OR b")]
#[case("a==b", "a == b")]
#[case("a != 'x'", "a != x")]
#[case("a = -5", "a = -5")]
#[case("x = 2.5", "x = 2.5")]
#[case("x = 1e3", "x = 1000.0")]
#[case("x = 2.0", "x = 2.0")]
#[case("x = 1e19", "x = 1e19")]
#[case("x = 1e300", "x = 1e300")]
#[case("(a = 1 OR b = 2) and c = 3", "(a = 1 OR b = 2) AND c = 3")]
fn test_render_default(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(render(input).unwrap(), expected);
}

#[rstest]
#[case("id = 10 and form = wd-20")]
#[case("id = 10 && form = wd20")]
fn test_render_rejects_unquoted_multi_token_values(#[case] input: &str) {
    assert_eq!(render(input).unwrap_err().kind(), ErrorKind::Syntax);
}

#[rstest]
#[case("id = 10 and step = 1, (a or b)")]
#[case("x = 1e19")]
#[case("x = -1e300 AND y = 0.000001")]
#[case("x = 12345678901234567890.0")]
fn test_render_is_idempotent(#[case] input: &str) {
    let once = render(input).unwrap();
    let twice = render(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_large_float_keeps_its_value() {
    let once = render("x = 12345678901234567890.0").unwrap();
    assert_eq!(parse(&once).unwrap(), parse("x = 12345678901234567890.0").unwrap());
}

// ============================================================================
// Strategies
// ============================================================================

#[test]
fn test_unsupported_keyword_is_named() {
    let ast = parse("a = 1 AND b = 2").unwrap();
    let err = ast.render(&AndOnly).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(err.message().contains("\"=\""), "{err}");
}

#[test]
fn test_composite_fills_in_missing_keywords() {
    let format = with_defaults(Some(Arc::new(AndOnly)));
    let ast = parse("a = 1 AND b = 2").unwrap();
    assert_eq!(ast.render(&format).unwrap(), "a = 1 & b = 2");
}

#[test]
fn test_keyword_dialect_from_json() {
    let dialect: KeywordFormat = serde_json::from_str(
        r#"{"keywords": {"AND": " && ", "OR": " || "}, "quote": "'"}"#,
    )
    .unwrap();
    let format = with_defaults(Some(Arc::new(dialect)));
    let ast = parse("id = tree and step = 1 or x = 2").unwrap();
    assert_eq!(ast.render(&format).unwrap(), "id = 'tree' && step = 1 || x = 2");
}

#[test]
fn test_unsupported_value_kind_falls_back_under_composite() {
    let dialect = KeywordFormat {
        unsupported: vec![LiteralKind::Int],
        ..KeywordFormat::default().quoted('"')
    };

    let ast = parse("id = 10").unwrap();
    let err = ast.render(&dialect).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mismatch);
    assert!(err.message().contains("int"), "{err}");

    let format = with_defaults(Some(Arc::new(dialect)));
    assert_eq!(ast.render(&format).unwrap(), "id = 10");
    assert_eq!(parse("id = x").unwrap().render(&format).unwrap(), r#"id = "x""#);
}

#[test]
fn test_structural_literals_bypass_value_rendering() {
    let format = KeywordFormat::default().quoted('\'');
    let ast = parse("a == b, c").unwrap();
    assert_eq!(ast.render(&with_defaults(Some(Arc::new(format)))).unwrap(), "a == b, c");
}

#[test]
fn test_group_inherits_value_context() {
    let format = with_defaults(Some(Arc::new(KeywordFormat::default().quoted('\''))));
    let ast = parse("a = (b)").unwrap();
    assert_eq!(ast.render(&format).unwrap(), "a = ('b')");
}

#[test]
fn test_left_error_wins_when_both_sides_fail() {
    let ast = parse("(a = 1) = (b = 2)").unwrap();
    let err = ast.render(&NoValues).unwrap_err();
    assert_eq!(err, Error::Mismatch("no 1".into()));
}

#[test]
fn test_value_failure_propagates_unchanged() {
    let err = parse("a = 1").unwrap().render(&NoValues).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mismatch);
}

// ============================================================================
// Fields
// ============================================================================

#[rstest]
#[case("id = 10 AND step = 1", &["id", "step"])]
#[case("a, b, a", &["a", "b", "a"])]
#[case("a == b", &["a", "b"])]
#[case("id = tree", &["id"])]
#[case("1 == a", &["a"])]
#[case("a = (b)", &["a"])]
#[case("(x = 1) OR (y = 2)", &["x", "y"])]
fn test_fields(#[case] input: &str, #[case] expected: &[&str]) {
    assert_eq!(parse(input).unwrap().fields(), expected);
}

// ============================================================================
// Extraction
// ============================================================================

fn facts(input: &str) -> Vec<Fact> {
    let mut facts = Vec::new();
    parse(input).unwrap().extract(&mut facts).unwrap();
    facts
}

#[test]
fn test_extract_conjunctions_and_assignments() {
    assert_eq!(
        facts("id = 10 OR (step = 1)"),
        vec![
            Fact::conjunction("OR"),
            Fact::assignment("id", "10"),
            Fact::assignment("step", "1"),
        ]
    );
}

#[test]
fn test_extract_list() {
    assert_eq!(
        facts("a = 1, b = x"),
        vec![
            Fact::conjunction(","),
            Fact::assignment("a", "1"),
            Fact::assignment("b", "x"),
        ]
    );
}

#[test]
fn test_extract_skips_non_literal_operands() {
    assert!(facts("a = (b)").is_empty());
}

#[test]
fn test_extract_comparisons() {
    assert_eq!(
        facts("a == 1 AND b != c"),
        vec![
            Fact::conjunction("AND"),
            Fact::comparison("==", "a", "1"),
            Fact::comparison("!=", "b", "c"),
        ]
    );
}

/// Only counts assignments; relies on the default comparison handler.
#[derive(Default)]
struct Counter {
    assignments: usize,
    conjunctions: usize,
}

impl Extract for Counter {
    fn conjunction(&mut self, _keyword: &str) -> Result<()> {
        self.conjunctions += 1;
        Ok(())
    }

    fn assignment(&mut self, _field: &str, _value: &str) -> Result<()> {
        self.assignments += 1;
        Ok(())
    }
}

#[test]
fn test_comparison_handler_is_optional() {
    let mut counter = Counter::default();
    parse("a = 1 AND b == 2 AND c = 3")
        .unwrap()
        .extract(&mut counter)
        .unwrap();
    assert_eq!(counter.assignments, 2);
    assert_eq!(counter.conjunctions, 2);
}

struct Refuse;

impl Extract for Refuse {
    fn conjunction(&mut self, keyword: &str) -> Result<()> {
        Err(Error::Condition(format!("no {keyword}")))
    }

    fn assignment(&mut self, _field: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

#[test]
fn test_visitor_error_stops_the_walk() {
    let err = parse("a = 1 OR b = 2").unwrap().extract(&mut Refuse).unwrap_err();
    assert_eq!(err, Error::Condition("no OR".into()));
}
