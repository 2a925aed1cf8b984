//! Documentation content for the doc-expr CLI

/// Get the syntax reference
pub fn get_docs_overview() -> &'static str {
    r#"DOC-EXPR SYNTAX

doc-expr parses backend-agnostic filter expressions and renders them in a
storage backend's dialect.

GRAMMAR

  expr     := term ( (AND|OR|',') term )*
  term     := operand [ ('='|'=='|'!=') operand ]
  operand  := identifier | quoted-string | number | '(' expr ')'

OPERATORS (loosest to tightest)

  ,  AND  OR        List and conjunctions, left-associative
  ==  !=            Comparison
  =                 Assignment: field = value

LITERALS

  step  _id         Identifiers (field names)
  10  -3  2.5  1e3  Numbers
  "wd-20"  'x'      Quoted strings, escapes \n \t \r \0 \\ \" \'
  `raw\text`        Raw strings, no escapes

Keywords are case-insensitive: `and` and `AND` are the same operator.
Values that span several tokens must be quoted: form = "wd-20".
Comments: // to end of line, /* ... */

EXAMPLES

  doc-expr check 'id = 10 and step = 1'      => id = 10 AND step = 1
  doc-expr fields 'id = 10 AND step = 1'     => ["id","step"]
  doc-expr extract 'id = 10 OR id = 11'
  doc-expr tree '(a = 1), b'
  doc-expr build '["id", "=", 10]'           => id = 10
"#
}
