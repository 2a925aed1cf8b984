//! JSON <-> Literal conversion utilities

use crate::{Literal, Node};

/// Convert a JSON scalar to a Literal. Arrays, objects, booleans and null
/// have no literal form.
pub fn json_to_literal(v: &serde_json::Value) -> Option<Literal> {
    match v {
        serde_json::Value::String(s) => Some(Literal::String(s.clone())),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Literal::Int(i)),
            None => n.as_f64().map(Literal::Float),
        },
        _ => None,
    }
}

/// Convert a Literal to serde_json::Value
pub fn literal_to_json(literal: &Literal) -> serde_json::Value {
    match literal {
        Literal::Int(i) => serde_json::Value::Number((*i).into()),
        Literal::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Literal::String(s) => serde_json::Value::String(s.clone()),
    }
}

/// Convert an AST to a JSON tree, for inspecting how an expression parsed
pub fn node_to_json(node: &Node) -> serde_json::Value {
    match node {
        Node::Value(literal) => literal_to_json(literal),
        Node::Group(child) => serde_json::json!({ "group": node_to_json(child) }),
        Node::Binary { op, left, right } => serde_json::json!({
            "op": op.keyword(),
            "left": node_to_json(left),
            "right": node_to_json(right),
        }),
    }
}
