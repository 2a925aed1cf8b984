//! Tree walks that turn an AST back into text and list its field names.

use crate::{
    ast::{BinaryOp, Node},
    error::{Error, Result},
    format::{Format, FormatContext},
};

impl BinaryOp {
    /// Context for the right operand. Only assignment puts it in value
    /// position; both operands of a comparison may be fields.
    pub fn rhs_context(self) -> FormatContext {
        match self {
            BinaryOp::Assign => FormatContext::Value,
            _ => FormatContext::Structural,
        }
    }
}

impl Node {
    /// Render the whole tree with the supplied format.
    pub fn render(&self, format: &dyn Format) -> Result<String> {
        self.format(format, FormatContext::Structural)
    }

    /// Render this subtree in the given context.
    pub fn format(&self, format: &dyn Format, ctx: FormatContext) -> Result<String> {
        match self {
            Node::Value(literal) => match ctx {
                FormatContext::Value => format.value(literal),
                FormatContext::Structural => Ok(literal.to_string()),
            },

            Node::Binary { op, left, right } => {
                let keyword = format
                    .keyword(op.keyword())
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| {
                        Error::Syntax(format!(
                            "format returned empty for keyword \"{}\"",
                            op.keyword()
                        ))
                    })?;

                // Both sides render into their own buffers; the left error wins.
                let lhs = left.format(format, FormatContext::Structural);
                let rhs = right.format(format, op.rhs_context());
                let (lhs, rhs) = (lhs?, rhs?);

                let mut out = String::with_capacity(lhs.len() + keyword.len() + rhs.len());
                out.push_str(&lhs);
                out.push_str(&keyword);
                out.push_str(&rhs);
                Ok(out)
            }

            Node::Group(child) => Ok(format!("({})", child.format(format, ctx)?)),
        }
    }

    /// Every string literal in structural position, in traversal order.
    ///
    /// Duplicates are kept. Values assigned to fields are not field names.
    ///
    /// ```
    /// let ast = doc_expr::parse("id = 10 AND step = 1").unwrap();
    /// assert_eq!(ast.fields(), vec!["id", "step"]);
    /// ```
    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        self.collect_fields(FormatContext::Structural, &mut fields);
        fields
    }

    fn collect_fields(&self, ctx: FormatContext, fields: &mut Vec<String>) {
        match self {
            Node::Value(literal) => {
                if ctx == FormatContext::Structural {
                    if let Some(name) = literal.as_str() {
                        fields.push(name.to_owned());
                    }
                }
            }
            Node::Binary { op, left, right } => {
                left.collect_fields(FormatContext::Structural, fields);
                right.collect_fields(op.rhs_context(), fields);
            }
            Node::Group(child) => child.collect_fields(ctx, fields),
        }
    }
}
