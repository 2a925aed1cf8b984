use crate::{
    ast::{BinaryOp, Infix, Node, Prefix, Symbol, Token},
    error::{Error, Result},
    lexer::Lexer,
    value::Literal,
};

/// Parse an expression string into an AST.
///
/// # Examples
///
/// ```
/// use doc_expr::{parse, DefaultFormat};
///
/// let ast = parse("id = 10 and step = 1").unwrap();
/// assert_eq!(ast.render(&DefaultFormat).unwrap(), "id = 10 AND step = 1");
/// ```
pub fn parse(term: &str) -> Result<Node> {
    let tokens = Lexer::new(term).tokenize()?;
    let mut parser = Parser::new(tokens);
    parser.parse()?.into_ast()
}

/// Operator-precedence (Pratt) parser over a lexed token stream.
///
/// Each token's prefix rule runs when it starts an expression and its infix
/// rule runs when it follows a parsed left operand. The loop keeps consuming
/// while the next token binds tighter than the caller, which makes chains of
/// equal binding power associate to the left.
pub struct Parser {
    /// Remaining tokens, reversed so the next one is at the end.
    tokens: Vec<Token>,
    illegal: Token,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        tokens.reverse();
        Parser {
            tokens,
            illegal: Token::illegal(),
        }
    }

    /// Consume the next token. `None` means the stream is finished.
    pub fn next(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    /// The next token without consuming it; an illegal token past the end.
    pub fn peek(&self) -> &Token {
        self.tokens.last().unwrap_or(&self.illegal)
    }

    /// Parse a whole expression and require the stream to be exhausted.
    pub fn parse(&mut self) -> Result<ParseNode> {
        let tree = self.expression(0)?;
        match self.next() {
            None => Ok(tree),
            Some(token) if token.symbol == Symbol::Close => {
                Err(Error::Parse("unmatched `)`".into()))
            }
            Some(token) => Err(Error::Parse(format!("unexpected `{}` after expression", token.text))),
        }
    }

    pub fn expression(&mut self, rbp: u8) -> Result<ParseNode> {
        let token = self
            .next()
            .ok_or_else(|| Error::Parse("premature stop".into()))?;
        let mut left = self.prefix(token)?;

        while rbp < self.peek().symbol.binding_power() {
            let token = self
                .next()
                .ok_or_else(|| Error::Parse("premature stop".into()))?;
            left = self.infix(token, left)?;
        }
        Ok(left)
    }

    fn prefix(&mut self, token: Token) -> Result<ParseNode> {
        let def = token.symbol.def();
        match def.prefix {
            Prefix::Leaf => Ok(ParseNode::leaf(token)),

            Prefix::Group => {
                let enclosed = self.expression(def.binding_power)?;
                match self.next() {
                    Some(close) if close.symbol == Symbol::Close => {
                        Ok(ParseNode::new(token, vec![enclosed]))
                    }
                    Some(other) => Err(Error::Parse(format!(
                        "missing close for `{}`, found `{}`",
                        token.text, other.text
                    ))),
                    None => Err(Error::Parse(format!("missing close for `{}`", token.text))),
                }
            }

            Prefix::Negate => match self.next() {
                Some(number) if matches!(number.symbol, Symbol::Int | Symbol::Float) => {
                    let text = format!("-{}", number.text);
                    Ok(ParseNode::leaf(Token::new(number.symbol, text)))
                }
                Some(other) => Err(Error::Parse(format!(
                    "missing number after `-`, found `{}`",
                    other.text
                ))),
                None => Err(Error::Parse("premature stop after `-`".into())),
            },

            Prefix::Reject if token.symbol == Symbol::Close => {
                Err(Error::Parse("unmatched `)`".into()))
            }
            Prefix::Reject => Err(Error::Parse(format!(
                "missing left operand for `{}`",
                token.text
            ))),
        }
    }

    fn infix(&mut self, token: Token, left: ParseNode) -> Result<ParseNode> {
        let def = token.symbol.def();
        match def.infix {
            Infix::Binary => {
                let right = self.expression(def.binding_power)?;
                Ok(ParseNode::new(token, vec![left, right]))
            }
            Infix::Juxtaposed => Err(Error::Syntax(format!(
                "unexpected `{}` after `{}` (quote values that span several tokens)",
                token.text,
                left.last_leaf()
            ))),
            Infix::None => Err(Error::Unhandled(format!("infix `{}`", token.text))),
        }
    }
}

/// Transient parse tree: a token plus zero, one or two children.
///
/// Lives only for one parse call and is consumed by [`ParseNode::into_ast`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    token: Token,
    children: Vec<ParseNode>,
}

impl ParseNode {
    fn new(token: Token, children: Vec<ParseNode>) -> Self {
        ParseNode { token, children }
    }

    fn leaf(token: Token) -> Self {
        ParseNode::new(token, Vec::new())
    }

    pub fn symbol(&self) -> Symbol {
        self.token.symbol
    }

    pub fn text(&self) -> &str {
        &self.token.text
    }

    pub fn children(&self) -> &[ParseNode] {
        &self.children
    }

    /// Text of the rightmost leaf, i.e. the token just before the cursor.
    fn last_leaf(&self) -> &str {
        match self.children.last() {
            _ if self.token.symbol == Symbol::Open => ")",
            Some(child) => child.last_leaf(),
            None => &self.token.text,
        }
    }

    /// Convert to the public AST, one level at a time.
    pub fn into_ast(self) -> Result<Node> {
        let ParseNode { token, children } = self;
        let mut children = children.into_iter();

        match (children.next(), children.next(), children.next()) {
            (Some(left), Some(right), None) => {
                let op = BinaryOp::from_symbol(token.symbol).ok_or_else(|| {
                    Error::Malformed(format!(
                        "binary node missing keyword for symbol {:?}",
                        token.symbol
                    ))
                })?;
                Ok(Node::binary(op, left.into_ast()?, right.into_ast()?))
            }
            (Some(child), None, None) if token.symbol == Symbol::Open => {
                Ok(Node::group(child.into_ast()?))
            }
            (Some(_), None, None) => Err(Error::Unhandled(format!("unary `{}`", token.text))),
            (None, _, _) => leaf_literal(token).map(Node::Value),
            _ => Err(Error::Malformed(format!(
                "node `{}` has more than two children",
                token.text
            ))),
        }
    }
}

fn leaf_literal(token: Token) -> Result<Literal> {
    match token.symbol {
        Symbol::Int => token
            .text
            .parse::<i64>()
            .map(Literal::Int)
            .map_err(|_| Error::Syntax(format!("invalid integer `{}`", token.text))),
        Symbol::Float => token
            .text
            .parse::<f64>()
            .map(Literal::Float)
            .map_err(|_| Error::Syntax(format!("invalid float `{}`", token.text))),
        Symbol::String => Ok(Literal::String(token.text)),
        other => Err(Error::Unhandled(format!("leaf {:?}", other))),
    }
}
