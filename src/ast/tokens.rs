//! Token symbols and the static token table.
//!
//! The table is a `static` array indexed by [`Symbol`], so it is built at
//! compile time and read concurrently without synchronisation.

/// Every kind of token the lexer can produce.
///
/// The discriminant doubles as the index into the token table, so the
/// order here must match [`TOKENS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Sentinel returned when peeking past the end of the stream
    Illegal,

    // Raw values
    /// `12345`
    Int,
    /// `123.45`
    Float,
    /// `abc`, `"abc"`, or an unrecognised glyph run
    String,

    /// `=`
    Assign,
    /// `-` in front of a number
    Neg,
    /// `,` combines left and right into a list
    List,

    // Comparison
    /// `==`
    Eql,
    /// `!=`
    Neq,

    // Conditionals
    /// `AND`, `and`
    And,
    /// `OR`, `or`
    Or,

    // Enclosures
    /// `(`
    Open,
    /// `)`
    Close,
}

/// What a token does when it starts an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// The token is its own leaf.
    Leaf,
    /// `-`: fold into the numeric literal that follows.
    Negate,
    /// `(`: parse an inner expression and require a matching `)`.
    Group,
    /// The token cannot start an expression.
    Reject,
}

/// What a token does when it follows an already-parsed left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infix {
    /// Take the left operand, then parse the right one at this binding power.
    Binary,
    /// An operand directly after an operand, e.g. the `-20` in `wd-20`.
    Juxtaposed,
    /// Never consumed in infix position (binding power 0).
    None,
}

/// A statically registered token: display text, binding power and rules.
#[derive(Debug)]
pub struct TokenDef {
    pub symbol: Symbol,
    pub text: &'static str,
    pub binding_power: u8,
    pub prefix: Prefix,
    pub infix: Infix,
}

const fn def(symbol: Symbol, text: &'static str, binding_power: u8, prefix: Prefix, infix: Infix) -> TokenDef {
    TokenDef {
        symbol,
        text,
        binding_power,
        prefix,
        infix,
    }
}

static TOKENS: [TokenDef; 13] = [
    def(Symbol::Illegal, "", 0, Prefix::Reject, Infix::None),
    def(Symbol::Int, "", 10, Prefix::Leaf, Infix::Juxtaposed),
    def(Symbol::Float, "", 10, Prefix::Leaf, Infix::Juxtaposed),
    def(Symbol::String, "", 10, Prefix::Leaf, Infix::Juxtaposed),
    def(Symbol::Assign, "=", 80, Prefix::Reject, Infix::Binary),
    def(Symbol::Neg, "-", 10, Prefix::Negate, Infix::Juxtaposed),
    def(Symbol::List, ",", 60, Prefix::Reject, Infix::Binary),
    def(Symbol::Eql, "==", 70, Prefix::Reject, Infix::Binary),
    def(Symbol::Neq, "!=", 70, Prefix::Reject, Infix::Binary),
    def(Symbol::And, "AND", 60, Prefix::Reject, Infix::Binary),
    def(Symbol::Or, "OR", 60, Prefix::Reject, Infix::Binary),
    def(Symbol::Open, "(", 0, Prefix::Group, Infix::None),
    def(Symbol::Close, ")", 0, Prefix::Reject, Infix::None),
];

/// Symbols recognised from source text, by canonical spelling.
const KEYWORDS: [Symbol; 9] = [
    Symbol::Assign,
    Symbol::Neg,
    Symbol::Eql,
    Symbol::Neq,
    Symbol::List,
    Symbol::And,
    Symbol::Or,
    Symbol::Open,
    Symbol::Close,
];

impl Symbol {
    /// The table entry for this symbol.
    pub fn def(self) -> &'static TokenDef {
        &TOKENS[self as usize]
    }

    pub fn binding_power(self) -> u8 {
        self.def().binding_power
    }

    pub fn is_value(self) -> bool {
        matches!(self, Symbol::Int | Symbol::Float | Symbol::String)
    }

    /// Exact keyword lookup, ignoring ASCII case (`and` is `AND`).
    pub fn from_keyword(text: &str) -> Option<Symbol> {
        KEYWORDS
            .iter()
            .copied()
            .find(|s| s.def().text.eq_ignore_ascii_case(text))
    }

    /// The longest keyword that `text` starts with.
    pub fn longest_prefix(text: &str) -> Option<Symbol> {
        KEYWORDS
            .iter()
            .copied()
            .filter(|s| {
                let kw = s.def().text;
                text.get(..kw.len()).is_some_and(|head| head.eq_ignore_ascii_case(kw))
            })
            .max_by_key(|s| s.def().text.len())
    }
}

/// A lexed token: its symbol plus the literal text it was read from.
///
/// Keyword tokens carry their canonical spelling; string tokens carry the
/// unquoted text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub symbol: Symbol,
    pub text: String,
}

impl Token {
    pub fn new(symbol: Symbol, text: impl Into<String>) -> Self {
        Token {
            symbol,
            text: text.into(),
        }
    }

    /// A canonical keyword token.
    pub fn keyword(symbol: Symbol) -> Self {
        Token::new(symbol, symbol.def().text)
    }

    /// A bare word, reclassified as a keyword when its text is one.
    pub fn word(text: impl Into<String>) -> Self {
        let text = text.into();
        match Symbol::from_keyword(&text) {
            Some(symbol) => Token::keyword(symbol),
            None => Token::new(Symbol::String, text),
        }
    }

    /// A quoted string, never reclassified.
    pub fn quoted(text: impl Into<String>) -> Self {
        Token::new(Symbol::String, text)
    }

    pub(crate) fn illegal() -> Self {
        Token::new(Symbol::Illegal, "")
    }
}
