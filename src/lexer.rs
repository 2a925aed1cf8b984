use tracing::trace;

use crate::{
    ast::{Symbol, Token},
    error::{Error, Result},
};

/// Turns expression text into a flat list of tokens in a single pass.
///
/// Literals (numbers, identifiers, quoted strings) are classified as they are
/// read. Any other run of non-whitespace glyphs is buffered and split into
/// operators by greedy longest-prefix matching when the run ends.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    pending: String,
    tokens: Vec<Token>,
    error: Option<Error>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            pending: String::new(),
            tokens: Vec::new(),
            error: None,
        }
    }

    /// Scan the whole input. Empty input yields an empty list.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        while let Some(ch) = self.current_char() {
            if self.error.is_some() {
                break;
            }
            match ch {
                c if c.is_whitespace() => {
                    self.flush();
                    self.advance();
                }
                c if c.is_ascii_digit() => {
                    self.flush();
                    let token = self.read_number();
                    self.tokens.push(token);
                }
                '.' if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.flush();
                    let token = self.read_number();
                    self.tokens.push(token);
                }
                c if c.is_alphabetic() || c == '_' => {
                    self.flush();
                    let ident = self.read_identifier();
                    self.tokens.push(Token::word(ident));
                }
                '"' | '\'' => {
                    self.flush();
                    if let Some(s) = self.read_string(ch) {
                        self.tokens.push(Token::quoted(s));
                    }
                }
                '`' => {
                    self.flush();
                    if let Some(s) = self.read_raw_string() {
                        self.tokens.push(Token::quoted(s));
                    }
                }
                '/' if self.peek_char(1) == Some('/') => {
                    self.flush();
                    self.skip_line_comment();
                }
                '/' if self.peek_char(1) == Some('*') => {
                    self.flush();
                    self.skip_block_comment();
                }
                '/' => {
                    self.flush();
                    self.advance();
                    self.tokens.push(Token::new(Symbol::String, "/"));
                }
                _ => {
                    self.pending.push(ch);
                    self.advance();
                }
            }
        }
        self.flush();

        match self.error {
            Some(err) => Err(err),
            None => Ok(self.tokens),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Record a scan error. The first one wins.
    fn latch(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_number(&mut self) -> Token {
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Exponent, only when digits actually follow it
        if matches!(self.current_char(), Some('e' | 'E')) {
            let digits_at = match self.peek_char(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_char(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                for _ in 0..digits_at {
                    if let Some(ch) = self.current_char() {
                        number.push(ch);
                    }
                    self.advance();
                }
                while let Some(ch) = self.current_char().filter(char::is_ascii_digit) {
                    number.push(ch);
                    self.advance();
                }
            }
        }

        if is_float {
            Token::new(Symbol::Float, number)
        } else {
            Token::new(Symbol::Int, number)
        }
    }

    fn read_string(&mut self, quote: char) -> Option<String> {
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Some(result);
                }
                '\n' => break,
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('0') => result.push('\0'),
                        Some(c @ ('"' | '\'' | '\\')) => result.push(c),
                        Some(_) => {
                            self.latch(Error::Syntax("invalid char escape".into()));
                            return None;
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        self.latch(Error::Syntax("literal not terminated".into()));
        None
    }

    fn read_raw_string(&mut self) -> Option<String> {
        let mut result = String::new();
        self.advance(); // Consume opening backtick

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '`' {
                return Some(result);
            }
            result.push(ch);
        }

        self.latch(Error::Syntax("literal not terminated".into()));
        None
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        self.position += 2; // Consume /*
        while let Some(ch) = self.current_char() {
            if ch == '*' && self.peek_char(1) == Some('/') {
                self.position += 2;
                return;
            }
            self.advance();
        }
        self.latch(Error::Syntax("comment not terminated".into()));
    }

    /// Split the pending glyph run into operator and leftover tokens.
    fn flush(&mut self) {
        if self.error.is_some() || self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        let mut rest = pending.as_str();

        while !rest.is_empty() {
            let before = rest.len();
            match Symbol::longest_prefix(rest) {
                Some(symbol) => {
                    trace!(run = %pending, keyword = symbol.def().text, "matched operator");
                    self.tokens.push(Token::keyword(symbol));
                    rest = &rest[symbol.def().text.len()..];
                }
                None => {
                    let split = next_keyword_at(rest);
                    trace!(run = %pending, text = &rest[..split], "unmatched glyphs");
                    self.tokens.push(Token::word(&rest[..split]));
                    rest = &rest[split..];
                }
            }
            if self.stalled(rest, before) {
                return;
            }
        }
    }

    /// Latch a Syntax error when a segmentation pass consumed nothing, which
    /// would otherwise loop forever. Unreachable while `next_keyword_at`
    /// always advances by at least one character.
    fn stalled(&mut self, rest: &str, before: usize) -> bool {
        if rest.len() != before {
            return false;
        }
        let state = self.state_as_string(rest);
        self.latch(Error::Syntax(state));
        true
    }

    fn state_as_string(&self, pending: &str) -> String {
        let tokens: Vec<&str> = self.tokens.iter().map(|t| t.text.as_str()).collect();
        format!("pending: \"{}\"; tokens: {}", pending, tokens.join(", "))
    }
}

/// Byte offset of the first position after the start where a keyword begins,
/// or the length of `text` when none does.
fn next_keyword_at(text: &str) -> usize {
    text.char_indices()
        .skip(1)
        .map(|(i, _)| i)
        .find(|&i| Symbol::longest_prefix(&text[i..]).is_some())
        .unwrap_or(text.len())
}

/// Convenience wrapper for `Lexer::new(input).tokenize()`.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

#[test]
fn test_keywords() {
    let tokens = tokenize("and or AND Or").unwrap();
    let symbols: Vec<Symbol> = tokens.iter().map(|t| t.symbol).collect();
    assert_eq!(symbols, vec![Symbol::And, Symbol::Or, Symbol::And, Symbol::Or]);
}

#[test]
fn test_glyph_run_without_whitespace() {
    let tokens = tokenize("a!=-1").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new(Symbol::String, "a"),
            Token::keyword(Symbol::Neq),
            Token::keyword(Symbol::Neg),
            Token::new(Symbol::Int, "1"),
        ]
    );
}

#[test]
fn test_stalled_segmentation_latches_syntax_error() {
    let mut lexer = Lexer::new("");
    lexer.tokens.push(Token::word("a"));
    assert!(!lexer.stalled("", 1));
    assert!(lexer.error.is_none());

    assert!(lexer.stalled("~~", 2));
    assert_eq!(
        lexer.error,
        Some(Error::Syntax("pending: \"~~\"; tokens: a".into()))
    );
}

#[test]
fn test_next_keyword_at() {
    assert_eq!(next_keyword_at("&&("), 2);
    assert_eq!(next_keyword_at("&&"), 2);
    assert_eq!(next_keyword_at("é="), 2);
}
