//! Compiled expressions and the interface drivers consume.

use std::{
    collections::HashSet,
    fmt,
    sync::{Arc, OnceLock},
};

use regex::Regex;
use tracing::{debug, warn};

use crate::{
    ast::Node,
    builder,
    error::{Error, Result},
    extract::Extract,
    format::{DefaultFormat, Format},
    parser::parse,
    value::Literal,
};

/// What a driver receives as a condition.
pub trait Expression: Send + Sync {
    /// Compile the expression. A no-op for already compiled expressions.
    fn compile(&self) -> Result<Arc<CompiledExpr>>;

    /// The expression rendered in the driver's format.
    fn render(&self) -> Result<String> {
        Ok(self.compile()?.rendered().to_owned())
    }
}

/// Decides which field names an expression may reference.
pub trait Validator: Send + Sync {
    /// Return true if the field name is acceptable.
    fn accept_field(&self, name: &str) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn accept_field(&self, name: &str) -> bool {
        self(name)
    }
}

/// Allow-list of field names.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    names: HashSet<String>,
}

impl FieldSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for FieldSet {
    fn accept_field(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Accepts field names that match a regular expression in full.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pattern: Regex,
}

impl FieldPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{pattern})$");
        let pattern = Regex::new(&anchored)
            .map_err(|e| Error::BadRequest(format!("invalid field pattern: {e}")))?;
        Ok(FieldPattern { pattern })
    }
}

impl Validator for FieldPattern {
    fn accept_field(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

/// A parsed, rendered and field-indexed expression.
///
/// Immutable once built, so it can be shared behind an `Arc` and read from
/// any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    ast: Node,
    rendered: String,
    fields: Vec<String>,
}

impl CompiledExpr {
    /// Parse `term`, check its fields against `validator`, then render it.
    pub fn compile(
        term: &str,
        format: &dyn Format,
        validator: Option<&dyn Validator>,
    ) -> Result<Self> {
        let ast = parse(term)?;
        let fields = ast.fields();
        if let Some(validator) = validator {
            if let Some(rejected) = fields.iter().find(|f| !validator.accept_field(f)) {
                warn!(field = %rejected, term, "field rejected by validator");
                return Err(Error::BadRequest(format!("field `{rejected}` is not allowed")));
            }
        }
        let rendered = ast.render(format)?;
        debug!(term, rendered = %rendered, fields = fields.len(), "compiled expression");
        Ok(CompiledExpr {
            ast,
            rendered,
            fields,
        })
    }

    /// Build from alternating keyword and literal terms, skipping the parser.
    ///
    /// Only simple phrases can be expressed this way; prefer
    /// [`CompiledExpr::compile`] for anything written by a person.
    pub fn from_terms<I>(format: Option<&dyn Format>, terms: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        let ast = builder::build(terms)?;
        let rendered = ast.render(format.unwrap_or(&DefaultFormat))?;
        let fields = ast.fields();
        Ok(CompiledExpr {
            ast,
            rendered,
            fields,
        })
    }

    pub fn ast(&self) -> &Node {
        &self.ast
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Run the structural extraction walk over the cached tree.
    pub fn extract(&self, visitor: &mut dyn Extract) -> Result<()> {
        self.ast.extract(visitor)
    }
}

impl Expression for Arc<CompiledExpr> {
    fn compile(&self) -> Result<Arc<CompiledExpr>> {
        Ok(Arc::clone(self))
    }

    fn render(&self) -> Result<String> {
        Ok(self.rendered.clone())
    }
}

/// An expression term with everything needed to compile it on demand.
///
/// The first successful compile is cached; failures are not, since compiling
/// the same text again fails the same way.
pub struct RawExpr {
    term: String,
    format: Arc<dyn Format>,
    validator: Option<Arc<dyn Validator>>,
    compiled: OnceLock<Arc<CompiledExpr>>,
}

impl RawExpr {
    pub fn new(term: impl Into<String>, format: Arc<dyn Format>) -> Self {
        RawExpr {
            term: term.into(),
            format,
            validator: None,
            compiled: OnceLock::new(),
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

impl Expression for RawExpr {
    fn compile(&self) -> Result<Arc<CompiledExpr>> {
        if let Some(compiled) = self.compiled.get() {
            return Ok(Arc::clone(compiled));
        }
        let compiled = CompiledExpr::compile(&self.term, &*self.format, self.validator.as_deref())?;
        Ok(Arc::clone(self.compiled.get_or_init(|| Arc::new(compiled))))
    }
}

impl fmt::Debug for RawExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawExpr")
            .field("term", &self.term)
            .field("validated", &self.validator.is_some())
            .field("compiled", &self.compiled.get().is_some())
            .finish_non_exhaustive()
    }
}
