use core::{
    fmt::{
        self,
        Debug,
        Display,
    },
    ops::Range,
};

/// A PositionedError representing an error that is associated with a specific token in the given expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedError<E: Debug + PartialEq> {
    position: Range<usize>,
    token_index: usize,
    inner: E,
}

impl<E: Debug + PartialEq> PositionedError<E> {
    pub fn new(position: Range<usize>, token_index: usize, inner: E) -> Self {
        Self {
            position,
            token_index,
            inner,
        }
    }

    /// Byte range of the offending token within the expression.
    pub fn position(&self) -> &Range<usize> {
        &self.position
    }

    /// Index of the offending token within the token stream.
    /// Equals the token count if the expression ended unexpectedly.
    pub fn token_index(&self) -> usize {
        self.token_index
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: Debug + PartialEq + Display> Display for PositionedError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at token {} (bytes {}..{})",
            self.inner, self.token_index, self.position.start, self.position.end
        )
    }
}

impl<E: Debug + PartialEq + Display> std::error::Error for PositionedError<E> {}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum SyntaxError {
    #[error("unexpected token {found:?}")]
    UnexpectedToken { found: String },
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("group is never closed")]
    GroupNotClosed,
    #[error("groups are nested too deeply")]
    NestingTooDeep,

    #[error("operator {operator:?} has no right-hand operand")]
    MissingOperand { operator: char },
}

/// Errors returned while turning a module expression into a graph.
///
/// No partial graph is ever returned alongside an error.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum GraphError {
    #[error("syntax error: {0}")]
    Syntax(#[from] PositionedError<SyntaxError>),

    #[error("malformed input: expression contains no identifiers")]
    MalformedInput,
}

impl GraphError {
    /// Returns the positioned syntax error, if this is one.
    pub fn syntax(&self) -> Option<&PositionedError<SyntaxError>> {
        match self {
            Self::Syntax(error) => Some(error),
            Self::MalformedInput => None,
        }
    }
}
