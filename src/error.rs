use thiserror::Error;

/// Raised when clause text does not follow the grammar, or when a proof is
/// requested for something that is not a denial.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The text is not a literal of the form `name(arg, ...)`.
    #[error("malformed literal: {input:?}")]
    Literal {
        /// The rejected text
        input: String,
    },

    /// The text is not a clause of the form `[head]<-[lit^lit^...]`.
    #[error("malformed clause: {input:?}")]
    Clause {
        /// The rejected text
        input: String,
    },

    /// A proof was requested for a clause carrying a head.
    #[error("query must be a denial without head: {query:?}")]
    HeadedQuery {
        /// The rejected query text
        query: String,
    },
}

/// Result alias for parsing and proof entry points.
pub type Result<T> = std::result::Result<T, GrammarError>;
