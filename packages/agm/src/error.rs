use thiserror::Error;

/// Raised by the strict parser only. Engine operations fall back to an opaque
/// atom instead (see [`crate::propositional_logic::parser::parse_lenient`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse formula \"{input}\": {reason}")]
pub struct ParseError {
    pub input: String,
    pub reason: String,
}

/// The only way an engine operation can fail: a configured cap was reached
/// before the search finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LimitExceeded {
    #[error("Resolution exceeded the limit of {limit} clauses")]
    Resolution { limit: usize },

    #[error("Partial meet contraction over {beliefs} beliefs exceeds the limit of {limit}")]
    Subsets { limit: usize, beliefs: usize },

    #[error("Truth table over {variables} variables exceeds the limit of {limit}")]
    Variables { limit: usize, variables: usize },
}
