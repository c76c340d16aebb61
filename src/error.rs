use crate::cell::Cell;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GridError>;

/// Why a start or goal cell cannot be searched from or to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointIssue {
    OutOfBounds,
    Blocked,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The vertex arena (or a search collection sized from it) could not be allocated.
    #[error("could not allocate storage for {vertices} vertices")]
    AllocationFailure { vertices: usize },

    #[error("endpoint {cell} is unusable: {reason:?}")]
    InvalidEndpoint { cell: Cell, reason: EndpointIssue },

    #[error("invalid scenario on line {line}: {reason}")]
    ParseScenario { line: usize, reason: String },
}
