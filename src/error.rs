use alloc::collections::TryReserveError;
use alloc::string::String;

/// A node mutator rejected a value outside the attribute's domain.
///
/// The node is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown 'style': {0:?}")]
    UnknownStyle(String),
    #[error("'chomp' must be '+', '-', or None, got {0:?}")]
    UnknownChomp(String),
    #[error("'tag' must be a non-empty string")]
    EmptyTag,
    #[error("'anchor' must be a non-empty string")]
    EmptyAnchor,
}

/// Malformed input, as reported by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
#[non_exhaustive]
pub struct ScanError {
    /// Human-readable description of the problem.
    pub message: String,
    /// 1-based line number.
    pub line: usize,
    /// Offset within the line.
    pub column: usize,
}

/// Building a node failed. Fatal to the current parse.
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    /// A child or root index was never handed out in this document.
    #[error("symbol index {index} does not name a completed node (table holds {len})")]
    UnknownSymbol { index: usize, len: usize },
    /// Child storage could not be allocated.
    #[error("out of memory while building a node")]
    Allocation(#[from] TryReserveError),
    /// The scanner reported an attribute the node rejects, such as an empty
    /// tag.
    #[error(transparent)]
    InvalidNode(#[from] ValidationError),
}

/// The input broke the read contract or failed outright.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A reader claimed to fill more bytes than it was asked for.
    #[error("read returned {returned} bytes, more than the {requested} requested")]
    Overlong { requested: usize, returned: usize },
    /// The scanner asked to keep more unconsumed bytes than its buffer holds.
    #[error("{skip} unconsumed bytes do not fit in a {max}-byte buffer")]
    InvalidSkip { skip: usize, max: usize },
    /// The reader failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The error returned by [`Parser::parse()`](crate::Parser::parse).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Source(#[from] SourceError),
    /// An earlier [`Parser::parse()`](crate::Parser::parse) call did not
    /// finish, because its scanner panicked.
    #[error("Parser::parse was entered while an earlier call had not finished")]
    Reentrancy,
}
