/// Represents all possible error types raised by the board core.
/// Nothing here is retried internally; recovery belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Errors {
    /// The FEN string could not produce a rectangular, well-formed board.
    #[error("malformed position: {0}")]
    MalformedPosition(String),
    /// A mutation was requested that breaks the caller contract
    /// (empty or foreign source square, off-board endpoint, bad promotion).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// The provided algebraic notation is invalid or could not be parsed.
    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),
}
