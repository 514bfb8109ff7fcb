use thiserror::Error;

/// Request-level validation failure.
///
/// Distinct from fatal configuration errors (the loader reports those via
/// `anyhow` before any request is served) and from the normal "no matches"
/// outcome (which is a success variant, see
/// [`Recommendation`](crate::engine::Recommendation)).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The similarity strategy needs preference text to score against.
    #[error("preference text is empty; describe what you are looking for in an airline")]
    EmptyQuery,

    /// The requested result count falls outside the allowed range.
    #[error("requested {requested} recommendations; must be between {min} and {max}")]
    TopNOutOfRange {
        requested: usize,
        min: usize,
        max: usize,
    },
}
