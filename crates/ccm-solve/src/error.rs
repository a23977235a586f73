//! Solver error types.

use thiserror::Error;

/// Result type for solver operations.
pub type SolveResult<T> = Result<T, SolveError>;

/// Errors from mismatched solver inputs.
///
/// Running out of iterations is not an error; that is the
/// [`SearchOutcome::Exhausted`](crate::SearchOutcome::Exhausted) result
/// state callers branch on.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The response bound does not cover the basis grid.
    #[error("response bound covers {got} wavelengths, basis has {expected}")]
    BoundLength {
        /// Wavelength count of the basis
        expected: usize,
        /// Length of the bound vector
        got: usize,
    },
}
