//! Spectral pipeline error types.

use thiserror::Error;

/// Result type for spectral operations.
pub type SpectralResult<T> = Result<T, SpectralError>;

/// Errors that can occur while loading or transforming spectral data.
///
/// Malformed input fails fast at load time; nothing downstream ever sees a
/// partially parsed table.
#[derive(Debug, Error)]
pub enum SpectralError {
    /// The input table contains no data rows.
    #[error("empty spectral table")]
    EmptyTable,

    /// A row has fewer than two columns (wavelength plus one channel).
    #[error("line {line}: expected a wavelength and at least one channel value")]
    TooFewColumns {
        /// 1-based input line
        line: usize,
    },

    /// A row has a different number of columns than the first row.
    #[error("line {line}: expected {expected} columns, got {got}")]
    ColumnCountMismatch {
        /// 1-based input line
        line: usize,
        /// Column count established by the first row
        expected: usize,
        /// Column count found
        got: usize,
    },

    /// Wavelengths are not strictly increasing.
    #[error("line {line}: wavelengths must be strictly increasing")]
    NonMonotonicWavelength {
        /// 1-based input line
        line: usize,
    },

    /// A field could not be parsed as a number.
    #[error("line {line}: invalid numeric value")]
    InvalidNumber {
        /// 1-based input line
        line: usize,
    },

    /// A resample target grid is not usable.
    #[error("invalid target grid: [{start}, {end}] with {count} points")]
    InvalidGrid {
        /// Target start wavelength
        start: f64,
        /// Target end wavelength
        end: f64,
        /// Target point count
        count: usize,
    },

    /// Normalization attempted on a table with no positive values.
    #[error("cannot normalize a table with no positive values")]
    DegenerateData,

    /// An appended channel does not match the table's wavelength count.
    #[error("channel length mismatch: expected {expected}, got {got}")]
    ChannelLength {
        /// Wavelength count of the table
        expected: usize,
        /// Length of the offending channel
        got: usize,
    },

    /// A table does not have the channel count the operation requires.
    #[error("expected {expected} channels, got {got}")]
    ChannelCount {
        /// Required channel count
        expected: usize,
        /// Actual channel count
        got: usize,
    },

    /// Two tables do not share a wavelength grid.
    #[error("wavelength grid mismatch: expected {expected} points, got {got}")]
    GridMismatch {
        /// Grid length of the reference table
        expected: usize,
        /// Grid length found
        got: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
