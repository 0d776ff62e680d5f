//! Unified error types for the conversion engine.
//!
//! Only structural impossibilities end up here. Unsupported features and
//! missing upstream data are logged and skipped by the engine instead.
use thiserror::Error;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error while writing the output package
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The upstream parser could not parse the binary stream at all
    #[error("Parser unavailable: {0}")]
    ParserUnavailable(String),

    /// The main-body text handler ended in an inconsistent internal state
    #[error("Inconsistent conversion state: {0}")]
    InconsistentState(String),

    /// Corrupted or truncated record
    #[error("Corrupted record: {0}")]
    Corrupted(String),

    /// Upstream contract breach
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Conversion options could not be read
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Status code surfaced to callers of the conversion.
    ///
    /// `1` means the source could not be parsed (or the format is not
    /// supported), `2` means the text handler was left in an inconsistent
    /// state. Anything that goes wrong after conversion (packaging,
    /// configuration) reports `3`.
    pub fn status_code(&self) -> u8 {
        self.status() as u8
    }

    /// Classify this error into a [`ConversionStatus`].
    pub fn status(&self) -> ConversionStatus {
        match self {
            Error::ParserUnavailable(_) | Error::Corrupted(_) => ConversionStatus::ParserFailed,
            Error::InconsistentState(_) | Error::InvariantViolation(_) => {
                ConversionStatus::InconsistentState
            },
            Error::Io(_) | Error::Zip(_) | Error::InvalidConfig(_) => ConversionStatus::OutputFailed,
        }
    }
}

/// Outcome classes of an aborted conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConversionStatus {
    /// Parser unavailable or unsupported format
    ParserFailed = 1,
    /// Text handler left in an inconsistent state
    InconsistentState = 2,
    /// Packaging or configuration failure
    OutputFailed = 3,
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
