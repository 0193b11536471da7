use thiserror::Error;

/// Errors returned by the command line tool
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row could not be turned into a marker
    #[error("invalid record on line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("no markers found in input")]
    NoMarkers,

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: &'static str, message: String },
}

/// Result type used by the command line tool
pub type Result<T> = std::result::Result<T, Error>;
