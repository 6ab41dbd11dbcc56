use thiserror::Error;

/// Main error type for chartdeck operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited-text input
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input table does not have the shape a chart needs
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration file could not be read or decoded
    #[error("Configuration error: {0}")]
    Config(String),

    /// XML generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// Result type for chartdeck operations.
pub type Result<T> = std::result::Result<T, Error>;
