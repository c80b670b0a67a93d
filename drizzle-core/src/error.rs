use std::fmt;

/// Result type alias for drizzle core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for drizzle core operations
#[derive(Debug)]
pub enum Error {
    /// I/O errors from the input or output stream
    Io(std::io::Error),

    /// Configuration errors, fatal at startup
    Config(String),

    /// Formula evaluation errors, fatal at the tick where they occur
    Eval(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
            Error::Eval(msg) => write!(f, "Evaluation error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
