// Error types for probing and tag construction

use std::io;

/// Errors that can occur while probing a file or building a tag.
///
/// All of them are terminal for the file being processed.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A read or write failed, or returned fewer bytes than a probe needs.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The file has an ID3v2 header but its MPEG frame region is unusable.
    #[error("{0}")]
    Format(String),

    /// A value cannot be represented in an ID3v2 text frame.
    #[error("{0}")]
    Encoding(String),
}

impl Error {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    pub(crate) fn encoding(msg: impl Into<String>) -> Self {
        Error::Encoding(msg.into())
    }

    pub(crate) fn short_read(what: &str) -> Self {
        Error::Io(io::Error::new(io::ErrorKind::UnexpectedEof, what.to_string()))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
