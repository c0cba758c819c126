//! Error types for ordo.

use alloc::string::String;
use core::fmt;

/// Result type alias for ordo operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for ordo operations.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A shorthand expression could not be parsed.
    Parse {
        input: String,
        message: String,
        position: usize,
    },
    /// A pattern matcher could not be compiled.
    InvalidPattern {
        pattern: String,
        message: String,
    },
    /// Reduce was called on an empty container without a seed.
    EmptyReduce,
    /// An argument outside the accepted set.
    InvalidArgument {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse {
                input,
                message,
                position,
            } => {
                write!(f, "Invalid shorthand {:?} at {}: {}", input, position, message)
            }
            Error::InvalidPattern { pattern, message } => {
                write!(f, "Invalid pattern /{}/: {}", pattern, message)
            }
            Error::EmptyReduce => {
                write!(f, "Reduce of empty container with no initial value")
            }
            Error::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a shorthand parse error.
    pub fn parse(input: impl Into<String>, message: impl Into<String>, position: usize) -> Self {
        Error::Parse {
            input: input.into(),
            message: message.into(),
            position,
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}
