use std::io;
use thiserror::Error;
use crate::FormatError;

/// Which argument check failed. Every check has its own variant.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq, Hash)]
pub enum InvalidArgument {
    #[error("value is absent")]
    NullValue,
    #[error("stream is absent")]
    NullStream,
    #[error("formatter is absent")]
    NullFormatter,
    #[error("stream is not writable")]
    StreamNotWritable,
    #[error("stream is not readable")]
    StreamNotReadable,
    #[error("{parameter} is true but stream is not seekable")]
    SeekNotSupported {
        parameter: &'static str
    },
    #[error("stream supports seeking, but its length is 0")]
    EmptySeekableStream,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    SerializationFailure,
    DeserializationFailure,
    TypeMismatch,
    Stream,
}

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(
        #[from] InvalidArgument
    ),
    #[error("An error has occurred during serialization: {0}")]
    SerializationFailure(
        #[source] FormatError
    ),
    #[error("An error has occurred during deserialization: {0}")]
    DeserializationFailure(
        #[source] FormatError
    ),
    #[error("Expected type of deserialized object (`{expected}`) does not match its actual type (`{found}`).")]
    TypeMismatch {
        expected: &'static str,
        found:    String
    },
    #[error("Unable to position the stream: {0}")]
    Stream(
        #[source] io::Error
    ),
}

impl SerializationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SerializationError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SerializationError::SerializationFailure(_) => ErrorKind::SerializationFailure,
            SerializationError::DeserializationFailure(_) => ErrorKind::DeserializationFailure,
            SerializationError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            SerializationError::Stream(_) => ErrorKind::Stream,
        }
    }

    /// The failed argument check, if this is an argument error.
    pub fn invalid_argument(&self) -> Option<InvalidArgument> {
        match self {
            SerializationError::InvalidArgument(argument) => Some(*argument),
            _ => None
        }
    }
}
