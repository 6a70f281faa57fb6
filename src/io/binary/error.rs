use std::io;
use std::string::FromUtf8Error;
use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Binary Format Error: Unknown record magic {0:#010x}, the stream was not written by the binary formatter.")]
    ForeignFormat(u32),
    #[error("Binary Format Error: Record version not supported: {0}")]
    UnsupportedVersion(u8),
    #[error("Binary Format Error: Type name is {length} bytes long, the options allow at most {limit}.")]
    TypeNameTooLong {
        length: usize,
        limit:  usize
    },
    #[error("Binary Format Error: Payload is {length} bytes long, the options allow at most {limit}.")]
    PayloadTooLarge {
        length: usize,
        limit:  usize
    },
    #[error("Binary Format Error: The recorded type name is not valid utf-8.")]
    InvalidTypeName(
        #[from] FromUtf8Error
    ),
    #[error("Binary Format Error: {trailing} bytes of the payload were left over after decoding.")]
    Corrupt {
        trailing: usize
    },
    #[error("Binary Format Error: Unable to cast a `{found}` to `{expected}`.")]
    InvalidCast {
        expected: &'static str,
        found:    String
    },
    #[error(transparent)]
    Encode(
        #[from] EncodeError
    ),
    #[error(transparent)]
    Decode(
        #[from] DecodeError
    ),
    #[error(transparent)]
    IO(
        #[from] io::Error
    )
}
