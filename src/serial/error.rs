//! Error type for the binary program format

use thiserror::Error;

/// Failure while reading or writing a compiled program
///
/// Only malformed input surfaces here. Unknown filter tags are not errors;
/// the reader skips them.
#[derive(Debug, Error)]
pub enum SerialError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("String is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    #[error("Invalid length prefix: {0}")]
    InvalidLength(i32),

    #[error("Expected a string but found the absent marker")]
    MissingString,

    #[error("Unknown node tag {0:#010x}")]
    UnknownNodeTag(u32),

    #[error("Unknown carrier component type {0}")]
    UnknownCarrierComponent(u16),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Not a compiled program (bad magic)")]
    BadMagic,

    #[error("Unsupported program format version {0}")]
    UnsupportedVersion(u16),

    #[error("Program body of {0} bytes exceeds the u32 length field")]
    BodyTooLarge(usize),

    #[error("Program body checksum mismatch")]
    ChecksumMismatch,

    #[error("Decoder protocol violation: {0}")]
    Protocol(&'static str),
}

pub type SerialResult<T> = Result<T, SerialError>;
