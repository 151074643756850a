//! Error types for the CQL thin client.

use std::io;
use std::panic::Location;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for CQL thin client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during network communication.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// DNS resolution failed.
    #[error("Failed to resolve hostname '{hostname}': {message}")]
    DnsResolutionFailed { hostname: String, message: String },

    /// Connection timed out during TCP connect.
    #[error("Connection to {host}:{port} timed out after {timeout:?}")]
    ConnectionTimeout {
        host: String,
        port: u16,
        timeout: std::time::Duration,
    },

    /// Connection closed, either by the peer or after a prior failure.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Server-reported error from an ERROR frame.
    #[error("Server error {code:#06x}: {message}")]
    Server { code: i32, message: String },

    /// Protocol error.
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// Unexpected opcode received.
    #[error("Unexpected opcode: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedOpcode { expected: u8, actual: u8 },

    /// Unknown RESULT body kind.
    #[error("Unknown RESULT kind: {kind}")]
    UnknownResultKind { kind: i32 },

    /// Unsupported column type tag.
    #[error("Unsupported column type: {tag:#06x}")]
    UnsupportedType { tag: u16 },

    /// Buffer too small.
    #[error("Buffer too small: need {needed} bytes, have {available} at {location}")]
    BufferTooSmall {
        needed: usize,
        available: usize,
        location: &'static Location<'static>,
    },

    /// Authentication was requested by the server but no credentials are configured.
    #[error("Authentication required but no credentials configured")]
    AuthenticationRequired,

    /// Authentication failed.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Missing value for a bound column.
    #[error("Missing bind value for column '{name}'")]
    MissingBindValue { name: String },

    /// Bind value cannot be encoded as the declared column type.
    #[error("Cannot encode {value} as {expected}")]
    TypeMismatch { expected: String, value: String },

    /// Type conversion error.
    #[error("Type conversion error: {message}")]
    TypeConversion { message: String },

    /// The server set a different keyspace than requested.
    #[error("Keyspace mismatch: requested '{requested}', server set '{actual}'")]
    KeyspaceMismatch { requested: String, actual: String },

    /// Invalid connect string.
    #[error("Invalid connect string: {message}")]
    InvalidConnectString { message: String },
}

impl Error {
    /// Create a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a server error.
    pub fn server(code: i32, message: impl Into<String>) -> Self {
        Self::Server {
            code,
            message: message.into(),
        }
    }

    /// Create a type conversion error.
    pub fn type_conversion(message: impl Into<String>) -> Self {
        Self::TypeConversion {
            message: message.into(),
        }
    }
}
