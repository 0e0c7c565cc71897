//! Error types for hostwire
//!
//! Provides a unified error type for all session operations.

use std::io;

use thiserror::Error;

/// Result type alias using HostwireError
pub type Result<T> = std::result::Result<T, HostwireError>;

/// Unified error type for hostwire operations
#[derive(Debug, Error)]
pub enum HostwireError {
    // -------------------------------------------------------------------------
    // Connection Errors (fatal to the session)
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(#[source] io::Error),

    #[error("Connection closed by peer during {stage}")]
    ConnectionClosed { stage: &'static str },

    #[error("Timed out during {stage}")]
    Timeout { stage: &'static str },

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Truncated frame: expected {expected} bytes, received {received}")]
    TruncatedFrame { expected: u32, received: usize },

    #[error("Payload too large: {len} bytes (max {max})")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("Handshake mismatch: expected {expected:?}, received {received:?}")]
    HandshakeMismatch { expected: Vec<u8>, received: Vec<u8> },

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Session is broken after a previous failure; reconnect required")]
    SessionBroken,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Base64 decode error: {0}")]
    Encoding(#[from] base64::DecodeError),
}

impl HostwireError {
    /// Build an error from an I/O failure, tagging timeouts and early EOF
    /// with the protocol stage they interrupted.
    pub(crate) fn from_io(err: io::Error, stage: &'static str) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Self::Timeout { stage },
            io::ErrorKind::UnexpectedEof => Self::ConnectionClosed { stage },
            _ => Self::Connection(err),
        }
    }

    /// True for every variant that means the stream itself failed
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::ConnectionClosed { .. } | Self::Timeout { .. }
        )
    }

    /// True when the stream can no longer be trusted to be in sync with
    /// the peer. Caller errors are rejected before any I/O and are not fatal.
    pub fn is_fatal(&self) -> bool {
        self.is_connection_error()
            || matches!(
                self,
                Self::TruncatedFrame { .. } | Self::HandshakeMismatch { .. } | Self::SessionBroken
            )
    }
}

impl From<io::Error> for HostwireError {
    fn from(err: io::Error) -> Self {
        Self::from_io(err, "io")
    }
}
