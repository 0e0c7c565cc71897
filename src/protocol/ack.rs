//! Acknowledgment policy
//!
//! Decides whether a handshake reply from the host is acceptable.

use crate::error::{HostwireError, Result};

/// How handshake replies are validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AckPolicy {
    /// Any non-empty reply counts as an acknowledgment
    #[default]
    Permissive,

    /// The reply must match these bytes exactly
    Exact(Vec<u8>),
}

impl AckPolicy {
    /// Check a reply that has already been read off the wire.
    ///
    /// An empty reply is handled by the caller as a closed connection.
    pub fn check(&self, reply: &[u8]) -> Result<()> {
        match self {
            AckPolicy::Permissive => Ok(()),
            AckPolicy::Exact(expected) if expected.as_slice() == reply => Ok(()),
            AckPolicy::Exact(expected) => Err(HostwireError::HandshakeMismatch {
                expected: expected.clone(),
                received: reply.to_vec(),
            }),
        }
    }
}
