//! Configuration for hostwire sessions
//!
//! Every protocol constant lives here so independently configured
//! sessions can share one process.

use std::time::Duration;

use crate::error::{HostwireError, Result};
use crate::protocol::{AckPolicy, ByteOrder};

/// Default upper bound on a single body read
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Default bound on handshake/ACK reads and command tokens
pub const DEFAULT_MESSAGE_SLOT: usize = 128;

/// Default synchronization byte
pub const DEFAULT_ACK_BYTE: u8 = 0x00;

/// Per-session protocol configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    // -------------------------------------------------------------------------
    // Framing
    // -------------------------------------------------------------------------
    /// Maximum number of bytes requested per read while reassembling a body
    pub chunk_size: usize,

    /// Size of the bounded read used for peer acknowledgments.
    /// Command tokens may not be longer than this.
    pub message_slot: usize,

    /// Byte order of the 4-byte inbound length field.
    /// The 2-byte outbound field is always network order.
    pub inbound_byte_order: ByteOrder,

    // -------------------------------------------------------------------------
    // Synchronization
    // -------------------------------------------------------------------------
    /// Control byte sent by the client as a sync marker
    pub ack_byte: u8,

    /// How handshake replies from the peer are checked
    pub ack_policy: AckPolicy,

    // -------------------------------------------------------------------------
    // Deadlines (applied by the connection helper, 0 = none)
    // -------------------------------------------------------------------------
    /// Read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds)
    pub write_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            message_slot: DEFAULT_MESSAGE_SLOT,
            inbound_byte_order: ByteOrder::Little,
            ack_byte: DEFAULT_ACK_BYTE,
            ack_policy: AckPolicy::Permissive,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl SessionConfig {
    /// Create a new config builder
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Reject settings the protocol cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(HostwireError::Config("chunk_size must be non-zero".to_string()));
        }
        if self.message_slot == 0 {
            return Err(HostwireError::Config("message_slot must be non-zero".to_string()));
        }
        if let AckPolicy::Exact(expected) = &self.ack_policy {
            if expected.is_empty() || expected.len() > self.message_slot {
                return Err(HostwireError::Config(format!(
                    "expected ack must be 1..={} bytes, got {}",
                    self.message_slot,
                    expected.len()
                )));
            }
        }
        Ok(())
    }

    /// Read deadline, if any
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    /// Write deadline, if any
    pub fn write_timeout(&self) -> Option<Duration> {
        (self.write_timeout_ms > 0).then(|| Duration::from_millis(self.write_timeout_ms))
    }
}

/// Builder for SessionConfig
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the body chunk size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the acknowledgment slot size (in bytes)
    pub fn message_slot(mut self, size: usize) -> Self {
        self.config.message_slot = size;
        self
    }

    /// Set the inbound length byte order
    pub fn inbound_byte_order(mut self, order: ByteOrder) -> Self {
        self.config.inbound_byte_order = order;
        self
    }

    /// Set the sync byte
    pub fn ack_byte(mut self, byte: u8) -> Self {
        self.config.ack_byte = byte;
        self
    }

    /// Set the handshake reply policy
    pub fn ack_policy(mut self, policy: AckPolicy) -> Self {
        self.config.ack_policy = policy;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> SessionConfig {
        self.config
    }
}
