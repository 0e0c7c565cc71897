//! # hostwire
//!
//! Blocking client for a small request/response protocol spoken with a
//! host process over one persistent stream socket:
//! - Raw command handshakes acknowledged by the host
//! - 2-byte length-prefixed outbound frames
//! - 4-byte length-prefixed inbound frames, reassembled in chunks
//! - ACK-byte synchronization keeping both peers in lockstep
//!
//! ## Request Round Trip
//!
//! ```text
//!      client                                   host
//!        │ ── command token ──────────────────► │
//!        │ ◄───────────────────────── reply ─── │
//!        │ ── len(2, BE) + payload ───────────► │
//!        │ ◄───────────────────── frame ack ─── │
//!        │ ── ACK ────────────────────────────► │
//!        │ ◄───────────────────────── len(4) ── │
//!        │ ── ACK ────────────────────────────► │
//!        │ ◄──────────── body (≤ chunk_size) ── │
//!        │ ◄──────────── body (≤ chunk_size) ── │
//!        ▼                                      ▼
//! ```
//!
//! Only one exchange may be in flight per connection. Use
//! [`SharedSession`] to share a connection between threads.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{HostwireError, Result};
pub use config::SessionConfig;
pub use network::{Endpoint, HostStream};
pub use protocol::{AckPolicy, ByteOrder, Payload};
pub use session::{Session, SessionState, SharedSession};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of hostwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
