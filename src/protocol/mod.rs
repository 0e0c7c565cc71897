//! Protocol Module
//!
//! Wire format of the host bridge protocol.
//!
//! ## Handshake
//! ```text
//! client ──► command token (raw, no length prefix)
//! client ◄── reply (one read of up to `message_slot` bytes)
//! ```
//!
//! ## Outbound Frame (client → host)
//! ```text
//! ┌──────────────┬─────────────────────────────┐
//! │ Len (2, BE)  │           Payload           │
//! └──────────────┴─────────────────────────────┘
//! client ◄── frame ack (one read of up to `message_slot` bytes)
//! ```
//!
//! ## Inbound Frame (host → client)
//! ```text
//! ┌──────────────┐
//! │ Len (4)      │   byte order per SessionConfig
//! └──────────────┘
//! client ──► ACK byte
//! ┌─────────────────────────────────────────────┐
//! │ Payload, delivered in ≤ chunk_size pieces   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The 2-byte/4-byte asymmetry is part of the wire contract.

mod ack;
mod command;
mod frame;
mod payload;

pub use ack::AckPolicy;
pub use command::validate_command;
pub use frame::{
    decode_inbound_len, encode_outbound_frame, encode_outbound_len, read_frame_body, ByteOrder,
    INBOUND_LEN_SIZE, MAX_OUTBOUND_PAYLOAD, OUTBOUND_LEN_SIZE,
};
pub use payload::Payload;
