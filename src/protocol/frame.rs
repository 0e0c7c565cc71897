//! Frame codec
//!
//! Length-field encoding for both directions and the chunked
//! reassembly loop for inbound bodies.

use std::io::{ErrorKind, Read};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{HostwireError, Result};

/// Width of the outbound (client → host) length field
pub const OUTBOUND_LEN_SIZE: usize = 2;

/// Width of the inbound (host → client) length field
pub const INBOUND_LEN_SIZE: usize = 4;

/// Largest payload the 2-byte outbound length field can describe
pub const MAX_OUTBOUND_PAYLOAD: usize = u16::MAX as usize;

/// Upper bound on up-front allocation for an inbound body.
/// The declared length is untrusted, so the buffer grows as data arrives.
const MAX_PREALLOC: usize = 1024 * 1024;

/// Byte order of a fixed-width length field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

// =============================================================================
// Length Fields
// =============================================================================

/// Encode an outbound payload length as a 2-byte network-order field.
///
/// Lengths that do not fit are rejected rather than wrapped.
pub fn encode_outbound_len(len: usize) -> Result<[u8; OUTBOUND_LEN_SIZE]> {
    let len = u16::try_from(len).map_err(|_| HostwireError::PayloadTooLarge {
        len,
        max: MAX_OUTBOUND_PAYLOAD,
    })?;
    Ok(len.to_be_bytes())
}

/// Decode a 4-byte inbound length field
pub fn decode_inbound_len(raw: [u8; INBOUND_LEN_SIZE], order: ByteOrder) -> u32 {
    match order {
        ByteOrder::Big => u32::from_be_bytes(raw),
        ByteOrder::Little => u32::from_le_bytes(raw),
    }
}

/// Build a complete outbound frame: length field followed by payload.
///
/// Returned as one buffer so it can go out in a single write.
pub fn encode_outbound_frame(payload: &[u8]) -> Result<Bytes> {
    let len = encode_outbound_len(payload.len())?;

    let mut frame = BytesMut::with_capacity(OUTBOUND_LEN_SIZE + payload.len());
    frame.put_slice(&len);
    frame.put_slice(payload);
    Ok(frame.freeze())
}

// =============================================================================
// Chunked Reassembly
// =============================================================================

/// Read exactly `expected` body bytes from `reader`.
///
/// Each read asks for at most `chunk_size` bytes (or the remainder, if
/// smaller). Short reads are expected; only a zero-length read before the
/// body is complete ends the loop, as a truncated frame.
pub fn read_frame_body<R: Read>(reader: &mut R, expected: u32, chunk_size: usize) -> Result<Bytes> {
    if chunk_size == 0 {
        return Err(HostwireError::Config("chunk_size must be non-zero".to_string()));
    }

    let total = expected as usize;
    let mut body = BytesMut::with_capacity(total.min(MAX_PREALLOC));
    let mut chunk = vec![0u8; chunk_size.min(total.max(1))];

    while body.len() < total {
        let to_read = chunk.len().min(total - body.len());
        let n = match reader.read(&mut chunk[..to_read]) {
            Ok(0) => {
                return Err(HostwireError::TruncatedFrame {
                    expected,
                    received: body.len(),
                })
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(HostwireError::from_io(e, "frame body")),
        };

        body.put_slice(&chunk[..n]);
        tracing::trace!(chunk = n, received = body.len(), expected, "body chunk");
    }

    Ok(body.freeze())
}
