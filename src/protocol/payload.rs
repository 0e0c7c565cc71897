//! Decoded inbound payloads

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;

use crate::error::Result;

/// A reassembled inbound frame body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Bytes exactly as received
    Raw(Bytes),

    /// Standard base64 (padded) rendering of the received bytes
    Text(String),
}

impl Payload {
    /// Wrap a body, base64-encoding it when `text_encode` is set
    pub fn from_body(body: Bytes, text_encode: bool) -> Self {
        if text_encode {
            Payload::Text(STANDARD.encode(&body))
        } else {
            Payload::Raw(body)
        }
    }

    /// True for a base64-encoded payload
    pub fn is_text(&self) -> bool {
        matches!(self, Payload::Text(_))
    }

    /// Bytes as handed to the caller (the base64 text for `Text`)
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Raw(bytes) => bytes,
            Payload::Text(text) => text.as_bytes(),
        }
    }

    /// Length of `as_bytes()`
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// True when `as_bytes()` is empty
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Recover the bytes that were on the wire
    pub fn into_raw(self) -> Result<Bytes> {
        match self {
            Payload::Raw(bytes) => Ok(bytes),
            Payload::Text(text) => Ok(Bytes::from(STANDARD.decode(text)?)),
        }
    }
}
