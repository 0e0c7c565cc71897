//! Protocol Session
//!
//! A stateful wrapper around one connected stream. Every operation runs
//! the request/ACK ping-pong to completion before returning, so the
//! session is always either in step with the host or broken.
//!
//! ## Operations
//! - `send_command`: token out, reply in
//! - `write_frame`:  [handshake], 2-byte length + payload out, ack in
//! - `read_frame`:   [handshake + ACK], 4-byte length in, ACK out, body in
//! - `request`:      handshake, write_frame, ACK, read_frame

mod shared;

pub use shared::SharedSession;

use std::io::{ErrorKind, Read, Write};

use bytes::Bytes;

use crate::config::SessionConfig;
use crate::error::{HostwireError, Result};
use crate::network::{Endpoint, HostStream};
use crate::protocol::{
    decode_inbound_len, encode_outbound_frame, read_frame_body, validate_command, Payload,
    INBOUND_LEN_SIZE,
};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// In step with the host; operations may be issued
    Ready,

    /// A fatal error left the stream in an unknown position
    Broken,
}

/// Client side of the host bridge protocol over a single stream
#[derive(Debug)]
pub struct Session<S> {
    /// Connected stream, owned for the session's lifetime
    stream: S,

    /// Protocol settings
    config: SessionConfig,

    state: SessionState,
}

impl Session<HostStream> {
    /// Connect to `endpoint` and wrap the stream in a session
    pub fn connect(endpoint: &Endpoint, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let stream = HostStream::connect(endpoint, &config)?;
        Self::new(stream, config)
    }
}

impl<S: Read + Write> Session<S> {
    /// Wrap an already connected stream.
    ///
    /// `read_timeout_ms`/`write_timeout_ms` are not applied here; the stream
    /// is used as configured by the caller. Use `Session::connect`, or call
    /// `HostStream::set_timeouts` before wrapping, to get deadlines.
    pub fn new(stream: S, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            stream,
            config,
            state: SessionState::Ready,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Protocol settings this session runs with
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Give the stream back to the caller, ending the session
    pub fn into_inner(self) -> S {
        self.stream
    }

    // =========================================================================
    // Public Operations
    // =========================================================================

    /// Send a command token and return the host's reply verbatim
    pub fn send_command(&mut self, command: &[u8]) -> Result<Bytes> {
        self.ensure_ready()?;
        validate_command(command, self.config.message_slot)?;

        tracing::debug!(command = %String::from_utf8_lossy(command), "send command");
        self.run(|s| s.handshake(command))
    }

    /// Send `payload` as an outbound frame and return the host's frame ack.
    ///
    /// When `standalone` is set, the frame is preceded by a command
    /// handshake using `command`, which is then required.
    pub fn write_frame(
        &mut self,
        payload: &[u8],
        standalone: bool,
        command: Option<&[u8]>,
    ) -> Result<Bytes> {
        self.ensure_ready()?;
        let command = self.standalone_command(standalone, command)?;
        let frame = encode_outbound_frame(payload)?;

        tracing::debug!(len = payload.len(), standalone, "write frame");
        self.run(|s| {
            if let Some(command) = command {
                s.handshake(command)?;
            }
            s.transmit_frame(&frame)
        })
    }

    /// Receive an inbound frame.
    ///
    /// When `standalone` is set, `command` is sent first, the reply is
    /// consumed and the client answers with its ACK byte. With
    /// `text_encode` the body comes back base64-encoded.
    pub fn read_frame(
        &mut self,
        standalone: bool,
        command: Option<&[u8]>,
        text_encode: bool,
    ) -> Result<Payload> {
        self.ensure_ready()?;
        let command = self.standalone_command(standalone, command)?;

        tracing::debug!(standalone, text_encode, "read frame");
        self.run(|s| {
            if let Some(command) = command {
                s.send(command, "read handshake")?;
                let reply = s.read_slot("read handshake reply")?;
                s.config.ack_policy.check(&reply)?;
                s.send_ack("read handshake ack")?;
            }
            s.receive_frame(text_encode)
        })
    }

    /// Full round trip: handshake with `header`, send `payload`, sync,
    /// then read back the host's result.
    pub fn request(&mut self, header: &[u8], payload: &[u8], text_encode: bool) -> Result<Payload> {
        self.ensure_ready()?;
        validate_command(header, self.config.message_slot)?;
        let frame = encode_outbound_frame(payload)?;

        tracing::debug!(
            header = %String::from_utf8_lossy(header),
            len = payload.len(),
            text_encode,
            "request"
        );
        self.run(|s| {
            s.handshake(header)?;
            s.transmit_frame(&frame)?;
            s.send_ack("sync marker")?;
            s.receive_frame(text_encode)
        })
    }

    // =========================================================================
    // State Handling
    // =========================================================================

    fn ensure_ready(&self) -> Result<()> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::Broken => Err(HostwireError::SessionBroken),
        }
    }

    /// Resolve the command for a possibly standalone operation
    fn standalone_command<'a>(
        &self,
        standalone: bool,
        command: Option<&'a [u8]>,
    ) -> Result<Option<&'a [u8]>> {
        if !standalone {
            return Ok(None);
        }
        let command = command.ok_or_else(|| {
            HostwireError::InvalidArgument("standalone operation requires a command".to_string())
        })?;
        validate_command(command, self.config.message_slot)?;
        Ok(Some(command))
    }

    /// Run an I/O sequence, marking the session broken on a fatal error
    fn run<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = op(self);
        if let Err(e) = &result {
            if e.is_fatal() {
                tracing::warn!(error = %e, "session broken");
                self.state = SessionState::Broken;
            }
        }
        result
    }

    // =========================================================================
    // Wire Steps
    // =========================================================================

    /// Command out, bounded reply in
    fn handshake(&mut self, command: &[u8]) -> Result<Bytes> {
        self.send(command, "command")?;
        let reply = self.read_slot("command reply")?;
        self.config.ack_policy.check(&reply)?;
        Ok(reply)
    }

    /// Pre-encoded frame out, frame ack in
    fn transmit_frame(&mut self, frame: &[u8]) -> Result<Bytes> {
        self.send(frame, "frame write")?;
        self.read_slot("frame ack")
    }

    /// Length in, ACK out, body in
    fn receive_frame(&mut self, text_encode: bool) -> Result<Payload> {
        let mut raw = [0u8; INBOUND_LEN_SIZE];
        self.stream
            .read_exact(&mut raw)
            .map_err(|e| HostwireError::from_io(e, "inbound length"))?;
        let expected = decode_inbound_len(raw, self.config.inbound_byte_order);
        tracing::trace!(expected, "inbound frame length");

        self.send_ack("body ready")?;

        let body = read_frame_body(&mut self.stream, expected, self.config.chunk_size)?;
        tracing::debug!(len = body.len(), "frame received");
        Ok(Payload::from_body(body, text_encode))
    }

    fn send_ack(&mut self, stage: &'static str) -> Result<()> {
        let ack = [self.config.ack_byte];
        tracing::trace!(stage, "send ack");
        self.send(&ack, stage)
    }

    fn send(&mut self, bytes: &[u8], stage: &'static str) -> Result<()> {
        self.stream
            .write_all(bytes)
            .and_then(|()| self.stream.flush())
            .map_err(|e| HostwireError::from_io(e, stage))
    }

    /// One bounded read of up to `message_slot` bytes.
    /// Zero bytes means the host hung up.
    fn read_slot(&mut self, stage: &'static str) -> Result<Bytes> {
        let mut buf = vec![0u8; self.config.message_slot];
        loop {
            match self.stream.read(&mut buf) {
                Ok(0) => return Err(HostwireError::ConnectionClosed { stage }),
                Ok(n) => {
                    tracing::trace!(stage, len = n, "ack received");
                    buf.truncate(n);
                    return Ok(Bytes::from(buf));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(HostwireError::from_io(e, stage)),
            }
        }
    }
}
