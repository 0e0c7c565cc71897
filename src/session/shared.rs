//! Shared session handle
//!
//! The protocol has no request IDs, so concurrent callers on one
//! connection must take turns. Each call below holds the lock for the
//! whole exchange.

use std::io::{Read, Write};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use super::{Session, SessionState};
use crate::error::Result;
use crate::protocol::Payload;

/// Cloneable, thread-safe handle to one session
#[derive(Debug)]
pub struct SharedSession<S> {
    inner: Arc<Mutex<Session<S>>>,
}

impl<S> Clone for SharedSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Read + Write> SharedSession<S> {
    /// Wrap a session for shared use
    pub fn new(session: Session<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Current lifecycle state of the shared session
    pub fn state(&self) -> SessionState {
        self.inner.lock().state()
    }

    /// `Session::send_command` under the lock
    pub fn send_command(&self, command: &[u8]) -> Result<Bytes> {
        self.inner.lock().send_command(command)
    }

    /// `Session::write_frame` under the lock
    pub fn write_frame(
        &self,
        payload: &[u8],
        standalone: bool,
        command: Option<&[u8]>,
    ) -> Result<Bytes> {
        self.inner.lock().write_frame(payload, standalone, command)
    }

    /// `Session::read_frame` under the lock
    pub fn read_frame(
        &self,
        standalone: bool,
        command: Option<&[u8]>,
        text_encode: bool,
    ) -> Result<Payload> {
        self.inner.lock().read_frame(standalone, command, text_encode)
    }

    /// `Session::request` under the lock
    pub fn request(&self, header: &[u8], payload: &[u8], text_encode: bool) -> Result<Payload> {
        self.inner.lock().request(header, payload, text_encode)
    }

    /// Recover the session once this is the last handle
    pub fn try_unwrap(self) -> std::result::Result<Session<S>, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}
