//! Shared test helpers
//!
//! - `ScriptedStream`: in-memory stream replaying scripted host replies
//! - mock host helpers running the host side over a real socket

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use hostwire::Endpoint;

// =============================================================================
// Scripted Stream
// =============================================================================

/// Stream double: each scripted reply is delivered as its own segment,
/// at most `max_read` bytes per `read` call. Everything written is kept.
#[derive(Debug, Default)]
pub struct ScriptedStream {
    replies: VecDeque<Vec<u8>>,
    max_read: usize,
    pub written: Vec<u8>,
}

impl ScriptedStream {
    pub fn new(replies: Vec<Vec<u8>>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            max_read: usize::MAX,
            written: Vec::new(),
        }
    }

    /// Deliver at most `max_read` bytes per read
    pub fn fragmented(replies: Vec<Vec<u8>>, max_read: usize) -> Self {
        Self {
            max_read,
            ..Self::new(replies)
        }
    }

    /// Replies not yet consumed by the client
    pub fn remaining(&self) -> usize {
        self.replies.iter().map(Vec::len).sum()
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while let Some(front) = self.replies.front() {
            if !front.is_empty() {
                break;
            }
            self.replies.pop_front();
        }
        let Some(front) = self.replies.front_mut() else {
            return Ok(0);
        };

        let n = front.len().min(buf.len()).min(self.max_read);
        buf[..n].copy_from_slice(&front[..n]);
        front.drain(..n);
        Ok(n)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stream whose reads and writes always fail with `kind`
#[derive(Debug)]
pub struct FailingStream {
    pub read_kind: io::ErrorKind,
    pub write_kind: Option<io::ErrorKind>,
}

impl Read for FailingStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::from(self.read_kind))
    }
}

impl Write for FailingStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.write_kind {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Deterministic, non-repeating-looking test payload
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

// =============================================================================
// Mock Host
// =============================================================================

/// Run `handler` on the first connection accepted on a loopback port
pub fn spawn_tcp_host<F>(handler: F) -> (Endpoint, JoinHandle<()>)
where
    F: FnOnce(TcpStream) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        stream.set_nodelay(true).unwrap();
        handler(stream);
    });

    (Endpoint::Tcp(addr.to_string()), handle)
}

/// Read the command token and reply with a one-byte ack
pub fn host_expect_command<S: Read + Write>(stream: &mut S, expected: &[u8]) {
    let mut token = vec![0u8; expected.len()];
    stream.read_exact(&mut token).unwrap();
    assert_eq!(token, expected);
    stream.write_all(&[0x00]).unwrap();
}

/// Read a 2-byte big-endian framed payload and ack it
pub fn host_receive_frame<S: Read + Write>(stream: &mut S) -> Vec<u8> {
    let mut len = [0u8; 2];
    stream.read_exact(&mut len).unwrap();
    let mut body = vec![0u8; u16::from_be_bytes(len) as usize];
    stream.read_exact(&mut body).unwrap();
    stream.write_all(&[0x00]).unwrap();
    body
}

/// Read one sync byte from the client
pub fn host_expect_ack<S: Read>(stream: &mut S) {
    let mut ack = [0xffu8; 1];
    stream.read_exact(&mut ack).unwrap();
    assert_eq!(ack, [0x00]);
}

/// Send a 4-byte little-endian length, wait for the ACK, then send the
/// body in `piece`-sized writes
pub fn host_send_frame<S: Read + Write>(stream: &mut S, body: &[u8], piece: usize) {
    stream.write_all(&(body.len() as u32).to_le_bytes()).unwrap();
    host_expect_ack(stream);
    for chunk in body.chunks(piece.max(1)) {
        stream.write_all(chunk).unwrap();
        stream.flush().unwrap();
    }
}

/// Host side of one `Session::request` that echoes the payload back
pub fn host_echo_request<S: Read + Write>(stream: &mut S, header: &[u8]) -> Vec<u8> {
    host_expect_command(stream, header);
    let body = host_receive_frame(stream);
    host_expect_ack(stream);
    host_send_frame(stream, &body, 4096);
    body
}
