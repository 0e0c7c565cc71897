//! Host stream
//!
//! A connected socket of either family, configured with the session's
//! deadlines.

use std::io::{self, Read, Write};
use std::net::TcpStream;
#[cfg(unix)]
use std::os::unix::net::UnixStream;

use crate::config::SessionConfig;
use crate::error::{HostwireError, Result};

use super::Endpoint;

/// Connected stream to the host process
#[derive(Debug)]
pub enum HostStream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl HostStream {
    /// Connect to `endpoint` and apply the configured timeouts
    pub fn connect(endpoint: &Endpoint, config: &SessionConfig) -> Result<Self> {
        let stream = match endpoint {
            Endpoint::Tcp(addr) => {
                let stream = TcpStream::connect(addr.as_str())
                    .map_err(|e| HostwireError::from_io(e, "connect"))?;
                // Disable Nagle's algorithm; every step is a small write awaiting a reply
                stream.set_nodelay(true)?;
                HostStream::Tcp(stream)
            }
            #[cfg(unix)]
            Endpoint::Unix(path) => HostStream::Unix(
                UnixStream::connect(path).map_err(|e| HostwireError::from_io(e, "connect"))?,
            ),
        };

        stream.set_timeouts(config)?;
        tracing::debug!(peer = %stream.peer_label(), "connected to host");
        Ok(stream)
    }

    /// Apply read/write deadlines from `config` (0 ms leaves them unset)
    pub fn set_timeouts(&self, config: &SessionConfig) -> Result<()> {
        let (read, write) = (config.read_timeout(), config.write_timeout());
        match self {
            HostStream::Tcp(s) => {
                s.set_read_timeout(read)?;
                s.set_write_timeout(write)?;
            }
            #[cfg(unix)]
            HostStream::Unix(s) => {
                s.set_read_timeout(read)?;
                s.set_write_timeout(write)?;
            }
        }
        Ok(())
    }

    /// Peer address for logging
    pub fn peer_label(&self) -> String {
        match self {
            HostStream::Tcp(s) => s
                .peer_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| "unknown".to_string()),
            #[cfg(unix)]
            HostStream::Unix(s) => s
                .peer_addr()
                .ok()
                .and_then(|a| a.as_pathname().map(|p| p.display().to_string()))
                .unwrap_or_else(|| "unix:unnamed".to_string()),
        }
    }
}

impl From<TcpStream> for HostStream {
    fn from(stream: TcpStream) -> Self {
        HostStream::Tcp(stream)
    }
}

#[cfg(unix)]
impl From<UnixStream> for HostStream {
    fn from(stream: UnixStream) -> Self {
        HostStream::Unix(stream)
    }
}

impl Read for HostStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            HostStream::Tcp(s) => s.read(buf),
            #[cfg(unix)]
            HostStream::Unix(s) => s.read(buf),
        }
    }
}

impl Write for HostStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            HostStream::Tcp(s) => s.write(buf),
            #[cfg(unix)]
            HostStream::Unix(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            HostStream::Tcp(s) => s.flush(),
            #[cfg(unix)]
            HostStream::Unix(s) => s.flush(),
        }
    }
}
