//! Endpoint addresses

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{HostwireError, Result};

/// Where the host process listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// TCP address in `host:port` form
    Tcp(String),

    /// Filesystem path of a unix domain socket
    #[cfg(unix)]
    Unix(PathBuf),
}

impl FromStr for Endpoint {
    type Err = HostwireError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(path) = s.strip_prefix("unix:") {
            return parse_unix(path);
        }

        let addr = s.strip_prefix("tcp:").unwrap_or(s);
        match addr.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {
                Ok(Endpoint::Tcp(addr.to_string()))
            }
            _ => Err(HostwireError::Config(format!(
                "invalid endpoint '{}': expected host:port, tcp:host:port or unix:/path",
                s
            ))),
        }
    }
}

#[cfg(unix)]
fn parse_unix(path: &str) -> Result<Endpoint> {
    if path.is_empty() {
        return Err(HostwireError::Config("unix endpoint has an empty path".to_string()));
    }
    Ok(Endpoint::Unix(PathBuf::from(path)))
}

#[cfg(not(unix))]
fn parse_unix(_path: &str) -> Result<Endpoint> {
    Err(HostwireError::Config(
        "unix socket endpoints are not supported on this platform".to_string(),
    ))
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Tcp(addr) => write!(f, "tcp:{}", addr),
            #[cfg(unix)]
            Endpoint::Unix(path) => write!(f, "unix:{}", path.display()),
        }
    }
}
