//! Network Module
//!
//! Opening the stream a session runs over.
//!
//! ## Endpoints
//! - `unix:/path/to/host.sock` (unix platforms)
//! - `tcp:host:port`
//! - `host:port`

mod endpoint;
mod stream;

pub use endpoint::Endpoint;
pub use stream::HostStream;
