//! Command tokens
//!
//! Commands are short raw tokens with no framing of their own, so the
//! host can only tell where one ends by reading a bounded slot.

use crate::error::{HostwireError, Result};

/// Check that a command token is non-empty and fits in one message slot
pub fn validate_command(command: &[u8], max_len: usize) -> Result<()> {
    if command.is_empty() {
        return Err(HostwireError::InvalidArgument(
            "command token must not be empty".to_string(),
        ));
    }
    if command.len() > max_len {
        return Err(HostwireError::InvalidArgument(format!(
            "command token is {} bytes (max {})",
            command.len(),
            max_len
        )));
    }
    Ok(())
}
