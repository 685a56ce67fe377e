// m24sr/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the I2C bus away from the block protocol.
///
/// Failures are reported as [`crate::Error::Transport`]; the driver aborts
/// the pending command on any of them.
pub trait Transport {
    /// Write raw bytes to the chip.
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Read up to `max_len` bytes from the chip. A shorter read is allowed
    /// when the chip answers with a short frame.
    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>>;

    /// Block until the chip signals that an answer is ready. How long to
    /// probe (GPO level, address acknowledge, ...) is up to the transport.
    fn poll_ready(&mut self) -> Result<()>;
}
