//! Hex rendering of frames for log output.
//!
//! [`HexDump`] formats lazily, so a `trace!` that is filtered out costs
//! nothing beyond building the wrapper.

use std::fmt;

/// Space separated lowercase hex view of a byte slice.
///
/// Example: `&[0x02, 0x90, 0x00]` -> `"02 90 00"`
#[derive(Clone, Copy)]
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({} bytes)", self, self.0.len())
    }
}

pub fn hex_dump(bytes: &[u8]) -> HexDump<'_> {
    HexDump(bytes)
}
