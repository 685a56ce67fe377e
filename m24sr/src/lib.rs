// m24sr/src/lib.rs

//! m24sr
//!
//! Pure Rust driver for the ST M24SR dynamic NFC tag over I2C: the
//! ISO/IEC 14443-4 style block protocol (I/R/S blocks, CRC16, wait time
//! extension) and the NFC Forum type 4 command set on top of it.

pub mod constants;
pub mod driver;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
