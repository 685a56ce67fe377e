//! Small helpers shared across the crate.

pub mod hex;

pub use self::hex::{hex_dump, HexDump};
