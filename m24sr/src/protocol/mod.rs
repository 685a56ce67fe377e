// m24sr/src/protocol/mod.rs

pub mod apdu;
pub mod block;
pub mod commands;
pub mod crc;
pub mod frame;
pub mod mask;
pub mod parser;
pub mod response;

pub use apdu::CommandDescriptor;
pub use block::{classify, BlockKind, SupervisoryKind};
pub use commands::Command;
pub use frame::{BlockNumber, DecodedFrame, Frame};
pub use mask::FieldMask;
pub use response::{ResponseWindow, ValidatedResponse};
