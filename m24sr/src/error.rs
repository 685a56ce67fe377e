// m24sr/src/error.rs

use thiserror::Error;

use crate::types::StatusWord;

/// Failure reported by a transport collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The chip did not acknowledge its address.
    #[error("bus nack")]
    Nack,

    #[error("bus timeout")]
    Timeout,

    #[error("bus error: {0}")]
    Bus(String),
}

/// Common error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("crc mismatch: residue {residue:#06x}")]
    CrcMismatch { residue: u16 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("chip reported status {0}")]
    ChipStatus(StatusWord),

    #[error("wait time extension limit reached after {extensions} requests")]
    ProtocolTimeout { extensions: usize },

    #[error("frame format error: {0}")]
    FrameFormat(String),

    #[error("unexpected block: pcb={0:#04x}")]
    UnexpectedBlock(u8),

    #[error("a command is already pending")]
    Busy,

    #[error("pin not connected")]
    PinNotConnected,

    #[error("no transport configured")]
    NoTransport,

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// True for errors raised by the link itself rather than by the chip's
    /// application layer.
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            Error::Transport(_)
                | Error::CrcMismatch { .. }
                | Error::ProtocolTimeout { .. }
                | Error::FrameFormat(_)
                | Error::UnexpectedBlock(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
