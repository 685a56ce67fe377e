// m24sr/src/driver/config.rs

use crate::constants::{DEFAULT_MAX_WTX, MAX_OPERATION_SIZE};
use crate::protocol::FieldMask;
use crate::types::CommunicationMode;
use crate::{Error, Result};

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    pub mode: CommunicationMode,
    /// Device identifier inserted after the PCB of every I-block.
    pub device_id: Option<u8>,
    /// Wait time extensions honoured for a single command.
    pub max_wtx: usize,
    pub max_read_bytes: u8,
    pub max_write_bytes: u8,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            mode: CommunicationMode::Sync,
            device_id: None,
            max_wtx: DEFAULT_MAX_WTX,
            max_read_bytes: MAX_OPERATION_SIZE as u8,
            max_write_bytes: MAX_OPERATION_SIZE as u8,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        for (what, value) in [
            ("max_read_bytes", self.max_read_bytes),
            ("max_write_bytes", self.max_write_bytes),
        ] {
            if value as usize > MAX_OPERATION_SIZE || value == 0 {
                return Err(Error::InvalidParameter(format!(
                    "{} must be within 1..={}, got {}",
                    what, MAX_OPERATION_SIZE, value
                )));
            }
        }
        Ok(())
    }

    /// Mask actually used on the wire for a command kind.
    pub fn wire_mask(&self, mask: FieldMask) -> FieldMask {
        if self.device_id.is_some() {
            mask | FieldMask::DID
        } else {
            mask
        }
    }

    pub fn is_async(&self) -> bool {
        self.mode == CommunicationMode::Async
    }
}
