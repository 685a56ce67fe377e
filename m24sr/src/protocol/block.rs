// m24sr/src/protocol/block.rs

use crate::constants::{
    PCB_BLOCK_MASK, PCB_DID_FOLLOWS, PCB_I_BLOCK, PCB_R_BLOCK, PCB_S_BLOCK, PCB_S_DESELECT, PCB_S_KIND_MASK,
    PCB_S_WTX,
};
use crate::protocol::parser;
use crate::{Error, Result};

/// Supervisory sub-types the chip may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisoryKind {
    /// Request to extend the frame waiting time; carries the FWT byte.
    WaitTimeExtension(u8),
    Deselect,
    Other(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Information,
    ReceiveReady,
    Supervisory(SupervisoryKind),
}

impl BlockKind {
    pub fn is_wait_time_extension(&self) -> bool {
        matches!(
            self,
            BlockKind::Supervisory(SupervisoryKind::WaitTimeExtension(_))
        )
    }
}

/// Classify a received frame from its PCB byte. Runs before any CRC check:
/// a wait time extension request is validated over its own 4-byte window.
pub fn classify(frame: &[u8]) -> Result<BlockKind> {
    let pcb = parser::byte_at(frame, 0)?;
    match pcb & PCB_BLOCK_MASK {
        PCB_I_BLOCK => Ok(BlockKind::Information),
        PCB_R_BLOCK => Ok(BlockKind::ReceiveReady),
        PCB_S_BLOCK => {
            let kind = match pcb & PCB_S_KIND_MASK {
                PCB_S_WTX => {
                    let at = if pcb & PCB_DID_FOLLOWS != 0 { 2 } else { 1 };
                    SupervisoryKind::WaitTimeExtension(parser::byte_at(frame, at)?)
                }
                PCB_S_DESELECT => SupervisoryKind::Deselect,
                _ => SupervisoryKind::Other(pcb),
            };
            Ok(BlockKind::Supervisory(kind))
        }
        _ => Err(Error::FrameFormat(format!("reserved pcb {:#04x}", pcb))),
    }
}
