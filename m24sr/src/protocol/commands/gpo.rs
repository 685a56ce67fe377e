// m24sr/src/protocol/commands/gpo.rs

use crate::constants::{CLA_ST, INS_INTERRUPT, P1P2_SEND_INTERRUPT, P1P2_STATE_CONTROL};
use crate::protocol::apdu::CommandDescriptor;

const GPO_RESET: [u8; 1] = [0x01];
const GPO_SET: [u8; 1] = [0x00];

/// Pulse the GPO line (GPO must be configured for interrupt mode).
pub fn send_interrupt() -> CommandDescriptor<'static> {
    CommandDescriptor::new(CLA_ST, INS_INTERRUPT, P1P2_SEND_INTERRUPT).with_lc(0)
}

/// Drive the GPO line low (`reset`) or release it to high impedance
/// (GPO must be configured for state control).
pub fn state_control(reset: bool) -> CommandDescriptor<'static> {
    let data: &'static [u8] = if reset { &GPO_RESET } else { &GPO_SET };
    CommandDescriptor {
        lc: 1,
        data: Some(data),
        ..CommandDescriptor::new(CLA_ST, INS_INTERRUPT, P1P2_STATE_CONTROL)
    }
}

/// Merge a GPO mode into the system file GPO byte: the I2C configuration
/// lives in the low nibble, the RF configuration in the high nibble.
pub fn merge_gpo_byte(current: u8, mode: crate::types::GpoMode, i2c: bool) -> u8 {
    if i2c {
        (current & 0xF0) | mode.as_nibble()
    } else {
        (current & 0x0F) | (mode.as_nibble() << 4)
    }
}
