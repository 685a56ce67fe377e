// m24sr/src/constants.rs
//! Wire-level constants for the M24SR block protocol and its command set.

/// Largest payload a single read or update may carry.
pub const MAX_OPERATION_SIZE: usize = 246;

/// Largest frame the chip sends or accepts.
pub const MAX_FRAME_LEN: usize = 255;

/// Initial value of the CRC16 accumulator (ITU-V.41).
pub const CRC_INIT: u16 = 0x6363;

/// Status word returned for a successfully completed command.
pub const STATUS_SUCCESS: u16 = 0x9000;

/// Number of bytes of the status word and of the trailing CRC.
pub const STATUS_LEN: usize = 2;
pub const CRC_LEN: usize = 2;

/// PCB + SW1 + SW2 + CRC: the shortest response carrying a status.
pub const STATUS_RESPONSE_LEN: usize = 5;

/// PCB + FWT + CRC of a wait time extension request.
pub const WTX_FRAME_LEN: usize = 4;

/// PCB + CRC of a deselect acknowledgement.
pub const DESELECT_RESPONSE_LEN: usize = 3;

/// Password length for VERIFY / CHANGE REFERENCE DATA.
pub const PASSWORD_LEN: usize = 16;

/// Class bytes
pub const CLA_DEFAULT: u8 = 0x00;
pub const CLA_ST: u8 = 0xA2;

/// Instruction bytes
pub const INS_SELECT_FILE: u8 = 0xA4;
pub const INS_READ_BINARY: u8 = 0xB0;
pub const INS_UPDATE_BINARY: u8 = 0xD6;
pub const INS_VERIFY: u8 = 0x20;
pub const INS_CHANGE_REFERENCE_DATA: u8 = 0x24;
pub const INS_DISABLE: u8 = 0x26;
pub const INS_ENABLE: u8 = 0x28;
pub const INS_INTERRUPT: u8 = 0xD6;

/// SELECT FILE P1/P2 for the NDEF application and for elementary files.
pub const P1P2_SELECT_APPLICATION: u16 = 0x0400;
pub const P1P2_SELECT_FILE: u16 = 0x000C;

/// P1/P2 of the GPO commands.
pub const P1P2_SEND_INTERRUPT: u16 = 0x001E;
pub const P1P2_STATE_CONTROL: u16 = 0x001F;

/// NDEF Tag Application AID.
pub const NDEF_APPLICATION_ID: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

/// Raw session bytes; these are sent without block framing.
pub const GET_SESSION_COMMAND: u8 = 0x26;
pub const KILL_RF_SESSION_COMMAND: u8 = 0x52;

/// S(DESELECT) request including its CRC.
pub const DESELECT_REQUEST: [u8; 3] = [0xC2, 0xE0, 0xB4];

/// PCB of the S(WTX) acknowledgement sent by the host.
pub const WTX_RESPONSE_PCB: u8 = 0xF2;

/// PCB bits
pub const PCB_BLOCK_MASK: u8 = 0xC0;
pub const PCB_I_BLOCK: u8 = 0x00;
pub const PCB_R_BLOCK: u8 = 0x80;
pub const PCB_S_BLOCK: u8 = 0xC0;
pub const PCB_I_BLOCK_BASE: u8 = 0x02;
pub const PCB_DID_FOLLOWS: u8 = 0x08;
pub const PCB_S_KIND_MASK: u8 = 0x30;
pub const PCB_S_DESELECT: u8 = 0x00;
pub const PCB_S_WTX: u8 = 0x30;

/// System file layout
pub const SYSTEM_FILE_GPO_OFFSET: u16 = 0x0004;
pub const SYSTEM_FILE_UID_OFFSET: u16 = 0x0008;
pub const UID_LEN: u8 = 7;

/// Default number of wait time extensions honoured for one command.
pub const DEFAULT_MAX_WTX: usize = 16;
