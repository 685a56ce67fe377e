// m24sr/src/protocol/frame.rs

use crate::constants::{
    CRC_LEN, DESELECT_REQUEST, MAX_FRAME_LEN, PCB_DID_FOLLOWS, PCB_I_BLOCK_BASE, WTX_RESPONSE_PCB,
};
use crate::protocol::apdu::CommandDescriptor;
use crate::protocol::crc;
use crate::protocol::mask::FieldMask;
use crate::protocol::parser::Reader;
use crate::{Error, Result};

/// Alternating I-block number shared by every command of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockNumber(u8);

impl BlockNumber {
    pub fn new() -> Self {
        Self(0)
    }

    /// Bit the next I-block will carry.
    pub fn peek(&self) -> u8 {
        self.0
    }

    /// Return the bit for the block being built and flip for the next one.
    fn advance(&mut self) -> u8 {
        let current = self.0;
        self.0 ^= 1;
        current
    }
}

/// I-block wire frame:
/// [PCB][DID?][CLA][INS][P1][P2][LC?][DATA?][LE?][CRC-low][CRC-high]
/// with each field present according to a [`FieldMask`].
pub struct Frame;

impl Frame {
    /// Number of bytes `encode` will emit for `cmd` under `mask`.
    pub fn encoded_len(mask: FieldMask, cmd: &CommandDescriptor<'_>) -> usize {
        let single = [
            FieldMask::PCB,
            FieldMask::DID,
            FieldMask::CLA,
            FieldMask::INS,
            FieldMask::P1,
            FieldMask::P2,
            FieldMask::LC,
            FieldMask::LE,
        ]
        .iter()
        .filter(|f| mask.contains(**f))
        .count();
        let data = if mask.contains(FieldMask::DATA) {
            cmd.lc as usize
        } else {
            0
        };
        let crc = if mask.contains(FieldMask::CRC) {
            CRC_LEN
        } else {
            0
        };
        single + data + crc
    }

    /// Serialize `cmd` into `out` (cleared first). The block number only
    /// advances when the frame was built.
    pub fn encode_into(
        mask: FieldMask,
        cmd: &CommandDescriptor<'_>,
        device_id: Option<u8>,
        block: &mut BlockNumber,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        cmd.validate()?;

        let total = Self::encoded_len(mask, cmd);
        if total > MAX_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_FRAME_LEN,
                actual: total,
            });
        }

        let did = if mask.contains(FieldMask::DID) {
            Some(device_id.ok_or_else(|| {
                Error::InvalidParameter("device id field requested without a device id".into())
            })?)
        } else {
            None
        };

        out.clear();
        out.reserve(total);

        if mask.contains(FieldMask::PCB) {
            let mut pcb = PCB_I_BLOCK_BASE | block.advance();
            if did.is_some() {
                pcb |= PCB_DID_FOLLOWS;
            }
            out.push(pcb);
        }
        if let Some(did) = did {
            out.push(did);
        }
        if mask.contains(FieldMask::CLA) {
            out.push(cmd.cla);
        }
        if mask.contains(FieldMask::INS) {
            out.push(cmd.ins);
        }
        if mask.contains(FieldMask::P1) {
            out.push(cmd.p1);
        }
        if mask.contains(FieldMask::P2) {
            out.push(cmd.p2);
        }
        if mask.contains(FieldMask::LC) {
            out.push(cmd.lc);
        }
        if mask.contains(FieldMask::DATA) {
            match cmd.data {
                Some(data) => out.extend_from_slice(data),
                None => out.resize(out.len() + cmd.lc as usize, 0),
            }
        }
        if mask.contains(FieldMask::LE) {
            out.push(cmd.le);
        }
        if mask.contains(FieldMask::CRC) {
            crc::append(out);
        }

        Ok(())
    }

    /// Convenience wrapper around [`Frame::encode_into`].
    pub fn encode(
        mask: FieldMask,
        cmd: &CommandDescriptor<'_>,
        device_id: Option<u8>,
        block: &mut BlockNumber,
    ) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        Self::encode_into(mask, cmd, device_id, block, &mut out)?;
        Ok(out)
    }

    /// Parse an I-block built with `mask` back into its fields.
    pub fn decode(mask: FieldMask, frame: &[u8]) -> Result<DecodedFrame> {
        if !mask.is_well_formed() {
            return Err(Error::FrameFormat("data field without length".into()));
        }
        if mask.contains(FieldMask::CRC) && !crc::is_intact(frame) {
            return Err(Error::CrcMismatch {
                residue: crc::residue(frame),
            });
        }

        let mut r = Reader::new(frame);
        let mut out = DecodedFrame::default();

        if mask.contains(FieldMask::PCB) {
            out.pcb = Some(r.byte()?);
        }
        if mask.contains(FieldMask::DID) {
            out.device_id = Some(r.byte()?);
        }
        if mask.contains(FieldMask::CLA) {
            out.cla = Some(r.byte()?);
        }
        if mask.contains(FieldMask::INS) {
            out.ins = Some(r.byte()?);
        }
        if mask.contains(FieldMask::P1) {
            out.p1 = Some(r.byte()?);
        }
        if mask.contains(FieldMask::P2) {
            out.p2 = Some(r.byte()?);
        }
        if mask.contains(FieldMask::LC) {
            out.lc = Some(r.byte()?);
        }
        if mask.contains(FieldMask::DATA) {
            let lc = out.lc.unwrap_or(0) as usize;
            out.data = Some(r.take(lc)?.to_vec());
        }
        if mask.contains(FieldMask::LE) {
            out.le = Some(r.byte()?);
        }

        let trailer = if mask.contains(FieldMask::CRC) {
            CRC_LEN
        } else {
            0
        };
        if r.remaining() != trailer {
            return Err(Error::InvalidLength {
                expected: r.position() + trailer,
                actual: frame.len(),
            });
        }

        Ok(out)
    }

    /// S(WTX) acknowledgement echoing the requested FWT multiplier, with
    /// the DID after the PCB when one is in use.
    pub fn wtx_response(fwt: u8, device_id: Option<u8>) -> Vec<u8> {
        let mut out = Vec::with_capacity(5);
        match device_id {
            Some(did) => out.extend_from_slice(&[WTX_RESPONSE_PCB | PCB_DID_FOLLOWS, did]),
            None => out.push(WTX_RESPONSE_PCB),
        }
        out.push(fwt);
        crc::append(&mut out);
        out
    }

    pub fn deselect_request() -> [u8; 3] {
        DESELECT_REQUEST
    }
}

/// Fields recovered from an I-block; `None` for fields absent from the mask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedFrame {
    pub pcb: Option<u8>,
    pub device_id: Option<u8>,
    pub cla: Option<u8>,
    pub ins: Option<u8>,
    pub p1: Option<u8>,
    pub p2: Option<u8>,
    pub lc: Option<u8>,
    pub data: Option<Vec<u8>>,
    pub le: Option<u8>,
}

impl DecodedFrame {
    /// Block number carried by the PCB, if any.
    pub fn block_number(&self) -> Option<u8> {
        self.pcb.map(|p| p & 0x01)
    }
}
