// m24sr/src/protocol/apdu.rs

use crate::constants::MAX_OPERATION_SIZE;
use crate::{Error, Result};

/// Command APDU as handed to the frame codec. The payload is borrowed for
/// the duration of frame construction only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor<'a> {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    /// Declared payload length (LC).
    pub lc: u8,
    /// Payload; when `None` and the mask asks for a data field, `lc` zero
    /// bytes are emitted instead.
    pub data: Option<&'a [u8]>,
    /// Expected response length (LE).
    pub le: u8,
}

impl<'a> CommandDescriptor<'a> {
    pub fn new(cla: u8, ins: u8, p1p2: u16) -> Self {
        let [p1, p2] = p1p2.to_be_bytes();
        Self {
            cla,
            ins,
            p1,
            p2,
            lc: 0,
            data: None,
            le: 0,
        }
    }

    /// Attach a payload and set LC from its length.
    pub fn with_data(mut self, data: &'a [u8]) -> Result<Self> {
        if data.len() > MAX_OPERATION_SIZE {
            return Err(Error::InvalidLength {
                expected: MAX_OPERATION_SIZE,
                actual: data.len(),
            });
        }
        self.lc = data.len() as u8;
        self.data = Some(data);
        Ok(self)
    }

    /// Declare a length without supplying bytes (zero-filled on encode).
    pub fn with_lc(mut self, lc: u8) -> Self {
        self.lc = lc;
        self.data = None;
        self
    }

    pub fn with_le(mut self, le: u8) -> Self {
        self.le = le;
        self
    }

    pub fn p1p2(&self) -> u16 {
        u16::from_be_bytes([self.p1, self.p2])
    }

    /// Check the payload against the single-operation cap and against the
    /// declared length.
    pub fn validate(&self) -> Result<()> {
        let lc = self.lc as usize;
        if lc > MAX_OPERATION_SIZE {
            return Err(Error::InvalidLength {
                expected: MAX_OPERATION_SIZE,
                actual: lc,
            });
        }
        if let Some(data) = self.data {
            if data.len() > MAX_OPERATION_SIZE {
                return Err(Error::InvalidLength {
                    expected: MAX_OPERATION_SIZE,
                    actual: data.len(),
                });
            }
            if data.len() != lc {
                return Err(Error::InvalidLength {
                    expected: lc,
                    actual: data.len(),
                });
            }
        }
        Ok(())
    }
}
