// m24sr/src/protocol/response.rs

use crate::constants::{
    CRC_LEN, DESELECT_RESPONSE_LEN, PCB_DID_FOLLOWS, STATUS_LEN, STATUS_RESPONSE_LEN,
    WTX_FRAME_LEN,
};
use crate::protocol::{crc, parser};
use crate::types::StatusWord;
use crate::{Error, Result};

/// Which CRC window of a response turned out to be intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseWindow {
    /// The whole received span; the status sits just before the CRC.
    Full,
    /// Only the leading 5-byte status response; anything after is padding.
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedResponse {
    pub status: StatusWord,
    pub window: ResponseWindow,
}

/// Check the integrity of a received response and extract its status word.
///
/// The residue is first computed over the whole span. If that fails the
/// leading [`STATUS_RESPONSE_LEN`] bytes are tried, which covers a chip
/// answering with a bare status where a longer data response was read.
/// A failure of both windows is a link error, never an application status.
pub fn validate(frame: &[u8]) -> Result<ValidatedResponse> {
    parser::ensure_len(frame, STATUS_RESPONSE_LEN)?;

    let full = crc::residue(frame);
    if full == 0 {
        let at = frame.len() - CRC_LEN - STATUS_LEN;
        let status = StatusWord::new(parser::be_u16_at(frame, at)?);
        return Ok(ValidatedResponse {
            status,
            window: ResponseWindow::Full,
        });
    }

    if frame.len() > STATUS_RESPONSE_LEN && crc::residue(&frame[..STATUS_RESPONSE_LEN]) == 0 {
        let status = StatusWord::new(parser::be_u16_at(frame, 1)?);
        return Ok(ValidatedResponse {
            status,
            window: ResponseWindow::Short,
        });
    }

    log::warn!("crc residue {:#06x} over {} byte response", full, frame.len());
    Err(Error::CrcMismatch { residue: full })
}

/// Application data of a validated response: everything between the
/// PCB (and DID, when present) and the status word.
pub fn payload<'a>(
    frame: &'a [u8],
    validated: &ValidatedResponse,
    has_did: bool,
) -> Result<&'a [u8]> {
    if validated.window == ResponseWindow::Short {
        return Ok(&[]);
    }
    let start = if has_did { 2 } else { 1 };
    let end = frame.len() - CRC_LEN - STATUS_LEN;
    if end < start {
        return Err(Error::InvalidLength {
            expected: start + STATUS_LEN + CRC_LEN,
            actual: frame.len(),
        });
    }
    Ok(&frame[start..end])
}

/// Check an S(WTX) request over its own window and return the FWT byte.
/// The window is 4 bytes, one more when the PCB announces a DID.
pub fn validate_wtx(frame: &[u8]) -> Result<u8> {
    let did = usize::from(parser::byte_at(frame, 0)? & PCB_DID_FOLLOWS != 0);
    let window = WTX_FRAME_LEN + did;
    parser::ensure_len(frame, window)?;
    let residue = crc::residue(&frame[..window]);
    if residue != 0 {
        log::warn!("corrupted wait time extension request");
        return Err(Error::CrcMismatch { residue });
    }
    parser::byte_at(frame, 1 + did)
}

/// Check an S(DESELECT) acknowledgement.
pub fn validate_deselect(frame: &[u8]) -> Result<()> {
    parser::ensure_len(frame, DESELECT_RESPONSE_LEN)?;
    let residue = crc::residue(&frame[..DESELECT_RESPONSE_LEN]);
    if residue != 0 {
        return Err(Error::CrcMismatch { residue });
    }
    Ok(())
}
