// m24sr/src/protocol/crc.rs

//! CRC16 as used by ISO/IEC 14443-3 type A framing (ITU-V.41 polynomial,
//! initial value 0x6363, reflected, no final xor).

use crate::constants::CRC_INIT;

/// Fold one byte into the accumulator.
#[inline]
fn update(crc: u16, byte: u8) -> u16 {
    let mut ch = byte ^ (crc & 0x00FF) as u8;
    ch ^= ch << 4;
    let ch = ch as u16;
    (crc >> 8) ^ (ch << 8) ^ (ch << 3) ^ (ch >> 4)
}

/// Compute the CRC16 of `data`.
pub fn compute(data: &[u8]) -> u16 {
    data.iter().fold(CRC_INIT, |crc, &b| update(crc, b))
}

/// Append the CRC of `frame` to itself, low byte first.
pub fn append(frame: &mut Vec<u8>) {
    let crc = compute(frame);
    frame.extend_from_slice(&crc.to_le_bytes());
}

/// Residue of a span that already ends with its CRC. Zero means intact.
pub fn residue(data: &[u8]) -> u16 {
    compute(data)
}

pub fn is_intact(data: &[u8]) -> bool {
    data.len() >= 2 && residue(data) == 0
}
