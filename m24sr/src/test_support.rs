//! Test support helpers intended for use by unit and integration tests.
//!
//! These build the frames a chip would answer with and wire a mock bus and
//! a recording listener into a driver, so tests across the crate and the
//! tests/ directory can reuse the same setup.
#![allow(dead_code)]

use crate::constants::WTX_RESPONSE_PCB;
use crate::driver::{Driver, DriverBuilder, RecordingListener};
use crate::protocol::crc;
use crate::transport::SharedTransport;
use crate::types::CommunicationMode;
use crate::Result;

/// I-block answer carrying only a status word.
#[doc(hidden)]
pub fn status_response(pcb: u8, status: u16) -> Vec<u8> {
    data_response(pcb, &[], status)
}

/// I-block answer carrying `data` followed by a status word.
#[doc(hidden)]
pub fn data_response(pcb: u8, data: &[u8], status: u16) -> Vec<u8> {
    let mut f = Vec::with_capacity(data.len() + 5);
    f.push(pcb);
    f.extend_from_slice(data);
    f.extend_from_slice(&status.to_be_bytes());
    crc::append(&mut f);
    f
}

/// S(WTX) request as sent by the chip.
#[doc(hidden)]
pub fn wtx_request(fwt: u8) -> Vec<u8> {
    let mut f = vec![WTX_RESPONSE_PCB, fwt];
    crc::append(&mut f);
    f
}

/// S(DESELECT) acknowledgement.
#[doc(hidden)]
pub fn deselect_ack() -> Vec<u8> {
    let mut f = vec![0xC2];
    crc::append(&mut f);
    f
}

/// Build a driver on a mock bus pre-seeded with `responses`. The bus handle
/// and the listener log stay with the caller.
#[doc(hidden)]
pub fn mock_driver(
    mode: CommunicationMode,
    responses: Vec<Vec<u8>>,
) -> Result<(Driver, SharedTransport, RecordingListener)> {
    let bus = SharedTransport::new();
    for r in responses {
        bus.push_response(r);
    }
    let log = RecordingListener::new();
    let driver = DriverBuilder::new()
        .with_transport(Box::new(bus.clone()))
        .with_listener(log.clone())
        .mode(mode)
        .build()?;
    Ok((driver, bus, log))
}
