// Shared helpers for the integration test crates in `tests/`.
#![allow(dead_code)]

pub mod fixtures;

use m24sr::driver::{Driver, DriverBuilder, RecordingListener};
use m24sr::transport::SharedTransport;
use m24sr::CommunicationMode;

/// Install env_logger once so `RUST_LOG=m24sr=trace` shows frame dumps.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn driver_with(
    mode: CommunicationMode,
    responses: Vec<Vec<u8>>,
) -> anyhow::Result<(Driver, SharedTransport, RecordingListener)> {
    init_logging();
    Ok(m24sr::test_support::mock_driver(mode, responses)?)
}

/// Driver addressing the chip with a device identifier.
pub fn driver_with_did(
    did: u8,
    responses: Vec<Vec<u8>>,
) -> anyhow::Result<(Driver, SharedTransport, RecordingListener)> {
    init_logging();
    let bus = SharedTransport::new();
    for r in responses {
        bus.push_response(r);
    }
    let log = RecordingListener::new();
    let driver = DriverBuilder::new()
        .with_transport(Box::new(bus.clone()))
        .with_listener(log.clone())
        .device_id(did)
        .build()?;
    Ok((driver, bus, log))
}
