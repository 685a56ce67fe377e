#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use m24sr::driver::{DriverBuilder, RecordingListener};
use m24sr::transport::{MockTransport, Transport};

#[test]
fn queued_responses_come_back_in_order() -> anyhow::Result<()> {
    let mut m = MockTransport::with_responses(vec![vec![0x01], vec![0x02, 0x03]]);
    assert_eq!(m.receive(8)?, vec![0x01]);
    assert_eq!(m.receive(8)?, vec![0x02, 0x03]);
    assert!(m.receive(8).is_err());
    assert_eq!(m.requested, vec![8, 8, 8]);
    Ok(())
}

#[test]
fn receive_is_truncated_to_requested_length() -> anyhow::Result<()> {
    let mut m = MockTransport::new();
    m.push_response(fixtures::ok_response());
    assert_eq!(m.receive(3)?, vec![0x02, 0x90, 0x00]);
    Ok(())
}

#[test]
fn shared_handle_observes_driver_traffic() -> anyhow::Result<()> {
    let bus = MockTransport::with_responses(vec![fixtures::ok_response()]).into_shared();
    let log = RecordingListener::new();
    let mut drv = DriverBuilder::new()
        .with_transport(Box::new(bus.clone()))
        .with_listener(log.clone())
        .build()?;

    drv.select_application()?;
    assert_eq!(bus.sent(), vec![fixtures::select_application_request()]);
    assert_eq!(bus.pending_responses(), 0);
    assert_eq!(bus.with_mock(|m| m.requested.clone()), vec![5]);
    assert_eq!(log.len(), 1);
    Ok(())
}

#[test]
fn sent_frames_are_recorded() -> anyhow::Result<()> {
    let mut m = MockTransport::new();
    m.send(&[0x26])?;
    m.send(&fixtures::read_16_request())?;
    assert_eq!(m.sent, vec![vec![0x26], fixtures::read_16_request()]);
    Ok(())
}
