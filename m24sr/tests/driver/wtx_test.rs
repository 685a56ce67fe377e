#[path = "../common/mod.rs"]
mod common;

use common::{driver_with, fixtures};
use m24sr::driver::{DriverBuilder, RecordingListener};
use m24sr::test_support::{status_response, wtx_request};
use m24sr::transport::SharedTransport;
use m24sr::{CommunicationMode, Error};
use proptest::prelude::*;

proptest! {
    #[test]
    fn every_extension_is_acknowledged(k in 0usize..=16, fwt in 1u8..=59) {
        let mut responses: Vec<Vec<u8>> = (0..k).map(|_| wtx_request(fwt)).collect();
        responses.push(status_response(0x02, 0x9000));
        let (mut drv, bus, log) = driver_with(CommunicationMode::Sync, responses).unwrap();

        drv.select_application().unwrap();

        let sent = bus.sent();
        prop_assert_eq!(sent.len(), k + 1);
        for ack in &sent[1..] {
            prop_assert_eq!(&ack[..2], &[0xF2, fwt][..]);
            prop_assert_eq!(ack.len(), 4);
        }
        prop_assert_eq!(bus.polls(), k + 1);
        prop_assert_eq!(log.len(), 1);
    }
}

#[test]
fn extension_cap_ends_with_protocol_timeout() -> anyhow::Result<()> {
    let bus = SharedTransport::new();
    for _ in 0..3 {
        bus.push_response(fixtures::wtx_request_fwt1());
    }
    let log = RecordingListener::new();
    let mut drv = DriverBuilder::new()
        .with_transport(Box::new(bus.clone()))
        .with_listener(log.clone())
        .max_wtx(2)
        .build()?;

    assert_eq!(
        drv.select_cc_file(),
        Err(Error::ProtocolTimeout { extensions: 2 })
    );
    // Two acks, none for the third request.
    assert_eq!(bus.sent().len(), 3);
    assert_eq!(log.len(), 1);
    assert!(drv.is_idle());
    Ok(())
}

#[test]
fn corrupted_extension_request() -> anyhow::Result<()> {
    let mut wtx = fixtures::wtx_request_fwt1();
    wtx[2] ^= 0x10;
    let (mut drv, bus, _log) = driver_with(CommunicationMode::Sync, vec![wtx])?;
    assert!(matches!(
        drv.send_interrupt(),
        Err(Error::CrcMismatch { .. })
    ));
    assert_eq!(bus.sent().len(), 1);
    Ok(())
}
