#[path = "../common/mod.rs"]
mod common;

use common::{driver_with_did, fixtures};
use m24sr::protocol::crc;
use m24sr::Error;

#[test]
fn device_id_is_framed_into_requests() -> anyhow::Result<()> {
    let (mut drv, bus, _log) = driver_with_did(0x01, vec![fixtures::ok_response_did()])?;
    drv.select_application()?;
    assert_eq!(bus.sent(), vec![fixtures::select_application_request_did()]);
    Ok(())
}

#[test]
fn device_id_read_payload() -> anyhow::Result<()> {
    let mut answer = vec![0x0A, 0x01, 0xAA, 0xBB, 0x90, 0x00];
    crc::append(&mut answer);
    let (mut drv, bus, _log) = driver_with_did(0x01, vec![answer])?;
    let data = drv.read_binary(0x0010, 2)?.completed();
    assert_eq!(data, Some(vec![0xAA, 0xBB]));
    let sent = bus.sent();
    assert_eq!(&sent[0][..2], &[0x0A, 0x01]);
    assert_eq!(&sent[0][2..7], &[0x00, 0xB0, 0x00, 0x10, 0x02]);
    Ok(())
}

#[test]
fn device_id_does_not_alter_session_bytes() -> anyhow::Result<()> {
    let (mut drv, bus, _log) = driver_with_did(0x05, vec![])?;
    drv.kill_rf_session()?;
    assert_eq!(bus.sent(), vec![vec![0x52]]);
    Ok(())
}

#[test]
fn answer_without_device_id_is_too_short_for_data() -> anyhow::Result<()> {
    let mut answer = vec![0x02, 0xAA, 0xBB, 0x90, 0x00];
    crc::append(&mut answer);
    let (mut drv, _bus, _log) = driver_with_did(0x01, vec![answer])?;
    assert!(matches!(
        drv.read_binary(0, 2),
        Err(Error::InvalidLength {
            expected: 2,
            actual: 1
        })
    ));
    Ok(())
}

#[test]
fn wait_time_extension_with_device_id() -> anyhow::Result<()> {
    let mut wtx = vec![0xFA, 0x01, 0x05];
    crc::append(&mut wtx);
    let (mut drv, bus, log) = driver_with_did(0x01, vec![wtx, fixtures::ok_response_did()])?;

    drv.select_cc_file()?;

    let sent = bus.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(&sent[1][..3], &[0xFA, 0x01, 0x05]);
    assert!(crc::is_intact(&sent[1]));
    assert_eq!(sent[1].len(), 5);
    assert_eq!(log.len(), 1);
    Ok(())
}
