#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use m24sr::protocol::response::{self, ResponseWindow};
use m24sr::protocol::{classify, BlockKind, SupervisoryKind};
use m24sr::test_support::{data_response, deselect_ack};
use m24sr::{Error, StatusWord};

#[test]
fn success_status_response() {
    let v = response::validate(&fixtures::ok_response()).unwrap();
    assert!(v.status.is_success());
    assert_eq!(v.window, ResponseWindow::Full);
}

#[test]
fn application_status_is_reported_not_masked() {
    let v = response::validate(&fixtures::file_not_found_response()).unwrap();
    assert_eq!(v.status, StatusWord::FILE_NOT_FOUND);
    assert_eq!(
        v.status.into_result(),
        Err(Error::ChipStatus(StatusWord::FILE_NOT_FOUND))
    );
}

#[test]
fn data_payload_is_extracted() {
    let data = fixtures::ndef_bytes();
    let f = data_response(0x02, &data, 0x9000);
    let v = response::validate(&f).unwrap();
    assert_eq!(response::payload(&f, &v, false).unwrap(), &data[..]);
}

#[test]
fn device_id_shifts_payload() {
    let f = fixtures::ok_response_did();
    let v = response::validate(&f).unwrap();
    assert!(v.status.is_success());
    assert!(response::payload(&f, &v, true).unwrap().is_empty());
}

#[test]
fn short_status_inside_longer_window() {
    // A bare error status read into a 21-byte window.
    let mut f = fixtures::file_not_found_response();
    f.resize(21, 0xFF);
    let v = response::validate(&f).unwrap();
    assert_eq!(v.window, ResponseWindow::Short);
    assert_eq!(v.status, StatusWord::FILE_NOT_FOUND);
    assert!(response::payload(&f, &v, false).unwrap().is_empty());
}

#[test]
fn corrupted_crc_is_a_link_error() {
    let mut f = data_response(0x02, &fixtures::ndef_bytes(), 0x9000);
    let last = f.len() - 1;
    f[last] ^= 0x01;
    let err = response::validate(&f).unwrap_err();
    assert!(matches!(err, Error::CrcMismatch { .. }));
    assert!(err.is_link_error());
}

#[test]
fn wtx_request_is_classified_then_validated() {
    let f = fixtures::wtx_request_fwt1();
    assert_eq!(
        classify(&f).unwrap(),
        BlockKind::Supervisory(SupervisoryKind::WaitTimeExtension(0x01))
    );
    assert_eq!(response::validate_wtx(&f).unwrap(), 0x01);

    let mut bad = f.clone();
    bad[3] ^= 0xFF;
    assert!(matches!(
        response::validate_wtx(&bad),
        Err(Error::CrcMismatch { .. })
    ));
}

#[test]
fn deselect_ack_window() {
    let ack = deselect_ack();
    assert_eq!(ack, vec![0xC2, 0xE0, 0xB4]);
    response::validate_deselect(&ack).unwrap();
    assert!(response::validate_deselect(&[0xC2, 0xE0]).is_err());
}

#[test]
fn too_short_response() {
    assert!(matches!(
        response::validate(&[0x02, 0x90, 0x00]),
        Err(Error::InvalidLength { .. })
    ));
}
