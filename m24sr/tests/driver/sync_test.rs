#[path = "../common/mod.rs"]
mod common;

use common::{driver_with, fixtures};
use m24sr::driver::Completion;
use m24sr::test_support::{data_response, deselect_ack, status_response};
use m24sr::{CommunicationMode, Dispatch, Error, FileId, Password, PasswordType, StatusWord};

#[test]
fn read_binary_returns_payload() -> anyhow::Result<()> {
    let data = fixtures::ndef_bytes();
    let (mut drv, bus, log) = driver_with(
        CommunicationMode::Sync,
        vec![data_response(0x02, &data, 0x9000)],
    )?;

    let out = drv.read_binary(0x0000, 16)?;
    assert_eq!(out, Dispatch::Completed(data.clone()));
    assert_eq!(bus.sent(), vec![fixtures::read_16_request()]);
    assert_eq!(
        log.completions(),
        vec![Completion::BinaryRead {
            offset: 0,
            length: 16,
            proprietary: false,
            result: Ok(data),
        }]
    );
    Ok(())
}

#[test]
fn verify_with_default_password() -> anyhow::Result<()> {
    let (mut drv, bus, log) = driver_with(CommunicationMode::Sync, vec![fixtures::ok_response()])?;
    drv.verify(PasswordType::Read, Some(&Password::DEFAULT))?;
    assert_eq!(bus.last_sent(), Some(fixtures::verify_read_default_request()));
    assert_eq!(
        log.last(),
        Some(Completion::Verified {
            password: PasswordType::Read,
            result: Ok(()),
        })
    );
    Ok(())
}

#[test]
fn chip_status_is_reported_once() -> anyhow::Result<()> {
    let (mut drv, _bus, log) = driver_with(
        CommunicationMode::Sync,
        vec![fixtures::file_not_found_response()],
    )?;
    let err = drv.select_ndef_file(FileId::new(0x0005)).unwrap_err();
    assert_eq!(err, Error::ChipStatus(StatusWord::FILE_NOT_FOUND));
    assert_eq!(log.len(), 1);
    assert!(matches!(
        log.last(),
        Some(Completion::NdefFileSelected { file, result: Err(_) }) if file == FileId::new(0x0005)
    ));
    assert!(drv.is_idle());
    Ok(())
}

#[test]
fn corrupted_answer_fails_with_crc_mismatch() -> anyhow::Result<()> {
    let mut answer = data_response(0x02, &fixtures::ndef_bytes(), 0x9000);
    let last = answer.len() - 1;
    answer[last] ^= 0x01;
    let (mut drv, _bus, log) = driver_with(CommunicationMode::Sync, vec![answer])?;

    let mut buf = [0xEEu8; 16];
    let err = drv.read_binary_into(0, &mut buf).unwrap_err();
    assert!(matches!(err, Error::CrcMismatch { .. }));
    // Caller's buffer untouched on failure.
    assert_eq!(buf, [0xEE; 16]);
    assert_eq!(log.len(), 1);
    Ok(())
}

#[test]
fn short_error_answer_to_a_read() -> anyhow::Result<()> {
    let (mut drv, _bus, _log) = driver_with(
        CommunicationMode::Sync,
        vec![status_response(0x02, 0x6982)],
    )?;
    assert_eq!(
        drv.read_binary(0, 16),
        Err(Error::ChipStatus(StatusWord::SECURITY_NOT_SATISFIED))
    );
    Ok(())
}

#[test]
fn full_session_sequence() -> anyhow::Result<()> {
    let cc = [0x00, 0x0F, 0x20, 0x00, 0xF6, 0x00, 0xF6];
    let (mut drv, bus, log) = driver_with(
        CommunicationMode::Sync,
        vec![
            status_response(0x02, 0x9000),
            status_response(0x03, 0x9000),
            data_response(0x02, &cc, 0x9000),
            deselect_ack(),
        ],
    )?;

    drv.get_session()?;
    drv.select_application()?;
    drv.select_cc_file()?;
    assert_eq!(drv.read_binary(0, 7)?.completed(), Some(cc.to_vec()));
    drv.deselect()?;

    let sent = bus.sent();
    assert_eq!(sent.len(), 5);
    assert_eq!(sent[0], vec![0x26]);
    assert_eq!(sent[1][0], 0x02);
    assert_eq!(sent[2][0], 0x03);
    assert_eq!(sent[3][0], 0x02);
    assert_eq!(sent[4], vec![0xC2, 0xE0, 0xB4]);
    assert_eq!(log.len(), 5);
    assert!(log.completions().iter().all(Completion::is_success));
    Ok(())
}

#[test]
fn update_binary_over_limit_is_rejected_without_traffic() -> anyhow::Result<()> {
    let (mut drv, bus, log) = driver_with(CommunicationMode::Sync, vec![])?;
    let data = vec![0u8; 247];
    assert!(matches!(
        drv.update_binary(0, &data),
        Err(Error::InvalidLength {
            expected: 246,
            actual: 247
        })
    ));
    assert!(bus.sent().is_empty());
    assert_eq!(log.len(), 1);
    Ok(())
}

#[test]
fn unexpected_answer_to_deselect() -> anyhow::Result<()> {
    let (mut drv, _bus, _log) = driver_with(CommunicationMode::Sync, vec![fixtures::ok_response()])?;
    assert_eq!(drv.deselect(), Err(Error::UnexpectedBlock(0x02)));
    assert!(drv.is_idle());
    Ok(())
}

#[test]
fn supervisory_answer_to_a_command_is_unexpected() -> anyhow::Result<()> {
    let (mut drv, _bus, log) = driver_with(CommunicationMode::Sync, vec![deselect_ack()])?;
    assert_eq!(drv.select_application(), Err(Error::UnexpectedBlock(0xC2)));
    assert!(matches!(
        log.last(),
        Some(Completion::ApplicationSelected { result: Err(Error::UnexpectedBlock(0xC2)) })
    ));
    assert!(drv.is_idle());
    Ok(())
}
