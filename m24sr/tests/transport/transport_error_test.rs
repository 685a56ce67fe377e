#[path = "../common/mod.rs"]
mod common;

use common::driver_with;
use m24sr::driver::Completion;
use m24sr::{CommunicationMode, Error, TransportError};

#[test]
fn send_failure_aborts_with_one_completion() -> anyhow::Result<()> {
    let (mut drv, bus, log) = driver_with(CommunicationMode::Sync, vec![])?;
    bus.with_mock(|m| m.set_send_failures(1));

    assert_eq!(
        drv.select_application(),
        Err(Error::Transport(TransportError::Nack))
    );
    assert_eq!(
        log.completions(),
        vec![Completion::ApplicationSelected {
            result: Err(Error::Transport(TransportError::Nack)),
        }]
    );
    assert!(drv.is_idle());
    assert!(bus.sent().is_empty());
    Ok(())
}

#[test]
fn send_failure_in_async_mode_is_immediate() -> anyhow::Result<()> {
    let (mut drv, bus, log) = driver_with(CommunicationMode::Async, vec![])?;
    bus.with_mock(|m| m.set_send_failures(1));
    assert!(drv.send_interrupt().is_err());
    assert_eq!(log.len(), 1);
    assert!(drv.handle_event().is_none());
    Ok(())
}

#[test]
fn poll_failure_aborts_pending_command() -> anyhow::Result<()> {
    let (mut drv, bus, log) = driver_with(CommunicationMode::Sync, vec![])?;
    bus.with_mock(|m| m.set_poll_failures(1));
    assert_eq!(
        drv.deselect(),
        Err(Error::Transport(TransportError::Timeout))
    );
    assert_eq!(
        log.last(),
        Some(Completion::Deselected {
            result: Err(Error::Transport(TransportError::Timeout)),
        })
    );
    assert!(drv.is_idle());
    Ok(())
}

#[test]
fn missing_answer_times_out() -> anyhow::Result<()> {
    let (mut drv, _bus, log) = driver_with(CommunicationMode::Sync, vec![])?;
    let err = drv.read_binary(0, 4).unwrap_err();
    assert_eq!(err, Error::Transport(TransportError::Timeout));
    assert!(err.is_link_error());
    assert_eq!(log.len(), 1);
    Ok(())
}

#[test]
fn session_open_failure_is_reported() -> anyhow::Result<()> {
    let (mut drv, bus, log) = driver_with(CommunicationMode::Sync, vec![])?;
    bus.with_mock(|m| m.set_poll_failures(1));
    assert!(drv.get_session().is_err());
    assert_eq!(
        log.last(),
        Some(Completion::SessionOpened {
            kill_rf: false,
            result: Err(Error::Transport(TransportError::Timeout)),
        })
    );
    Ok(())
}
