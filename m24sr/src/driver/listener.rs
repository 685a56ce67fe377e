// m24sr/src/driver/listener.rs

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{FileId, PasswordType};
use crate::{Error, Result};

/// Final outcome of one issued command, together with the parameters it was
/// issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// GetSession (`kill_rf == false`) or KillRFSession.
    SessionOpened {
        kill_rf: bool,
        result: Result<()>,
    },
    Deselected {
        result: Result<()>,
    },
    ApplicationSelected {
        result: Result<()>,
    },
    CcFileSelected {
        result: Result<()>,
    },
    SystemFileSelected {
        result: Result<()>,
    },
    NdefFileSelected {
        file: FileId,
        result: Result<()>,
    },
    /// The payload on success, without PCB, status word or CRC.
    BinaryRead {
        offset: u16,
        length: u8,
        proprietary: bool,
        result: Result<Vec<u8>>,
    },
    BinaryUpdated {
        offset: u16,
        data: Vec<u8>,
        result: Result<()>,
    },
    Verified {
        password: PasswordType,
        result: Result<()>,
    },
    ReferenceDataChanged {
        password: PasswordType,
        result: Result<()>,
    },
    VerificationRequirementEnabled {
        password: PasswordType,
        result: Result<()>,
    },
    VerificationRequirementDisabled {
        password: PasswordType,
        result: Result<()>,
    },
    PermanentStateEnabled {
        password: PasswordType,
        result: Result<()>,
    },
    PermanentStateDisabled {
        password: PasswordType,
        result: Result<()>,
    },
    InterruptSent {
        result: Result<()>,
    },
    StateControlled {
        reset: bool,
        result: Result<()>,
    },
}

impl Completion {
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::BinaryRead { result, .. } => result.as_ref().err(),
            Self::SessionOpened { result, .. }
            | Self::Deselected { result }
            | Self::ApplicationSelected { result }
            | Self::CcFileSelected { result }
            | Self::SystemFileSelected { result }
            | Self::NdefFileSelected { result, .. }
            | Self::BinaryUpdated { result, .. }
            | Self::Verified { result, .. }
            | Self::ReferenceDataChanged { result, .. }
            | Self::VerificationRequirementEnabled { result, .. }
            | Self::VerificationRequirementDisabled { result, .. }
            | Self::PermanentStateEnabled { result, .. }
            | Self::PermanentStateDisabled { result, .. }
            | Self::InterruptSent { result }
            | Self::StateControlled { result, .. } => result.as_ref().err(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error().is_none()
    }

    /// Read payload for [`Completion::BinaryRead`], an empty vector for
    /// every other successful command.
    pub fn into_result(self) -> Result<Vec<u8>> {
        match self {
            Self::BinaryRead { result, .. } => result,
            other => match other.error() {
                Some(e) => Err(e.clone()),
                None => Ok(Vec::new()),
            },
        }
    }
}

/// Receives exactly one [`Completion`] per issued command.
pub trait Listener {
    fn on_completion(&mut self, completion: &Completion);
}

impl<F> Listener for F
where
    F: FnMut(&Completion),
{
    fn on_completion(&mut self, completion: &Completion) {
        self(completion)
    }
}

/// Listener that ignores every completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl Listener for NoopListener {
    fn on_completion(&mut self, _completion: &Completion) {}
}

/// Listener that stores completions; clones share the same log so a test
/// can keep one while the driver owns the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    log: Rc<RefCell<Vec<Completion>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completions(&self) -> Vec<Completion> {
        self.log.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    pub fn last(&self) -> Option<Completion> {
        self.log.borrow().last().cloned()
    }
}

impl Listener for RecordingListener {
    fn on_completion(&mut self, completion: &Completion) {
        self.log.borrow_mut().push(completion.clone());
    }
}
