// m24sr/src/driver/session.rs

use crate::constants::{
    CRC_LEN, DESELECT_RESPONSE_LEN, MAX_FRAME_LEN, STATUS_LEN, STATUS_RESPONSE_LEN,
};
use crate::driver::listener::Completion;
use crate::protocol::{BlockNumber, Command, CommandDescriptor, FieldMask, Frame};
use crate::types::{FileId, PasswordType};
use crate::{Error, Result};

/// Owned copy of the parameters of the command in flight. Borrowed
/// arguments (update payload) are copied so the caller's buffers are free
/// once the request is on the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingCommand {
    Deselect,
    SelectApplication,
    SelectCcFile,
    SelectSystemFile,
    SelectNdefFile(FileId),
    ReadBinary {
        offset: u16,
        length: u8,
        proprietary: bool,
    },
    UpdateBinary {
        offset: u16,
        data: Vec<u8>,
    },
    Verify(PasswordType),
    ChangeReferenceData(PasswordType),
    EnableVerificationRequirement(PasswordType),
    DisableVerificationRequirement(PasswordType),
    EnablePermanentState(PasswordType),
    DisablePermanentState(PasswordType),
    SendInterrupt,
    StateControl {
        reset: bool,
    },
}

impl From<&Command<'_>> for PendingCommand {
    fn from(cmd: &Command<'_>) -> Self {
        match *cmd {
            Command::SelectApplication => Self::SelectApplication,
            Command::SelectCcFile => Self::SelectCcFile,
            Command::SelectSystemFile => Self::SelectSystemFile,
            Command::SelectNdefFile(file) => Self::SelectNdefFile(file),
            Command::ReadBinary { offset, length } => Self::ReadBinary {
                offset,
                length,
                proprietary: false,
            },
            Command::StReadBinary { offset, length } => Self::ReadBinary {
                offset,
                length,
                proprietary: true,
            },
            Command::UpdateBinary { offset, data } => Self::UpdateBinary {
                offset,
                data: data.to_vec(),
            },
            Command::Verify { password, .. } => Self::Verify(password),
            Command::ChangeReferenceData { password, .. } => Self::ChangeReferenceData(password),
            Command::EnableVerificationRequirement(p) => Self::EnableVerificationRequirement(p),
            Command::DisableVerificationRequirement(p) => Self::DisableVerificationRequirement(p),
            Command::EnablePermanentState(p) => Self::EnablePermanentState(p),
            Command::DisablePermanentState(p) => Self::DisablePermanentState(p),
            Command::SendInterrupt => Self::SendInterrupt,
            Command::StateControl { reset } => Self::StateControl { reset },
        }
    }
}

impl PendingCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deselect => "deselect",
            Self::SelectApplication => "select application",
            Self::SelectCcFile => "select cc file",
            Self::SelectSystemFile => "select system file",
            Self::SelectNdefFile(_) => "select ndef file",
            Self::ReadBinary { proprietary, .. } if *proprietary => "st read binary",
            Self::ReadBinary { .. } => "read binary",
            Self::UpdateBinary { .. } => "update binary",
            Self::Verify(_) => "verify",
            Self::ChangeReferenceData(_) => "change reference data",
            Self::EnableVerificationRequirement(_) => "enable verification requirement",
            Self::DisableVerificationRequirement(_) => "disable verification requirement",
            Self::EnablePermanentState(_) => "enable permanent state",
            Self::DisablePermanentState(_) => "disable permanent state",
            Self::SendInterrupt => "send interrupt",
            Self::StateControl { .. } => "state control",
        }
    }

    /// Bytes to read for the answer: PCB, optional DID, payload, status and
    /// CRC. A shorter S-block answer is read within the same window.
    pub fn response_len(&self, has_did: bool) -> usize {
        let did = usize::from(has_did);
        match self {
            Self::Deselect => DESELECT_RESPONSE_LEN,
            Self::ReadBinary { length, .. } => {
                1 + did + *length as usize + STATUS_LEN + CRC_LEN
            }
            _ => STATUS_RESPONSE_LEN + did,
        }
    }

    /// Payload length a successful answer must carry, for reads.
    pub fn expected_payload(&self) -> Option<usize> {
        match self {
            Self::ReadBinary { length, .. } => Some(*length as usize),
            _ => None,
        }
    }

    /// Pair the recorded parameters with the outcome.
    pub fn into_completion(self, outcome: Result<Vec<u8>>) -> Completion {
        let result = outcome.as_ref().map(|_| ()).map_err(|e| e.clone());
        match self {
            Self::Deselect => Completion::Deselected { result },
            Self::SelectApplication => Completion::ApplicationSelected { result },
            Self::SelectCcFile => Completion::CcFileSelected { result },
            Self::SelectSystemFile => Completion::SystemFileSelected { result },
            Self::SelectNdefFile(file) => Completion::NdefFileSelected { file, result },
            Self::ReadBinary {
                offset,
                length,
                proprietary,
            } => Completion::BinaryRead {
                offset,
                length,
                proprietary,
                result: outcome,
            },
            Self::UpdateBinary { offset, data } => Completion::BinaryUpdated {
                offset,
                data,
                result,
            },
            Self::Verify(password) => Completion::Verified { password, result },
            Self::ChangeReferenceData(password) => {
                Completion::ReferenceDataChanged { password, result }
            }
            Self::EnableVerificationRequirement(password) => {
                Completion::VerificationRequirementEnabled { password, result }
            }
            Self::DisableVerificationRequirement(password) => {
                Completion::VerificationRequirementDisabled { password, result }
            }
            Self::EnablePermanentState(password) => {
                Completion::PermanentStateEnabled { password, result }
            }
            Self::DisablePermanentState(password) => {
                Completion::PermanentStateDisabled { password, result }
            }
            Self::SendInterrupt => Completion::InterruptSent { result },
            Self::StateControl { reset } => Completion::StateControlled { reset, result },
        }
    }
}

/// Where the command state machine stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A request is on the bus and its answer has not been consumed yet.
    AwaitingResponse(PendingCommand),
}

/// Per-link protocol state: the in-flight command, the alternating block
/// number and the scratch buffer frames are built in.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    block: BlockNumber,
    buffer: Vec<u8>,
    extensions: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            block: BlockNumber::new(),
            buffer: Vec::with_capacity(MAX_FRAME_LEN),
            extensions: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    pub fn pending(&self) -> Option<&PendingCommand> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::AwaitingResponse(p) => Some(p),
        }
    }

    pub fn ensure_idle(&self) -> Result<()> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(Error::Busy)
        }
    }

    pub fn block_number(&self) -> BlockNumber {
        self.block
    }

    /// Build an I-block into the scratch buffer.
    pub fn build_frame(
        &mut self,
        mask: FieldMask,
        cmd: &CommandDescriptor<'_>,
        device_id: Option<u8>,
    ) -> Result<()> {
        Frame::encode_into(mask, cmd, device_id, &mut self.block, &mut self.buffer)
    }

    /// Put a pre-built frame (S-block, raw session byte) into the buffer.
    pub fn load_frame(&mut self, bytes: &[u8]) {
        self.buffer.clear();
        self.buffer.extend_from_slice(bytes);
    }

    pub fn frame(&self) -> &[u8] {
        &self.buffer
    }

    /// Record the command as in flight. Fails with [`Error::Busy`] if one
    /// already is, leaving it untouched.
    pub fn begin(&mut self, pending: PendingCommand) -> Result<()> {
        self.ensure_idle()?;
        self.extensions = 0;
        self.state = SessionState::AwaitingResponse(pending);
        Ok(())
    }

    /// Take the in-flight command out, returning to `Idle`.
    pub fn take(&mut self) -> Option<PendingCommand> {
        match std::mem::take(&mut self.state) {
            SessionState::Idle => None,
            SessionState::AwaitingResponse(p) => Some(p),
        }
    }

    /// Put a command back after a wait time extension.
    pub fn restore(&mut self, pending: PendingCommand) {
        self.state = SessionState::AwaitingResponse(pending);
    }

    pub fn extensions(&self) -> usize {
        self.extensions
    }

    pub fn note_extension(&mut self) -> usize {
        self.extensions += 1;
        self.extensions
    }
}
