// m24sr/src/protocol/commands/mod.rs

pub mod binary;
pub mod gpo;
pub mod security;
pub mod select;

pub use binary::{read_binary, update_binary};
pub use gpo::{merge_gpo_byte, send_interrupt, state_control};
pub use security::{change_reference_data, verification_requirement, verify};
pub use select::{select_application, select_file};

use crate::protocol::apdu::CommandDescriptor;
use crate::protocol::mask::FieldMask;
use crate::types::{FileId, Password, PasswordType};
use crate::Result;

/// Every framed command the chip understands. New commands should be added
/// here and their descriptor builder placed in `protocol::commands::<group>.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    SelectApplication,
    SelectCcFile,
    SelectSystemFile,
    SelectNdefFile(FileId),
    ReadBinary {
        offset: u16,
        length: u8,
    },
    /// READ BINARY with the proprietary class byte.
    StReadBinary {
        offset: u16,
        length: u8,
    },
    UpdateBinary {
        offset: u16,
        data: &'a [u8],
    },
    Verify {
        password: PasswordType,
        value: Option<&'a Password>,
    },
    ChangeReferenceData {
        password: PasswordType,
        value: &'a Password,
    },
    EnableVerificationRequirement(PasswordType),
    DisableVerificationRequirement(PasswordType),
    EnablePermanentState(PasswordType),
    DisablePermanentState(PasswordType),
    SendInterrupt,
    StateControl {
        reset: bool,
    },
}

impl<'a> Command<'a> {
    /// Fields present in the I-block of this command (without DID).
    pub fn mask(&self) -> FieldMask {
        match self {
            Self::SelectApplication => FieldMask::SELECT_APPLICATION,
            Self::SelectCcFile => FieldMask::SELECT_CC_FILE,
            Self::SelectSystemFile => FieldMask::SELECT_SYSTEM_FILE,
            Self::SelectNdefFile(_) => FieldMask::SELECT_NDEF_FILE,
            Self::ReadBinary { .. } | Self::StReadBinary { .. } => FieldMask::READ_BINARY,
            Self::UpdateBinary { .. } => FieldMask::UPDATE_BINARY,
            Self::Verify { value: None, .. } => FieldMask::VERIFY_WITHOUT_PASSWORD,
            Self::Verify { value: Some(_), .. } => FieldMask::VERIFY_WITH_PASSWORD,
            Self::ChangeReferenceData { .. } => FieldMask::CHANGE_REFERENCE_DATA,
            Self::EnableVerificationRequirement(_) | Self::EnablePermanentState(_) => {
                FieldMask::ENABLE_VERIFICATION_REQUIREMENT
            }
            Self::DisableVerificationRequirement(_) | Self::DisablePermanentState(_) => {
                FieldMask::DISABLE_VERIFICATION_REQUIREMENT
            }
            Self::SendInterrupt => FieldMask::SEND_INTERRUPT,
            Self::StateControl { .. } => FieldMask::GPO_STATE,
        }
    }

    /// Build the APDU fields. Precondition violations are reported here,
    /// before anything reaches the bus.
    pub fn descriptor(&self) -> Result<CommandDescriptor<'_>> {
        let d = match self {
            Self::SelectApplication => select_application(),
            Self::SelectCcFile => select_file(&FileId::CAPABILITY_CONTAINER),
            Self::SelectSystemFile => select_file(&FileId::SYSTEM),
            Self::SelectNdefFile(file) => select_file(file),
            Self::ReadBinary { offset, length } => read_binary(*offset, *length, false)?,
            Self::StReadBinary { offset, length } => read_binary(*offset, *length, true)?,
            Self::UpdateBinary { offset, data } => update_binary(*offset, data)?,
            Self::Verify { password, value } => verify(*password, *value),
            Self::ChangeReferenceData { password, value } => {
                change_reference_data(*password, value)
            }
            Self::EnableVerificationRequirement(p) => verification_requirement(*p, true, false)?,
            Self::DisableVerificationRequirement(p) => {
                verification_requirement(*p, false, false)?
            }
            Self::EnablePermanentState(p) => verification_requirement(*p, true, true)?,
            Self::DisablePermanentState(p) => verification_requirement(*p, false, true)?,
            Self::SendInterrupt => send_interrupt(),
            Self::StateControl { reset } => state_control(*reset),
        };
        Ok(d)
    }
}
