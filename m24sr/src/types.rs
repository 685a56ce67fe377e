// m24sr/src/types.rs

use std::fmt;

use derive_more::{Display, From};

use crate::Error;
use crate::constants::{PASSWORD_LEN, STATUS_SUCCESS};

/// Two-byte completion status (SW1 SW2) reported by the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusWord(u16);

impl StatusWord {
    pub const SUCCESS: Self = Self(STATUS_SUCCESS);
    pub const FILE_OVERFLOW: Self = Self(0x6280);
    pub const END_OF_FILE: Self = Self(0x6282);
    pub const PASSWORD_REQUIRED: Self = Self(0x6300);
    pub const UPDATE_FAILED: Self = Self(0x6581);
    pub const WRONG_LENGTH: Self = Self(0x6700);
    pub const COMMAND_INCOMPATIBLE: Self = Self(0x6981);
    pub const SECURITY_NOT_SATISFIED: Self = Self(0x6982);
    pub const REFERENCE_DATA_UNUSABLE: Self = Self(0x6984);
    pub const INCORRECT_DATA: Self = Self(0x6A80);
    pub const FILE_NOT_FOUND: Self = Self(0x6A82);
    pub const INCORRECT_P1P2: Self = Self(0x6A86);
    pub const INS_NOT_SUPPORTED: Self = Self(0x6D00);
    pub const CLASS_NOT_SUPPORTED: Self = Self(0x6E00);

    pub const fn new(sw: u16) -> Self {
        Self(sw)
    }

    pub fn from_bytes(sw1: u8, sw2: u8) -> Self {
        Self(u16::from_be_bytes([sw1, sw2]))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn sw1(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn sw2(&self) -> u8 {
        self.0 as u8
    }

    pub fn is_success(&self) -> bool {
        self.0 == STATUS_SUCCESS
    }

    /// Remaining password attempts for a `63Cx` answer to VERIFY.
    pub fn remaining_attempts(&self) -> Option<u8> {
        if self.sw1() == 0x63 && self.sw2() & 0xF0 == 0xC0 {
            Some(self.sw2() & 0x0F)
        } else {
            None
        }
    }

    /// Success maps to `Ok`, anything else to [`Error::ChipStatus`].
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(Error::ChipStatus(self))
        }
    }

    fn describe(&self) -> Option<&'static str> {
        let text = match *self {
            Self::SUCCESS => "success",
            Self::FILE_OVERFLOW => "file overflow",
            Self::END_OF_FILE => "end of file reached",
            Self::PASSWORD_REQUIRED => "password required",
            Self::UPDATE_FAILED => "update failed",
            Self::WRONG_LENGTH => "wrong length",
            Self::COMMAND_INCOMPATIBLE => "command incompatible with file structure",
            Self::SECURITY_NOT_SATISFIED => "security status not satisfied",
            Self::REFERENCE_DATA_UNUSABLE => "reference data not usable",
            Self::INCORRECT_DATA => "incorrect parameters in data field",
            Self::FILE_NOT_FOUND => "file not found",
            Self::INCORRECT_P1P2 => "incorrect p1 or p2",
            Self::INS_NOT_SUPPORTED => "instruction not supported",
            Self::CLASS_NOT_SUPPORTED => "class not supported",
            _ if self.remaining_attempts().is_some() => "password incorrect",
            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.describe() {
            Some(text) => write!(f, "{:04x} ({})", self.0, text),
            None => write!(f, "{:04x}", self.0),
        }
    }
}

/// Elementary file identifier used by SELECT FILE, kept in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId([u8; 2]);

impl FileId {
    pub const SYSTEM: Self = Self::new(0xE101);
    pub const CAPABILITY_CONTAINER: Self = Self::new(0xE103);
    pub const DEFAULT_NDEF: Self = Self::new(0x0001);

    pub const fn new(id: u16) -> Self {
        Self(id.to_be_bytes())
    }

    pub fn as_u16(&self) -> u16 {
        u16::from_be_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

impl From<u16> for FileId {
    fn from(id: u16) -> Self {
        Self::new(id)
    }
}

/// Password slots of the chip. The discriminant is the P1/P2 value sent on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PasswordType {
    #[display(fmt = "read password")]
    Read = 0x0001,
    #[display(fmt = "write password")]
    Write = 0x0002,
    #[display(fmt = "i2c password")]
    I2c = 0x0003,
}

impl PasswordType {
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Only the NDEF read/write passwords can gate access to a file.
    pub fn is_ndef_access(&self) -> bool {
        matches!(self, PasswordType::Read | PasswordType::Write)
    }
}

impl TryFrom<u16> for PasswordType {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x0001 => Ok(Self::Read),
            0x0002 => Ok(Self::Write),
            0x0003 => Ok(Self::I2c),
            other => Err(Error::InvalidParameter(format!(
                "unknown password id {:#06x}",
                other
            ))),
        }
    }
}

/// 128-bit password
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Password([u8; PASSWORD_LEN]);

impl Password {
    /// Factory password, also used to obtain super user rights over I2C.
    pub const DEFAULT: Self = Self([0u8; PASSWORD_LEN]);

    pub fn from_bytes(bytes: [u8; PASSWORD_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PASSWORD_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Password {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; PASSWORD_LEN] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: PASSWORD_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

// Never print secrets into logs.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Configuration of a GPO output line, as stored in the system file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GpoMode {
    #[display(fmt = "high impedance")]
    HighImpedance = 0,
    #[display(fmt = "session opened")]
    SessionOpened = 1,
    #[display(fmt = "write in progress")]
    WriteInProgress = 2,
    #[display(fmt = "answer ready")]
    AnswerReady = 3,
    #[display(fmt = "interrupt")]
    Interrupt = 4,
    #[display(fmt = "state control")]
    StateControl = 5,
}

impl GpoMode {
    pub fn as_nibble(&self) -> u8 {
        *self as u8
    }
}

/// How a command waits for the chip's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommunicationMode {
    /// Poll the bus until the chip answers, then complete inline.
    #[default]
    Sync,
    /// Return after transmission; the caller resumes via `handle_event`.
    Async,
}

/// Outcome of issuing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<T> {
    /// The command completed inline.
    Completed(T),
    /// The request was transmitted; completion arrives through the listener.
    Pending,
}

impl<T> Dispatch<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Dispatch::Pending)
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Dispatch::Completed(v) => Some(v),
            Dispatch::Pending => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Dispatch<U> {
        match self {
            Dispatch::Completed(v) => Dispatch::Completed(f(v)),
            Dispatch::Pending => Dispatch::Pending,
        }
    }
}
