// m24sr/src/protocol/commands/security.rs

use crate::constants::{
    CLA_DEFAULT, CLA_ST, INS_CHANGE_REFERENCE_DATA, INS_DISABLE, INS_ENABLE, INS_VERIFY,
    PASSWORD_LEN,
};
use crate::protocol::apdu::CommandDescriptor;
use crate::types::{Password, PasswordType};
use crate::{Error, Result};

fn require_ndef_access(password: PasswordType) -> Result<()> {
    if !password.is_ndef_access() {
        return Err(Error::InvalidParameter(format!(
            "{} cannot protect the ndef file",
            password
        )));
    }
    Ok(())
}

/// VERIFY. Without a password the chip only reports whether one is needed.
pub fn verify(kind: PasswordType, password: Option<&Password>) -> CommandDescriptor<'_> {
    let cmd = CommandDescriptor::new(CLA_DEFAULT, INS_VERIFY, kind.as_u16());
    match password {
        Some(p) => CommandDescriptor {
            lc: PASSWORD_LEN as u8,
            data: Some(p.as_bytes()),
            ..cmd
        },
        None => cmd,
    }
}

/// CHANGE REFERENCE DATA: replace the password in slot `kind`.
pub fn change_reference_data(kind: PasswordType, password: &Password) -> CommandDescriptor<'_> {
    CommandDescriptor {
        lc: PASSWORD_LEN as u8,
        data: Some(password.as_bytes()),
        ..CommandDescriptor::new(CLA_DEFAULT, INS_CHANGE_REFERENCE_DATA, kind.as_u16())
    }
}

/// ENABLE / DISABLE VERIFICATION REQUIREMENT (standard class), or the
/// permanent-state variants (proprietary class).
pub fn verification_requirement(
    kind: PasswordType,
    enable: bool,
    permanent: bool,
) -> Result<CommandDescriptor<'static>> {
    require_ndef_access(kind)?;
    let cla = if permanent { CLA_ST } else { CLA_DEFAULT };
    let ins = if enable { INS_ENABLE } else { INS_DISABLE };
    Ok(CommandDescriptor::new(cla, ins, kind.as_u16()))
}
