// m24sr/src/protocol/commands/binary.rs

use crate::constants::{CLA_DEFAULT, CLA_ST, INS_READ_BINARY, INS_UPDATE_BINARY, MAX_OPERATION_SIZE};
use crate::protocol::apdu::CommandDescriptor;
use crate::{Error, Result};

fn check_length(length: usize) -> Result<()> {
    if length > MAX_OPERATION_SIZE {
        return Err(Error::InvalidLength {
            expected: MAX_OPERATION_SIZE,
            actual: length,
        });
    }
    Ok(())
}

/// READ BINARY of `length` bytes at `offset` in the selected file. The
/// proprietary class reads without the NDEF length check.
pub fn read_binary(offset: u16, length: u8, proprietary: bool) -> Result<CommandDescriptor<'static>> {
    check_length(length as usize)?;
    let cla = if proprietary { CLA_ST } else { CLA_DEFAULT };
    Ok(CommandDescriptor::new(cla, INS_READ_BINARY, offset).with_le(length))
}

/// UPDATE BINARY of `data` at `offset` in the selected file.
pub fn update_binary(offset: u16, data: &[u8]) -> Result<CommandDescriptor<'_>> {
    check_length(data.len())?;
    CommandDescriptor::new(CLA_DEFAULT, INS_UPDATE_BINARY, offset).with_data(data)
}
