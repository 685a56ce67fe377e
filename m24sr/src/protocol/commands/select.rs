// m24sr/src/protocol/commands/select.rs

use crate::constants::{
    CLA_DEFAULT, INS_SELECT_FILE, NDEF_APPLICATION_ID, P1P2_SELECT_APPLICATION, P1P2_SELECT_FILE,
};
use crate::protocol::apdu::CommandDescriptor;
use crate::types::FileId;

/// SELECT of the NDEF Tag Application (AID D2760000850101, LE 00).
pub fn select_application() -> CommandDescriptor<'static> {
    CommandDescriptor {
        lc: NDEF_APPLICATION_ID.len() as u8,
        data: Some(&NDEF_APPLICATION_ID),
        ..CommandDescriptor::new(CLA_DEFAULT, INS_SELECT_FILE, P1P2_SELECT_APPLICATION)
    }
}

/// SELECT of an elementary file by identifier.
pub fn select_file(file: &FileId) -> CommandDescriptor<'_> {
    CommandDescriptor {
        lc: 2,
        data: Some(file.as_bytes()),
        ..CommandDescriptor::new(CLA_DEFAULT, INS_SELECT_FILE, P1P2_SELECT_FILE)
    }
}
