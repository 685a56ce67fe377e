// m24sr/src/prelude.rs

pub use crate::driver::{
    Completion, Driver, DriverBuilder, DriverConfig, Listener, SessionControl,
};
pub use crate::protocol::{BlockKind, Command, FieldMask, Frame};
pub use crate::transport::Transport;
pub use crate::{
    CommunicationMode, Dispatch, Error, FileId, GpoMode, Password, PasswordType, Result,
    StatusWord, TransportError,
};

// Re-export small utilities for convenience
pub use crate::utils::hex_dump;
