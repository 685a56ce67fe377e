// m24sr/src/driver/mod.rs

pub mod builder;
pub mod config;
pub mod handle;
pub mod listener;
pub mod pins;
pub mod procedures;
pub mod session;

pub use builder::DriverBuilder;
pub use config::DriverConfig;
pub use handle::Driver;
pub use listener::{Completion, Listener, NoopListener, RecordingListener};
pub use pins::{MockPins, SessionControl};
pub use session::{PendingCommand, Session, SessionState};
