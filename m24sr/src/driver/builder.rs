// m24sr/src/driver/builder.rs

use crate::driver::config::DriverConfig;
use crate::driver::handle::Driver;
use crate::driver::listener::{Listener, NoopListener};
use crate::driver::pins::SessionControl;
use crate::transport::Transport;
use crate::types::CommunicationMode;
use crate::{Error, Result};

/// Helper to construct a Driver with optional collaborators and settings.
pub struct DriverBuilder {
    transport: Option<Box<dyn Transport>>,
    pins: Option<Box<dyn SessionControl>>,
    listener: Option<Box<dyn Listener>>,
    config: DriverConfig,
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverBuilder {
    pub fn new() -> Self {
        Self {
            transport: None,
            pins: None,
            listener: None,
            config: DriverConfig::default(),
        }
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// GPO / RF disable lines; without them the pin-level procedures fail
    /// with `PinNotConnected`.
    pub fn with_session_control(mut self, pins: Box<dyn SessionControl>) -> Self {
        self.pins = Some(pins);
        self
    }

    pub fn with_listener(mut self, listener: impl Listener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Replace the whole configuration. Later calls to `mode`, `device_id`
    /// or `max_wtx` still apply on top.
    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mode(mut self, mode: CommunicationMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn device_id(mut self, device_id: u8) -> Self {
        self.config.device_id = Some(device_id);
        self
    }

    pub fn max_wtx(mut self, max_wtx: usize) -> Self {
        self.config.max_wtx = max_wtx;
        self
    }

    /// Consume the builder. Requires a transport; otherwise returns
    /// `NoTransport`.
    pub fn build(self) -> Result<Driver> {
        let transport = self.transport.ok_or(Error::NoTransport)?;
        let listener = self
            .listener
            .unwrap_or_else(|| Box::new(NoopListener) as Box<dyn Listener>);
        Driver::from_parts(transport, self.pins, listener, self.config)
    }
}
