// m24sr/src/driver/procedures.rs

//! Multi-command procedures built on the single-command API. They block on
//! every step and are only available in synchronous mode.

use crate::constants::{SYSTEM_FILE_GPO_OFFSET, SYSTEM_FILE_UID_OFFSET, UID_LEN};
use crate::driver::handle::Driver;
use crate::protocol::commands::merge_gpo_byte;
use crate::types::{GpoMode, Password, PasswordType};
use crate::{Error, Result};

impl Driver {
    /// Open the session, park every wired GPO configuration in high
    /// impedance, close the session and arm the answer-ready interrupt.
    pub fn init(&mut self) -> Result<()> {
        self.require_sync("init")?;
        self.get_session()?;
        if self.has_gpo() {
            self.configure_gpo(GpoMode::HighImpedance, true)?;
        }
        if self.has_rf_disable() {
            self.configure_gpo(GpoMode::HighImpedance, false)?;
        }
        self.deselect()?;
        if self.has_gpo() {
            if let Some(pins) = self.session_control() {
                pins.set_gpo_irq(true)?;
            }
        }
        log::debug!("m24sr initialized");
        Ok(())
    }

    /// Read the 7-byte UID from the system file.
    pub fn read_id(&mut self) -> Result<[u8; UID_LEN as usize]> {
        self.require_sync("read_id")?;
        self.select_application()?;
        self.select_system_file()?;
        let mut uid = [0u8; UID_LEN as usize];
        self.read_binary_into(SYSTEM_FILE_UID_OFFSET, &mut uid)?;
        Ok(uid)
    }

    /// Set the GPO behaviour seen while the I2C host owns the session.
    pub fn manage_i2c_gpo(&mut self, mode: GpoMode) -> Result<()> {
        if !self.has_gpo() {
            return Err(Error::PinNotConnected);
        }
        self.require_sync("manage_i2c_gpo")?;
        self.configure_gpo(mode, true)?;
        self.deselect()?;
        Ok(())
    }

    /// Set the GPO behaviour seen while the RF interface owns the session.
    pub fn manage_rf_gpo(&mut self, mode: GpoMode) -> Result<()> {
        if !self.has_rf_disable() {
            return Err(Error::PinNotConnected);
        }
        self.require_sync("manage_rf_gpo")?;
        self.configure_gpo(mode, false)?;
        self.deselect()?;
        Ok(())
    }

    /// Enable or mute the RF interface through the RF disable line.
    pub fn rf_config(&mut self, enable: bool) -> Result<()> {
        if !self.has_rf_disable() {
            return Err(Error::PinNotConnected);
        }
        match self.session_control() {
            // The line is active high.
            Some(pins) => pins.set_rf_disable(!enable),
            None => Err(Error::PinNotConnected),
        }
    }

    /// Rewrite one nibble of the GPO byte of the system file. Leaves the
    /// session open.
    fn configure_gpo(&mut self, mode: GpoMode, i2c: bool) -> Result<()> {
        log::debug!(
            "configuring {} gpo: {}",
            if i2c { "i2c" } else { "rf" },
            mode
        );
        self.select_application()?;
        self.select_system_file()?;
        self.verify(PasswordType::I2c, Some(&Password::DEFAULT))?;
        let mut current = [0u8; 1];
        self.read_binary_into(SYSTEM_FILE_GPO_OFFSET, &mut current)?;
        let updated = merge_gpo_byte(current[0], mode, i2c);
        self.update_binary(SYSTEM_FILE_GPO_OFFSET, &[updated])?;
        Ok(())
    }
}
