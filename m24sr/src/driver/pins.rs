// m24sr/src/driver/pins.rs

use std::cell::RefCell;
use std::rc::Rc;

use crate::{Error, Result};

/// Control lines wired next to the I2C bus: the GPO output of the chip
/// (used as answer-ready interrupt) and the RF disable input.
pub trait SessionControl {
    fn has_gpo(&self) -> bool;

    fn has_rf_disable(&self) -> bool;

    /// Drive the RF disable line; `true` mutes the RF interface.
    fn set_rf_disable(&mut self, disabled: bool) -> Result<()>;

    /// Arm or disarm the host interrupt on the GPO falling edge.
    fn set_gpo_irq(&mut self, enabled: bool) -> Result<()>;
}

#[derive(Debug, Default)]
struct PinState {
    gpo: bool,
    rf_disable: bool,
    rf_disabled: Option<bool>,
    gpo_irq: Option<bool>,
}

/// In-memory [`SessionControl`] for tests. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockPins {
    state: Rc<RefCell<PinState>>,
}

impl MockPins {
    pub fn new(gpo: bool, rf_disable: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(PinState {
                gpo,
                rf_disable,
                ..PinState::default()
            })),
        }
    }

    /// Last level written to the RF disable line.
    pub fn rf_disabled(&self) -> Option<bool> {
        self.state.borrow().rf_disabled
    }

    pub fn gpo_irq(&self) -> Option<bool> {
        self.state.borrow().gpo_irq
    }
}

impl SessionControl for MockPins {
    fn has_gpo(&self) -> bool {
        self.state.borrow().gpo
    }

    fn has_rf_disable(&self) -> bool {
        self.state.borrow().rf_disable
    }

    fn set_rf_disable(&mut self, disabled: bool) -> Result<()> {
        let mut s = self.state.borrow_mut();
        if !s.rf_disable {
            return Err(Error::PinNotConnected);
        }
        s.rf_disabled = Some(disabled);
        Ok(())
    }

    fn set_gpo_irq(&mut self, enabled: bool) -> Result<()> {
        let mut s = self.state.borrow_mut();
        if !s.gpo {
            return Err(Error::PinNotConnected);
        }
        s.gpo_irq = Some(enabled);
        Ok(())
    }
}
