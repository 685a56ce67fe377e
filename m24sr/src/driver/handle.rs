// m24sr/src/driver/handle.rs

use crate::constants::{GET_SESSION_COMMAND, KILL_RF_SESSION_COMMAND};
use crate::driver::config::DriverConfig;
use crate::driver::listener::{Completion, Listener, NoopListener};
use crate::driver::pins::SessionControl;
use crate::driver::session::{PendingCommand, Session};
use crate::protocol::{block, response, BlockKind, Command, Frame, SupervisoryKind};
use crate::transport::Transport;
use crate::types::{CommunicationMode, Dispatch, FileId, Password, PasswordType};
use crate::utils::hex_dump;
use crate::{Error, Result};

/// What a received frame did to the pending command.
enum Step {
    /// Wait time extension acknowledged; the command is still pending.
    Extended,
    Done(Vec<u8>),
}

/// Driver for one M24SR on an I2C bus.
///
/// At most one command is in flight. In synchronous mode every command
/// returns [`Dispatch::Completed`]; in asynchronous mode it returns
/// [`Dispatch::Pending`] once the request is on the bus and the caller
/// calls [`Driver::handle_event`] whenever the chip signals an answer.
/// Either way the listener sees exactly one [`Completion`] per command.
pub struct Driver {
    transport: Box<dyn Transport>,
    pins: Option<Box<dyn SessionControl>>,
    listener: Box<dyn Listener>,
    session: Session,
    config: DriverConfig,
}

impl Driver {
    /// Create a synchronous driver with default settings from an existing
    /// transport. Use [`crate::driver::DriverBuilder`] for anything else.
    pub fn new_with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            pins: None,
            listener: Box::new(NoopListener),
            session: Session::new(),
            config: DriverConfig::default(),
        }
    }

    pub(crate) fn from_parts(
        transport: Box<dyn Transport>,
        pins: Option<Box<dyn SessionControl>>,
        listener: Box<dyn Listener>,
        config: DriverConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            pins,
            listener,
            session: Session::new(),
            config,
        })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn mode(&self) -> CommunicationMode {
        self.config.mode
    }

    /// Switch between synchronous and asynchronous operation. Only allowed
    /// while no command is pending.
    pub fn set_mode(&mut self, mode: CommunicationMode) -> Result<()> {
        self.session.ensure_idle()?;
        self.config.mode = mode;
        Ok(())
    }

    pub fn set_listener(&mut self, listener: Box<dyn Listener>) {
        self.listener = listener;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_idle()
    }

    pub(crate) fn session_control(&mut self) -> Option<&mut Box<dyn SessionControl>> {
        self.pins.as_mut()
    }

    pub(crate) fn has_gpo(&self) -> bool {
        self.pins.as_ref().is_some_and(|p| p.has_gpo())
    }

    pub(crate) fn has_rf_disable(&self) -> bool {
        self.pins.as_ref().is_some_and(|p| p.has_rf_disable())
    }

    /// Open the I2C session (GetSession).
    pub fn get_session(&mut self) -> Result<()> {
        self.open_session(false)
    }

    /// Take the session over from the RF interface (KillRFSession).
    pub fn kill_rf_session(&mut self) -> Result<()> {
        self.open_session(true)
    }

    /// The session bytes are not block framed and get no answer; the chip is
    /// ready again once it acknowledges its address. Always completes inline.
    fn open_session(&mut self, kill_rf: bool) -> Result<()> {
        self.session.ensure_idle()?;
        let byte = if kill_rf {
            KILL_RF_SESSION_COMMAND
        } else {
            GET_SESSION_COMMAND
        };
        log::debug!("-> {}", if kill_rf { "kill rf session" } else { "get session" });
        log::trace!("tx {}", hex_dump(&[byte]));

        let result = self
            .transport
            .send(&[byte])
            .and_then(|_| self.transport.poll_ready());
        if let Err(e) = &result {
            log::debug!("session open failed: {}", e);
        }
        let completion = Completion::SessionOpened {
            kill_rf,
            result: result.clone(),
        };
        self.listener.on_completion(&completion);
        result
    }

    /// Close the session (S(DESELECT)).
    pub fn deselect(&mut self) -> Result<Dispatch<()>> {
        self.session.ensure_idle()?;
        self.session.load_frame(&Frame::deselect_request());
        self.dispatch(PendingCommand::Deselect).map(|d| d.map(drop))
    }

    pub fn select_application(&mut self) -> Result<Dispatch<()>> {
        self.issue_unit(Command::SelectApplication)
    }

    pub fn select_cc_file(&mut self) -> Result<Dispatch<()>> {
        self.issue_unit(Command::SelectCcFile)
    }

    pub fn select_system_file(&mut self) -> Result<Dispatch<()>> {
        self.issue_unit(Command::SelectSystemFile)
    }

    pub fn select_ndef_file(&mut self, file: FileId) -> Result<Dispatch<()>> {
        self.issue_unit(Command::SelectNdefFile(file))
    }

    /// READ BINARY on the selected file. The returned bytes exclude PCB,
    /// status word and CRC.
    pub fn read_binary(&mut self, offset: u16, length: u8) -> Result<Dispatch<Vec<u8>>> {
        self.issue(Command::ReadBinary { offset, length })
    }

    /// READ BINARY with the proprietary class; reads outside the NDEF
    /// message length are allowed.
    pub fn st_read_binary(&mut self, offset: u16, length: u8) -> Result<Dispatch<Vec<u8>>> {
        self.issue(Command::StReadBinary { offset, length })
    }

    /// Synchronous read straight into `buf`. `buf` is only written when the
    /// whole response checked out.
    pub fn read_binary_into(&mut self, offset: u16, buf: &mut [u8]) -> Result<()> {
        self.require_sync("read_binary_into")?;
        // Saturated lengths are over the single-operation cap and get rejected.
        let length = u8::try_from(buf.len()).unwrap_or(u8::MAX);
        match self.read_binary(offset, length)? {
            Dispatch::Completed(data) if data.len() == buf.len() => {
                buf.copy_from_slice(&data);
                Ok(())
            }
            Dispatch::Completed(data) => Err(Error::InvalidLength {
                expected: buf.len(),
                actual: data.len(),
            }),
            Dispatch::Pending => Err(Error::UnsupportedOperation(
                "read_binary_into returned before completion".into(),
            )),
        }
    }

    pub fn update_binary(&mut self, offset: u16, data: &[u8]) -> Result<Dispatch<()>> {
        self.issue_unit(Command::UpdateBinary { offset, data })
    }

    /// VERIFY. With `None` the chip only reports whether `password` is
    /// required (`6300`) or not.
    pub fn verify(
        &mut self,
        password: PasswordType,
        value: Option<&Password>,
    ) -> Result<Dispatch<()>> {
        self.issue_unit(Command::Verify { password, value })
    }

    pub fn change_reference_data(
        &mut self,
        password: PasswordType,
        value: &Password,
    ) -> Result<Dispatch<()>> {
        self.issue_unit(Command::ChangeReferenceData { password, value })
    }

    pub fn enable_verification_requirement(
        &mut self,
        password: PasswordType,
    ) -> Result<Dispatch<()>> {
        self.issue_unit(Command::EnableVerificationRequirement(password))
    }

    pub fn disable_verification_requirement(
        &mut self,
        password: PasswordType,
    ) -> Result<Dispatch<()>> {
        self.issue_unit(Command::DisableVerificationRequirement(password))
    }

    pub fn enable_permanent_state(&mut self, password: PasswordType) -> Result<Dispatch<()>> {
        self.issue_unit(Command::EnablePermanentState(password))
    }

    pub fn disable_permanent_state(&mut self, password: PasswordType) -> Result<Dispatch<()>> {
        self.issue_unit(Command::DisablePermanentState(password))
    }

    pub fn send_interrupt(&mut self) -> Result<Dispatch<()>> {
        self.issue_unit(Command::SendInterrupt)
    }

    pub fn state_control(&mut self, reset: bool) -> Result<Dispatch<()>> {
        self.issue_unit(Command::StateControl { reset })
    }

    /// Resume after the chip signalled an answer (asynchronous mode).
    ///
    /// Returns `None` when nothing is pending or when the answer was a wait
    /// time extension that has been acknowledged; the command then stays
    /// pending until the next notification.
    pub fn handle_event(&mut self) -> Option<Completion> {
        if self.session.is_idle() {
            log::trace!("ready notification with no pending command");
            return None;
        }
        self.resume()
    }

    pub(crate) fn require_sync(&self, what: &str) -> Result<()> {
        if self.config.is_async() {
            return Err(Error::UnsupportedOperation(format!(
                "{} needs synchronous mode",
                what
            )));
        }
        Ok(())
    }

    fn issue_unit(&mut self, command: Command<'_>) -> Result<Dispatch<()>> {
        self.issue(command).map(|d| d.map(drop))
    }

    fn issue(&mut self, command: Command<'_>) -> Result<Dispatch<Vec<u8>>> {
        self.session.ensure_idle()?;
        let pending = PendingCommand::from(&command);
        if let Err(e) = self.prepare(&command) {
            return Err(self.abort(pending, e));
        }
        self.dispatch(pending)
    }

    /// Check the parameters and build the I-block into the session buffer.
    fn prepare(&mut self, command: &Command<'_>) -> Result<()> {
        match command {
            Command::ReadBinary { length, .. } | Command::StReadBinary { length, .. }
                if *length > self.config.max_read_bytes =>
            {
                return Err(Error::InvalidLength {
                    expected: self.config.max_read_bytes as usize,
                    actual: *length as usize,
                });
            }
            Command::UpdateBinary { data, .. }
                if data.len() > self.config.max_write_bytes as usize =>
            {
                return Err(Error::InvalidLength {
                    expected: self.config.max_write_bytes as usize,
                    actual: data.len(),
                });
            }
            _ => {}
        }
        let descriptor = command.descriptor()?;
        let mask = self.config.wire_mask(command.mask());
        self.session.build_frame(mask, &descriptor, self.config.device_id)
    }

    /// Transmit the frame in the session buffer and, in synchronous mode,
    /// drive the command to completion.
    fn dispatch(&mut self, pending: PendingCommand) -> Result<Dispatch<Vec<u8>>> {
        log::debug!("-> {}", pending.name());
        log::trace!("tx {}", hex_dump(self.session.frame()));
        if let Err(e) = self.transport.send(self.session.frame()) {
            return Err(self.abort(pending, e));
        }
        self.session.begin(pending)?;

        if self.config.is_async() {
            return Ok(Dispatch::Pending);
        }

        loop {
            if let Err(e) = self.transport.poll_ready() {
                return Err(match self.session.take() {
                    Some(pending) => self.abort(pending, e),
                    None => e,
                });
            }
            if let Some(completion) = self.resume() {
                return completion.into_result().map(Dispatch::Completed);
            }
        }
    }

    /// Read and process one answer for the pending command.
    fn resume(&mut self) -> Option<Completion> {
        let pending = self.session.take()?;
        let has_did = self.config.device_id.is_some();

        let step = match self.transport.receive(pending.response_len(has_did)) {
            Ok(frame) => self.process(&pending, &frame),
            Err(e) => Err(e),
        };

        match step {
            Ok(Step::Extended) => {
                self.session.restore(pending);
                None
            }
            Ok(Step::Done(data)) => Some(self.finish(pending, Ok(data))),
            Err(e) => Some(self.finish(pending, Err(e))),
        }
    }

    fn process(&mut self, pending: &PendingCommand, frame: &[u8]) -> Result<Step> {
        log::trace!("rx {}", hex_dump(frame));
        let kind = block::classify(frame)?;
        match (pending, kind) {
            (PendingCommand::Deselect, BlockKind::Supervisory(SupervisoryKind::Deselect)) => {
                response::validate_deselect(frame)?;
                Ok(Step::Done(Vec::new()))
            }
            (PendingCommand::Deselect, _) => Err(Error::UnexpectedBlock(frame[0])),
            (_, BlockKind::Supervisory(SupervisoryKind::WaitTimeExtension(_))) => {
                let fwt = response::validate_wtx(frame)?;
                self.acknowledge_wtx(fwt)?;
                Ok(Step::Extended)
            }
            (_, BlockKind::Information) => self.information(pending, frame),
            _ => Err(Error::UnexpectedBlock(frame[0])),
        }
    }

    fn acknowledge_wtx(&mut self, fwt: u8) -> Result<()> {
        let seen = self.session.extensions();
        if seen >= self.config.max_wtx {
            log::warn!("giving up after {} wait time extensions", seen);
            return Err(Error::ProtocolTimeout { extensions: seen });
        }
        let n = self.session.note_extension();
        log::debug!("wait time extension {} (fwt {:#04x})", n, fwt);
        let ack = Frame::wtx_response(fwt, self.config.device_id);
        log::trace!("tx {}", hex_dump(&ack));
        self.transport.send(&ack)
    }

    fn information(&self, pending: &PendingCommand, frame: &[u8]) -> Result<Step> {
        let validated = response::validate(frame)?;
        if !validated.status.is_success() {
            log::warn!("{} answered {}", pending.name(), validated.status);
            return Err(Error::ChipStatus(validated.status));
        }
        let Some(expected) = pending.expected_payload() else {
            return Ok(Step::Done(Vec::new()));
        };
        let data = response::payload(frame, &validated, self.config.device_id.is_some())?;
        if data.len() != expected {
            return Err(Error::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Step::Done(data.to_vec()))
    }

    /// Report a command that never got an answer, returning its error.
    fn abort(&mut self, pending: PendingCommand, err: Error) -> Error {
        self.finish(pending, Err(err.clone()));
        err
    }

    fn finish(&mut self, pending: PendingCommand, outcome: Result<Vec<u8>>) -> Completion {
        match &outcome {
            Ok(_) => log::debug!("<- {} ok", pending.name()),
            Err(e) => log::debug!("<- {} failed: {}", pending.name(), e),
        }
        let completion = pending.into_completion(outcome);
        self.listener.on_completion(&completion);
        completion
    }
}
