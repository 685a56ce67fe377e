// m24sr/src/transport/mock.rs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::TransportError;
use crate::transport::traits::Transport;
use crate::Result;

/// Mock transport for unit tests. It records sent frames and returns queued
/// responses, truncated to the length the caller asked for.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<Vec<u8>>,
    pub responses: VecDeque<Vec<u8>>,
    /// Number of `poll_ready` calls seen so far.
    pub polls: usize,
    /// Testing hooks: number of subsequent calls that should fail.
    pub send_failures: usize,
    pub receive_failures: usize,
    pub poll_failures: usize,
    /// Length requested by every `receive` call.
    pub requested: Vec<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            responses: responses.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(resp);
    }

    /// Set how many subsequent sends should fail with a bus nack.
    pub fn set_send_failures(&mut self, n: usize) {
        self.send_failures = n;
    }

    pub fn set_receive_failures(&mut self, n: usize) {
        self.receive_failures = n;
    }

    pub fn set_poll_failures(&mut self, n: usize) {
        self.poll_failures = n;
    }

    /// Wrap into a handle that can be given to a driver while the test keeps
    /// access to the recorded traffic.
    pub fn into_shared(self) -> SharedTransport {
        SharedTransport {
            inner: Rc::new(RefCell::new(self)),
        }
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        if self.send_failures > 0 {
            self.send_failures -= 1;
            return Err(TransportError::Nack.into());
        }
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>> {
        self.requested.push(max_len);
        if self.receive_failures > 0 {
            self.receive_failures -= 1;
            return Err(TransportError::Bus("injected receive failure".into()).into());
        }
        match self.responses.pop_front() {
            Some(mut resp) => {
                resp.truncate(max_len);
                Ok(resp)
            }
            None => Err(TransportError::Timeout.into()),
        }
    }

    fn poll_ready(&mut self) -> Result<()> {
        self.polls += 1;
        if self.poll_failures > 0 {
            self.poll_failures -= 1;
            return Err(TransportError::Timeout.into());
        }
        Ok(())
    }
}

/// Clonable handle around a [`MockTransport`]. Every clone sees the same
/// queues and recorded traffic.
#[derive(Debug, Clone, Default)]
pub struct SharedTransport {
    inner: Rc<RefCell<MockTransport>>,
}

impl SharedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, resp: Vec<u8>) {
        self.inner.borrow_mut().push_response(resp);
    }

    /// Copy of every frame sent so far.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.inner.borrow().sent.clone()
    }

    pub fn last_sent(&self) -> Option<Vec<u8>> {
        self.inner.borrow().sent.last().cloned()
    }

    pub fn polls(&self) -> usize {
        self.inner.borrow().polls
    }

    pub fn pending_responses(&self) -> usize {
        self.inner.borrow().responses.len()
    }

    /// Run `f` with mutable access to the underlying mock.
    pub fn with_mock<R>(&self, f: impl FnOnce(&mut MockTransport) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }
}

impl Transport for SharedTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.inner.borrow_mut().send(data)
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>> {
        self.inner.borrow_mut().receive(max_len)
    }

    fn poll_ready(&mut self) -> Result<()> {
        self.inner.borrow_mut().poll_ready()
    }
}
