//! Scripted transport for unit tests.

use crate::transport::{Headers, PreparedRequest, RawResponse, Transport, TransportError};
use std::cell::RefCell;

type Handler<'a> = Box<dyn Fn(usize, &PreparedRequest) -> Result<RawResponse, TransportError> + 'a>;

/// Transport driven by a closure. The closure gets the 1-based call number and
/// the request; every request is recorded.
pub(crate) struct FnTransport<'a> {
    handler: Handler<'a>,
    requests: RefCell<Vec<PreparedRequest>>,
    tls: bool,
}

impl<'a> FnTransport<'a> {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(usize, &PreparedRequest) -> Result<RawResponse, TransportError> + 'a,
    {
        Self {
            handler: Box::new(f),
            requests: RefCell::new(Vec::new()),
            tls: true,
        }
    }

    /// Fails every call; for tests that only look at request preparation.
    pub(crate) fn unreachable() -> Self {
        Self::new(|_, _| Err(TransportError::other("unreachable transport called")))
    }

    pub(crate) fn without_tls(mut self) -> Self {
        self.tls = false;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub(crate) fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FnTransport<'_> {
    fn supports_tls(&self) -> bool {
        self.tls
    }

    fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let call = {
            let mut requests = self.requests.borrow_mut();
            requests.push(request.clone());
            requests.len()
        };
        (self.handler)(call, request)
    }
}

pub(crate) fn raw(status: u32, body: &[u8]) -> RawResponse {
    RawResponse {
        status,
        body: body.to_vec(),
        headers: Headers::new(),
    }
}
