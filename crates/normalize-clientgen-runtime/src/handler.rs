//! Delegating handler chains.
//!
//! A handler pre-processes a request and hands it to its inner handler. The
//! last handler in a chain has none; the transport sends what it receives.

use crate::error::RuntimeError;
use crate::request::RequestInformation;
use tracing::trace;

/// One link of a request pipeline.
pub trait DelegatingHandler: Send + Sync {
    fn inner_handler(&self) -> Option<&dyn DelegatingHandler>;

    fn set_inner_handler(&mut self, inner: Box<dyn DelegatingHandler>);

    /// Process `request` before it reaches the inner handler.
    fn process(&self, request: &mut RequestInformation) -> Result<(), RuntimeError> {
        let _ = request;
        Ok(())
    }

    /// Run this handler and then every inner one, in chain order.
    fn handle(&self, request: &mut RequestInformation) -> Result<(), RuntimeError> {
        self.process(request)?;
        match self.inner_handler() {
            Some(inner) => inner.handle(request),
            None => Ok(()),
        }
    }
}

/// Link `handlers[i]`'s inner handler to `handlers[i + 1]` and return the
/// first, or `None` for an empty list.
pub fn chain_handlers(
    mut handlers: Vec<Box<dyn DelegatingHandler>>,
) -> Option<Box<dyn DelegatingHandler>> {
    trace!(len = handlers.len(), "chaining handlers");
    let mut chain = handlers.pop()?;
    while let Some(mut outer) = handlers.pop() {
        outer.set_inner_handler(chain);
        chain = outer;
    }
    Some(chain)
}

/// Handlers every client gets unless it supplies its own.
pub fn default_handlers() -> Vec<Box<dyn DelegatingHandler>> {
    Vec::new()
}

/// Sets fixed headers on every request that does not already carry them.
#[derive(Default)]
pub struct HeadersHandler {
    headers: Vec<(String, String)>,
    inner: Option<Box<dyn DelegatingHandler>>,
}

impl HeadersHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl DelegatingHandler for HeadersHandler {
    fn inner_handler(&self) -> Option<&dyn DelegatingHandler> {
        self.inner.as_deref()
    }

    fn set_inner_handler(&mut self, inner: Box<dyn DelegatingHandler>) {
        self.inner = Some(inner);
    }

    fn process(&self, request: &mut RequestInformation) -> Result<(), RuntimeError> {
        for (name, value) in &self.headers {
            if !request.headers.contains_key(name) {
                request.headers.insert(name.clone(), value.clone());
            }
        }
        Ok(())
    }
}
