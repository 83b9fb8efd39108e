//! The seam between the verifier and whatever actually moves bytes.
//!
//! # Design
//! A `Transport` sends one `Request` and hands back a `TransportResponse`,
//! or fails with an opaque `TransportError`. The response exposes its head
//! synchronously, lets the body be read as text once, and must be released
//! with `dispose` exactly once. Dropping a response without disposing it
//! also releases it, so a cancelled exchange never leaks.
//!
//! Both traits use return-position `impl Future + Send` so executors can be
//! spawned onto multi-threaded runtimes.

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::TransportError;
use crate::http::Request;

/// Sends requests. Shared across concurrent exchanges, so it must be
/// `Send + Sync`; any internal synchronization is the implementor's job.
pub trait Transport: Send + Sync {
    type Response: TransportResponse;

    /// Send `request` and wait for the response head.
    fn send(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Self::Response, TransportError>> + Send;
}

/// A received response whose body has not necessarily been read yet.
pub trait TransportResponse: Send {
    /// Final URL after redirects.
    fn url(&self) -> &str;

    /// Numeric HTTP status code.
    fn status(&self) -> u16;

    /// Header names are lower-case; repeated headers are joined with `, `.
    fn headers(&self) -> BTreeMap<String, String>;

    /// Read the body as text. Only the first call is meaningful.
    fn text(&mut self) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// Release whatever the transport holds for this response.
    fn dispose(self) -> impl Future<Output = ()> + Send;
}
