//! Typed HTTP exchange verifier for API test suites.
//!
//! # Overview
//! An exchange sends one `Request`, checks the response status against an
//! `ExpectedResponse`, validates the body, and ends in one of four
//! `Outcome`s: `NoResponse`, `WrongStatus`, `InvalidBody` or `Valid`. Failed
//! outcomes render into a self-contained text report.
//!
//! # Design
//! - `exchange::execute` never fails; every expected failure is a value.
//! - The transport and the body validator are passed in explicitly. The
//!   `Transport` trait is the network seam; `ReqwestTransport` is the stock
//!   implementation.
//! - `attempt(..).expect(..)` turns an outcome into `Result<A, ExchangeFailure>`
//!   so any test harness can abort with `?` or `unwrap()`.
//! - `users` and `types` describe a sample users API used by the tests.

pub mod attempt;
pub mod config;
pub mod error;
pub mod exchange;
pub mod expected;
pub mod http;
pub mod outcome;
pub mod report;
pub mod reqwest_transport;
pub mod transport;
pub mod types;
pub mod users;
pub mod validate;

pub use attempt::{attempt, Attempt};
pub use config::TransportConfig;
pub use error::{ConfigError, ExchangeFailure, TransportError};
pub use exchange::{classify, execute};
pub use expected::ExpectedResponse;
pub use http::{HttpMethod, Request, RequestOptions, Response, ResponseHead};
pub use outcome::{Outcome, OutcomeKind};
pub use report::render;
pub use reqwest_transport::{ReqwestResponse, ReqwestTransport};
pub use transport::{Transport, TransportResponse};
pub use types::{Address, Company, Geo, User};
pub use validate::{Checker, Issue, PathSegment, Validate, ValidationError};
