//! Assertion adapter for test suites.
//!
//! `attempt(&transport, request).expect(&expected)` returns the validated body
//! or an `ExchangeFailure` whose message is the full report. Tests abort with
//! `?` or `unwrap()`, whichever their harness prefers; nothing past a failed
//! attempt runs either way.

use tracing::{info_span, Instrument};

use crate::error::ExchangeFailure;
use crate::exchange::execute;
use crate::expected::ExpectedResponse;
use crate::http::Request;
use crate::outcome::Outcome;
use crate::report::render;
use crate::transport::Transport;

/// A request waiting to be checked against an expectation.
#[derive(Debug)]
pub struct Attempt<'a, T> {
    transport: &'a T,
    request: Request,
}

pub fn attempt<T: Transport>(transport: &T, request: Request) -> Attempt<'_, T> {
    Attempt { transport, request }
}

impl<T: Transport> Attempt<'_, T> {
    /// Run the exchange and return the raw outcome.
    pub async fn outcome<A>(self, expected: &ExpectedResponse<A>) -> Outcome<A> {
        let span = info_span!("attempt", step = %self.request.label());
        execute(self.transport, self.request, expected)
            .instrument(span)
            .await
    }

    /// Run the exchange and return the validated body.
    pub async fn expect<A>(self, expected: &ExpectedResponse<A>) -> Result<A, ExchangeFailure> {
        self.outcome(expected).await.into_result()
    }
}

impl<A> Outcome<A> {
    /// The validated body, or the rendered report for any other variant.
    pub fn into_result(self) -> Result<A, ExchangeFailure> {
        match self {
            Outcome::Valid { response, .. } => Ok(response.body),
            failed => Err(ExchangeFailure {
                kind: failed.kind(),
                report: render(&failed),
            }),
        }
    }
}
