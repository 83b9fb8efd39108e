//! Error types for the exchange verifier.
//!
//! # Design
//! Expected failure classes of an exchange are `Outcome` values, not errors.
//! The types here cover what is left: the opaque cause carried by
//! `Outcome::NoResponse`, the failure returned by the assertion adapter, and
//! transport configuration problems.

use std::error::Error as StdError;

use thiserror::Error;

use crate::outcome::OutcomeKind;

/// Opaque transport failure. Anything the transport can fail with (DNS,
/// refused connection, timeout, aborted connection) ends up here.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransportError(Box<dyn StdError + Send + Sync + 'static>);

impl TransportError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self(source.into())
    }

    /// The error message followed by every cause in its source chain.
    pub fn describe(&self) -> String {
        let mut text = self.0.to_string();
        let mut source = self.0.source();
        while let Some(cause) = source {
            let message = cause.to_string();
            // reqwest and hyper often repeat the inner message in the outer one
            if !text.contains(&message) {
                text.push_str(": ");
                text.push_str(&message);
            }
            source = cause.source();
        }
        text
    }
}

/// Returned by the assertion adapter when an exchange is not `Valid`.
///
/// `Display` is the full rendered report, so `unwrap()` or `?` in a test
/// prints everything needed to diagnose the failure.
#[derive(Debug, Error)]
#[error("{report}")]
pub struct ExchangeFailure {
    pub kind: OutcomeKind,
    pub report: String,
}

/// Invalid transport configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid value {value:?} for {name}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("invalid default header {name:?}")]
    InvalidHeader { name: String },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
