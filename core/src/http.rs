//! Plain-data request and response types for an exchange.
//!
//! # Design
//! A `Request` is built once by the caller and never mutated afterwards; every
//! `Outcome` variant keeps it for reporting. `RequestOptions` is the transport
//! payload (headers, query params, body data, timeout). It serializes to the
//! JSON object shown in the REQUEST section of a failure report, so empty
//! fields are skipped and maps are ordered.
//!
//! `ResponseHead` is what the transport reports before the body is validated.
//! `Response<B>` pairs it with either the raw body text (failure variants) or
//! the validated value (`Valid`).

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport payload attached to a request.
///
/// `data` holding a JSON string is sent as raw text; any other JSON value is
/// sent as a JSON document. `form` fields are url-encoded and take precedence
/// over `data` only when `data` is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub form: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Immutable descriptor of one request.
///
/// Built through the method constructors and the consuming `with_*`
/// helpers, then handed to an executor by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
    pub options: RequestOptions,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            method,
            url: url.into(),
            options,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url, RequestOptions::default())
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url, RequestOptions::default())
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url, RequestOptions::default())
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url, RequestOptions::default())
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url, RequestOptions::default())
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.params.insert(name.into(), value.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.options.data = Some(data);
        self
    }

    /// Serialize `body` into the request data.
    pub fn with_json<T: Serialize>(self, body: &T) -> Result<Self, serde_json::Error> {
        let data = serde_json::to_value(body)?;
        Ok(self.with_data(data))
    }

    pub fn with_text(self, body: impl Into<String>) -> Self {
        self.with_data(serde_json::Value::String(body.into()))
    }

    pub fn with_form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.form.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Step label used in spans and report titles, e.g. `GET /users`.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// Response metadata available before the body is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
}

/// A response head together with its body: raw text or a validated value.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<B> {
    pub head: ResponseHead,
    pub body: B,
}

impl<B> Response<B> {
    pub fn status(&self) -> u16 {
        self.head.status
    }

    pub fn map_body<C>(self, f: impl FnOnce(B) -> C) -> Response<C> {
        Response {
            head: self.head,
            body: f(self.body),
        }
    }
}
