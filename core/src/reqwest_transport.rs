//! `Transport` implementation on top of reqwest.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{redirect, Client, Method};

use crate::config::TransportConfig;
use crate::error::{ConfigError, TransportError};
use crate::http::{HttpMethod, Request};
use crate::transport::{Transport, TransportResponse};

/// Sends requests with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let invalid = || ConfigError::InvalidHeader { name: name.clone() };
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Use an already configured client; only URL resolution is taken from
    /// `config`.
    pub fn with_client(client: Client, config: TransportConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    const fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn build(&self, request: &Request) -> Result<reqwest::RequestBuilder, TransportError> {
        let options = &request.options;
        let mut url = self.config.resolve(&request.url).map_err(TransportError::new)?;
        if !options.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &options.params {
                pairs.append_pair(name, value);
            }
        }

        let mut builder = self.client.request(Self::method(request.method), url);
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &options.data {
            Some(serde_json::Value::String(text)) => builder.body(text.clone()),
            Some(data) => builder.json(data),
            None if !options.form.is_empty() => {
                let encoded =
                    serde_urlencoded::to_string(&options.form).map_err(TransportError::new)?;
                builder
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(encoded)
            }
            None => builder,
        };

        if let Some(timeout) = options.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }
}

impl Transport for ReqwestTransport {
    type Response = ReqwestResponse;

    async fn send(&self, request: &Request) -> Result<ReqwestResponse, TransportError> {
        let response = self
            .build(request)?
            .send()
            .await
            .map_err(TransportError::new)?;
        Ok(ReqwestResponse::new(response))
    }
}

/// Response whose head has been captured; the body stays with reqwest until
/// `text` takes it.
#[derive(Debug)]
pub struct ReqwestResponse {
    url: String,
    status: u16,
    headers: BTreeMap<String, String>,
    inner: Option<reqwest::Response>,
}

impl ReqwestResponse {
    fn new(response: reqwest::Response) -> Self {
        Self {
            url: response.url().to_string(),
            status: response.status().as_u16(),
            headers: collect_headers(response.headers()),
            inner: Some(response),
        }
    }
}

impl TransportResponse for ReqwestResponse {
    fn url(&self) -> &str {
        &self.url
    }

    fn status(&self) -> u16 {
        self.status
    }

    fn headers(&self) -> BTreeMap<String, String> {
        self.headers.clone()
    }

    async fn text(&mut self) -> Result<String, TransportError> {
        match self.inner.take() {
            Some(response) => response.text().await.map_err(TransportError::new),
            None => Err(TransportError::new("response body was already read")),
        }
    }

    async fn dispose(self) {
        // drops the connection if the body was never read
        drop(self.inner);
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(name.as_str().to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(&value);
            })
            .or_insert_with(|| value.to_string());
    }
    collected
}
