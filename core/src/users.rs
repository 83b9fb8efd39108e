//! Endpoint definitions for a JSONPlaceholder-style users API.
//!
//! # Design
//! Each endpoint is a request builder plus the expectations that describe
//! its possible answers. Tests combine the two through `attempt`:
//!
//! ```ignore
//! let users = attempt(&transport, users::list()).expect(&users::list_ok()).await?;
//! ```
//!
//! URLs are relative; the transport resolves them against its base URL.
//! Deleting an unknown user answers 200 on this API, hence `remove_not_found`
//! expecting 200.

use std::sync::LazyLock;

use regex::Regex;

use crate::expected::ExpectedResponse;
use crate::http::Request;
use crate::types::User;

pub fn list() -> Request {
    Request::get("/users")
}

pub fn list_ok() -> ExpectedResponse<Vec<User>> {
    ExpectedResponse::json(200)
}

pub fn find(id: i64) -> Request {
    Request::get(format!("/users/{id}"))
}

pub fn find_ok() -> ExpectedResponse<User> {
    ExpectedResponse::json(200)
}

pub fn find_not_found() -> ExpectedResponse<()> {
    ExpectedResponse::blank(404)
}

pub fn add(user: &User) -> Result<Request, serde_json::Error> {
    Request::post("/users").with_json(user)
}

pub fn add_ok() -> ExpectedResponse<User> {
    ExpectedResponse::json(201)
}

pub fn update(id: i64, user: &User) -> Result<Request, serde_json::Error> {
    Request::put(format!("/users/{id}")).with_json(user)
}

pub fn update_ok() -> ExpectedResponse<User> {
    ExpectedResponse::json(200)
}

pub fn update_not_found() -> ExpectedResponse<()> {
    ExpectedResponse::blank(404)
}

pub fn remove(id: i64) -> Request {
    Request::delete(format!("/users/{id}"))
}

pub fn remove_ok() -> ExpectedResponse<()> {
    ExpectedResponse::blank(200)
}

pub fn remove_not_found() -> ExpectedResponse<()> {
    ExpectedResponse::blank(200)
}

pub fn health() -> Request {
    Request::get("/health")
}

static HEALTHY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^ok$").expect("literal pattern compiles"));

pub fn health_ok() -> ExpectedResponse<String> {
    ExpectedResponse::text(200, HEALTHY.clone())
}
