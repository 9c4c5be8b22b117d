//! Request specification types.

use clap::ValueEnum;
use serde_json::Value;

/// HTTP methods the SuiteTalk API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HttpMethod {
    /// Read a record or collection.
    Get,
    /// Create a record or run a query.
    Post,
    /// Replace a record.
    Put,
    /// Partially update a record.
    Patch,
    /// Delete a record.
    Delete,
}

impl HttpMethod {
    /// The equivalent `reqwest::Method`.
    pub fn as_method(&self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single logical operation against the API.
///
/// Caller-constructed and immutable: the engine never mutates a spec, so one
/// spec can be resent across retry attempts or reused across batches. Custom
/// headers are applied after the engine's defaults and therefore override
/// them.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// Path below the account-scoped base URL, starting with `/`.
    pub endpoint: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// JSON payload, if the operation carries one.
    pub body: Option<Value>,
    /// Additional headers as (name, value) pairs.
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    /// Creates a spec with no body and no custom headers.
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
            headers: Vec::new(),
        }
    }

    /// Shorthand for a GET spec.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// Shorthand for a POST spec carrying a JSON body.
    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, endpoint).with_body(body)
    }

    /// Shorthand for a PATCH spec carrying a JSON body.
    pub fn patch(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Patch, endpoint).with_body(body)
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a custom header. Applied after the engine defaults, so a
    /// caller-supplied `Accept` or `Content-Type` wins.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
