//! HTTP clients for the management API and the platform API
//!
//! Both APIs share one [`Transport`] abstraction: a request goes out, a status
//! code and body come back. Non-success statuses are NOT errors at this layer;
//! only a missing response (DNS, connection, TLS) is. Callers decide what each
//! status means for their endpoint.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

pub mod http;
pub mod manager;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod platform;

pub use http::HttpTransport;
pub use manager::ManagerClient;
#[cfg(test)]
pub use mock::MockTransport;
pub use platform::PlatformClient;

/// Sends a single authenticated request to one API host.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return whatever status the server answered with.
    ///
    /// Returns `ApiError::Transport` only when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// Request body variants used by the two APIs
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs, in order
    Form(Vec<(String, String)>),
}

/// An API request relative to the transport's host
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path, including the leading slash
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }
}

/// Status code and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Turn any status other than `expected` into `ApiError::Remote`.
    pub fn expect_status(self, expected: u16) -> std::result::Result<Self, ApiError> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(self.into_remote_error())
        }
    }

    pub fn into_remote_error(self) -> ApiError {
        ApiError::Remote {
            status: self.status,
            body: self.body,
        }
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, ApiError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Percent-encode a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
