//! reqwest-backed transport

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use reqwest::header::{ACCEPT, USER_AGENT};

use super::{ApiRequest, RawResponse, RequestBody, Transport};
use crate::error::{ApiError, Result};

/// Transport for one API host, authenticated with the user's API key.
///
/// The key is sent as basic auth with an empty user name, which is what both
/// the management API and the platform API accept.
pub struct HttpTransport {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Create a transport for `host`.
    ///
    /// A bare hostname is reached over HTTPS. A value that already carries a
    /// scheme (`http://127.0.0.1:8080`) is used as-is.
    pub fn new(host: &str, api_key: String) -> Result<Self> {
        // 302 is a meaningful answer from several endpoints
        let http = HttpClient::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url(host),
            api_key,
        })
    }
}

fn base_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        // Anything else would be read as part of the authority
        if !request.path.starts_with('/') {
            return Err(ApiError::Transport(format!(
                "Refusing request path '{}': not an absolute path",
                request.path
            ))
            .into());
        }
        let url = format!("{}{}", self.base_url, request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .basic_auth("", Some(&self.api_key))
            .header(ACCEPT, "application/json")
            .header(
                USER_AGENT,
                concat!("heroku-manager/", env!("CARGO_PKG_VERSION")),
            );

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(pairs) => builder.form(&pairs),
        };

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::from)?;
        debug!("{} {} -> {}", request.method, request.path, status);

        Ok(RawResponse { status, body })
    }
}
