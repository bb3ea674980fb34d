//! Platform API client
//!
//! The platform API owns apps and legacy teams. This tool only uses it to
//! check app visibility, read collaborators and empty legacy teams.

use std::sync::Arc;

use super::{ApiRequest, RawResponse, RequestBody, Transport, segment};
use crate::error::Result;

/// Default platform API host
pub const DEFAULT_PLATFORM_HOST: &str = "api.heroku.com";

/// Platform API client
#[derive(Clone)]
pub struct PlatformClient {
    transport: Arc<dyn Transport>,
}

impl PlatformClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Look up an app; 404 means the caller cannot see it.
    pub async fn get_app(&self, app: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::get(format!("/apps/{}", segment(app))))
            .await
    }

    /// Users with direct access to an app
    pub async fn app_collaborators(&self, app: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::get(format!(
                "/apps/{}/collaborators",
                segment(app)
            )))
            .await
    }

    /// Legacy team detail, including its app names
    pub async fn team(&self, team: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::get(format!("/v3/teams/{}", segment(team))))
            .await
    }

    /// Move `apps` into the caller's personal account in one request (200).
    pub async fn claim_apps(&self, apps: &[String]) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::post(
                "/v3/teams/personal/apps",
                RequestBody::Form(claim_form(apps)),
            ))
            .await
    }
}

/// `apps[<name>]=1` for every app
fn claim_form(apps: &[String]) -> Vec<(String, String)> {
    apps.iter()
        .map(|app| (format!("apps[{}]", app), "1".to_string()))
        .collect()
}
