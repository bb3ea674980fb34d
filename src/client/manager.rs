//! Management API client
//!
//! One method per endpoint. Each returns the raw status and body; the
//! command layer decides which statuses mean success.

use std::sync::Arc;

use serde_json::json;

use super::models::{ApiVersion, Role};
use super::{ApiRequest, RawResponse, RequestBody, Transport, segment};
use crate::error::{ApiError, Result};

/// Default management API host
pub const DEFAULT_MANAGER_HOST: &str = "manager-api.heroku.com";

/// Management API client
#[derive(Clone)]
pub struct ManagerClient {
    transport: Arc<dyn Transport>,
}

fn org_path(org: &str) -> String {
    format!("/v1/organization/{}", segment(org))
}

fn org_app_path(org: &str, app: &str) -> String {
    format!("{}/app/{}", org_path(org), segment(app))
}

/// Path of the first audit event page for an org, optionally scoped to an app.
pub fn events_path(org: &str, app: Option<&str>) -> String {
    match app {
        Some(app) => format!("{}/events", org_app_path(org, app)),
        None => format!("{}/events", org_path(org)),
    }
}

impl ManagerClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Move an app owned by the caller into `org` (201).
    pub async fn transfer_app_in(&self, org: &str, app: &str) -> Result<RawResponse> {
        let body = RequestBody::Json(json!({ "app_name": app }));
        self.transport
            .send(ApiRequest::post(format!("{}/app", org_path(org)), body))
            .await
    }

    /// Move an app out of `org` into the caller's personal account (200).
    pub async fn transfer_app_out(&self, org: &str, app: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::post(
                format!("{}/transfer-out", org_app_path(org, app)),
                RequestBody::Empty,
            ))
            .await
    }

    /// Move every app of a legacy team into `org` (200).
    pub async fn migrate_from_team(&self, org: &str, team: &str) -> Result<RawResponse> {
        let body = RequestBody::Json(json!({ "team": team }));
        self.transport
            .send(ApiRequest::post(
                format!("{}/migrate-from-team", org_path(org)),
                body,
            ))
            .await
    }

    /// Move every app of `org` into a legacy team (200).
    pub async fn migrate_to_team(&self, org: &str, team: &str) -> Result<RawResponse> {
        let body = RequestBody::Json(json!({ "team": team }));
        self.transport
            .send(ApiRequest::post(
                format!("{}/migrate-to-team", org_path(org)),
                body,
            ))
            .await
    }

    /// Add a member (201, 302 when already a member).
    pub async fn add_user(&self, org: &str, email: &str, role: Role) -> Result<RawResponse> {
        let body = RequestBody::Json(json!({ "email": email, "role": role.as_str() }));
        self.transport
            .send(ApiRequest::post(format!("{}/user", org_path(org)), body))
            .await
    }

    /// Grant a user developer access to one org app (201).
    pub async fn add_developer(&self, org: &str, app: &str, email: &str) -> Result<RawResponse> {
        let body = RequestBody::Json(json!({ "email": email }));
        self.transport
            .send(ApiRequest::post(
                format!("{}/developer", org_app_path(org, app)),
                body,
            ))
            .await
    }

    pub async fn list_users(&self, org: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::get(format!("{}/user", org_path(org))))
            .await
    }

    pub async fn list_apps(&self, org: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::get(format!("{}/app", org_path(org))))
            .await
    }

    /// Organizations of the caller; the path depends on the API version.
    pub async fn user_info(&self, version: ApiVersion) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::get(version.user_info_path()))
            .await
    }

    pub async fn list_tags(&self, org: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::get(format!("{}/tags", org_path(org))))
            .await
    }

    pub async fn create_tag(&self, org: &str, tag: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::post(
                format!("{}/tags/{}", org_path(org), segment(tag)),
                RequestBody::Empty,
            ))
            .await
    }

    pub async fn destroy_tag(&self, org: &str, tag: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::delete(format!(
                "{}/tags/{}",
                org_path(org),
                segment(tag)
            )))
            .await
    }

    pub async fn tag_app(&self, org: &str, app: &str, tag: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::post(
                format!("{}/tags/{}", org_app_path(org, app), segment(tag)),
                RequestBody::Empty,
            ))
            .await
    }

    pub async fn untag_app(&self, org: &str, app: &str, tag: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::delete(format!(
                "{}/tags/{}",
                org_app_path(org, app),
                segment(tag)
            )))
            .await
    }

    pub async fn tag_user(&self, org: &str, email: &str, tag: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::post(
                format!(
                    "{}/user/{}/tags/{}",
                    org_path(org),
                    segment(email),
                    segment(tag)
                ),
                RequestBody::Empty,
            ))
            .await
    }

    pub async fn untag_user(&self, org: &str, email: &str, tag: &str) -> Result<RawResponse> {
        self.transport
            .send(ApiRequest::delete(format!(
                "{}/user/{}/tags/{}",
                org_path(org),
                segment(email),
                segment(tag)
            )))
            .await
    }

    /// Fetch one page of audit events.
    ///
    /// `path` is either [`events_path`] or an `older` cursor from a previous
    /// page. Cursors must be absolute paths on the same host and are sent
    /// unchanged.
    pub async fn events(&self, path: &str) -> Result<RawResponse> {
        if !path.starts_with('/') {
            return Err(ApiError::InvalidResponse(format!(
                "Refusing pagination cursor '{}': not an absolute path",
                path
            ))
            .into());
        }
        self.transport.send(ApiRequest::get(path)).await
    }
}
