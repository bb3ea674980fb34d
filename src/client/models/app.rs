//! App, collaborator and legacy team models

use serde::{Deserialize, Serialize};

/// App owned by an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgApp {
    /// App name
    pub name: String,
}

/// User with direct access to an app (platform API)
///
/// The legacy API sends `{"email": ..}`. With a v3 `Accept` header the email
/// is nested as `{"user": {"email": ..}}`; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CollaboratorPayload")]
pub struct Collaborator {
    /// Collaborator email address
    pub email: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollaboratorPayload {
    Flat { email: String },
    Nested { user: CollaboratorUser },
}

#[derive(Deserialize)]
struct CollaboratorUser {
    email: String,
}

impl From<CollaboratorPayload> for Collaborator {
    fn from(payload: CollaboratorPayload) -> Self {
        let email = match payload {
            CollaboratorPayload::Flat { email } => email,
            CollaboratorPayload::Nested { user } => user.email,
        };
        Self { email }
    }
}

/// Legacy team as returned by the platform API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDetail {
    /// Names of the apps owned by the team
    #[serde(default)]
    pub apps: Vec<String>,
}
