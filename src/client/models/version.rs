//! Versioned management API contracts

use serde::{Deserialize, Serialize};

use super::Role;

/// Which revision of the management API to speak.
///
/// The two revisions differ in their role names and in the user-info path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// `admin` / `member` roles, `/v1/user/info`
    #[default]
    Current,
    /// `manager` / `contributor` roles, `/v1/user-info`
    Legacy,
}

impl ApiVersion {
    /// Valid roles, most privileged first
    pub fn roles(self) -> [Role; 2] {
        match self {
            ApiVersion::Current => [Role::Admin, Role::Member],
            ApiVersion::Legacy => [Role::Manager, Role::Contributor],
        }
    }

    pub fn privileged_role(self) -> Role {
        self.roles()[0]
    }

    /// Role given to users added without an explicit role
    pub fn default_role(self) -> Role {
        self.roles()[1]
    }

    pub fn user_info_path(self) -> &'static str {
        match self {
            ApiVersion::Current => "/v1/user/info",
            ApiVersion::Legacy => "/v1/user-info",
        }
    }
}
