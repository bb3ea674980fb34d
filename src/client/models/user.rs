//! Organization member models

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ApiVersion;

/// Organization member as listed by the management API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgMember {
    /// Member email address
    pub email: String,

    /// Role name as sent by the server
    #[serde(default)]
    pub role: String,
}

/// Organization role
///
/// `Admin`/`Member` belong to the current API, `Manager`/`Contributor` to
/// the legacy one. Which pair is valid depends on [`ApiVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
    Manager,
    Contributor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Manager => "manager",
            Role::Contributor => "contributor",
        }
    }

    /// Parse a role literal, accepting only the roles of `version`.
    pub fn parse(value: &str, version: ApiVersion) -> Option<Role> {
        version.roles().into_iter().find(|r| r.as_str() == value)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_current_roles() {
        assert_eq!(Role::parse("admin", ApiVersion::Current), Some(Role::Admin));
        assert_eq!(Role::parse("member", ApiVersion::Current), Some(Role::Member));
        assert_eq!(Role::parse("manager", ApiVersion::Current), None);
    }

    #[test]
    fn test_parse_legacy_roles() {
        assert_eq!(Role::parse("manager", ApiVersion::Legacy), Some(Role::Manager));
        assert_eq!(
            Role::parse("contributor", ApiVersion::Legacy),
            Some(Role::Contributor)
        );
        assert_eq!(Role::parse("admin", ApiVersion::Legacy), None);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Role::parse("Admin", ApiVersion::Current), None);
        assert_eq!(Role::parse("", ApiVersion::Current), None);
    }

    #[test]
    fn test_member_role_defaults_to_empty() {
        let member: OrgMember = serde_json::from_str(r#"{"email":"a@example.com"}"#).unwrap();
        assert_eq!(member.role, "");
    }
}
