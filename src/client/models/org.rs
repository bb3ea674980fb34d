//! Organization models

use serde::{Deserialize, Serialize};

/// Response of the user-info endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Organizations the caller belongs to
    #[serde(default)]
    pub organizations: Vec<OrgMembership>,
}

/// One organization the caller belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgMembership {
    /// Organization name
    pub organization_name: String,
}
