//! Management and platform API data models
//!
//! Models are organized by resource type. Every model is a transient
//! request/response payload; nothing here is cached or persisted.

mod app;
mod audit;
mod org;
mod user;
mod version;

pub use app::{Collaborator, OrgApp, TeamDetail};
pub use audit::{AuditEvent, EventPage};
pub use org::UserInfo;
pub use user::{OrgMember, Role};
pub use version::ApiVersion;
