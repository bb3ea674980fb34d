//! Organization membership commands

use std::io::Write;

use clap::Args;
use colored::Colorize;
use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::outcome::{StatusTable, finish, progress, report_failure};
use crate::cli::validate;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::{ApiVersion, OrgMember, Role};
use crate::error::Result;
use crate::output;

/// Status table for adding a member; 302 means already a member.
pub fn add_user_table(email: &str, org: &str) -> StatusTable {
    StatusTable::expect(201).on(302, format!("{} is already a member of {}", email, org))
}

/// Arguments for `add-user`
#[derive(Args, Debug, Clone, Default)]
pub struct AddUserArgs {
    /// Email of the user to add
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// Organization to add the user to
    #[arg(long, short = 'o')]
    pub org: Option<String>,

    /// Role the user will have (admin|member, or manager|contributor on the legacy API)
    #[arg(long, short = 'r')]
    pub role: Option<String>,
}

/// Validated `add-user` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddUserRequest {
    pub user: String,
    pub org: String,
    pub role: Role,
}

/// Validate `add-user`. The API version is resolved only once the user and
/// org flags have passed, since it may require reading the config file.
pub fn validate_add_user(
    args: &AddUserArgs,
    version: impl FnOnce() -> Result<ApiVersion>,
) -> Result<AddUserRequest> {
    let user = validate::required(
        &args.user,
        "user",
        "Specify which user to add with --user <user email>",
    )?;
    let org = validate::required(
        &args.org,
        "organization",
        "Specify which organization to add the user to with --org <org name>",
    )?;
    let role = validate::role(&args.role, version()?)?;

    Ok(AddUserRequest { user, org, role })
}

pub async fn run_add_user(
    ctx: &CommandContext,
    out: &mut dyn Write,
    req: &AddUserRequest,
) -> Result<()> {
    progress(out, &format!("Adding {} to {}...", req.user, req.org))?;
    let result = ctx.manager.add_user(&req.org, &req.user, req.role).await;
    finish(out, &add_user_table(&req.user, &req.org).classify(result))
}

/// Arguments for `add-contributor-to-app`
#[derive(Args, Debug, Clone, Default)]
pub struct AddContributorArgs {
    /// Email of the user to grant access
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// Organization that owns the app
    #[arg(long, short = 'o')]
    pub org: Option<String>,

    /// App to grant access to
    #[arg(long, short = 'a')]
    pub app: Option<String>,
}

/// Validated `add-contributor-to-app` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddContributorRequest {
    pub user: String,
    pub org: String,
    pub app: String,
}

pub fn validate_add_contributor(args: &AddContributorArgs) -> Result<AddContributorRequest> {
    Ok(AddContributorRequest {
        user: validate::required(
            &args.user,
            "user",
            "Specify which user to add with --user <user email>",
        )?,
        org: validate::required(
            &args.org,
            "organization",
            "Specify which organization the app is in with --org <org name>",
        )?,
        app: validate::required(
            &args.app,
            "app",
            "Specify which app to add the user to with --app <app name>",
        )?,
    })
}

pub async fn run_add_contributor(
    ctx: &CommandContext,
    out: &mut dyn Write,
    req: &AddContributorRequest,
) -> Result<()> {
    progress(out, &format!("Adding {} to {}...", req.user, req.app))?;
    let result = ctx.manager.add_developer(&req.org, &req.app, &req.user).await;
    finish(out, &StatusTable::expect(201).classify(result))
}

/// Arguments for `users`
#[derive(Args, Debug, Clone, Default)]
pub struct UsersArgs {
    /// Organization to list members of
    #[arg(long, short = 'o')]
    pub org: Option<String>,
}

pub fn validate_users(args: &UsersArgs) -> Result<String> {
    validate::required(
        &args.org,
        "organization",
        "Specify which organization to list users for with --org <org name>",
    )
}

/// Member row for table and JSON output
#[derive(Debug, Tabled, Serialize)]
struct MemberRow {
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "ROLE")]
    role: String,
}

impl From<&OrgMember> for MemberRow {
    fn from(member: &OrgMember) -> Self {
        Self {
            email: member.email.clone(),
            role: member.role.clone(),
        }
    }
}

/// Split members into the privileged role and everyone else, keeping order.
pub fn partition_members(members: &[OrgMember], privileged: Role) -> (Vec<&OrgMember>, Vec<&OrgMember>) {
    members
        .iter()
        .partition(|m| m.role == privileged.as_str())
}

/// "admin" -> "Admins:"
fn group_heading(role: Role) -> String {
    let name = role.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}s:", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

pub async fn run_users(ctx: &CommandContext, out: &mut dyn Write, org: &str) -> Result<()> {
    let members: Vec<OrgMember> = match fetch_members(ctx, org).await {
        Ok(members) => members,
        Err(err) => return report_failure(out, err),
    };
    debug!("Fetched {} members of {}", members.len(), org);

    if ctx.format != OutputFormat::Pretty {
        let rows: Vec<MemberRow> = members.iter().map(MemberRow::from).collect();
        return output::write_rows(out, ctx.format, Some(org), &rows);
    }

    let privileged = ctx.api_version.privileged_role();
    let other = ctx.api_version.default_role();
    let (high, low) = partition_members(&members, privileged);

    writeln!(out, "The following users are members of {}:", org)?;
    writeln!(out, "{}", group_heading(privileged).bold())?;
    for member in high {
        writeln!(out, "    {}", member.email)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", group_heading(other).bold())?;
    for member in low {
        writeln!(out, "    {}", member.email)?;
    }
    out.flush()?;
    Ok(())
}

async fn fetch_members(ctx: &CommandContext, org: &str) -> Result<Vec<OrgMember>> {
    let members = ctx.manager.list_users(org).await?.expect_status(200)?.json()?;
    Ok(members)
}
