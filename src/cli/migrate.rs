//! Team and organization migrations

use std::io::Write;

use clap::Args;
use colored::Colorize;
use log::debug;

use crate::cli::CommandContext;
use crate::cli::outcome::{Outcome, StatusTable, finish, progress, report_failure};
use crate::cli::validate::{self, Direction};
use crate::client::models::TeamDetail;
use crate::error::{ConfigError, Result};

/// Arguments for `team-to-org` and `org-to-team`
#[derive(Args, Debug, Clone, Default)]
pub struct TeamOrgArgs {
    /// Legacy team
    #[arg(long, short = 't')]
    pub team: Option<String>,

    /// Organization
    #[arg(long, short = 'o')]
    pub org: Option<String>,
}

/// Validated team/org pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamOrgRequest {
    pub team: String,
    pub org: String,
}

pub fn validate_team_to_org(args: &TeamOrgArgs) -> Result<TeamOrgRequest> {
    Ok(TeamOrgRequest {
        team: validate::required(
            &args.team,
            "team",
            "Specify which team to transfer from with --team <team name>",
        )?,
        org: validate::required(
            &args.org,
            "organization",
            "Specify which organization to transfer to with --org <org name>",
        )?,
    })
}

pub fn validate_org_to_team(args: &TeamOrgArgs) -> Result<TeamOrgRequest> {
    Ok(TeamOrgRequest {
        team: validate::required(
            &args.team,
            "team",
            "Specify which team to transfer to with --team <team name>",
        )?,
        org: validate::required(
            &args.org,
            "organization",
            "Specify which organization to transfer from with --org <org name>",
        )?,
    })
}

/// Move every app of a legacy team into an organization.
pub async fn run_team_to_org(
    ctx: &CommandContext,
    out: &mut dyn Write,
    req: &TeamOrgRequest,
) -> Result<()> {
    progress(out, &format!("Transferring apps from {} to {}...", req.team, req.org))?;
    let outcome = StatusTable::expect(200).classify(ctx.manager.migrate_from_team(&req.org, &req.team).await);
    finish(out, &outcome)
}

/// Move every app of an organization into a legacy team.
pub async fn run_org_to_team(
    ctx: &CommandContext,
    out: &mut dyn Write,
    req: &TeamOrgRequest,
) -> Result<()> {
    progress(out, &format!("Transferring apps from {} to {}...", req.org, req.team))?;
    let outcome = StatusTable::expect(200).classify(ctx.manager.migrate_to_team(&req.org, &req.team).await);
    finish(out, &outcome)
}

/// Arguments for `migrate`
#[derive(Args, Debug, Clone, Default)]
pub struct MigrateArgs {
    /// Legacy team whose apps are moved
    #[arg(long)]
    pub team: Option<String>,

    /// Organization receiving the apps
    #[arg(long, short = 't')]
    pub to: Option<String>,

    /// Not supported; use org-to-team
    #[arg(long, short = 'f')]
    pub from: Option<String>,
}

/// Validated `migrate` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateRequest {
    pub team: String,
    pub org: String,
}

pub fn validate_migrate(args: &MigrateArgs) -> Result<MigrateRequest> {
    let direction = validate::direction(&args.to, &args.from)?;
    let team = validate::required(
        &args.team,
        "team",
        "Specify which team to transfer applications to/from with --team <team name>",
    )?;

    match direction {
        Direction::Into(org) => Ok(MigrateRequest { team, org }),
        Direction::OutOf(_) => Err(ConfigError::Invalid(
            "Migrating apps from an organization to a team is not supported by this command.\nUse org-to-team --org <org name> --team <team name> instead."
                .to_string(),
        )
        .into()),
    }
}

/// Claim every team app into the personal account, then transfer each
/// app into the organization one by one.
pub async fn run_migrate(
    ctx: &CommandContext,
    out: &mut dyn Write,
    req: &MigrateRequest,
) -> Result<()> {
    let apps = match team_apps(ctx, out, &req.team).await {
        Ok(Some(apps)) => apps,
        Ok(None) => return Ok(()),
        Err(err) => return report_failure(out, err),
    };

    if apps.is_empty() {
        writeln!(out, "Team {} has no apps to migrate.", req.team)?;
        return Ok(());
    }

    writeln!(out, "Migrating the following apps from team {}:", req.team)?;
    for app in &apps {
        writeln!(out, "    {}", app)?;
    }

    progress(out, "Transferring apps to your personal account...")?;
    match StatusTable::expect(200).classify(ctx.platform.claim_apps(&apps).await) {
        Outcome::Success => writeln!(out, " {}", "done".green())?,
        Outcome::Known(detail) | Outcome::Failed(detail) => {
            writeln!(out, " {}", "failed!".red())?;
            writeln!(out, "An error occurred: {}", detail)?;
            writeln!(
                out,
                "Migration failed while transferring apps to your personal account.\n\
                 Check the {} team and your personal account to find the apps.\n\
                 No apps were transferred to the organization.",
                req.team
            )?;
            out.flush()?;
            return Ok(());
        }
    }

    writeln!(
        out,
        "Transferring apps from your personal account to the {} organization...",
        req.org
    )?;
    let mut transferred = 0;
    for app in &apps {
        progress(out, &format!("    {}...", app))?;
        match StatusTable::expect(201).classify(ctx.manager.transfer_app_in(&req.org, app).await) {
            Outcome::Success => {
                transferred += 1;
                writeln!(out, " {}", "transferred".green())?;
            }
            Outcome::Known(detail) | Outcome::Failed(detail) => {
                debug!("Transfer of {} into {} failed: {}", app, req.org, detail);
                writeln!(out, " {} ({})", "failed!".red(), detail)?;
            }
        }
        out.flush()?;
    }

    writeln!(
        out,
        "{} of {} apps transferred to {}.",
        transferred,
        apps.len(),
        req.org
    )?;
    out.flush()?;
    Ok(())
}

/// App names of a team; `None` when the team is unknown (already reported).
async fn team_apps(
    ctx: &CommandContext,
    out: &mut dyn Write,
    team: &str,
) -> Result<Option<Vec<String>>> {
    let resp = ctx.platform.team(team).await?;
    if resp.status == 404 {
        writeln!(
            out,
            "No such team: '{}' (perhaps you don't have access?)",
            team
        )?;
        return Ok(None);
    }

    let detail: TeamDetail = resp.expect_status(200)?.json()?;
    Ok(Some(detail.apps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use reqwest::Method;

    use crate::client::models::ApiVersion;
    use crate::client::{MockTransport, RequestBody};

    fn ctx(manager: &Arc<MockTransport>, platform: &Arc<MockTransport>) -> CommandContext {
        CommandContext::with_transports(manager.clone(), platform.clone(), ApiVersion::Current)
    }

    fn team_org(team: Option<&str>, org: Option<&str>) -> TeamOrgArgs {
        TeamOrgArgs {
            team: team.map(String::from),
            org: org.map(String::from),
        }
    }

    fn migrate_args(team: Option<&str>, to: Option<&str>, from: Option<&str>) -> MigrateArgs {
        MigrateArgs {
            team: team.map(String::from),
            to: to.map(String::from),
            from: from.map(String::from),
        }
    }

    // ========================================================================
    // team-to-org / org-to-team
    // ========================================================================

    #[test]
    fn test_validate_team_to_org_checks_team_first() {
        let err = validate_team_to_org(&team_org(None, None)).unwrap_err();
        assert!(err.to_string().starts_with("No team specified."));

        let err = validate_team_to_org(&team_org(Some("ops"), None)).unwrap_err();
        assert!(err.to_string().contains("transfer to with --org <org name>"));
    }

    #[test]
    fn test_validate_org_to_team_hints() {
        let err = validate_org_to_team(&team_org(None, Some("acme"))).unwrap_err();
        assert!(err.to_string().contains("transfer to with --team <team name>"));

        let req = validate_org_to_team(&team_org(Some("ops"), Some("acme"))).unwrap();
        assert_eq!(req.team, "ops");
        assert_eq!(req.org, "acme");
    }

    #[tokio::test]
    async fn test_team_to_org_posts_team() {
        let manager = Arc::new(MockTransport::new().on(
            Method::POST,
            "/v1/organization/acme/migrate-from-team",
            200,
            "",
        ));
        let platform = Arc::new(MockTransport::new());
        let req = validate_team_to_org(&team_org(Some("ops"), Some("acme"))).unwrap();
        let mut out = Vec::new();

        run_team_to_org(&ctx(&manager, &platform), &mut out, &req)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Transferring apps from ops to acme..."));
        assert!(out.contains("done"));
        assert_eq!(
            manager.requests()[0].body,
            RequestBody::Json(serde_json::json!({ "team": "ops" }))
        );
    }

    #[tokio::test]
    async fn test_org_to_team_failure() {
        let manager = Arc::new(MockTransport::new().on(
            Method::POST,
            "/v1/organization/acme/migrate-to-team",
            404,
            r#"{"error_message":"team not found"}"#,
        ));
        let platform = Arc::new(MockTransport::new());
        let req = validate_org_to_team(&team_org(Some("ops"), Some("acme"))).unwrap();
        let mut out = Vec::new();

        run_org_to_team(&ctx(&manager, &platform), &mut out, &req)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Transferring apps from acme to ops..."));
        assert!(out.contains("An error occurred: team not found"));
    }

    // ========================================================================
    // migrate
    // ========================================================================

    #[test]
    fn test_validate_migrate() {
        let req = validate_migrate(&migrate_args(Some("ops"), Some("acme"), None)).unwrap();
        assert_eq!(req.org, "acme");

        let err = validate_migrate(&migrate_args(Some("ops"), None, None)).unwrap_err();
        assert!(err.to_string().starts_with("No organization specified."));

        let err = validate_migrate(&migrate_args(None, Some("acme"), None)).unwrap_err();
        assert!(err.to_string().starts_with("No team specified."));

        let err = validate_migrate(&migrate_args(Some("ops"), None, Some("acme"))).unwrap_err();
        assert!(err.to_string().contains("org-to-team"));
    }

    fn team_platform(claim_status: u16) -> Arc<MockTransport> {
        Arc::new(
            MockTransport::new()
                .on(
                    Method::GET,
                    "/v3/teams/ops",
                    200,
                    r#"{"name":"ops","apps":["one","two","three"]}"#,
                )
                .on(Method::POST, "/v3/teams/personal/apps", claim_status, ""),
        )
    }

    fn request() -> MigrateRequest {
        MigrateRequest {
            team: "ops".to_string(),
            org: "acme".to_string(),
        }
    }

    #[tokio::test]
    async fn test_migrate_claim_failure_transfers_nothing() {
        let manager = Arc::new(MockTransport::new());
        let platform = team_platform(500);
        let mut out = Vec::new();

        run_migrate(&ctx(&manager, &platform), &mut out, &request())
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("failed!"));
        assert!(out.contains("Check the ops team and your personal account to find the apps."));
        assert!(out.contains("No apps were transferred to the organization."));
        assert!(manager.requests().is_empty());
    }

    #[tokio::test]
    async fn test_migrate_continues_after_app_failure() {
        let manager = Arc::new(
            MockTransport::new()
                .on(Method::POST, "/v1/organization/acme/app", 201, "")
                .on(
                    Method::POST,
                    "/v1/organization/acme/app",
                    422,
                    r#"{"error_message":"app has paid add-ons"}"#,
                )
                .on(Method::POST, "/v1/organization/acme/app", 201, ""),
        );
        let platform = team_platform(200);
        let mut out = Vec::new();

        run_migrate(&ctx(&manager, &platform), &mut out, &request())
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Migrating the following apps from team ops:"));
        assert!(out.contains("    two..."));
        assert!(out.contains("(app has paid add-ons)"));
        assert!(out.contains("2 of 3 apps transferred to acme."));

        let bodies: Vec<_> = manager.requests().into_iter().map(|r| r.body).collect();
        assert_eq!(
            bodies,
            vec![
                RequestBody::Json(serde_json::json!({ "app_name": "one" })),
                RequestBody::Json(serde_json::json!({ "app_name": "two" })),
                RequestBody::Json(serde_json::json!({ "app_name": "three" })),
            ]
        );
        assert_eq!(
            platform.requests()[1].body,
            RequestBody::Form(vec![
                ("apps[one]".to_string(), "1".to_string()),
                ("apps[two]".to_string(), "1".to_string()),
                ("apps[three]".to_string(), "1".to_string()),
            ])
        );
    }

    #[tokio::test]
    async fn test_migrate_unknown_team() {
        let manager = Arc::new(MockTransport::new());
        let platform = Arc::new(MockTransport::new().on(Method::GET, "/v3/teams/ops", 404, ""));
        let mut out = Vec::new();

        run_migrate(&ctx(&manager, &platform), &mut out, &request())
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No such team: 'ops' (perhaps you don't have access?)\n"
        );
        assert_eq!(platform.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_migrate_empty_team_stops() {
        let manager = Arc::new(MockTransport::new());
        let platform = Arc::new(MockTransport::new().on(
            Method::GET,
            "/v3/teams/ops",
            200,
            r#"{"apps":[]}"#,
        ));
        let mut out = Vec::new();

        run_migrate(&ctx(&manager, &platform), &mut out, &request())
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Team ops has no apps to migrate.\n");
        assert_eq!(platform.requests().len(), 1);
        assert!(manager.requests().is_empty());
    }

    #[tokio::test]
    async fn test_migrate_team_lookup_error() {
        let manager = Arc::new(MockTransport::new());
        let platform = Arc::new(MockTransport::new().on(
            Method::GET,
            "/v3/teams/ops",
            403,
            r#"{"error_message":"forbidden"}"#,
        ));
        let mut out = Vec::new();

        run_migrate(&ctx(&manager, &platform), &mut out, &request())
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "An error occurred: forbidden\n");
    }
}
