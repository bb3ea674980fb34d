//! Organization listing commands

use std::io::Write;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::outcome::report_failure;
use crate::cli::validate;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::{OrgApp, UserInfo};
use crate::error::Result;
use crate::output;

/// Arguments for `apps`
#[derive(Args, Debug, Clone, Default)]
pub struct AppsArgs {
    /// Organization to list apps for
    #[arg(long, short = 'o')]
    pub org: Option<String>,
}

pub fn validate_apps(args: &AppsArgs) -> Result<String> {
    validate::required(
        &args.org,
        "organization",
        "Specify which organization to list apps for with --org <org name>",
    )
}

/// App row for table and JSON output
#[derive(Debug, Tabled, Serialize)]
struct AppRow {
    #[tabled(rename = "APP")]
    name: String,
}

/// Organization row for table and JSON output
#[derive(Debug, Tabled, Serialize)]
struct OrgRow {
    #[tabled(rename = "ORGANIZATION")]
    name: String,
}

/// Run the apps list command
pub async fn run_apps(ctx: &CommandContext, out: &mut dyn Write, org: &str) -> Result<()> {
    let apps: Vec<OrgApp> = match fetch_apps(ctx, org).await {
        Ok(apps) => apps,
        Err(err) => return report_failure(out, err),
    };

    let rows: Vec<AppRow> = apps.into_iter().map(|a| AppRow { name: a.name }).collect();
    if ctx.format != OutputFormat::Pretty {
        return output::write_rows(out, ctx.format, Some(org), &rows);
    }

    writeln!(out, "The following apps are part of {}:", org)?;
    for row in &rows {
        writeln!(out, "    {}", row.name)?;
    }
    out.flush()?;
    Ok(())
}

async fn fetch_apps(ctx: &CommandContext, org: &str) -> Result<Vec<OrgApp>> {
    let apps = ctx.manager.list_apps(org).await?.expect_status(200)?.json()?;
    Ok(apps)
}

/// Run the orgs list command
pub async fn run_orgs(ctx: &CommandContext, out: &mut dyn Write) -> Result<()> {
    let info: UserInfo = match fetch_user_info(ctx).await {
        Ok(info) => info,
        Err(err) => return report_failure(out, err),
    };

    let rows: Vec<OrgRow> = info
        .organizations
        .into_iter()
        .map(|o| OrgRow {
            name: o.organization_name,
        })
        .collect();
    if ctx.format != OutputFormat::Pretty {
        return output::write_rows(out, ctx.format, None, &rows);
    }

    writeln!(out, "You are a member of the following organizations:")?;
    for row in &rows {
        writeln!(out, "    {}", row.name)?;
    }
    out.flush()?;
    Ok(())
}

async fn fetch_user_info(ctx: &CommandContext) -> Result<UserInfo> {
    let info = ctx
        .manager
        .user_info(ctx.api_version)
        .await?
        .expect_status(200)?
        .json()?;
    Ok(info)
}
