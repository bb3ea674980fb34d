//! Tag management commands

use std::io::Write;

use clap::Args;
use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::outcome::{Outcome, StatusTable, report_failure};
use crate::cli::validate;
use crate::error::Result;

fn require_tag(tag: &Option<String>) -> Result<String> {
    validate::required(tag, "tag", "Use the -t --tag option to specify a tag.")
}

fn require_org(org: &Option<String>) -> Result<String> {
    validate::required(
        org,
        "organization",
        "Use the -o --org option to specify an organization.",
    )
}

/// Arguments for `tags`
#[derive(Args, Debug, Clone, Default)]
pub struct TagsArgs {
    /// Organization to show tags for
    #[arg(long, short = 'o')]
    pub org: Option<String>,
}

pub fn validate_tags(args: &TagsArgs) -> Result<String> {
    require_org(&args.org)
}

/// Print the org's tags and their assignments.
pub async fn run_tags(ctx: &CommandContext, out: &mut dyn Write, org: &str) -> Result<()> {
    let resp = match ctx.manager.list_tags(org).await {
        Ok(resp) => resp,
        Err(err) => return report_failure(out, err),
    };
    let resp = match resp.expect_status(200) {
        Ok(resp) => resp,
        Err(err) => return report_failure(out, err.into()),
    };

    match serde_json::from_str::<serde_json::Value>(&resp.body) {
        Ok(value) => writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?,
        Err(_) => writeln!(out, "{}", resp.body)?,
    }
    out.flush()?;
    Ok(())
}

/// Arguments for `tag-create` and `tag-destroy`
#[derive(Args, Debug, Clone, Default)]
pub struct TagArgs {
    /// Organization owning the tag
    #[arg(long, short = 'o')]
    pub org: Option<String>,

    /// Tag name
    #[arg(long, short = 't')]
    pub tag: Option<String>,
}

/// Validated org-scoped tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    pub org: String,
    pub tag: String,
}

pub fn validate_tag(args: &TagArgs) -> Result<TagRequest> {
    let tag = require_tag(&args.tag)?;
    let org = require_org(&args.org)?;
    Ok(TagRequest { org, tag })
}

pub async fn run_create(ctx: &CommandContext, out: &mut dyn Write, req: &TagRequest) -> Result<()> {
    let outcome = StatusTable::expect(201)
        .on(302, "tag already exists")
        .classify(ctx.manager.create_tag(&req.org, &req.tag).await);
    announce(out, outcome, "tag created", "failed to create tag")
}

pub async fn run_destroy(ctx: &CommandContext, out: &mut dyn Write, req: &TagRequest) -> Result<()> {
    let outcome = StatusTable::expect(204)
        .on(
            500,
            "unable to destroy tag, run 'heroku-manager tags' to see if it is assigned",
        )
        .classify(ctx.manager.destroy_tag(&req.org, &req.tag).await);
    announce(out, outcome, "tag destroyed", "failed to destroy tag")
}

/// Arguments for `tag-app` and `untag-app`
#[derive(Args, Debug, Clone, Default)]
pub struct TagAppArgs {
    /// Organization owning the tag
    #[arg(long, short = 'o')]
    pub org: Option<String>,

    /// Tag name
    #[arg(long, short = 't')]
    pub tag: Option<String>,

    /// App to tag
    #[arg(long, short = 'a')]
    pub app: Option<String>,
}

/// Validated app tag assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAppRequest {
    pub org: String,
    pub tag: String,
    pub app: String,
}

pub fn validate_tag_app(args: &TagAppArgs) -> Result<TagAppRequest> {
    let tag = require_tag(&args.tag)?;
    let org = require_org(&args.org)?;
    let app = validate::required(&args.app, "app", "Use the -a --app option to specify an app.")?;
    Ok(TagAppRequest { org, tag, app })
}

pub async fn run_tag_app(ctx: &CommandContext, out: &mut dyn Write, req: &TagAppRequest) -> Result<()> {
    let outcome = StatusTable::expect(201)
        .on(302, format!("tag already exists on {}", req.app))
        .classify(ctx.manager.tag_app(&req.org, &req.app, &req.tag).await);
    announce(
        out,
        outcome,
        &format!("tagged app {}", req.app),
        &format!("failed to create tag on {}", req.app),
    )
}

pub async fn run_untag_app(ctx: &CommandContext, out: &mut dyn Write, req: &TagAppRequest) -> Result<()> {
    let outcome =
        StatusTable::expect(204).classify(ctx.manager.untag_app(&req.org, &req.app, &req.tag).await);
    announce(
        out,
        outcome,
        &format!("untagged app {}", req.app),
        &format!("failed to untag {}", req.app),
    )
}

/// Arguments for `tag-user` and `untag-user`
#[derive(Args, Debug, Clone, Default)]
pub struct TagUserArgs {
    /// Organization owning the tag
    #[arg(long, short = 'o')]
    pub org: Option<String>,

    /// Tag name
    #[arg(long, short = 't')]
    pub tag: Option<String>,

    /// Email of the user to tag
    #[arg(long, short = 'u')]
    pub user: Option<String>,
}

/// Validated user tag assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUserRequest {
    pub org: String,
    pub tag: String,
    pub user: String,
}

pub fn validate_tag_user(args: &TagUserArgs) -> Result<TagUserRequest> {
    let tag = require_tag(&args.tag)?;
    let org = require_org(&args.org)?;
    let user = validate::required(&args.user, "user", "Use the -u --user option to specify a user.")?;
    Ok(TagUserRequest { org, tag, user })
}

pub async fn run_tag_user(ctx: &CommandContext, out: &mut dyn Write, req: &TagUserRequest) -> Result<()> {
    let outcome = StatusTable::expect(201)
        .on(302, format!("tag already exists on {}", req.user))
        .classify(ctx.manager.tag_user(&req.org, &req.user, &req.tag).await);
    announce(
        out,
        outcome,
        &format!("tagged {}", req.user),
        &format!("failed to create tag on {}", req.user),
    )
}

pub async fn run_untag_user(ctx: &CommandContext, out: &mut dyn Write, req: &TagUserRequest) -> Result<()> {
    let outcome =
        StatusTable::expect(204).classify(ctx.manager.untag_user(&req.org, &req.user, &req.tag).await);
    announce(
        out,
        outcome,
        &format!("untagged {}", req.user),
        &format!("failed to untag {}", req.user),
    )
}

/// One line per tag operation: the success text, the tailored message, or
/// `failure` with the interpreted detail.
fn announce(out: &mut dyn Write, outcome: Outcome, success: &str, failure: &str) -> Result<()> {
    match outcome {
        Outcome::Success => writeln!(out, "{}", success)?,
        Outcome::Known(message) => writeln!(out, "{}", message)?,
        Outcome::Failed(detail) => writeln!(out, "{}", format!("{}: {}", failure, detail).red())?,
    }
    out.flush()?;
    Ok(())
}
