//! App transfer between the personal account and an organization

use std::io::Write;

use clap::Args;
use log::debug;

use crate::cli::CommandContext;
use crate::cli::member::add_user_table;
use crate::cli::outcome::{StatusTable, finish, progress, report_failure};
use crate::cli::prompt::Prompt;
use crate::cli::validate::{self, Direction};
use crate::client::PlatformClient;
use crate::client::models::{Collaborator, OrgMember};
use crate::error::{ApiError, Result};

/// Arguments for `transfer`
#[derive(Args, Debug, Clone, Default)]
pub struct TransferArgs {
    /// Transfer the app from your personal account to this org
    #[arg(long, short = 't')]
    pub to: Option<String>,

    /// Transfer the app from this org to your personal account
    #[arg(long, short = 'f')]
    pub from: Option<String>,

    /// App to transfer
    #[arg(long, short = 'a')]
    pub app: Option<String>,

    /// Offer to add the app's collaborators to the org before transferring
    #[arg(long, short = 'c')]
    pub invite_collaborators: bool,
}

/// Validated `transfer` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub app: String,
    pub direction: Direction,
    pub invite_collaborators: bool,
}

pub fn validate(args: &TransferArgs) -> Result<TransferRequest> {
    let direction = validate::direction(&args.to, &args.from)?;
    let app = validate::required(
        &args.app,
        "app",
        "Specify which app to transfer with --app <app name>",
    )?;

    Ok(TransferRequest {
        app,
        direction,
        invite_collaborators: args.invite_collaborators,
    })
}

/// Run the transfer command
pub async fn run(
    ctx: &CommandContext,
    out: &mut dyn Write,
    prompt: &mut dyn Prompt,
    req: &TransferRequest,
) -> Result<()> {
    if let Err(err) = check_access(&ctx.platform, &req.app).await {
        return report_failure(out, err);
    }

    match &req.direction {
        Direction::Into(org) => {
            if req.invite_collaborators {
                if let Err(err) = invite_collaborators(ctx, out, prompt, &req.app, org).await {
                    return report_failure(out, err);
                }
            }

            progress(out, &format!("Transferring {} to {}...", req.app, org))?;
            let outcome = StatusTable::expect(201).classify(ctx.manager.transfer_app_in(org, &req.app).await);
            finish(out, &outcome)
        }
        Direction::OutOf(org) => {
            progress(
                out,
                &format!(
                    "Transferring {} from {} to your personal account...",
                    req.app, org
                ),
            )?;
            let outcome = StatusTable::expect(200).classify(ctx.manager.transfer_app_out(org, &req.app).await);
            finish(out, &outcome)
        }
    }
}

/// The caller must be able to see the app on the platform API.
async fn check_access(platform: &PlatformClient, app: &str) -> Result<()> {
    let resp = platform.get_app(app).await?;
    match resp.status {
        200 => Ok(()),
        404 => Err(ApiError::AccessDenied(app.to_string()).into()),
        _ => Err(resp.into_remote_error().into()),
    }
}

/// Offer to add app collaborators who are not yet org members.
async fn invite_collaborators(
    ctx: &CommandContext,
    out: &mut dyn Write,
    prompt: &mut dyn Prompt,
    app: &str,
    org: &str,
) -> Result<()> {
    let collaborators: Vec<Collaborator> = ctx
        .platform
        .app_collaborators(app)
        .await?
        .expect_status(200)?
        .json()?;
    let members: Vec<OrgMember> = ctx.manager.list_users(org).await?.expect_status(200)?.json()?;

    let candidates = missing_members(&collaborators, &members);
    if candidates.is_empty() {
        debug!("All collaborators on {} are already members of {}", app, org);
        return Ok(());
    }

    writeln!(
        out,
        "The following collaborators on {} are not members of {}:",
        app, org
    )?;
    for (i, email) in candidates.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, email)?;
    }
    out.flush()?;

    let answer = prompt.input(&format!(
        "Add which of them to {}? (comma-separated numbers, blank for none)",
        org
    ))?;
    let selection = parse_selection(&answer, candidates.len());
    for rejected in &selection.rejected {
        writeln!(out, "Ignoring invalid selection '{}'", rejected)?;
    }

    let role = ctx.api_version.default_role();
    for index in selection.indices {
        let email = &candidates[index];
        progress(out, &format!("Adding {} to {} as {}...", email, org, role))?;
        let outcome = add_user_table(email, org).classify(ctx.manager.add_user(org, email, role).await);
        finish(out, &outcome)?;
    }

    // TODO: grant invited collaborators developer access to the app after the transfer
    Ok(())
}

/// Collaborator emails that are not org members, first occurrence order.
fn missing_members(collaborators: &[Collaborator], members: &[OrgMember]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for collaborator in collaborators {
        let email = collaborator.email.as_str();
        let is_member = members.iter().any(|m| m.email.eq_ignore_ascii_case(email));
        let seen = missing.iter().any(|m| m.eq_ignore_ascii_case(email));
        if !is_member && !seen {
            missing.push(email.to_string());
        }
    }
    missing
}

/// Parsed answer to a numbered-list prompt
#[derive(Debug, Default, PartialEq, Eq)]
struct Selection {
    /// Zero-based indices, in the order given, without duplicates
    indices: Vec<usize>,
    /// Entries that were not a number in `1..=len`
    rejected: Vec<String>,
}

fn parse_selection(input: &str, len: usize) -> Selection {
    let mut selection = Selection::default();
    for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => {
                if !selection.indices.contains(&(n - 1)) {
                    selection.indices.push(n - 1);
                }
            }
            _ => selection.rejected.push(entry.to_string()),
        }
    }
    selection
}
