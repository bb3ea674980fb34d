//! Audit event listing

use std::io::Write;

use clap::Args;
use log::debug;

use crate::cli::CommandContext;
use crate::cli::outcome::report_failure;
use crate::cli::prompt::Prompt;
use crate::cli::validate;
use crate::client::manager::events_path;
use crate::client::models::{AuditEvent, EventPage};
use crate::error::Result;

/// Timestamp format for event lines
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Arguments for `events`
#[derive(Args, Debug, Clone, Default)]
pub struct EventsArgs {
    /// Organization to list events for
    #[arg(long, short = 'o')]
    pub org: Option<String>,

    /// Only show events for this app
    #[arg(long, short = 'a')]
    pub app: Option<String>,
}

/// Validated `events` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsRequest {
    pub org: String,
    pub app: Option<String>,
}

pub fn validate(args: &EventsArgs) -> Result<EventsRequest> {
    let org = validate::required(
        &args.org,
        "organization",
        "Use the -o --org option to specify an organization.",
    )?;
    let app = args
        .app
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from);

    Ok(EventsRequest { org, app })
}

/// `<timestamp> <actor> <action> <app> <attributes>`
pub fn format_event(event: &AuditEvent) -> String {
    let time = match event.timestamp() {
        Some(ts) => ts.format(TIME_FORMAT).to_string(),
        None => event.time_in_millis_since_epoch.to_string(),
    };

    format!(
        "{} {} {} {} {}",
        time,
        event.actor.as_deref().unwrap_or_default(),
        event.action.as_deref().unwrap_or_default(),
        event.app.as_deref().unwrap_or_default(),
        event.attributes
    )
}

/// Print event pages, asking before each older page.
///
/// Pages already printed stay printed when a later fetch fails.
pub async fn run(
    ctx: &CommandContext,
    out: &mut dyn Write,
    prompt: &mut dyn Prompt,
    req: &EventsRequest,
) -> Result<()> {
    let mut path = events_path(&req.org, req.app.as_deref());
    let mut pages = 0;

    loop {
        let page = match fetch_page(ctx, &path).await {
            Ok(page) => page,
            Err(err) => return report_failure(out, err),
        };
        pages += 1;

        for event in &page.events {
            writeln!(out, "{}", format_event(event))?;
        }
        out.flush()?;

        match page.older {
            Some(older) if prompt.confirm("Fetch More Results? (y/n)")? => path = older,
            _ => break,
        }
    }

    debug!("Printed {} page(s) of events for {}", pages, req.org);
    Ok(())
}

async fn fetch_page(ctx: &CommandContext, path: &str) -> Result<EventPage> {
    let page = ctx.manager.events(path).await?.expect_status(200)?.json()?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use reqwest::Method;

    use crate::cli::prompt::ScriptedPrompt;
    use crate::client::MockTransport;
    use crate::client::models::ApiVersion;

    const FIRST: &str = r#"{
        "events": [
            {"time_in_millis_since_epoch": 1367409600000, "actor": "jo@example.com",
             "action": "add_user", "app": null, "attributes": {"role": "member"}}
        ],
        "older": "/v1/organization/acme/events?before=1367409600000"
    }"#;

    const SECOND: &str = r#"{
        "events": [
            {"time_in_millis_since_epoch": 1367323200000, "actor": "jo@example.com",
             "action": "transfer_app", "app": "web", "attributes": {}}
        ]
    }"#;

    fn ctx(manager: &Arc<MockTransport>) -> CommandContext {
        CommandContext::with_transports(manager.clone(), Arc::new(MockTransport::new()), ApiVersion::Current)
    }

    fn request(app: Option<&str>) -> EventsRequest {
        EventsRequest {
            org: "acme".to_string(),
            app: app.map(String::from),
        }
    }

    fn paged() -> Arc<MockTransport> {
        Arc::new(
            MockTransport::new()
                .on(Method::GET, "/v1/organization/acme/events", 200, FIRST)
                .on(
                    Method::GET,
                    "/v1/organization/acme/events?before=1367409600000",
                    200,
                    SECOND,
                ),
        )
    }

    #[test]
    fn test_format_event() {
        let event: AuditEvent = serde_json::from_str(
            r#"{"time_in_millis_since_epoch": 1367409600000, "actor": "jo@example.com",
                "action": "add_user", "attributes": {"role": "member"}}"#,
        )
        .unwrap();

        assert_eq!(
            format_event(&event),
            r#"2013-05-01 12:00:00 UTC jo@example.com add_user  {"role":"member"}"#
        );
    }

    #[test]
    fn test_validate_requires_org() {
        assert!(validate(&EventsArgs::default()).is_err());

        let req = validate(&EventsArgs {
            org: Some("acme".to_string()),
            app: Some(" ".to_string()),
        })
        .unwrap();
        assert_eq!(req.app, None);
    }

    #[tokio::test]
    async fn test_fetches_two_pages_on_yes() {
        let manager = paged();
        let mut prompt = ScriptedPrompt::new(&["y"]);
        let mut out = Vec::new();

        run(&ctx(&manager), &mut out, &mut prompt, &request(None))
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("transfer_app web {}"));
        assert_eq!(manager.requests().len(), 2);
        // Second page has no cursor, so only one question
        assert_eq!(prompt.asked, vec!["Fetch More Results? (y/n)"]);
    }

    #[tokio::test]
    async fn test_stops_on_no() {
        let manager = paged();
        let mut prompt = ScriptedPrompt::new(&["n"]);
        let mut out = Vec::new();

        run(&ctx(&manager), &mut out, &mut prompt, &request(None))
            .await
            .unwrap();

        assert_eq!(manager.requests().len(), 1);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[tokio::test]
    async fn test_single_page_without_cursor() {
        let manager = Arc::new(MockTransport::new().on(
            Method::GET,
            "/v1/organization/acme/app/web/events",
            200,
            SECOND,
        ));
        let mut prompt = ScriptedPrompt::default();
        let mut out = Vec::new();

        run(&ctx(&manager), &mut out, &mut prompt, &request(Some("web")))
            .await
            .unwrap();

        assert_eq!(manager.requests().len(), 1);
        assert!(prompt.asked.is_empty());
    }

    #[tokio::test]
    async fn test_error_keeps_printed_pages() {
        let manager = Arc::new(
            MockTransport::new()
                .on(Method::GET, "/v1/organization/acme/events", 200, FIRST)
                .fail(
                    Method::GET,
                    "/v1/organization/acme/events?before=1367409600000",
                    "connection reset",
                ),
        );
        let mut prompt = ScriptedPrompt::new(&["yes"]);
        let mut out = Vec::new();

        run(&ctx(&manager), &mut out, &mut prompt, &request(None))
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("add_user"));
        assert_eq!(lines[1], "An error occurred: connection reset");
    }

    #[tokio::test]
    async fn test_cursor_outside_host_is_not_followed() {
        let page = r#"{"events":[{"time_in_millis_since_epoch":1367409600000,"actor":"jo@example.com",
            "action":"add_user","attributes":{}}],"older":"@evil.example.com/x"}"#;
        let manager = Arc::new(MockTransport::new().on(
            Method::GET,
            "/v1/organization/acme/events",
            200,
            page,
        ));
        let mut prompt = ScriptedPrompt::new(&["y"]);
        let mut out = Vec::new();

        run(&ctx(&manager), &mut out, &mut prompt, &request(None))
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("add_user"));
        assert!(lines[1].starts_with("An error occurred: Invalid API response: Refusing pagination cursor"));
        assert_eq!(manager.requests().len(), 1);
    }
}
