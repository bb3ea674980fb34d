//! heroku-manager - manage Heroku organization accounts from the command line

use std::io::Write;

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;

use cli::args::GlobalOptions;
use cli::context::Settings;
use cli::prompt::TerminalPrompt;
use cli::{Cli, Commands};
use cli::{events, member, migrate, org, tag, transfer};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        if err.is_fatal() {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
        // Remote failures that escaped a command are still only reported
        println!("An error occurred: {}", err);
    }
}

/// `--debug` raises the default level; `RUST_LOG` still wins.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Flags are validated before the config file or credentials are read
    let mut settings = Settings::new(GlobalOptions::from_cli(&cli));
    let mut stdout = std::io::stdout();
    let out: &mut dyn Write = &mut stdout;
    let mut prompt = TerminalPrompt;

    match cli.command {
        Commands::Transfer(args) => {
            let req = transfer::validate(&args)?;
            transfer::run(&settings.connect()?, out, &mut prompt, &req).await
        }
        Commands::TeamToOrg(args) => {
            let req = migrate::validate_team_to_org(&args)?;
            migrate::run_team_to_org(&settings.connect()?, out, &req).await
        }
        Commands::OrgToTeam(args) => {
            let req = migrate::validate_org_to_team(&args)?;
            migrate::run_org_to_team(&settings.connect()?, out, &req).await
        }
        Commands::Migrate(args) => {
            let req = migrate::validate_migrate(&args)?;
            migrate::run_migrate(&settings.connect()?, out, &req).await
        }
        Commands::AddUser(args) => {
            let req = member::validate_add_user(&args, || settings.api_version())?;
            member::run_add_user(&settings.connect()?, out, &req).await
        }
        Commands::AddContributorToApp(args) => {
            let req = member::validate_add_contributor(&args)?;
            member::run_add_contributor(&settings.connect()?, out, &req).await
        }
        Commands::Users(args) => {
            let org = member::validate_users(&args)?;
            member::run_users(&settings.connect()?, out, &org).await
        }
        Commands::Apps(args) => {
            let org_name = org::validate_apps(&args)?;
            org::run_apps(&settings.connect()?, out, &org_name).await
        }
        Commands::Orgs => org::run_orgs(&settings.connect()?, out).await,
        Commands::Tags(args) => {
            let org = tag::validate_tags(&args)?;
            tag::run_tags(&settings.connect()?, out, &org).await
        }
        Commands::TagCreate(args) => {
            let req = tag::validate_tag(&args)?;
            tag::run_create(&settings.connect()?, out, &req).await
        }
        Commands::TagDestroy(args) => {
            let req = tag::validate_tag(&args)?;
            tag::run_destroy(&settings.connect()?, out, &req).await
        }
        Commands::TagApp(args) => {
            let req = tag::validate_tag_app(&args)?;
            tag::run_tag_app(&settings.connect()?, out, &req).await
        }
        Commands::UntagApp(args) => {
            let req = tag::validate_tag_app(&args)?;
            tag::run_untag_app(&settings.connect()?, out, &req).await
        }
        Commands::TagUser(args) => {
            let req = tag::validate_tag_user(&args)?;
            tag::run_tag_user(&settings.connect()?, out, &req).await
        }
        Commands::UntagUser(args) => {
            let req = tag::validate_tag_user(&args)?;
            tag::run_untag_user(&settings.connect()?, out, &req).await
        }
        Commands::Events(args) => {
            let req = events::validate(&args)?;
            events::run(&settings.connect()?, out, &mut prompt, &req).await
        }
        Commands::Completion { shell } => cli::completions::generate(shell, out),
    }
}
