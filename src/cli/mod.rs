//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod completions;
pub mod context;
pub mod events;
pub mod member;
pub mod migrate;
pub mod org;
pub mod outcome;
pub mod prompt;
pub mod tag;
pub mod transfer;
pub mod validate;

pub use args::OutputFormat;
pub use context::CommandContext;

use crate::client::models::ApiVersion;

/// heroku-manager - manage apps, members and tags of Heroku organization accounts
#[derive(Parser, Debug)]
#[command(name = "heroku-manager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format for listings (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "MANAGER_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "MANAGER_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Management API host
    #[arg(long, global = true, env = "MANAGER_HOST", hide_env = true)]
    pub manager_host: Option<String>,

    /// Platform API host
    #[arg(long, global = true, env = "MANAGER_PLATFORM_HOST", hide_env = true)]
    pub platform_host: Option<String>,

    /// Management API revision (current, legacy)
    #[arg(long, global = true, env = "MANAGER_API_VERSION", hide_env = true)]
    pub api_version: Option<ApiVersion>,

    /// Enable debug logging
    #[arg(long, global = true, env = "MANAGER_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transfer an app to or from an organization
    Transfer(transfer::TransferArgs),

    /// Transfer all apps of a team to an organization
    #[command(alias = "team_to_org")]
    TeamToOrg(migrate::TeamOrgArgs),

    /// Transfer all apps of an organization to a team
    #[command(alias = "org_to_team")]
    OrgToTeam(migrate::TeamOrgArgs),

    /// Move every app of a team into an organization, one app at a time
    Migrate(migrate::MigrateArgs),

    /// Add a user to an organization
    #[command(alias = "add_user")]
    AddUser(member::AddUserArgs),

    /// Give a user access to one organization app
    #[command(alias = "add_contributor_to_app")]
    AddContributorToApp(member::AddContributorArgs),

    /// List the members of an organization
    Users(member::UsersArgs),

    /// List the apps of an organization
    Apps(org::AppsArgs),

    /// List the organizations you belong to
    Orgs,

    /// Show the tags of an organization and their assignments
    Tags(tag::TagsArgs),

    /// Create a tag
    #[command(alias = "tag_create")]
    TagCreate(tag::TagArgs),

    /// Destroy a tag; it must not be assigned to any app or user
    #[command(alias = "tag_destroy")]
    TagDestroy(tag::TagArgs),

    /// Tag an app
    #[command(alias = "tag_app")]
    TagApp(tag::TagAppArgs),

    /// Remove a tag from an app
    #[command(alias = "untag_app")]
    UntagApp(tag::TagAppArgs),

    /// Tag a user
    #[command(alias = "tag_user")]
    TagUser(tag::TagUserArgs),

    /// Remove a tag from a user
    #[command(alias = "untag_user")]
    UntagUser(tag::TagUserArgs),

    /// Page through the audit events of an organization
    Events(events::EventsArgs),

    /// Generate shell completions (static)
    #[command(after_help = "\
Examples:
  bash:   heroku-manager completion bash > /etc/bash_completion.d/heroku-manager
  zsh:    heroku-manager completion zsh > \"${fpath[1]}/_heroku-manager\"
  fish:   heroku-manager completion fish > ~/.config/fish/completions/heroku-manager.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
