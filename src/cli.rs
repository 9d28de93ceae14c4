use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use directories::BaseDirs;
use pulse_jira::auth::create_jira_client_from_netrc;
use pulse_jira::{ClientConfig, JiraClient, UserSearchParams};
use serde::Serialize;
use tracing::info;

/// Query a Jira instance from the command line
#[derive(Parser)]
#[command(name = "pulse", version, about = "Query Jira issues, users and activity streams")]
#[command(
  long_about = "Query Jira issues, users and activity streams.\n\n\
                The instance is read from JIRA_HOST (JIRA_API_PATH, JIRA_ACTIVITY_PATH and\n\
                JIRA_TIMEOUT_SECS are optional). Credentials are read from ~/.netrc."
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Check that the configured credentials are accepted
  Check,

  /// Show a single issue
  #[command(alias = "i")]
  Issue {
    /// Issue key or id (e.g., PROJ-123)
    key: String,
  },

  /// List issues assigned to a user
  Assigned {
    /// Login of the assignee
    username: String,

    /// Page size
    #[arg(long, default_value_t = 50)]
    max_results: u32,

    /// Zero-based offset of the first issue
    #[arg(long, default_value_t = 0)]
    start_at: u32,
  },

  /// Show a single user
  User {
    /// Login of the user
    username: String,
  },

  /// Search users by login, name or email
  Users {
    /// Search string
    query: String,

    /// Page size (at most 1000)
    #[arg(long, default_value_t = 50)]
    max_results: u32,

    /// Zero-based offset of the first user
    #[arg(long, default_value_t = 0)]
    start_at: u32,

    /// Include inactive users
    #[arg(long)]
    include_inactive: bool,

    /// Leave out active users
    #[arg(long)]
    exclude_active: bool,
  },

  /// Show the activity stream of a user, or any activity feed URL
  Activity {
    /// Login of the user
    #[arg(required_unless_present = "url", conflicts_with = "url")]
    username: Option<String>,

    /// Fetch this feed URL instead, e.g. the `next` link of an earlier page
    #[arg(long)]
    url: Option<String>,
  },

  /// Add a comment to an issue
  Comment {
    /// Issue key or id (e.g., PROJ-123)
    key: String,

    /// Comment text
    body: String,
  },
}

impl Cli {
  pub async fn run(self) -> Result<()> {
    let client = connect()?;

    match self.command {
      Commands::Check => {
        let connected = client.test_connection().await?;
        print_json(&serde_json::json!({
          "host": client.config().base_url,
          "username": client.username(),
          "connected": connected,
        }))?;
        if !connected {
          bail!("Jira rejected the credentials for {}", client.username());
        }
      }
      Commands::Issue { key } => {
        let issue = client
          .get_issue(&key)
          .await
          .with_context(|| format!("Failed to fetch issue {key}"))?;
        print_json(&issue)?;
      }
      Commands::Assigned {
        username,
        max_results,
        start_at,
      } => {
        let issues = client
          .search_issues_by_assignee(&username, max_results, start_at)
          .await
          .with_context(|| format!("Failed to search issues assigned to {username}"))?;
        print_json(&issues)?;
      }
      Commands::User { username } => {
        let user = client
          .get_user(&username)
          .await
          .with_context(|| format!("Failed to fetch user {username}"))?;
        print_json(&user)?;
      }
      Commands::Users {
        query,
        max_results,
        start_at,
        include_inactive,
        exclude_active,
      } => {
        let params = UserSearchParams {
          start_at,
          max_results,
          include_active: !exclude_active,
          include_inactive,
          ..UserSearchParams::new(&query)
        };
        let users = client
          .search_users(&params)
          .await
          .with_context(|| format!("Failed to search users matching {query}"))?;
        print_json(&users)?;
      }
      Commands::Activity { username, url } => {
        let feed = match (username, url) {
          (_, Some(url)) => client.get_activity(&url).await,
          (Some(username), None) => client.get_user_activity(&username).await,
          (None, None) => bail!("Provide a username or --url"),
        }
        .context("Failed to fetch activity stream")?;
        print_json(&feed)?;
      }
      Commands::Comment { key, body } => {
        client
          .add_comment(&key, &body)
          .await
          .with_context(|| format!("Failed to comment on {key}"))?;
        info!("Added comment to {key}");
        print_json(&serde_json::json!({ "issue": key, "commented": true }))?;
      }
    }

    Ok(())
  }
}

fn connect() -> Result<JiraClient> {
  let config = ClientConfig::from_env()?;
  let base_dirs = BaseDirs::new().context("Failed to resolve home directory")?;

  create_jira_client_from_netrc(base_dirs.home_dir(), config).context("Failed to create Jira client from credentials")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  let mut stdout = io::stdout().lock();
  serde_json::to_writer_pretty(&mut stdout, value)?;
  writeln!(stdout)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_activity_requires_user_or_url() {
    assert!(Cli::try_parse_from(["pulse", "activity"]).is_err());
    assert!(Cli::try_parse_from(["pulse", "activity", "bob", "--url", "https://x"]).is_err());
    assert!(Cli::try_parse_from(["pulse", "activity", "--url", "https://x"]).is_ok());
  }

  #[test]
  fn test_users_defaults() {
    let cli = Cli::try_parse_from(["pulse", "-vv", "users", "jane"]).unwrap();
    assert_eq!(cli.verbose, 2);
    match cli.command {
      Commands::Users {
        max_results,
        start_at,
        include_inactive,
        exclude_active,
        ..
      } => {
        assert_eq!((max_results, start_at), (50, 0));
        assert!(!include_inactive);
        assert!(!exclude_active);
      }
      _ => panic!("expected users command"),
    }
  }
}
