use clap::{Parser, Subcommand};

use crate::{Navigation, Portal, PortalResult, routes::Access};

/// Exit status of `open` when the path matches no route.
pub const NOT_FOUND_EXIT: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(about = "Command-line client for the FYP project portal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the persisted session, if any
    Whoami,

    /// Navigate to a portal path and print the outcome
    Open {
        /// Path such as /student/tasks or /faculty/groups/42
        path: String,
    },

    /// List the route table
    Routes,
}

/// CommandOutput
///
/// What a command prints on stdout and the status the process exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub exit_code: u8,
}

impl CommandOutput {
    fn success(lines: Vec<String>) -> Self {
        Self {
            lines,
            exit_code: 0,
        }
    }
}

/// run
///
/// Executes one command against the wired portal. Errors are returned to the
/// caller, which reports them and exits non-zero.
pub async fn run(portal: &Portal, command: Commands) -> PortalResult<CommandOutput> {
    let output = match command {
        Commands::Login { email, password } => {
            let outcome = portal.auth.login(&email, &password).await?;
            CommandOutput::success(vec![format!(
                "logged in as {} -> {}",
                outcome.session.role, outcome.home_route
            )])
        }
        Commands::Logout => {
            portal.auth.logout()?;
            CommandOutput::success(vec!["logged out".to_string()])
        }
        Commands::Whoami => {
            let line = match portal.auth.current()? {
                Some(session) => format!(
                    "{} (since {})",
                    session.role,
                    session.issued_at.to_rfc3339()
                ),
                None => "not logged in".to_string(),
            };
            CommandOutput::success(vec![line])
        }
        Commands::Open { path } => match portal.navigator.navigate(&path).await {
            Navigation::Render(rendered) => {
                let mut line = format!("render {}", rendered.view);
                for (name, value) in &rendered.params {
                    line.push_str(&format!(" {name}={value}"));
                }
                CommandOutput::success(vec![line])
            }
            Navigation::Redirect(to) => CommandOutput::success(vec![format!("redirect {to}")]),
            Navigation::NotFound => CommandOutput {
                lines: vec![format!("not found: {path}")],
                exit_code: NOT_FOUND_EXIT,
            },
        },
        Commands::Routes => {
            let lines = portal
                .navigator
                .table()
                .entries()
                .iter()
                .map(|entry| {
                    let access = match entry.access {
                        Access::Public => "public".to_string(),
                        Access::Gated(role) => role.to_string(),
                    };
                    format!("{:<24} {:<8} {}", entry.pattern.as_str(), access, entry.view)
                })
                .collect();
            CommandOutput::success(lines)
        }
    };

    Ok(output)
}
