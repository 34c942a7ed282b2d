//! Command-line client for the sticky notes service.
//!
//! Commands:
//! - health: Check the server is up
//! - list: List all notes, newest first
//! - create: Post a new note
//! - update: Change a note's content or color (admin)
//! - delete: Remove a note (admin)
//! - login: Exchange the admin password for a token
//!
//! Configuration via environment:
//! - STICKYNOTES_URL: Base URL of the server (default: http://localhost:3000)
//! - STICKYNOTES_TOKEN: Admin Bearer token for update and delete
//! - STICKYNOTES_PASSWORD: Admin password for login

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    Context, create::CreateArgs, delete::DeleteArgs, list::ListArgs, login::LoginArgs,
    update::UpdateArgs,
};

/// Sticky notes CLI
///
/// JSON output by default; pass --human for formatted output.
#[derive(Parser)]
#[command(name = "stickynotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Sticky notes server URL
    #[arg(
        long,
        env = "STICKYNOTES_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    /// Admin Bearer token
    #[arg(long, env = "STICKYNOTES_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is up
    Health,

    /// List all notes
    List(ListArgs),

    /// Create a new note
    Create(CreateArgs),

    /// Update a note's content and/or color
    Update(UpdateArgs),

    /// Delete a note
    Delete(DeleteArgs),

    /// Log in as admin and print a token
    Login(LoginArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let ctx = match Context::new(&cli.url, cli.token.as_deref(), cli.human) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Health => commands::health::execute(&ctx).await,
        Commands::List(args) => commands::list::execute(&ctx, args).await,
        Commands::Create(args) => commands::create::execute(&ctx, args).await,
        Commands::Update(args) => commands::update::execute(&ctx, args).await,
        Commands::Delete(args) => commands::delete::execute(&ctx, args).await,
        Commands::Login(args) => commands::login::execute(&ctx, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from([
            "stickynotes",
            "--token",
            "t",
            "update",
            "abc123",
            "--color",
            "#fff",
        ])
        .unwrap();
        assert_eq!(cli.token.as_deref(), Some("t"));
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.id, "abc123");
                assert_eq!(args.color.as_deref(), Some("#fff"));
                assert!(args.content.is_none());
            }
            _ => panic!("expected update"),
        }
    }
}
