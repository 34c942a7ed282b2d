//! LOGIN command - Exchange the admin password for a token.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{Context, HumanReadable, make_request, output};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Admin password
    #[arg(long, env = "STICKYNOTES_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

/// Token issued by the server, valid for seven days.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

impl HumanReadable for LoginResponse {
    fn print_human(&self) {
        println!("{}", "Logged in as admin.".green().bold());
        println!();
        println!("  {} {}", "Token:".cyan(), self.token);
        println!();
        println!(
            "  {}",
            "Export it for admin commands: STICKYNOTES_TOKEN=<token>".dimmed()
        );
    }
}

/// Execute the login command.
pub async fn execute(ctx: &Context, args: LoginArgs) -> Result<()> {
    let request_body = LoginRequest {
        password: &args.password,
    };

    let response: LoginResponse = make_request(
        ctx.client
            .post(ctx.url("/api/admin/login"))
            .json(&request_body),
    )
    .await?;

    output(&response, ctx.human)
}
