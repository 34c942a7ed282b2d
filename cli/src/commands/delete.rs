//! DELETE command - Remove a note (admin).

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{Context, HumanReadable, OkResponse, make_request, output};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// ID of the note to delete
    pub id: String,

    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Result of a delete, echoing the removed ID.
#[derive(Debug, Serialize)]
pub struct DeleteNoteResponse {
    pub id: String,
    pub ok: bool,
}

impl HumanReadable for DeleteNoteResponse {
    fn print_human(&self) {
        println!("{}", "Note deleted successfully!".green().bold());
        println!();
        println!("  {} {}", "ID:".cyan(), self.id);
    }
}

/// Execute the delete command.
pub async fn execute(ctx: &Context, args: DeleteArgs) -> Result<()> {
    ctx.require_token()?;

    // Confirmation prompt for interactive use
    if ctx.human && !args.yes {
        eprint!(
            "{} Are you sure you want to delete note {}? [y/N] ",
            "Warning:".yellow().bold(),
            args.id
        );

        use std::io::Write;
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let url = ctx.note_url(&args.id)?;
    let response: OkResponse = make_request(ctx.client.delete(url)).await?;

    output(
        &DeleteNoteResponse {
            id: args.id,
            ok: response.ok,
        },
        ctx.human,
    )
}
