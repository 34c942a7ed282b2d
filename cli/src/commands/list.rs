//! LIST command - List all notes, newest first.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{Context, HumanReadable, NoteView, format_timestamp, make_request, output, truncate};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Show full note content instead of a one-line preview
    #[arg(long)]
    pub full: bool,
}

/// Notes as returned by the server.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct NoteList {
    pub notes: Vec<NoteView>,
    #[serde(skip)]
    full: bool,
}

impl HumanReadable for NoteList {
    fn print_human(&self) {
        println!("{}", "Sticky Notes".green().bold());
        println!("{}", "=".repeat(60));
        println!();

        if self.notes.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }

        for note in &self.notes {
            if self.full {
                note.print_block();
                println!();
            } else {
                let preview = note.content.replace('\n', " ");
                println!(
                    "  {} {} {}",
                    note.id.bold(),
                    format!("[{}]", note.color).dimmed(),
                    truncate(&preview, 50)
                );
                println!("    {}", format_timestamp(&note.created_at).dimmed());
            }
        }

        println!();
        println!("  {} {}", "Total:".cyan(), self.notes.len());
    }
}

/// Execute the list command.
pub async fn execute(ctx: &Context, args: ListArgs) -> Result<()> {
    let notes: Vec<NoteView> = make_request(ctx.client.get(ctx.url("/api/notes"))).await?;
    let response = NoteList {
        notes,
        full: args.full,
    };
    output(&response, ctx.human)
}
