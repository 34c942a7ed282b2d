//! CREATE command - Post a new note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{Context, HumanReadable, NoteView, make_request, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Note text (1-1000 characters after trimming)
    pub content: String,

    /// Color as #RGB or #RRGGBB; the server default is used if invalid
    #[arg(long)]
    pub color: Option<String>,
}

/// Request body for creating a note.
#[derive(Serialize)]
struct CreateNoteRequest {
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

#[derive(Serialize)]
#[serde(transparent)]
struct Created(NoteView);

impl HumanReadable for Created {
    fn print_human(&self) {
        println!("{}", "Note created successfully!".green().bold());
        println!();
        self.0.print_block();
    }
}

/// Execute the create command.
pub async fn execute(ctx: &Context, args: CreateArgs) -> Result<()> {
    let request_body = CreateNoteRequest {
        content: args.content,
        color: args.color,
    };

    let note: NoteView =
        make_request(ctx.client.post(ctx.url("/api/notes")).json(&request_body)).await?;

    output(&Created(note), ctx.human)
}
