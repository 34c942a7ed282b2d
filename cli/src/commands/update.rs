//! UPDATE command - Change a note's content and/or color (admin).

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{Context, HumanReadable, NoteView, make_request, output};

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// ID of the note to update
    pub id: String,

    /// New note text
    #[arg(long)]
    pub content: Option<String>,

    /// New color as #RGB or #RRGGBB
    #[arg(long)]
    pub color: Option<String>,
}

/// Request body for a partial update. Absent fields are left unchanged.
#[derive(Serialize)]
struct UpdateNoteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

#[derive(Serialize)]
#[serde(transparent)]
struct Updated(NoteView);

impl HumanReadable for Updated {
    fn print_human(&self) {
        println!("{}", "Note updated successfully!".green().bold());
        println!();
        self.0.print_block();
    }
}

/// Execute the update command.
pub async fn execute(ctx: &Context, args: UpdateArgs) -> Result<()> {
    ctx.require_token()?;
    if args.content.is_none() && args.color.is_none() {
        bail!("nothing to update; pass --content and/or --color");
    }

    let url = ctx.note_url(&args.id)?;
    let request_body = UpdateNoteRequest {
        content: args.content,
        color: args.color,
    };

    let note: NoteView = make_request(ctx.client.put(url).json(&request_body)).await?;

    output(&Updated(note), ctx.human)
}
