//! HEALTH command - Check that the server is up.

use anyhow::Result;
use colored::Colorize;

use super::{Context, HumanReadable, OkResponse, make_request, output};

impl HumanReadable for OkResponse {
    fn print_human(&self) {
        if self.ok {
            println!("{}", "OK".green().bold());
        } else {
            println!("{}", "NOT OK".red().bold());
        }
    }
}

/// Execute the health command.
pub async fn execute(ctx: &Context) -> Result<()> {
    let response: OkResponse = make_request(ctx.client.get(ctx.url("/api/health"))).await?;
    output(&response, ctx.human)
}
