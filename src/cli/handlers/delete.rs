use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{confirm, print_json};

pub async fn handle_delete(ctx: &CommandContext, id: String, force: bool, json: bool) -> Result<()> {
    if !force && !json && !confirm(&format!("Delete {} permanently?", id.cyan()))? {
        println!("Cancelled.");
        return Ok(());
    }

    let session = ctx.session().await?;
    ctx.service.delete(&session, &id).await?;

    if json {
        print_json(&serde_json::json!({
            "action": "deleted",
            "id": id
        }))
    } else {
        println!("{} {}", "Deleted".red(), id.cyan());
        Ok(())
    }
}
