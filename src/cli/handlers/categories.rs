use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::print_json;

pub async fn handle_categories(ctx: &CommandContext, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    let categories = ctx.service.categories(&session).await?;

    if json {
        return print_json(&categories);
    }
    for category in &categories {
        println!(
            "{:<10} {:<10} {} {}",
            category.id.cyan(),
            category.name,
            category.color.dimmed(),
            category.icon.dimmed()
        );
    }
    Ok(())
}
