use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_json, print_moment_list};

pub async fn handle_list(
    ctx: &CommandContext,
    category: Option<String>,
    collection: Option<String>,
    json: bool,
) -> Result<()> {
    let session = ctx.session().await?;

    let moments = if let Some(category) = category {
        let query = ctx.service.filter_by_category(&session, &category).await?;
        if query.is_degraded() && !json {
            eprintln!(
                "{} category index unavailable, filtered all moments locally",
                "warning:".yellow()
            );
        }
        if json {
            return print_json(&query);
        }
        query.moments
    } else if let Some(collection) = collection {
        ctx.service.filter_by_collection(&session, &collection).await?
    } else {
        ctx.service.list(&session).await?
    };

    if json {
        print_json(&moments)
    } else {
        print_moment_list(&moments);
        Ok(())
    }
}
