use anyhow::Result;

use super::CommandContext;
use super::utils::{print_json, print_moment_list};

pub async fn handle_search(ctx: &CommandContext, query: String, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    let results = ctx.service.search(&session, &query).await?;

    if json {
        print_json(&results)
    } else {
        println!("Found {} results for '{}':\n", results.len(), query);
        print_moment_list(&results);
        Ok(())
    }
}
