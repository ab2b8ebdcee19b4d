use anyhow::Result;

use super::CommandContext;
use super::utils::{print_json, print_moment};

pub async fn handle_show(ctx: &CommandContext, id: String, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    let moment = ctx.service.get_by_id(&session, &id).await?;

    if json {
        print_json(&moment)
    } else {
        print_moment(&moment);
        Ok(())
    }
}
