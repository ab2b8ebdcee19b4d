use crate::model::{MediaRef, NewMoment};
use crate::validation;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::print_json;

/// Parameters for create operation
pub struct CreateParams {
    pub content: String,
    pub category: Option<String>,
    pub collection: Option<String>,
    pub tag: Vec<String>,
    pub mood: Option<String>,
    pub media: Option<String>,
    pub json: bool,
}

pub async fn handle_create(ctx: &CommandContext, params: CreateParams) -> Result<()> {
    // Same cap as the capture screen.
    validation::validate_content_length(&params.content)?;

    let category = params
        .category
        .unwrap_or_else(|| ctx.config.smile.default_category.clone());
    let new = NewMoment::new(params.content)
        .with_category(category)
        .with_collection(params.collection)
        .with_tags(params.tag)
        .with_mood(params.mood)
        .with_media(params.media.map(MediaRef::from_path));

    let session = ctx.session().await?;
    let moment = ctx.service.create(&session, new).await?;

    if params.json {
        print_json(&moment)?;
    } else {
        println!(
            "{} {} {}",
            "Saved".green(),
            moment.id.cyan(),
            moment.content
        );
    }
    Ok(())
}
