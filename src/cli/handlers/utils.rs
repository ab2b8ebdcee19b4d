use crate::model::{DailyActivity, MediaType, Moment};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Ask a yes/no question on stdout; anything but `y` is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn format_media(media_type: MediaType) -> colored::ColoredString {
    match media_type {
        MediaType::Text => "text".dimmed(),
        MediaType::Photo => "photo".blue(),
        MediaType::Video => "video".magenta(),
        MediaType::Audio => "audio".yellow(),
    }
}

pub fn print_moment(moment: &Moment) {
    println!("{} {}", moment.id.cyan().bold(), moment.content.bold());
    println!("Type:       {}", format_media(moment.media_type));
    if let Some(url) = &moment.media_url {
        println!("Media:      {}", url);
    }
    if moment.has_category() {
        println!("Category:   {}", moment.category.green());
    }
    if let Some(collection) = &moment.collection {
        println!("Collection: {}", collection.blue());
    }
    if let Some(mood) = &moment.mood {
        println!("Mood:       {}", mood);
    }
    if !moment.tags.is_empty() {
        println!("Tags:       {}", moment.tags.join(", ").magenta());
    }
    if moment.likes > 0 {
        println!("Likes:      {}", moment.likes);
    }
    println!("Created:    {}", moment.created_at.format("%Y-%m-%d %H:%M"));
}

pub fn print_moment_list(moments: &[Moment]) {
    if moments.is_empty() {
        println!("No moments yet.");
        return;
    }

    for moment in moments {
        let category = if moment.has_category() {
            format!("[{}]", moment.category).green()
        } else {
            "".normal()
        };
        println!(
            "{} {} {} {} {}",
            moment.id.cyan(),
            moment.created_at.format("%Y-%m-%d").to_string().dimmed(),
            format_media(moment.media_type),
            category,
            first_line(&moment.content)
        );
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// One row of heat cells, oldest day first.
pub fn print_activity(days: &[DailyActivity]) {
    let cells: String = days
        .iter()
        .map(|d| match d.level {
            0 => "·".dimmed().to_string(),
            1 => "▪".green().to_string(),
            2 => "■".green().to_string(),
            3 => "■".bright_green().to_string(),
            _ => "█".bright_green().to_string(),
        })
        .collect();
    println!("{}", cells);
}
