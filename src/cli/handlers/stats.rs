use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_activity, print_json};

pub async fn handle_stats(ctx: &CommandContext, activity: Option<u32>, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    let stats = ctx.service.compute_stats(&session).await?;
    let days = match activity {
        Some(n) => Some(ctx.service.activity(&session, n).await?),
        None => None,
    };

    if json {
        return print_json(&serde_json::json!({
            "stats": stats,
            "activity": days,
        }));
    }

    println!("{}", "Your moments".bold());
    println!("Total:          {}", stats.total_moments.to_string().cyan());
    println!("This week:      {}", stats.moments_this_week);
    println!("This month:     {}", stats.moments_this_month);
    println!(
        "Current streak: {} day(s)",
        stats.current_streak.to_string().green()
    );
    println!("Longest streak: {} day(s)", stats.longest_streak);

    if !stats.category_counts.is_empty() {
        println!("\n{}", "By category".bold());
        for (category, count) in &stats.category_counts {
            println!("  {:<12} {}", category, count);
        }
    }
    if !stats.collection_counts.is_empty() {
        println!("\n{}", "By collection".bold());
        for (collection, count) in &stats.collection_counts {
            println!("  {:<12} {}", collection, count);
        }
    }
    if let Some(days) = days {
        println!("\n{}", format!("Last {} days", days.len()).bold());
        print_activity(&days);
    }
    Ok(())
}
