use crate::cli::commands::OnboardingCommands;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub async fn handle_onboarding(ctx: &CommandContext, action: OnboardingCommands) -> Result<()> {
    match action {
        OnboardingCommands::Complete => {
            ctx.sessions.mark_onboarding_completed().await?;
            println!("{} onboarding marked complete", "Done".green());
        }
        OnboardingCommands::Status => {
            if ctx.sessions.has_completed_onboarding().await? {
                println!("Onboarding: {}", "complete".green());
            } else {
                println!("Onboarding: {}", "pending".yellow());
            }
        }
        OnboardingCommands::Reset => {
            ctx.sessions.reset_onboarding_status().await?;
            println!("{} onboarding status", "Reset".yellow());
        }
    }
    Ok(())
}
