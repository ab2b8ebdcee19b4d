use crate::auth::{AuthClient, RegisterForm};
use crate::cli::commands::AuthCommands;
use crate::session::StoredUser;
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use super::CommandContext;
use super::utils::print_json;

pub async fn handle_auth(ctx: &CommandContext, action: AuthCommands) -> Result<()> {
    match action {
        AuthCommands::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                display_name: name,
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            let data = AuthClient::new(ctx.api()?).register(&form).await?;
            ctx.sessions
                .store_user_data(&data.user, &data.access_token)
                .await?;
            println!(
                "{} as {} ({})",
                "Registered".green(),
                data.user.display_name.bold(),
                data.user.email
            );
        }
        AuthCommands::Login { email, password } => {
            let data = AuthClient::new(ctx.api()?).login(&email, &password).await?;
            ctx.sessions
                .store_user_data(&data.user, &data.access_token)
                .await?;
            println!(
                "{} as {} ({})",
                "Signed in".green(),
                data.user.display_name.bold(),
                data.user.email
            );
        }
        AuthCommands::Logout => {
            ctx.sessions.clear_stored_data().await?;
            println!("{}", "Signed out".yellow());
        }
        AuthCommands::Whoami { json } => {
            let user = ctx.sessions.current_user().await?;
            if json {
                return print_json(&user);
            }
            let backend = ctx.service.backend_kind();
            match user {
                Some(user) => {
                    let token = if ctx.session().await?.is_authenticated() {
                        "stored".green()
                    } else {
                        "missing, log in again".red()
                    };
                    println!("{} {}", user.display_name.bold(), user.email);
                    println!("Id:       {}", user.id.cyan());
                    if !user.provider.is_empty() {
                        println!("Provider: {}", user.provider);
                    }
                    println!("Token:    {}", token);
                    println!("Backend:  {}", backend);
                }
                None => println!("Not signed in ({} backend).", backend),
            }
        }
        AuthCommands::UseToken {
            token,
            user_id,
            email,
        } => {
            let now = Utc::now();
            let user = StoredUser {
                id: user_id,
                display_name: email.clone(),
                email,
                photo_url: None,
                provider: "token".to_string(),
                onboarded: false,
                last_login: Some(now),
                created_at: now,
                updated_at: now,
            };
            crate::validation::validate_id(&user.id)?;
            ctx.sessions.store_user_data(&user, token.trim()).await?;
            println!("{} token for {}", "Stored".green(), user.id.cyan());
        }
    }
    Ok(())
}
