use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use log::{error, info};

use crate::cli::AppContext;

#[derive(Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand)]
pub enum AuthSubcommands {
    /// Store the API token issued by the backend login
    Token {
        /// Token value; prompted for without echo when omitted
        token: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show login state and the authenticated profile
    Status,
}

pub async fn auth_command(args: AuthCommands, ctx: &AppContext) -> Result<()> {
    match args.command {
        AuthSubcommands::Token { token } => token_command(token, ctx),
        AuthSubcommands::Logout => {
            ctx.tokens.clear()?;
            println!("{} Logged out", "✓".bright_green());
            Ok(())
        }
        AuthSubcommands::Status => status_command(ctx).await,
    }
}

fn token_command(token: Option<String>, ctx: &AppContext) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => rpassword::prompt_password("API token: ")?,
    };

    ctx.tokens.save(&token)?;
    println!("{} Token stored at {}", "✓".bright_green(), ctx.tokens.path().display());
    Ok(())
}

async fn status_command(ctx: &AppContext) -> Result<()> {
    info!("Executing auth status command");

    println!();
    println!("  {}", "Gorque Dashboard Authentication Status".bright_blue().bold());
    println!("  {}", "══════════════════════════════════════".bright_blue());
    println!("    {}: {}", "API".dimmed(), ctx.client.base_url().cyan());

    if !ctx.tokens.is_logged_in() {
        println!("    {}: {}", "State".dimmed(), "logged out".bright_yellow());
        println!();
        println!("  {}", "Run 'gorque-dash auth token' to store a token.".dimmed());
        return Ok(());
    }

    println!("    {}: {}", "State".dimmed(), "token stored".bright_green());

    match ctx.client.profile().await {
        Ok(profile) => {
            println!("    {}: {}", "User".dimmed(), profile.email.white());
            if !profile.name.is_empty() {
                println!("    {}: {}", "Name".dimmed(), profile.name.white());
            }
            println!("  {} Token accepted by the API", "✓".bright_green());
        }
        Err(err) => {
            error!("Profile request failed: {}", err);
            println!("  {} Token check failed: {}", "✗".bright_red(), err);
        }
    }

    Ok(())
}
