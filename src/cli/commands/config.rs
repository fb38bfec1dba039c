use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::cli::AppContext;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the effective settings
    Show,
    /// Set the API root URL, e.g. https://telemetry.example/api
    SetUrl { url: String },
    /// Set how often a failing request is attempted
    SetRetries { attempts: u32 },
}

pub fn config_command(args: ConfigCommands, ctx: &AppContext) -> Result<()> {
    match args.command {
        ConfigSubcommands::Show => {
            println!("{}", "Settings".bright_white().bold());
            println!("  {}: {}", "Config file".dimmed(), Config::get_config_path()?.display());
            println!("  {}: {}", "API URL".dimmed(), ctx.config.api_url.cyan());
            println!(
                "  {}: {}s",
                "Request timeout".dimmed(),
                ctx.config.settings.request_timeout_secs
            );
            println!("  {}: {}", "Attempts".dimmed(), ctx.config.settings.max_retries);
            Ok(())
        }
        ConfigSubcommands::SetUrl { url } => {
            // Persist the file's values, not ones overridden from the environment
            let mut config = Config::load_from(&Config::get_config_path()?)?;
            config.set_api_url(&url)?;
            config.save()?;
            println!("{} API URL set to {}", "✓".bright_green(), config.api_url.cyan());
            Ok(())
        }
        ConfigSubcommands::SetRetries { attempts } => {
            if attempts == 0 {
                anyhow::bail!("At least one attempt is required");
            }
            let mut config = Config::load_from(&Config::get_config_path()?)?;
            config.settings.max_retries = attempts;
            config.save()?;
            println!("{} Requests are attempted up to {} time(s)", "✓".bright_green(), attempts);
            Ok(())
        }
    }
}
