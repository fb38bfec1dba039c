use anyhow::Result;
use clap::Args;
use colored::*;

use crate::cli::AppContext;
use crate::ui::format_datetime;

#[derive(Args)]
pub struct SessionsCommands {
    /// Device identifier
    #[arg(short, long)]
    pub device: String,
}

pub async fn devices_command(ctx: &AppContext) -> Result<()> {
    ctx.require_login()?;

    let devices = ctx.client.list_devices().await?;
    if devices.is_empty() {
        println!("{}", "No devices registered yet.".bright_yellow());
        return Ok(());
    }

    println!("{}", format!("{} device(s)", devices.len()).bright_white().bold());
    for device in &devices {
        let label = if device.profile_name.is_empty() {
            String::new()
        } else {
            format!(" ({})", device.profile_name)
        };
        println!(
            "  {}{}  {} {}",
            device.device_id.bright_green(),
            label,
            "last seen".dimmed(),
            format_datetime(device.last_seen.as_ref())
        );
    }

    Ok(())
}

pub async fn sessions_command(args: SessionsCommands, ctx: &AppContext) -> Result<()> {
    ctx.require_login()?;

    let sessions = ctx.client.list_sessions(&args.device).await?;
    if sessions.is_empty() {
        println!("{}", format!("No sessions for device {}.", args.device).bright_yellow());
        return Ok(());
    }

    println!("{}", format!("{} session(s) for {}", sessions.len(), args.device).bright_white().bold());
    for session in &sessions {
        let marker = if session.is_active { "●".bright_green() } else { "○".white() };
        println!(
            "  {} {}  {} → {}  {} records",
            marker,
            session.session_id.cyan(),
            format_datetime(session.start_time.as_ref()),
            format_datetime(session.end_time.as_ref()),
            session.total_records
        );
    }

    Ok(())
}
