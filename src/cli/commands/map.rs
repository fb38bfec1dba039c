use anyhow::Result;
use clap::Args;
use colored::*;
use serde_json::json;

use crate::cli::AppContext;
use crate::store::MapStore;
use crate::ui::{Spinner, format_date, format_time};

#[derive(Args)]
pub struct MapCommands {
    /// Device identifier
    #[arg(short, long)]
    pub device: String,
    /// Session identifier
    #[arg(short, long)]
    pub session: String,
    /// Also print every track point
    #[arg(long)]
    pub track: bool,
    /// Print center, bounds and track as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn map_command(args: MapCommands, ctx: &AppContext) -> Result<()> {
    ctx.require_login()?;

    let mut store = MapStore::new(ctx.client.clone());
    {
        let _spinner = Spinner::follow("Loading map data", store.subscribe());
        store.fetch_map_data(&args.device, &args.session).await;
    }

    if let Some(err) = store.error() {
        anyhow::bail!("Failed to load map data: {}", err);
    }

    let data_map = store.data_map();

    if args.json {
        let output = json!({
            "center": data_map.center,
            "bounds": store.bounds(),
            "coords": data_map.coords,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let first = data_map.data.keys().next().map(String::as_str);
    let last = data_map.data.keys().next_back().map(String::as_str);

    println!(
        "{} {} / {}",
        "Session".bright_white().bold(),
        args.device.bright_green(),
        args.session.cyan()
    );
    println!(
        "  {}: {} {} - {}",
        "Recorded".dimmed(),
        format_date(first),
        format_time(first),
        format_time(last)
    );
    println!(
        "  {}: {:.6}, {:.6}",
        "Center".dimmed(),
        data_map.center[0],
        data_map.center[1]
    );

    match store.bounds() {
        Some(bounds) => {
            println!(
                "  {}: lat {:.6}..{:.6}, lon {:.6}..{:.6}",
                "Bounds".dimmed(),
                bounds.min_lat,
                bounds.max_lat,
                bounds.min_lon,
                bounds.max_lon
            );
            println!("  {}: {} points", "Track".dimmed(), store.track_len());
        }
        None => println!("  {}", "No GPS fixes in this session.".bright_yellow()),
    }

    if args.track {
        for [lat, lon] in &data_map.coords {
            println!("    {:.6}, {:.6}", lat, lon);
        }
    }

    Ok(())
}
