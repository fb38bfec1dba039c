use anyhow::Result;
use clap::Parser;
use log::info;

use gorque_dash::cli::commands::{
    auth_command, chart_command, config_command, devices_command, map_command, route_command,
    sessions_command,
};
use gorque_dash::cli::{AppContext, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("gorque-dash.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("Starting gorque-dash");
    let ctx = AppContext::load()?;

    match cli.command {
        Commands::Auth(args) => auth_command(args, &ctx).await,
        Commands::Devices => devices_command(&ctx).await,
        Commands::Sessions(args) => sessions_command(args, &ctx).await,
        Commands::Chart(args) => chart_command(args, &ctx).await,
        Commands::Map(args) => map_command(args, &ctx).await,
        Commands::Route(args) => route_command(args, &ctx),
        Commands::Config(args) => config_command(args, &ctx),
    }
}
