use super::commands::{AuthCommands, ChartCommands, ConfigCommands, MapCommands, RouteCommands, SessionsCommands};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gorque-dash")]
#[command(about = "A CLI dashboard for vehicle telemetry sessions")]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// API token management
    Auth(AuthCommands),
    /// List devices of the logged-in user
    Devices,
    /// List recorded sessions of a device
    Sessions(SessionsCommands),
    /// Show chart series of a session
    Chart(ChartCommands),
    /// Show the GPS track of a session
    Map(MapCommands),
    /// Check access to a dashboard route
    Route(RouteCommands),
    /// Application settings
    Config(ConfigCommands),
}
