pub mod auth;
pub mod chart;
pub mod config;
pub mod devices;
pub mod map;
pub mod route;

pub use auth::{AuthCommands, auth_command};
pub use chart::{ChartCommands, chart_command};
pub use config::{ConfigCommands, config_command};
pub use devices::{SessionsCommands, devices_command, sessions_command};
pub use map::{MapCommands, map_command};
pub use route::{RouteCommands, route_command};
