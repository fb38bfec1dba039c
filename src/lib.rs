pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod router;
pub mod series;
pub mod store;
pub mod ui;
