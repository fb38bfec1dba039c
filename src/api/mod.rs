//! Telemetry REST API module
//!
//! Client for the telemetry backend: chart configuration, session data,
//! devices, sessions and the user profile, with retries for transient
//! failures.

pub mod client;
pub mod constants;
pub mod models;
pub mod resilience;

pub use client::TelemetryClient;
pub use models::{ChartConfiguration, ChartVariable, Coordinate, Device, Profile, Record, Session, SessionData, SessionRecords};
pub use resilience::{RetryConfig, RetryPolicy, RetryableError};
