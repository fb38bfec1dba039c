//! Endpoints and defaults for the telemetry REST API

/// API root used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the configured API root
pub const API_URL_ENV: &str = "GORQUE_API_URL";

pub const CONFIGURATION_ENDPOINT: &str = "configuration";
pub const DATA_ENDPOINT: &str = "data";
pub const DEVICE_ENDPOINT: &str = "device";
pub const SESSION_ENDPOINT: &str = "session";
pub const PROFILE_ENDPOINT: &str = "profile";

/// Query parameter names understood by the backend
pub mod params {
    pub const DEVICE_ID: &str = "device-id";
    pub const SESSION_ID: &str = "session-id";
}

pub const USER_AGENT: &str = concat!("gorque-dash/", env!("CARGO_PKG_VERSION"));

/// Join the API root and an endpoint, tolerating a trailing slash on the root
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_once() {
        assert_eq!(endpoint("http://host/api", DATA_ENDPOINT), "http://host/api/data");
        assert_eq!(endpoint("http://host/api/", DATA_ENDPOINT), "http://host/api/data");
    }
}
