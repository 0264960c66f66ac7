//! Application configuration options

use std::time::Duration;

/// Which data source the store reads from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuntimeMode {
    /// Serve the embedded sample reports without touching the network
    Development,

    /// Fetch the published manifest, falling back to the embedded reports
    #[default]
    Production,
}

impl RuntimeMode {
    /// Base URL of the report host for this mode
    pub fn default_base_url(&self) -> &'static str {
        match self {
            RuntimeMode::Development => "http://localhost:3000",
            RuntimeMode::Production => "https://mottysisam.github.io/brainsway-infra",
        }
    }

    /// Interpret a `PORTAL_MODE` style value; anything but "development"
    /// (or "dev") is production
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => RuntimeMode::Development,
            _ => RuntimeMode::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, RuntimeMode::Development)
    }
}

/// Report store options
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Runtime mode, fixed for the lifetime of the store
    pub mode: RuntimeMode,

    /// Base URL of the report host
    pub base_url: String,

    /// Timeout for a single HTTP request
    pub request_timeout: Duration,
}

impl StoreOptions {
    /// Options for `mode` with that mode's default base URL
    pub fn for_mode(mode: RuntimeMode) -> Self {
        Self {
            mode,
            base_url: mode.default_base_url().to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::for_mode(RuntimeMode::default())
    }
}

/// Local HTTP server options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Main application options
#[derive(Debug, Clone, Default)]
pub struct PortalOptions {
    pub store: StoreOptions,
    pub server: ServerOptions,
}
