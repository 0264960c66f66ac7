//! Settings file management

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::options::{PortalOptions, RuntimeMode, ServerOptions, StoreOptions};
use crate::errors::PortalError;
use crate::filesys::file::File;
use crate::logs::{LogLevel, LogOptions};

/// Portal settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit JSON logs
    #[serde(default)]
    pub log_json: bool,

    /// Serve the embedded sample reports instead of the manifest
    #[serde(default)]
    pub development_mode: bool,

    /// Report host; defaults to the mode's built-in URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Local API server configuration
    #[serde(default)]
    pub server: ServerSettings,
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_json: false,
            development_mode: false,
            base_url: None,
            request_timeout_secs: default_request_timeout(),
            server: ServerSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub async fn load(file: &File) -> Result<Self, PortalError> {
        debug!("Reading settings from {}", file.path().display());
        let settings: Settings = file.read_json().await?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values no request could succeed with
    pub fn validate(&self) -> Result<(), PortalError> {
        if self.request_timeout_secs == 0 {
            return Err(PortalError::ConfigError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.base_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(PortalError::ConfigError("base_url must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn runtime_mode(&self) -> RuntimeMode {
        if self.development_mode {
            RuntimeMode::Development
        } else {
            RuntimeMode::Production
        }
    }

    /// Convert into application options
    pub fn to_options(&self) -> PortalOptions {
        let mode = self.runtime_mode();
        PortalOptions {
            store: StoreOptions {
                mode,
                base_url: self
                    .base_url
                    .clone()
                    .unwrap_or_else(|| mode.default_base_url().to_string()),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
            server: ServerOptions {
                host: self.server.host.clone(),
                port: self.server.port,
            },
        }
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            log_level: self.log_level,
            json_format: self.log_json,
        }
    }
}

/// Local API server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}
