use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Servers
    pub central_server_url: String,
    pub local_server_url: String,

    // Panel settings
    pub default_language: String,
    pub show_beta: bool,

    // Job polling
    pub poll_interval_ms: u64,

    // Transport
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Servers
            central_server_url: std::env::var("CENTRAL_SERVER_URL")
                .context("CENTRAL_SERVER_URL not set")?,
            local_server_url: std::env::var("LOCAL_SERVER_URL")
                .context("LOCAL_SERVER_URL not set")?,

            // Panel settings
            default_language: std::env::var("DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),
            show_beta: std::env::var("SHOW_BETA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),

            // Job polling
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),

            // Transport
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}
