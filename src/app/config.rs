use std::env;
use std::path::PathBuf;

use reqwest::Url;

use crate::app::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/tasks";
pub const DEFAULT_LOG_FILE: &str = "task_client.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub log_file: PathBuf,
}

impl Config {
    // Read from the process environment (call dotenv() first to pick up .env)
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let api_url = lookup("TASKS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        validate_api_url(&api_url)?;

        let log_file = lookup("TASKS_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Config { api_url, log_file })
    }
}

fn validate_api_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}
