use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub leaderboard_limit: u32,
    pub admin_page_size: u32,
    pub api_token: Option<SecretString>,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            api_base_url: env::var("STRUCTOPIA_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout_secs: env::var("STRUCTOPIA_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
            leaderboard_limit: env::var("STRUCTOPIA_LEADERBOARD_LIMIT")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(10),
            admin_page_size: env::var("STRUCTOPIA_ADMIN_PAGE_SIZE")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(10),
            api_token: env::var("STRUCTOPIA_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .map(SecretString::from),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(AppError::ValidationError(format!(
                "STRUCTOPIA_API_URL must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(AppError::ValidationError(
                "STRUCTOPIA_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        for (name, value) in [
            ("STRUCTOPIA_LEADERBOARD_LIMIT", self.leaderboard_limit),
            ("STRUCTOPIA_ADMIN_PAGE_SIZE", self.admin_page_size),
        ] {
            if !(1..=100).contains(&value) {
                return Err(AppError::ValidationError(format!(
                    "{} must be between 1 and 100, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_secs: 1,
            leaderboard_limit: 5,
            admin_page_size: 10,
            api_token: None,
        }
    }
}
