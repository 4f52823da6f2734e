//! Environment configuration
//!
//! Reads the service settings from environment variables (a `.env` file is
//! loaded first by the binary).

use std::env;

use chrono::{FixedOffset, NaiveDate, Utc};

use crate::utils::errors::AppError;

/// Western Indonesia Time, UTC+7
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 7 * 60;

/// Environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    /// Offset used to decide which calendar day "today" is
    pub utc_offset_minutes: i32,
}

fn required(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Config(format!("{} must be set", name)))
}

fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a valid number", name))),
        Err(_) => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parsed_or("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration: parsed_or("JWT_EXPIRATION", 8 * 3600)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            utc_offset_minutes: parsed_or("APP_UTC_OFFSET_MINUTES", DEFAULT_UTC_OFFSET_MINUTES)?,
        })
    }

    /// Server address to bind
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Current calendar date in the configured offset
    pub fn today(&self) -> NaiveDate {
        let now = Utc::now();
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .map(|offset| now.with_timezone(&offset).date_naive())
            .unwrap_or_else(|| now.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(offset: i32) -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiration: 60,
            cors_origins: Vec::new(),
            utc_offset_minutes: offset,
        }
    }

    #[test]
    fn test_server_url() {
        assert_eq!(config(0).server_url(), "127.0.0.1:3000");
    }

    #[test]
    fn test_today_follows_offset() {
        let utc_today = Utc::now().date_naive();
        let jakarta = config(DEFAULT_UTC_OFFSET_MINUTES).today();
        let diff = (jakarta - utc_today).num_days();
        assert!(diff == 0 || diff == 1);
    }
}
