use std::env;

use anyhow::bail;

use crate::pantry::DEFAULT_CRITICAL_RATIO;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Ratio of current to ideal stock under which an item is critical.
    pub critical_ratio: f64,
    /// Category shown for items without one.
    pub default_category: String,
    pub replenish_list_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let critical_ratio = match env::var("CRITICAL_STOCK_RATIO") {
            Ok(raw) => raw.parse::<f64>()?,
            Err(_) => DEFAULT_CRITICAL_RATIO,
        };
        if !(critical_ratio > 0.0 && critical_ratio <= 1.0) {
            bail!("CRITICAL_STOCK_RATIO must be in (0, 1], got {critical_ratio}");
        }
        let default_category =
            env::var("DEFAULT_CATEGORY").unwrap_or_else(|_| "Other".to_string());
        let replenish_list_prefix =
            env::var("REPLENISH_LIST_PREFIX").unwrap_or_else(|_| "Replenishment".to_string());
        Ok(Self {
            port,
            database_url,
            host,
            critical_ratio,
            default_category,
            replenish_list_prefix,
        })
    }
}
