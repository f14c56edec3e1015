use crate::actor::DEFAULT_IC_HOST;
use crate::datasource::canister::DEFAULT_POOL_QUERY;
use crate::datasource::PriceQuery;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub ic_host: String,
    pub fetch_root_key: bool,
    pub pool_canister_id: String,
    pub pool_query_method: String,
    pub price_canister_id: String,
    pub price_query: PriceQuery,
    pub refresh_interval_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let ic_host = env_map
            .get("IC_HOST")
            .cloned()
            .unwrap_or_else(|| DEFAULT_IC_HOST.to_string());

        let fetch_root_key = match env_map
            .get("FETCH_ROOT_KEY")
            .map(|s| s.as_str())
            .unwrap_or("false")
        {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "FETCH_ROOT_KEY".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        let pool_canister_id = env_map
            .get("POOL_CANISTER_ID")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("POOL_CANISTER_ID".to_string()))?;

        let pool_query_method = env_map
            .get("POOL_QUERY_METHOD")
            .cloned()
            .unwrap_or_else(|| DEFAULT_POOL_QUERY.to_string());

        let price_canister_id = env_map
            .get("PRICE_CANISTER_ID")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("PRICE_CANISTER_ID".to_string()))?;

        let price_query = env_map
            .get("PRICE_QUERY")
            .map(|s| s.as_str())
            .unwrap_or("ckusdc_pools")
            .parse::<PriceQuery>()
            .map_err(|e| ConfigError::InvalidValue("PRICE_QUERY".to_string(), e))?;

        let refresh_interval_ms = env_map
            .get("REFRESH_INTERVAL_MS")
            .map(|s| s.as_str())
            .unwrap_or("30000")
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "REFRESH_INTERVAL_MS".to_string(),
                    "must be a positive u64".to_string(),
                )
            })?;

        Ok(Config {
            ic_host,
            fetch_root_key,
            pool_canister_id,
            pool_query_method,
            price_canister_id,
            price_query,
            refresh_interval_ms,
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}
