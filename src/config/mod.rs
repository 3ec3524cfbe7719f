pub mod servings;

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::servings::ServingsRange;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
    Redis,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => Err(anyhow!("unknown storage backend: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub redis_url: String,
    pub key_prefix: String,
    pub servings: ServingsRange,
    /// Bundle the mock posts and demo reactions/comments.
    pub seed_demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File,
            data_dir: PathBuf::from("./data"),
            redis_url: "redis://127.0.0.1/".to_string(),
            key_prefix: "cookpot".to_string(),
            servings: ServingsRange::default(),
            seed_demo: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let key_prefix = env_or("COOKPOT_KEY_PREFIX", "cookpot");
        if key_prefix.trim().is_empty() {
            return Err(anyhow!("invalid COOKPOT_KEY_PREFIX: must not be empty"));
        }

        let servings = ServingsRange {
            min: env_or_parse("COOKPOT_MIN_SERVINGS", "1")?,
            max: env_or_parse("COOKPOT_MAX_SERVINGS", "12")?,
            base: env_or_parse("COOKPOT_BASE_SERVINGS", "2")?,
        };
        if servings.min == 0 || servings.min > servings.max {
            return Err(anyhow!(
                "invalid servings range: {}..={}",
                servings.min,
                servings.max
            ));
        }
        if servings.base == 0 {
            return Err(anyhow!("invalid COOKPOT_BASE_SERVINGS: must be positive"));
        }

        Ok(Self {
            storage: env_or_parse("COOKPOT_STORAGE", "file")?,
            data_dir: PathBuf::from(env_or("COOKPOT_DATA_DIR", "./data")),
            redis_url: env_or("REDIS_URL", "redis://127.0.0.1/"),
            key_prefix,
            servings,
            seed_demo: env_or_parse("COOKPOT_SEED_DEMO", "true")?,
        })
    }

    pub fn key(&self, name: &str) -> String {
        format!("{}:{}", self.key_prefix, name)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
