//! Startup configuration.
//!
//! Values come from built-in defaults overlaid with environment variables.
//! `main` loads `.env` into the environment before calling `Config::from_env`.

use std::path::PathBuf;

use axum::http::{header::InvalidHeaderValue, HeaderValue};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Environment variables consulted, matched case-insensitively.
const ENV_KEYS: [&str; 4] = ["port", "db_path", "front_url", "log_level"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// HTTP listen port. Env: `PORT`. Default: `8080`.
    pub port: u16,

    /// SQLite database file. Env: `DB_PATH`. Default: `todo.db`.
    pub db_path: PathBuf,

    /// The single origin allowed by CORS. Env: `FRONT_URL`.
    /// Default: `http://localhost:3000`.
    pub front_url: String,

    /// Fallback filter when `RUST_LOG` is unset. Env: `LOG_LEVEL`. Default: `info`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: PathBuf::from("todo.db"),
            front_url: "http://localhost:3000".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&ENV_KEYS))
    }

    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// `front_url` as a CORS origin header value.
    pub fn allowed_origin(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(self.front_url.trim_end_matches('/'))
    }
}
