// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf};

use dotenvy::dotenv;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. `None` runs the service on the in-memory store.
    pub database_url: Option<String>,
    /// JSON file used to seed the in-memory store at startup.
    pub seed_file: Option<PathBuf>,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        let seed_file = env::var("QUIZ_SEED_FILE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| format!("BIND_ADDR is not a valid socket address: {}", e))?;

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            seed_file,
            bind_addr,
            cors_origins,
            rust_log,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            seed_file: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            rust_log: "info".to_string(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
