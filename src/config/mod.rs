use serde::Deserialize;
use std::env;
use std::path::PathBuf;

// Top-level configuration container
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

// Flat-file store settings
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "seat_reservation=debug,tower_http=debug".to_string()),
            },
            storage: StorageConfig {
                data_file: env::var("DATA_FILE")
                    .unwrap_or_else(|_| "reservations.json".to_string())
                    .into(),
            },
        }
    }
}
