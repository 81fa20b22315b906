//! Server configuration from environment

use std::env;
use std::net::SocketAddr;

/// Default seed for the split stage when a request does not override it
pub const DEFAULT_SPLIT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Seed used by `/split` unless the request carries its own
    pub split_seed: u64,
}

impl Config {
    /// Read configuration from the environment (`HOST`, `PORT`,
    /// `SPLIT_SEED`), falling back to defaults
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .expect("PORT must be a valid number");
        let split_seed: u64 = env::var("SPLIT_SEED")
            .unwrap_or_else(|_| DEFAULT_SPLIT_SEED.to_string())
            .parse()
            .expect("SPLIT_SEED must be a valid number");

        Self {
            host,
            port,
            split_seed,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid HOST:PORT configuration")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            split_seed: DEFAULT_SPLIT_SEED,
        }
    }
}
