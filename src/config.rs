use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        api_base_url: get_env_or_default("CATALOG_API_URL", DEFAULT_API_URL),
        server_addr: get_env_or_default("SERVER_ADDR", "127.0.0.1:3000"),
        static_dir: get_env_or_default("STATIC_DIR", "static"),
        request_timeout_secs: get_env_or_default("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .unwrap_or(30),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote catalog API, without a trailing slash.
    pub api_base_url: String,
    pub server_addr: String,
    pub static_dir: String,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Apply command line overrides on top of the environment.
    pub fn with_overrides(
        &self,
        addr: Option<String>,
        api_url: Option<String>,
        static_dir: Option<String>,
    ) -> Config {
        Config {
            api_base_url: api_url.unwrap_or_else(|| self.api_base_url.clone()),
            server_addr: addr.unwrap_or_else(|| self.server_addr.clone()),
            static_dir: static_dir.unwrap_or_else(|| self.static_dir.clone()),
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
