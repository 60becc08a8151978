use serde::Deserialize;
use std::net::IpAddr;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origins allowed through CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Public DNS resolvers queried instead of the system resolver
    #[serde(default = "default_dns_servers")]
    pub dns_servers: Vec<IpAddr>,

    /// Total per-request timeout for upstream catalog calls, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5050
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

fn default_dns_servers() -> Vec<IpAddr> {
    vec![IpAddr::from([8, 8, 8, 8]), IpAddr::from([1, 1, 1, 1])]
}

fn default_http_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
