use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the external recommendation service
    #[serde(default = "default_recommender_api_url")]
    pub recommender_api_url: String,

    /// Per-request timeout for calls to the recommendation service
    #[serde(default = "default_recommender_timeout_secs")]
    pub recommender_timeout_secs: u64,

    /// `limit` sent with personalized recommendation requests
    #[serde(default = "default_user_recommendation_limit")]
    pub user_recommendation_limit: usize,

    /// `limit` sent with cold-start submissions
    #[serde(default = "default_cold_start_limit")]
    pub cold_start_limit: usize,

    /// Number of items shown in the trending section
    #[serde(default = "default_trending_size")]
    pub trending_size: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_recommender_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_recommender_timeout_secs() -> u64 {
    10
}

fn default_user_recommendation_limit() -> usize {
    8
}

fn default_cold_start_limit() -> usize {
    12
}

fn default_trending_size() -> usize {
    4
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recommender_api_url: default_recommender_api_url(),
            recommender_timeout_secs: default_recommender_timeout_secs(),
            user_recommendation_limit: default_user_recommendation_limit(),
            cold_start_limit: default_cold_start_limit(),
            trending_size: default_trending_size(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn recommender_timeout(&self) -> Duration {
        Duration::from_secs(self.recommender_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
