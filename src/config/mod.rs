//! Configuration module for handling environment variables and .env files

use crate::client::RedditClient;
use dotenv::dotenv;
use log::info;
use std::env;

/// Application configuration derived from environment variables and .env file
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Reddit API credentials
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,

    // Reddit API settings
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            username: None,
            password: None,
            user_agent: "redditions/0.1 (extension utilities for the Reddit API)".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn load() -> Self {
        // Try to load .env file, but continue even if it doesn't exist
        match dotenv() {
            Ok(_) => info!("Loaded environment from .env file"),
            Err(_) => info!("No .env file found, using system environment variables only"),
        }

        let mut config = Self::default();

        if let Ok(client_id) = env::var("REDDIT_CLIENT_ID") {
            config.client_id = Some(client_id);
        }

        if let Ok(client_secret) = env::var("REDDIT_CLIENT_SECRET") {
            config.client_secret = Some(client_secret);
        }

        if let Ok(username) = env::var("REDDIT_USERNAME") {
            config.username = Some(username);
        }

        if let Ok(password) = env::var("REDDIT_PASSWORD") {
            config.password = Some(password);
        }

        // User agent - use environment variable if available, otherwise keep default
        if let Ok(user_agent) = env::var("REDDIT_USER_AGENT") {
            config.user_agent = user_agent;
        }

        config
    }

    /// Get client ID, panicking if not set
    pub fn require_client_id(&self) -> String {
        self.client_id
            .clone()
            .expect("REDDIT_CLIENT_ID environment variable must be set")
    }

    /// Get client secret, panicking if not set
    pub fn require_client_secret(&self) -> String {
        self.client_secret
            .clone()
            .expect("REDDIT_CLIENT_SECRET environment variable must be set")
    }

    /// Get username, panicking if not set
    pub fn require_username(&self) -> String {
        self.username
            .clone()
            .expect("REDDIT_USERNAME environment variable must be set")
    }

    /// Get password, panicking if not set
    pub fn require_password(&self) -> String {
        self.password
            .clone()
            .expect("REDDIT_PASSWORD environment variable must be set")
    }

    /// Create a RedditClient from this configuration
    pub fn create_client(&self) -> RedditClient {
        RedditClient::from_config(self)
    }
}
