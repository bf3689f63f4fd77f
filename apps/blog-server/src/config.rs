//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::{DatabaseConfig, SmtpConfig};

const DEFAULT_SENDER: &str = "blog@localhost";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Directory holding the Tera templates.
    pub template_dir: String,
    pub mail: MailConfig,
}

/// Outgoing mail configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Fixed `From` address for share emails.
    pub sender: String,
    /// SMTP relay; `None` selects the console transport.
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            template_dir: env::var("TEMPLATE_DIR")
                .unwrap_or_else(|_| concat!(env!("CARGO_MANIFEST_DIR"), "/templates").to_string()),
            mail: MailConfig::from_env(),
        }
    }
}

impl MailConfig {
    fn from_env() -> Self {
        let sender = env::var("SENDER").unwrap_or_else(|_| {
            tracing::warn!("SENDER not set. Share emails will come from {DEFAULT_SENDER}.");
            DEFAULT_SENDER.to_string()
        });

        let smtp = env::var("SMTP_HOST").ok().map(|host| SmtpConfig {
            host,
            port: parse_var("SMTP_PORT").unwrap_or(587),
            username: env::var("SMTP_USERNAME").ok(),
            password: env::var("SMTP_PASSWORD").ok(),
        });

        Self { sender, smtp }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
