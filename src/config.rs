use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Notification channel settings, injected into the dispatcher at
/// construction. A blank `smtp_host` selects the logging no-op channel,
/// which is how the service runs without live credentials.
#[derive(Debug, Deserialize, Clone)]
pub struct NotifyConfig {
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_contact_phones")]
    pub contact_phones: Vec<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            admin_email: default_admin_email(),
            contact_phones: default_contact_phones(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "noreply@bankingacademy.com".to_string()
}

fn default_from_name() -> String {
    "Banking Academy".to_string()
}

fn default_admin_email() -> String {
    "admin@bankingacademy.com".to_string()
}

fn default_contact_phones() -> Vec<String> {
    vec!["+91 98765 43210".to_string(), "+91 87654 32109".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct BridgeConfig {
    /// Base URL of the backend enquiry endpoint. Blank disables the bridge.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_bridge_timeout")]
    pub timeout_secs: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_bridge_timeout(),
        }
    }
}

fn default_bridge_timeout() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ENROLLDESK__SERVER__PORT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("ENROLLDESK")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy environment variables without prefix
        if let Ok(admin_email) = env::var("ADMIN_EMAIL") {
            builder = builder.set_override("notify.admin_email", admin_email)?;
        }
        if let Ok(bridge_url) = env::var("BRIDGE_BASE_URL") {
            builder = builder.set_override("bridge.base_url", bridge_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !self.notify.admin_email.contains('@') {
            return Err("notify.admin_email must be a valid address".to_string());
        }
        if !self.notify.smtp_host.is_empty() && self.notify.from_email.is_empty() {
            return Err("notify.from_email is required when SMTP is configured".to_string());
        }
        let base_url = self.bridge.base_url.trim();
        if !base_url.is_empty() && !base_url.starts_with("http") {
            return Err("bridge.base_url must be an http(s) URL".to_string());
        }
        Ok(())
    }
}
