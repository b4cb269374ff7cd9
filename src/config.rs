use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Credentials for the admin account created on first startup.
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Directory where fridge images are stored and served from.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    /// Artificial latency of the stub detector, in milliseconds.
    pub delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub upload: UploadConfig,
    pub detector: DetectorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.admin_username", "admin")?
            .set_default("auth.admin_email", "admin@dinnersready.com")?
            .set_default("auth.admin_password", "admin123")?
            .set_default("upload.dir", "./uploads")?
            .set_default("detector.delay_ms", 1000)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., DINNERSREADY__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("DINNERSREADY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
