use std::env;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/votingapp";
pub const DEFAULT_DATABASE_NAME: &str = "votingapp";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub store: StoreKind,
    pub environment: Environment,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: Option<String>, // Overrides the database named in the URI
    pub max_pool_size: u32,
    pub connection_timeout: Duration,
}

/// Settings consumed while building the HTTP application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub static_dir: PathBuf,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreKind {
    MongoDb,
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Local,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let database = DatabaseConfig::from_env()?;
        let app = AppConfig::from_env()?;

        let store = StoreKind::parse(&env::var("STORE").unwrap_or_else(|_| "mongodb".to_string()))?;

        let environment = match env::var("ENV").unwrap_or_else(|_| "local".to_string()).as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Local,
        };

        Self::validate_config(&database, &app, port)?;

        Ok(Config {
            port,
            database,
            app,
            store,
            environment,
        })
    }

    fn validate_config(database: &DatabaseConfig, app: &AppConfig, port: u16) -> Result<()> {
        if port == 0 {
            anyhow::bail!("PORT must be greater than 0");
        }

        database.validate()?;
        app.validate()?;

        Ok(())
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let uri = env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_string());

        let database = env::var("MONGODB_DATABASE")
            .ok()
            .filter(|name| !name.trim().is_empty());

        let max_pool_size = env::var("MONGODB_MAX_POOL_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .context("MONGODB_MAX_POOL_SIZE must be a valid number")?;

        let connection_timeout_secs = env::var("MONGODB_CONNECT_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("MONGODB_CONNECT_TIMEOUT must be a valid number of seconds")?;

        Ok(DatabaseConfig {
            uri,
            database,
            max_pool_size,
            connection_timeout: Duration::from_secs(connection_timeout_secs),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.uri.starts_with("mongodb://") && !self.uri.starts_with("mongodb+srv://") {
            anyhow::bail!("MONGODB_URI must start with 'mongodb://' or 'mongodb+srv://'");
        }

        if self.max_pool_size == 0 {
            anyhow::bail!("Max pool size must be greater than 0");
        }

        if self.connection_timeout.as_secs() == 0 {
            anyhow::bail!("Connection timeout must be greater than 0");
        }

        Ok(())
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "dist".to_string());

        let request_timeout_secs = env::var("REQUEST_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("REQUEST_TIMEOUT must be a valid number of seconds")?;

        Ok(AppConfig {
            static_dir: PathBuf::from(static_dir),
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.as_secs() == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            static_dir: PathBuf::from("dist"),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl StoreKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreKind::MongoDb),
            "memory" => Ok(StoreKind::Memory),
            other => anyhow::bail!("STORE must be 'mongodb' or 'memory', got '{}'", other),
        }
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}
