/// Configuration management for KnowledgeKnot
///
/// All settings come from environment variables with development-friendly
/// defaults; `.env` files are loaded by the binary before this runs.
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listener settings
    pub app: AppConfig,
    /// Document store settings
    pub store: StoreConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Which store backend to open at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB (the default)
    Mongo,
    /// Process-local, for development and tests
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "KNOT_STORE must be 'mongo' or 'memory', got '{other}'"
            )),
        }
    }
}

/// Document store settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// MongoDB connection URI
    pub uri: String,
    /// Database holding the `posts` and `comments` collections
    pub database: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig {
                host: std::env::var("KNOT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("KNOT_PORT")
                    .ok()
                    .map(|p| {
                        p.parse()
                            .map_err(|e| format!("Failed to parse KNOT_PORT='{}': {}", p, e))
                    })
                    .transpose()?
                    .unwrap_or(3000),
            },
            store: StoreConfig {
                backend: std::env::var("KNOT_STORE")
                    .ok()
                    .map(|v| v.parse())
                    .transpose()?
                    .unwrap_or(StoreBackend::Mongo),
                uri: std::env::var("MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                database: std::env::var("MONGODB_DATABASE")
                    .unwrap_or_else(|_| "knowledgeknot".to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_parse() {
        assert_eq!("mongo".parse::<StoreBackend>().unwrap(), StoreBackend::Mongo);
        assert_eq!(
            "mongodb".parse::<StoreBackend>().unwrap(),
            StoreBackend::Mongo
        );
        assert_eq!(
            "Memory".parse::<StoreBackend>().unwrap(),
            StoreBackend::Memory
        );
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
