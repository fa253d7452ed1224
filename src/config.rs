use std::env;
use std::fmt;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_POOL_SIZE: u32 = 20;
const DEFAULT_MIN_POOL_SIZE: u32 = 5;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongo: MongoSettings,
    /// Empty means any origin is accepted.
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MongoSettings {
    pub url: String,
    /// Overrides the database named in the connection string.
    pub database: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} must be set", var),
            ConfigError::Invalid { var, value } => {
                write!(f, "{} has an invalid value: {:?}", var, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;

        let url = get("MONGO_URL").ok_or(ConfigError::Missing("MONGO_URL"))?;
        let mongo = MongoSettings {
            url,
            database: get("MONGO_DATABASE"),
            max_pool_size: parse_or(
                "MONGO_MAX_POOL_SIZE",
                get("MONGO_MAX_POOL_SIZE"),
                DEFAULT_MAX_POOL_SIZE,
            )?,
            min_pool_size: parse_or(
                "MONGO_MIN_POOL_SIZE",
                get("MONGO_MIN_POOL_SIZE"),
                DEFAULT_MIN_POOL_SIZE,
            )?,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            mongo,
            cors_allowed_origins,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&[("MONGO_URL", "mongodb://localhost:27017")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4000);
        assert_eq!(config.mongo.url, "mongodb://localhost:27017");
        assert_eq!(config.mongo.database, None);
        assert_eq!(config.mongo.max_pool_size, 20);
        assert_eq!(config.mongo.min_pool_size, 5);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_missing_mongo_url() {
        let err = config_from(&[("PORT", "8080")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("MONGO_URL"));
        assert_eq!(err.to_string(), "MONGO_URL must be set");
    }

    #[test]
    fn test_blank_mongo_url_is_missing() {
        let err = config_from(&[("MONGO_URL", "   ")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("MONGO_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("MONGO_URL", "mongodb://db"), ("PORT", "http")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("MONGO_URL", "mongodb://db:27017/app"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("MONGO_DATABASE", "users_test"),
            ("MONGO_MAX_POOL_SIZE", "50"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, http://127.0.0.1:3000,"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.mongo.database.as_deref(), Some("users_test"));
        assert_eq!(config.mongo.max_pool_size, 50);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }
}
