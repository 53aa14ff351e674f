use database::store::DEFAULT_FETCH_LIMIT;
use std::{env, net::SocketAddr};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Server settings read from the environment
///
/// | Env Var          | Default        |
/// |------------------|----------------|
/// | `DATABASE_URL`   | required       |
/// | `BIND_ADDR`      | `0.0.0.0:3000` |
/// | `FETCH_LIMIT`    | `10000`        |
/// | `RUN_MIGRATIONS` | `true`         |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub fetch_limit: u64,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = parse_or(&lookup, "BIND_ADDR", || {
            DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.to_string(),
            })
        })?;
        let fetch_limit = parse_or(&lookup, "FETCH_LIMIT", || Ok(DEFAULT_FETCH_LIMIT))?;
        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", || Ok(true))?;

        Ok(Self {
            database_url,
            bind_addr,
            fetch_limit,
            run_migrations,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: impl FnOnce() -> Result<T, ConfigError>,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let parsed = config(&[("DATABASE_URL", "postgres://localhost/catalogo")]).unwrap();
        assert_eq!(parsed.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(parsed.fetch_limit, 10_000);
        assert!(parsed.run_migrations);
    }

    #[test]
    fn test_database_url_is_required() {
        assert!(matches!(
            config(&[]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let parsed = config(&[
            ("DATABASE_URL", "postgres://db/catalogo"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("FETCH_LIMIT", "500"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();
        assert_eq!(parsed.bind_addr.port(), 8080);
        assert_eq!(parsed.fetch_limit, 500);
        assert!(!parsed.run_migrations);

        let err = config(&[
            ("DATABASE_URL", "postgres://db/catalogo"),
            ("FETCH_LIMIT", "lots"),
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "FETCH_LIMIT has an invalid value: lots");
    }
}
