use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON catalog file. The builtin catalog is served when unset.
    pub catalog_path: Option<PathBuf>,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            catalog_path: None,
            default_limit: 10,
            max_limit: 50,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let config = Config {
            port: parse_or(&get, "PORT", defaults.port)?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            catalog_path: get("CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            default_limit: parse_or(&get, "RECOMMENDATION_LIMIT", defaults.default_limit)?,
            max_limit: parse_or(&get, "MAX_RECOMMENDATION_LIMIT", defaults.max_limit)?,
        };

        ensure!(
            config.default_limit >= 1,
            "RECOMMENDATION_LIMIT must be at least 1"
        );
        ensure!(
            config.default_limit <= config.max_limit,
            "RECOMMENDATION_LIMIT ({}) must not exceed MAX_RECOMMENDATION_LIMIT ({})",
            config.default_limit,
            config.max_limit
        );

        Ok(config)
    }

    /// Resolves a requested limit: default when absent, capped at `max_limit`.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_limit, 50);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("CATALOG_PATH", "/etc/careers.json"),
            ("RECOMMENDATION_LIMIT", "5"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.default_limit, 5);
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/careers.json"))
        );
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_zero_default_limit_fails() {
        assert!(Config::from_lookup(lookup(&[("RECOMMENDATION_LIMIT", "0")])).is_err());
    }

    #[test]
    fn test_default_limit_above_max_fails() {
        assert!(Config::from_lookup(lookup(&[
            ("RECOMMENDATION_LIMIT", "20"),
            ("MAX_RECOMMENDATION_LIMIT", "10"),
        ]))
        .is_err());
    }

    #[test]
    fn test_effective_limit() {
        let config = Config::default();
        assert_eq!(config.effective_limit(None), 10);
        assert_eq!(config.effective_limit(Some(3)), 3);
        assert_eq!(config.effective_limit(Some(500)), 50);
        assert_eq!(config.effective_limit(Some(0)), 0);
    }
}
