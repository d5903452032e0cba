use log::info;
use std::{env, fmt::Display, net::SocketAddr, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub oidc_issuer_url: String,
    /// Subject of the seeded admin account; registering with it grants admin
    pub admin_subject: String,
    pub seed_data: bool,
    pub run_migrations: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: try_load(&lookup, "BIND_ADDR", "0.0.0.0:3000")?,
            database_url: require(&lookup, "DATABASE_URL")?,
            oidc_issuer_url: require(&lookup, "OIDC_ISSUER_URL")?,
            admin_subject: try_load(&lookup, "ADMIN_SUBJECT", "admin")?,
            seed_data: try_load(&lookup, "SEED_DATA", "true")?,
            run_migrations: try_load(&lookup, "RUN_MIGRATIONS", "true")?,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/rental"),
            ("OIDC_ISSUER_URL", "https://auth.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.admin_subject, "admin");
        assert!(config.seed_data);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_missing_required() {
        let result = Config::from_lookup(lookup_from(&[(
            "OIDC_ISSUER_URL",
            "https://auth.example.com",
        )]));
        assert_eq!(result, Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_value() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/rental"),
            ("OIDC_ISSUER_URL", "https://auth.example.com"),
            ("SEED_DATA", "sometimes"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "SEED_DATA",
                ..
            })
        ));
    }
}
