//! Database configuration - loaded from the environment at startup
//!
//! Required variables:
//! - `DB_USER`: database role
//! - `DB_HOST`: database host
//! - `DB_NAME`: database name
//! - `DB_PASSWORD`: password (may be empty, but must be set)
//! - `DB_PORT`: database port
//!
//! All missing variables are reported together so a misconfigured
//! deployment can be fixed in one pass.

use std::fmt;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

pub const DB_USER: &str = "DB_USER";
pub const DB_HOST: &str = "DB_HOST";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_PORT: &str = "DB_PORT";

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", vars.join(", "))]
    Missing { vars: Vec<&'static str> },

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Connection settings for the messages database
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user: String,
    pub host: String,
    pub database: String,
    pub password: String,
    pub port: u16,
}

impl DbConfig {
    /// Create config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset, except the password
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let user = non_blank(DB_USER);
        let host = non_blank(DB_HOST);
        let database = non_blank(DB_NAME);
        let password = lookup(DB_PASSWORD);
        let port = non_blank(DB_PORT);

        let (user, host, database, password, port) = match (user, host, database, password, port) {
            (Some(user), Some(host), Some(database), Some(password), Some(port)) => {
                (user, host, database, password, port)
            }
            (user, host, database, password, port) => {
                let vars = [
                    (DB_USER, user.is_none()),
                    (DB_HOST, host.is_none()),
                    (DB_NAME, database.is_none()),
                    (DB_PASSWORD, password.is_none()),
                    (DB_PORT, port.is_none()),
                ]
                .into_iter()
                .filter_map(|(var, missing)| missing.then_some(var))
                .collect();
                return Err(ConfigError::Missing { vars });
            }
        };

        let port = parse_port(&port)?;

        Ok(Self {
            user,
            host,
            database,
            password,
            port,
        })
    }

    /// Connection options for sqlx
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let port: u16 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
        ConfigError::Invalid {
            var: DB_PORT,
            reason: format!("'{}' is not a valid port ({})", raw, e),
        }
    })?;

    if port == 0 {
        return Err(ConfigError::Invalid {
            var: DB_PORT,
            reason: "port must be non-zero".into(),
        });
    }

    Ok(port)
}

// Keep the password out of logs
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("host", &self.host)
            .field("database", &self.database)
            .field("password", &"***")
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            (DB_USER, "board"),
            (DB_HOST, "db"),
            (DB_NAME, "messages_db"),
            (DB_PASSWORD, "secret"),
            (DB_PORT, "5432"),
        ])
    }

    #[test]
    fn loads_complete_config() {
        let vars = full_env();
        let config = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.user, "board");
        assert_eq!(config.host, "db");
        assert_eq!(config.database, "messages_db");
        assert_eq!(config.password, "secret");
        assert_eq!(config.port, 5432);
    }

    #[test]
    fn reports_every_missing_var() {
        let vars = env(&[(DB_HOST, "db"), (DB_PASSWORD, "")]);
        let err = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();

        assert_eq!(
            err,
            ConfigError::Missing {
                vars: vec![DB_USER, DB_NAME, DB_PORT]
            }
        );
        assert_eq!(
            err.to_string(),
            "missing required environment variables: DB_USER, DB_NAME, DB_PORT"
        );
    }

    #[test]
    fn blank_values_are_missing() {
        let mut vars = full_env();
        vars.insert(DB_USER.into(), "   ".into());
        let err = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();

        assert_eq!(err, ConfigError::Missing { vars: vec![DB_USER] });
    }

    #[test]
    fn empty_password_is_allowed() {
        let mut vars = full_env();
        vars.insert(DB_PASSWORD.into(), String::new());

        let config = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.password, "");
    }

    #[test]
    fn rejects_bad_port() {
        for bad in ["abc", "70000", "0", "-1"] {
            let mut vars = full_env();
            vars.insert(DB_PORT.into(), bad.into());
            let err = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { var: DB_PORT, .. }),
                "port {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn debug_redacts_password() {
        let vars = full_env();
        let config = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        let printed = format!("{:?}", config);

        assert!(printed.contains("***"));
        assert!(!printed.contains("secret"));
    }
}
