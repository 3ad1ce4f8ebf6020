use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// `None` means any origin is allowed.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://enrollment.db".to_string());

        let host: IpAddr = parse_var("HOST", "127.0.0.1")?;
        let port: u16 = parse_var("PORT", "3000")?;
        let max_connections: u32 = parse_var("DB_MAX_CONNECTIONS", "5")?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        let cors_origin = env::var("CORS_ORIGIN")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url,
            bind_addr: SocketAddr::new(host, port),
            max_connections,
            cors_origin,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_uses_default_when_unset() {
        let port: u16 = parse_var("ENROLLMENT_TEST_UNSET_PORT", "8080").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        let err = parse_var::<u16>("ENROLLMENT_TEST_UNSET_PORT", "not-a-port").unwrap_err();
        assert!(err.to_string().contains("ENROLLMENT_TEST_UNSET_PORT"));
    }
}
