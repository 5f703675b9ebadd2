use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Runtime
    pub environment: Environment,
    pub transport: Transport,

    // Listeners
    pub http_addr: SocketAddr,
    pub grpc_addr: SocketAddr,
    pub request_timeout: Duration,
    pub shutdown_grace: Duration,

    // Database
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
}

/// Deployment environment. Only affects log formatting and verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

/// Which listeners the process starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Grpc,
    All,
}

impl Transport {
    pub fn serves_http(self) -> bool {
        matches!(self, Transport::Http | Transport::All)
    }

    pub fn serves_grpc(self) -> bool {
        matches!(self, Transport::Grpc | Transport::All)
    }
}

impl FromStr for Transport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Transport::Http),
            "grpc" => Ok(Transport::Grpc),
            "all" => Ok(Transport::All),
            other => bail!("Unknown transport '{}'. Expected http, grpc or all", other),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("ENVIRONMENT").as_deref() {
            Some("local") => Environment::Local,
            _ => Environment::Production,
        };

        let transport = match lookup("TRANSPORT") {
            Some(value) => value.parse().context("TRANSPORT is invalid")?,
            None => Transport::All,
        };

        Ok(Self {
            environment,
            transport,

            http_addr: parse_or(&lookup, "HTTP_ADDR", "0.0.0.0:8080")?,
            grpc_addr: parse_or(&lookup, "GRPC_ADDR", "0.0.0.0:50051")?,
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", "10")?),
            shutdown_grace: Duration::from_secs(parse_or(&lookup, "SHUTDOWN_GRACE_SECS", "15")?),

            database: DatabaseConfig {
                url: lookup("DATABASE_URL").context("DATABASE_URL not set")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", "10")?,
                acquire_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    "5",
                )?),
                run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", "false")?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .with_context(|| format!("{} has invalid value '{}'", name, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    // ==================== Defaults ====================

    #[test]
    fn test_defaults_with_only_database_url() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/t")]))
            .expect("Should build config");

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.transport, Transport::All);
        assert_eq!(config.http_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.grpc_addr, "0.0.0.0:50051".parse::<SocketAddr>().unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.shutdown_grace, Duration::from_secs(15));
        assert_eq!(config.database.url, "postgres://localhost/t");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(5));
        assert!(!config.database.run_migrations);
    }

    #[test]
    fn test_missing_database_url_is_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    // ==================== Overrides ====================

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/translations"),
            ("ENVIRONMENT", "local"),
            ("TRANSPORT", "grpc"),
            ("HTTP_ADDR", "127.0.0.1:9000"),
            ("GRPC_ADDR", "127.0.0.1:9001"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("RUN_MIGRATIONS", "true"),
        ]))
        .expect("Should build config");

        assert_eq!(config.environment, Environment::Local);
        assert_eq!(config.transport, Transport::Grpc);
        assert_eq!(config.http_addr.port(), 9000);
        assert_eq!(config.grpc_addr.port(), 9001);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.database.max_connections, 4);
        assert!(config.database.run_migrations);
    }

    #[test]
    fn test_unknown_environment_falls_back_to_production() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/t"),
            ("ENVIRONMENT", "staging"),
        ]))
        .expect("Should build config");
        assert_eq!(config.environment, Environment::Production);
    }

    // ==================== Invalid Values ====================

    #[test]
    fn test_invalid_address_is_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/t"),
            ("HTTP_ADDR", "not-an-address"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("HTTP_ADDR"));
    }

    #[test]
    fn test_invalid_number_is_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/t"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_invalid_transport_is_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/t"),
            ("TRANSPORT", "websocket"),
        ]));
        assert!(result.is_err());
    }

    // ==================== Transport Tests ====================

    #[test]
    fn test_transport_parsing_is_case_insensitive() {
        assert_eq!("HTTP".parse::<Transport>().unwrap(), Transport::Http);
        assert_eq!(" grpc ".parse::<Transport>().unwrap(), Transport::Grpc);
        assert_eq!("All".parse::<Transport>().unwrap(), Transport::All);
    }

    #[test]
    fn test_transport_listeners() {
        assert!(Transport::Http.serves_http());
        assert!(!Transport::Http.serves_grpc());
        assert!(!Transport::Grpc.serves_http());
        assert!(Transport::Grpc.serves_grpc());
        assert!(Transport::All.serves_http());
        assert!(Transport::All.serves_grpc());
    }

    // ==================== Process Environment ====================

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        std::env::set_var("DATABASE_URL", "postgres://env/translations");
        std::env::set_var("TRANSPORT", "http");

        let config = Config::from_env().expect("Should build config");
        assert_eq!(config.database.url, "postgres://env/translations");
        assert_eq!(config.transport, Transport::Http);

        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("TRANSPORT");
    }
}
