use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080/cotacao";

/// Deadlines for the two hops behind `/cotacao`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budgets {
    pub fetch: Duration,
    pub persist: Duration,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            fetch: Duration::from_millis(200),
            persist: Duration::from_millis(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub upstream_url: String,
    pub database_url: String,
    pub budgets: Budgets,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = match var("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("invalid PORT `{raw}`"))?,
            None => 8080,
        };
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid HOST/PORT {host}:{port}"))?;

        let defaults = Budgets::default();
        let budgets = Budgets {
            fetch: millis("FETCH_TIMEOUT_MS", var("FETCH_TIMEOUT_MS"), defaults.fetch)?,
            persist: millis("PERSIST_TIMEOUT_MS", var("PERSIST_TIMEOUT_MS"), defaults.persist)?,
        };

        Ok(Self {
            addr,
            upstream_url: var("UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            database_url: var("DATABASE_URL").unwrap_or_else(|| "sqlite://data.db".to_string()),
            budgets,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub timeout: Duration,
    pub output_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_millis(300),
            output_path: PathBuf::from("cotacao.txt"),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            server_url: var("SERVER_URL").unwrap_or(defaults.server_url),
            timeout: millis("CLIENT_TIMEOUT_MS", var("CLIENT_TIMEOUT_MS"), defaults.timeout)?,
            output_path: var("OUTPUT_FILE").map(PathBuf::from).unwrap_or(defaults.output_path),
        })
    }
}

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn millis(key: &str, raw: Option<String>, default: Duration) -> Result<Duration> {
    match raw {
        Some(raw) => {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {key} `{raw}`, expected milliseconds"))?;
            Ok(Duration::from_millis(ms))
        }
        None => Ok(default),
    }
}
