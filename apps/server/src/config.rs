use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{bail, Context};
use rand::{rngs::OsRng, RngCore};

use crate::auth::{decode_secret_key, SECRET_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => bail!("Invalid PL_LOG_FORMAT '{other}', expected 'text' or 'json'"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    /// Set when no secret was configured and one was generated for this process.
    pub ephemeral_secret: bool,
    pub token_ttl: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("PL_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid PL_LISTEN_ADDR")?;
        let db_path = env_or("PL_DB_PATH", "./db/pocketledger.db");
        let cors_allow = parse_origins(&env_or("PL_CORS_ALLOW_ORIGINS", "*"));
        let timeout_ms: u64 = env_or("PL_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid PL_REQUEST_TIMEOUT_MS")?;
        let ttl_minutes: u64 = env_or("PL_TOKEN_TTL_MINUTES", "1440")
            .parse()
            .context("Invalid PL_TOKEN_TTL_MINUTES")?;
        if ttl_minutes == 0 {
            bail!("PL_TOKEN_TTL_MINUTES must be greater than zero");
        }
        let log_format = env_or("PL_LOG_FORMAT", "text").parse()?;

        let (jwt_secret, ephemeral_secret) = match std::env::var("PL_JWT_SECRET") {
            Ok(raw) => (
                decode_secret_key(&raw).context("Invalid PL_JWT_SECRET")?,
                false,
            ),
            Err(_) => (random_secret(), true),
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            ephemeral_secret,
            token_ttl: Duration::from_secs(ttl_minutes * 60),
            log_format,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn random_secret() -> Vec<u8> {
    let mut bytes = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut bytes);
    bytes.to_vec()
}
