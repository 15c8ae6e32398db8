use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:3000/api";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL that `/predictions` is appended to.
    pub api_base: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    /// Extra attempts for a status query that got no response at all.
    pub transport_retries: u32,
    pub output_dir: PathBuf,
    pub viewport: (u32, u32),
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            transport_retries: 0,
            output_dir: PathBuf::from("."),
            viewport: (1920, 1080),
        }
    }
}

impl ClientConfig {
    /// Reads `.env` if there is one, then the process environment.
    pub fn load() -> Result<Self, AppError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(AppError::Config(format!(".env: {e}"))),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(base) = lookup("TILER_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "TILER_POLL_INTERVAL_MS")? {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "TILER_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = parse_var::<u32>(&lookup, "TILER_TRANSPORT_RETRIES")? {
            config.transport_retries = retries;
        }
        if let Some(dir) = lookup("TILER_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, AppError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{key} must be a number, got '{raw}'"))),
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
pub fn parse_viewport(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|_| format!("bad width in '{s}'"))?;
    let h = h.trim().parse().map_err(|_| format!("bad height in '{s}'"))?;
    Ok((w, h))
}
