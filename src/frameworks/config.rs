use crate::domain::{GameTuning, InvalidTuning};
use std::{env, fmt, fs, io, path::PathBuf, time::Duration};

// Runtime/network constants (not gameplay tuning).

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DISCONNECT_GRACE: Duration = Duration::from_secs(3);
pub const TELEMETRY_INTERVAL: Duration = Duration::from_millis(100);
pub const MAX_PEERS: usize = 32;
pub const INBOUND_QUEUE_CAPACITY: usize = 1024;
pub const TICK_INTERVAL: Duration = Duration::from_micros(16_667);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetMode {
    Server,
    Client,
}

pub fn relay_host() -> String {
    env::var("RELAY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
}

pub fn relay_port() -> u16 {
    env::var("RELAY_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1234)
}

pub fn net_mode() -> NetMode {
    match env::var("NET_MODE").as_deref() {
        Ok(v) if v.eq_ignore_ascii_case("client") => NetMode::Client,
        _ => NetMode::Server,
    }
}

pub fn tuning_path() -> Option<PathBuf> {
    env::var_os("TUNING_PATH").map(PathBuf::from)
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid { path: PathBuf, field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
            ConfigError::Invalid {
                path,
                field,
                reason,
            } => write!(f, "invalid {field} in {}: {reason}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Gameplay tuning from `TUNING_PATH`, or the built-in defaults when it is unset.
pub fn load_tuning() -> Result<GameTuning, ConfigError> {
    match tuning_path() {
        Some(path) => load_tuning_from(path),
        None => Ok(GameTuning::default()),
    }
}

pub fn load_tuning_from(path: PathBuf) -> Result<GameTuning, ConfigError> {
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let tuning: GameTuning = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    tuning
        .validate()
        .map_err(|InvalidTuning { field, reason }| ConfigError::Invalid {
            path,
            field,
            reason,
        })?;
    Ok(tuning)
}
