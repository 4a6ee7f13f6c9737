use std::{env, path::PathBuf};

/// Acceptance bounds applied to every case before it reaches the core.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Limits {
    pub max_channels: i64,
    pub max_outposts: i64,
    pub max_coordinate: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_channels: 100, max_outposts: 500, max_coordinate: 10000 }
    }
}

/// Serializes tests that touch `RADIO_*` variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub threads: Option<usize>,
    pub json: bool,
    pub log_level: Option<String>,
    pub limits: Limits,
}

impl Config {
    pub fn from_env_defaults() -> Self {
        let input = env::var("RADIO_INPUT").ok().map(PathBuf::from);
        let threads = env::var("RADIO_THREADS").ok().and_then(|s| s.parse::<usize>().ok());
        let json = env::var("RADIO_JSON").ok().map(|v| parse_flag(&v)).unwrap_or(false);
        let log_level = env::var("RADIO_LOG_LEVEL").ok();
        let limits = limits_from_env();
        Self { input, threads, json, log_level, limits }
    }
}

fn parse_flag(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn limits_from_env() -> Limits {
    let mut limits = Limits::default();
    if let Some(n) = env_i64("RADIO_MAX_CHANNELS") { limits.max_channels = n; }
    if let Some(n) = env_i64("RADIO_MAX_OUTPOSTS") { limits.max_outposts = n; }
    if let Some(n) = env_i64("RADIO_MAX_COORDINATE") { limits.max_coordinate = n; }
    limits
}

fn env_i64(key: &str) -> Option<i64> {
    env::var(key).ok().and_then(|s| s.trim().parse::<i64>().ok())
}
