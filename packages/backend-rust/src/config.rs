use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use flashdeck_core::DEFAULT_MAX_RESULTS;

use crate::logging::DEFAULT_LOG_FILTER;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;
const DEFAULT_MAX_STUDY_SESSIONS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub decks_path: Option<PathBuf>,
    pub session_idle_timeout: Duration,
    pub max_study_sessions: usize,
    pub search_max_results: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env_parse::<u16>("PORT").unwrap_or(DEFAULT_PORT);

        let host = env_parse::<IpAddr>("HOST").unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = env_string("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let decks_path = env_string("DECKS_PATH").map(PathBuf::from);

        let session_idle_timeout = Duration::from_secs(
            env_parse::<u64>("STUDY_SESSION_IDLE_SECS").unwrap_or(DEFAULT_SESSION_IDLE_SECS),
        );

        let max_study_sessions = env_parse::<usize>("STUDY_SESSION_MAX")
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_STUDY_SESSIONS);

        let search_max_results = env_parse::<usize>("SEARCH_MAX_RESULTS")
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_RESULTS);

        Self {
            host,
            port,
            log_level,
            decks_path,
            session_idle_timeout,
            max_study_sessions,
            search_max_results,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_FILTER.to_string(),
            decks_path: None,
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
            max_study_sessions: DEFAULT_MAX_STUDY_SESSIONS,
            search_max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

pub(crate) fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key)?.trim().parse().ok()
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    match normalized.as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr().port(), 3000);
        assert_eq!(config.search_max_results, 50);
        assert_eq!(config.session_idle_timeout, Duration::from_secs(3600));
        assert_eq!(config.max_study_sessions, 10_000);
    }

    #[test]
    fn test_env_parse_ignores_garbage() {
        std::env::set_var("FLASHDECK_TEST_PORT_GARBAGE", "not-a-port");
        assert_eq!(env_parse::<u16>("FLASHDECK_TEST_PORT_GARBAGE"), None);
        std::env::set_var("FLASHDECK_TEST_PORT_OK", " 8080 ");
        assert_eq!(env_parse::<u16>("FLASHDECK_TEST_PORT_OK"), Some(8080));
    }

    #[test]
    fn test_env_bool_variants() {
        std::env::set_var("FLASHDECK_TEST_BOOL_ON", "Yes");
        std::env::set_var("FLASHDECK_TEST_BOOL_OFF", "0");
        std::env::set_var("FLASHDECK_TEST_BOOL_BAD", "maybe");
        assert_eq!(env_bool("FLASHDECK_TEST_BOOL_ON"), Some(true));
        assert_eq!(env_bool("FLASHDECK_TEST_BOOL_OFF"), Some(false));
        assert_eq!(env_bool("FLASHDECK_TEST_BOOL_BAD"), None);
        assert_eq!(env_bool("FLASHDECK_TEST_BOOL_MISSING"), None);
    }
}
