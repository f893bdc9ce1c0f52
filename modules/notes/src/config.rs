use std::env;
use std::str::FromStr;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "NOTES_HOST";
    pub const PORT: &str = "NOTES_PORT";
    /// Longest accepted note title, in characters.
    pub const MAX_TITLE_LEN: &str = "NOTES_MAX_TITLE_LEN";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 3001;
    pub const MAX_TITLE_LEN: usize = 500;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub max_title_len: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            max_title_len: defaults::MAX_TITLE_LEN,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Unparseable values fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup(env_vars::HOST)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| defaults::HOST.to_string());

        Self {
            host,
            port: parse_or(&lookup, env_vars::PORT, defaults::PORT),
            max_title_len: parse_or(&lookup, env_vars::MAX_TITLE_LEN, defaults::MAX_TITLE_LEN),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    match lookup(name) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("[CONFIG] Invalid {}={:?}, using default {}", name, raw, default);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), ServiceConfig::default());
        assert_eq!(ServiceConfig::default().bind_addr(), "127.0.0.1:3001");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (env_vars::HOST, "0.0.0.0"),
            (env_vars::PORT, " 8088 "),
            (env_vars::MAX_TITLE_LEN, "120"),
        ]);
        assert_eq!(config.bind_addr(), "0.0.0.0:8088");
        assert_eq!(config.max_title_len, 120);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            (env_vars::HOST, "  "),
            (env_vars::PORT, "eighty"),
            (env_vars::MAX_TITLE_LEN, "-1"),
        ]);
        assert_eq!(config, ServiceConfig::default());
    }
}
