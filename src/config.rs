use chrono::FixedOffset;
use std::{env, fmt, net::SocketAddr, path::PathBuf};

const DEFAULT_DATA_PATH: &str = "data/moodEntries.json";
const DEFAULT_PORT: u16 = 8080;
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
    /// Offset in which calendar days are evaluated.
    pub utc_offset: FixedOffset,
}

#[derive(Debug)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_path = lookup("APP_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let offset_minutes = match lookup("APP_UTC_OFFSET_MINUTES") {
            Some(value) => value.trim().parse::<i32>().map_err(|_| {
                ConfigError(format!("APP_UTC_OFFSET_MINUTES must be an integer, got {value:?}"))
            })?,
            None => 0,
        };
        if offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError(format!(
                "APP_UTC_OFFSET_MINUTES must be within ±{MAX_OFFSET_MINUTES}, got {offset_minutes}"
            )));
        }
        let utc_offset = FixedOffset::east_opt(offset_minutes * 60)
            .ok_or_else(|| ConfigError(format!("unsupported offset {offset_minutes}")))?;

        Ok(Self {
            data_path,
            port,
            utc_offset,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.port, 8080);
        assert_eq!(config.utc_offset.local_minus_utc(), 0);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("APP_DATA_PATH", "/tmp/moods.json"),
            ("PORT", "9000"),
            ("APP_UTC_OFFSET_MINUTES", "-300"),
        ])
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/moods.json"));
        assert_eq!(config.listen_addr().port(), 9000);
        assert_eq!(config.utc_offset.local_minus_utc(), -300 * 60);
    }

    #[test]
    fn rejects_bad_offsets() {
        assert!(config_from(&[("APP_UTC_OFFSET_MINUTES", "east")]).is_err());
        assert!(config_from(&[("APP_UTC_OFFSET_MINUTES", "1440")]).is_err());
    }
}
