use std::env;
use tracing::info;

use super::ConfigError;

/// Name of the environment variable holding the store base URL
pub const URL_VAR: &str = "SUPABASE_URL";
/// Name of the environment variable holding the store service key
pub const KEY_VAR: &str = "SUPABASE_KEY";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_GLUCOSE_TABLE: &str = "glucose";
const DEFAULT_BLOOD_PRESSURE_TABLE: &str = "bp";

/// Store configuration
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted store, without the REST suffix
    pub url: String,
    /// Service key sent with every request
    pub key: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Table holding glucose readings
    pub glucose_table: String,
    /// Table holding blood pressure readings
    pub blood_pressure_table: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("glucose_table", &self.glucose_table)
            .field("blood_pressure_table", &self.blood_pressure_table)
            .finish()
    }
}

impl StoreConfig {
    /// Build a configuration from explicit credentials with default settings
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            glucose_table: DEFAULT_GLUCOSE_TABLE.to_string(),
            blood_pressure_table: DEFAULT_BLOOD_PRESSURE_TABLE.to_string(),
        }
    }

    /// Create a new store configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create a configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::EnvVarNotFound(name.to_string()))
        };

        let url = required(URL_VAR)?;
        let key = required(KEY_VAR)?;

        reqwest::Url::parse(&url).map_err(|e| ConfigError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let timeout_seconds = match lookup("STORE_TIMEOUT_SECONDS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidSetting {
                name: "STORE_TIMEOUT_SECONDS".to_string(),
                value,
            })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        let table = |name: &str, default: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let glucose_table = table("GLUCOSE_TABLE", DEFAULT_GLUCOSE_TABLE);
        let blood_pressure_table = table("BLOOD_PRESSURE_TABLE", DEFAULT_BLOOD_PRESSURE_TABLE);

        info!(
            "Store configuration: url={}, timeout={}s, tables=({}, {})",
            url, timeout_seconds, glucose_table, blood_pressure_table
        );

        Ok(StoreConfig {
            url,
            key,
            timeout_seconds,
            glucose_table,
            blood_pressure_table,
        })
    }

    /// REST endpoint root, e.g. `https://project.example.co/rest/v1`
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_with_credentials() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://project.example.co"),
            (KEY_VAR, "service-key"),
        ]))
        .unwrap();

        assert_eq!(config.url, "https://project.example.co");
        assert_eq!(config.key, "service-key");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.glucose_table, "glucose");
        assert_eq!(config.blood_pressure_table, "bp");
    }

    #[test]
    fn test_missing_url_is_reported() {
        let result = StoreConfig::from_lookup(lookup_from(&[(KEY_VAR, "service-key")]));
        assert!(matches!(result, Err(ConfigError::EnvVarNotFound(name)) if name == URL_VAR));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let result = StoreConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://project.example.co"),
            (KEY_VAR, "   "),
        ]));
        assert!(matches!(result, Err(ConfigError::EnvVarNotFound(name)) if name == KEY_VAR));
    }

    #[test]
    fn test_unparsable_url() {
        let result = StoreConfig::from_lookup(lookup_from(&[
            (URL_VAR, "not a url"),
            (KEY_VAR, "service-key"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_timeout_and_table_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://project.example.co/"),
            (KEY_VAR, "service-key"),
            ("STORE_TIMEOUT_SECONDS", "5"),
            ("GLUCOSE_TABLE", "glucose_test"),
        ]))
        .unwrap();

        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.glucose_table, "glucose_test");
        assert_eq!(config.rest_url(), "https://project.example.co/rest/v1");
    }

    #[test]
    fn test_blank_table_names_fall_back_to_defaults() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://project.example.co"),
            (KEY_VAR, "service-key"),
            ("GLUCOSE_TABLE", ""),
            ("BLOOD_PRESSURE_TABLE", "   "),
        ]))
        .unwrap();

        assert_eq!(config.glucose_table, DEFAULT_GLUCOSE_TABLE);
        assert_eq!(config.blood_pressure_table, DEFAULT_BLOOD_PRESSURE_TABLE);
    }

    #[test]
    fn test_padded_table_names_are_trimmed() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://project.example.co"),
            (KEY_VAR, "service-key"),
            ("GLUCOSE_TABLE", "  glucose_test\n"),
            ("BLOOD_PRESSURE_TABLE", " bp_test "),
        ]))
        .unwrap();

        assert_eq!(config.glucose_table, "glucose_test");
        assert_eq!(config.blood_pressure_table, "bp_test");
    }

    #[test]
    fn test_bad_timeout() {
        let result = StoreConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://project.example.co"),
            (KEY_VAR, "service-key"),
            ("STORE_TIMEOUT_SECONDS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidSetting { .. })));
    }

    #[test]
    fn test_debug_hides_key() {
        let config = StoreConfig::new("https://project.example.co", "secret-key");
        assert!(!format!("{:?}", config).contains("secret-key"));
    }
}
