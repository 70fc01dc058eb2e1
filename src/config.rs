use crate::api::store::DataSource;
use crate::scrapers::pikkit::PIKKIT_URL;
use crate::utils::links::NOVIG_URL;
use std::env;

pub const DEFAULT_DATA: &str = "static/pikkit-data.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Settings read from the environment (and `.env`, once the binary has loaded it)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File path or URL of the Pikkit data file
    pub data: String,
    pub bind: String,
    pub novig_url: String,
    pub pikkit_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            data: var("ODDSEDGE_DATA", DEFAULT_DATA),
            bind: var("ODDSEDGE_BIND", DEFAULT_BIND),
            novig_url: var("NOVIG_URL", NOVIG_URL),
            pikkit_url: var("PIKKIT_URL", PIKKIT_URL),
        }
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.data)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data, "static/pikkit-data.json");
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.novig_url, "https://www.novig.us/");
        assert_eq!(config.pikkit_url, "https://app.pikkit.com/");
        assert!(matches!(config.data_source(), DataSource::File(_)));
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ODDSEDGE_DATA", "https://cdn.example.com/pikkit-data.json"),
            ("ODDSEDGE_BIND", "  "),
            ("NOVIG_URL", "https://staging.novig.us/"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert!(matches!(config.data_source(), DataSource::Url(_)));
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.novig_url, "https://staging.novig.us/");
    }
}
