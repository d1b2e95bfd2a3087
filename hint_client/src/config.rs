use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/generate-hints";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the hint service.
///
/// All fields are optional in the JSON file, missing ones get the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL the hint requests are posted to.
    pub endpoint: String,
    pub timeout_secs: u64,
    /// A word list to use instead of the bundled one.
    pub word_pool: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(DEFAULT_ENDPOINT),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            word_pool: None,
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Overrides the values that were given explicitly.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        timeout_secs: Option<u64>,
        word_pool: Option<PathBuf>,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if word_pool.is_some() {
            self.word_pool = word_pool;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.word_pool, None);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = ClientConfig::default().with_overrides(
            Some(String::from("http://hints.local/generate-hints")),
            None,
            Some(PathBuf::from("words.txt")),
        );
        assert_eq!(config.endpoint, "http://hints.local/generate-hints");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.word_pool, Some(PathBuf::from("words.txt")));
    }

    #[test]
    fn load_reads_a_file() {
        let path = std::env::temp_dir()
            .join(format!("hint_client_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"endpoint": "http://10.0.0.2:5000/generate-hints"}"#).unwrap();
        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.2:5000/generate-hints");
        std::fs::remove_file(path).unwrap();
        assert!(ClientConfig::load(Path::new("/no/such/config.json")).is_err());
    }
}
