use std::env;
use std::path::{Path, PathBuf};

/// Default archive endpoint.
pub const DEFAULT_DATA_ACCESS_URL: &str = "https://api.dev.imap-mission.com";

const ENV_DATA_DIR: &str = "IMAP_DATA_DIR";
const ENV_DATA_ACCESS_URL: &str = "IMAP_DATA_ACCESS_URL";
const ENV_API_KEY: &str = "IMAP_API_KEY";

/// Process-wide settings, read once and handed to every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root under which files are stored by instrument and level.
    pub data_dir: PathBuf,
    pub data_access_url: String,
    /// Only needed for uploads.
    pub api_key: Option<String>,
}

impl Config {
    /// Read `IMAP_DATA_DIR`, `IMAP_DATA_ACCESS_URL` and `IMAP_API_KEY`.
    ///
    /// The data directory defaults to `data/` under the current directory.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injected variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let data_dir = set(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| env::current_dir().unwrap_or_default().join("data"));

        Self {
            data_dir,
            data_access_url: set(ENV_DATA_ACCESS_URL)
                .unwrap_or_else(|| DEFAULT_DATA_ACCESS_URL.to_string()),
            api_key: set(ENV_API_KEY),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.data_access_url = url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn data_dir(&self) -> &Path { &self.data_dir }

    /// Archive URL without a trailing slash.
    pub fn base_url(&self) -> &str { self.data_access_url.trim_end_matches('/') }
}

impl Default for Config {
    fn default() -> Self { Self::from_lookup(|_| None) }
}
