use crate::errors::{ConfigError, LbError, Result};
use slb_api::ApiConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SECTION: &str = "softlayer";

/// Configuration for reaching the SoftLayer API.
///
/// Values come from environment variables first (`SL_USERNAME`, `SL_API_KEY`,
/// `SL_ENDPOINT_URL`, `SL_TIMEOUT`) and then from the `[softlayer]` section
/// of `~/.softlayer`.
#[derive(Debug, Clone)]
pub struct Config {
    config_path: Option<PathBuf>,
    data: ini::Ini,
    use_env: bool,
}

impl Config {
    /// Load `~/.softlayer` if present, otherwise rely on the environment alone
    pub fn new() -> Result<Self> {
        let config_path = get_config_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Config {
                config_path: None,
                data: ini::Ini::new(),
                use_env: true,
            })
        }
    }

    /// Load an explicit config file; environment variables still take precedence
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let data =
            ini::Ini::load_from_file(path).map_err(|e| ConfigError::IniError(e.to_string()))?;

        Ok(Config {
            config_path: Some(path.to_path_buf()),
            data,
            use_env: true,
        })
    }

    /// Parse INI contents only; the environment is not consulted
    pub fn parse(contents: &str) -> Result<Self> {
        let data =
            ini::Ini::load_from_str(contents).map_err(|e| ConfigError::IniError(e.to_string()))?;

        Ok(Config {
            config_path: None,
            data,
            use_env: false,
        })
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn lookup(&self, env_key: &str, key: &str) -> Option<String> {
        if self.use_env {
            if let Ok(value) = std::env::var(env_key) {
                return Some(value);
            }
        }

        self.data
            .get_from(Some(SECTION), key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Get the account username
    pub fn username(&self) -> Result<String> {
        self.lookup("SL_USERNAME", "username")
            .ok_or_else(|| ConfigError::MissingField("softlayer.username".to_string()).into())
    }

    /// Get the API key
    pub fn api_key(&self) -> Result<String> {
        self.lookup("SL_API_KEY", "api_key")
            .ok_or_else(|| ConfigError::MissingField("softlayer.api_key".to_string()).into())
    }

    pub fn endpoint_url(&self) -> Option<String> {
        self.lookup("SL_ENDPOINT_URL", "endpoint_url")
    }

    /// Request timeout in whole seconds
    pub fn timeout(&self) -> Result<Option<Duration>> {
        match self.lookup("SL_TIMEOUT", "timeout") {
            Some(raw) => {
                let seconds = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    field: "softlayer.timeout".to_string(),
                    value: raw.clone(),
                })?;
                Ok(Some(Duration::from_secs(seconds)))
            }
            None => Ok(None),
        }
    }
}

impl ApiConfig for Config {
    type Error = LbError;

    fn get_username(&self) -> Result<String> {
        self.username()
    }

    fn get_api_key(&self) -> Result<String> {
        self.api_key()
    }

    fn get_endpoint_url(&self) -> Result<Option<String>> {
        Ok(self.endpoint_url())
    }

    fn get_timeout(&self) -> Result<Option<Duration>> {
        self.timeout()
    }
}

/// Get configuration file path
fn get_config_path() -> Result<PathBuf> {
    let home_dir = home::home_dir().ok_or_else(|| ConfigError::InvalidValue {
        field: "home".to_string(),
        value: "could not find home directory".to_string(),
    })?;

    Ok(home_dir.join(".softlayer"))
}
