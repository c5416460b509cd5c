//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

fn default_schools_path() -> String {
    "schools".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("school-search/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Clone, Debug, Deserialize)]
/// Settings read once at startup and shared by the HTTP repository.
pub struct ClientConfig {
    /// Base URL of the listings API, e.g. `https://api.example.com/v1`.
    pub api_base_url: String,
    #[serde(default = "default_schools_path")]
    pub schools_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            schools_path: default_schools_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Layers `<dir>/default.yaml`, `<dir>/<app_env>.yaml` and `APP_*`
    /// environment variables, later sources winning.
    pub fn load(dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        Self::load_with(dir, app_env, Environment::with_prefix("APP"))
    }

    fn load_with(dir: &Path, app_env: &str, environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(dir.join("default.yaml")).required(false))
            .add_source(File::from(dir.join(format!("{app_env}.yaml"))).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}
