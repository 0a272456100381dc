use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::types::AnyResult;
use crate::configs::*;

const SEARCH_PATHS: [&str; 2] = ["config.toml", "config.default.toml"];

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub http: HttpConfig,
  #[serde(default)]
  pub logging: Option<LoggingConfig>,
}

impl Config {
  /// Loads the configuration.
  ///
  /// An explicit path must exist. Without one, `config.toml` and then
  /// `config.default.toml` are tried; when neither exists the built-in
  /// defaults are returned. The second value is the file that was read.
  pub fn load(explicit: Option<&Path>) -> AnyResult<(Self, Option<PathBuf>)> {
    let path = match explicit {
      Some(path) if path.exists() => path.to_path_buf(),
      Some(path) => return Err(format!("{} not found", path.display()).into()),
      None => match SEARCH_PATHS.iter().map(Path::new).find(|p| p.exists()) {
        Some(path) => path.to_path_buf(),
        None => return Ok((Self::default(), None)),
      },
    };

    let config = Self::from_file(&path)?;
    Ok((config, Some(path)))
  }

  pub fn from_file(path: &Path) -> AnyResult<Self> {
    let config_str = std::fs::read_to_string(path)?;
    Self::parse(&config_str)
  }

  pub fn parse(config_str: &str) -> AnyResult<Self> {
    let config: Config = toml::from_str(config_str)?;
    Ok(config)
  }
}
