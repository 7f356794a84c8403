//! Layered configuration: optional TOML file, then `HOMEFS_*` environment
//! variables. Command-line flags are applied on top by the caller.

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

/// Shape of the optional config file.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
  #[serde(default)]
  pub region:          Option<String>,
  /// Overrides the regional SageMaker endpoint.
  #[serde(default)]
  pub endpoint:        Option<String>,
  #[serde(default)]
  pub log_stream_name: Option<String>,
  /// Sets `NoEcho` on custom-resource responses.
  #[serde(default)]
  pub no_echo:         Option<bool>,
}

impl Settings {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("HOMEFS"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

/// `flag` if given, else the configured value.
pub fn pick(flag: Option<String>, configured: &Option<String>) -> Option<String> {
  flag.or_else(|| configured.clone()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/homefs.toml")).unwrap();
    assert!(settings.endpoint.is_none());
  }

  #[test]
  fn flag_overrides_configured_value() {
    let configured = Some("eu-west-1".to_string());
    assert_eq!(pick(Some("us-east-1".into()), &configured).as_deref(), Some("us-east-1"));
    assert_eq!(pick(None, &configured).as_deref(), Some("eu-west-1"));
    assert_eq!(pick(Some(String::new()), &None), None);
  }
}
