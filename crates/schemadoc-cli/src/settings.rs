//! Layered configuration: defaults, then the TOML file, then `SCHEMADOC_*`
//! environment variables. Command-line flags are applied on top by `main`.

use std::{path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File};
use schemadoc_client::ApiConfig;
use schemadoc_view::{browse::DEFAULT_NAMESPACE, table::ViewConfig};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Base URL of the schema registry.
  pub base_url:     String,
  /// Identity recorded on saved notes.
  pub editor:       String,
  pub timeout_secs: u64,
  /// Namespace listed by `browse` when none is given.
  pub namespace:    String,
}

impl Settings {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("base_url", "http://localhost:8888")?
      .set_default("editor", "")?
      .set_default("timeout_secs", 30)?
      .set_default("namespace", DEFAULT_NAMESPACE)?
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("SCHEMADOC"))
      .build()?
      .try_deserialize()
  }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      base_url: self.base_url.clone(),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }

  pub fn view_config(&self) -> ViewConfig { ViewConfig { editor: self.editor.clone() } }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/schemadoc.toml")).unwrap();
    assert_eq!(settings.namespace, "public_v1");
    assert_eq!(settings.api_config().timeout, Duration::from_secs(settings.timeout_secs));
  }
}
