//! Error types for `schemadoc-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("source does not exist: {namespace}.{table}")]
  SourceNotFound { namespace: String, table: String },

  #[error("invalid schema document: {0}")]
  InvalidSchema(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
