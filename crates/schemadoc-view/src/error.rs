//! Error type for `schemadoc-view`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Domain errors detected client-side (missing table, bad schema document).
  #[error(transparent)]
  Core(#[from] schemadoc_core::Error),

  /// Any failure reported by the backend, transport or status.
  #[error("backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("no table is loaded")]
  NotLoaded,
}

impl Error {
  pub fn backend<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Backend(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
