//! Error type for `schemadoc-client`.

use reqwest::{Method, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid base url: {0}")]
  BaseUrl(String),

  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  /// The request never produced a response (connect, timeout, body I/O).
  #[error("{method} {path} failed: {source}")]
  Request {
    method: Method,
    path:   String,
    #[source]
    source: reqwest::Error,
  },

  /// The backend answered with a non-success status.
  #[error("{method} {path} → {status}")]
  Status {
    method: Method,
    path:   String,
    status: StatusCode,
  },

  #[error("deserialising {path}: {source}")]
  Decode {
    path:   String,
    #[source]
    source: reqwest::Error,
  },
}

impl Error {
  /// The HTTP status, when the backend answered at all.
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
