//! HTTP implementation of [`schemadoc_core::backend::SchemaBackend`].
//!
//! All requests go to the `/v1` REST API below the configured base URL and
//! carry a JSON content type. Timeouts are enforced here, not by the view
//! controllers.

mod client;
pub mod error;

pub use client::{ApiClient, ApiConfig};
pub use error::{Error, Result};
