//! Core types and trait definitions for the schema documentation browser.
//!
//! This crate has no HTTP dependencies. The client and view
//! crates depend on it; it depends on nothing but serialization helpers.

pub mod backend;
pub mod category;
pub mod error;
pub mod format;
pub mod note;
pub mod schema;
pub mod source;
pub mod timestamp;
pub mod topic;

pub use error::{Error, Result};
