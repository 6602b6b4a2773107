//! View-state controllers for the schema documentation browser.
//!
//! Every controller is generic over a [`SchemaBackend`] and owns nothing but
//! the state of one page visit; there is no local persistence.
//!
//! - [`table`] assembles the denormalised table view and handles note and
//!   category edits against it.
//! - [`note`] is the view/edit protocol shared by table and column notes.
//! - [`browse`] lists the tables of a namespace with a category filter.
//! - [`search`] backs the schema/topic/source/namespace search box.
//!
//! [`SchemaBackend`]: schemadoc_core::backend::SchemaBackend

pub mod browse;
pub mod error;
pub mod note;
pub mod search;
pub mod table;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;
