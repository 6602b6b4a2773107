//! The home page listing: every table in a namespace, filterable by category.

use std::sync::Arc;

use schemadoc_core::{backend::SchemaBackend, category::Category, source::Source};
use tracing::warn;

use crate::{Error, Result};

/// Namespace listed when the caller does not pick one.
pub const DEFAULT_NAMESPACE: &str = "public_v1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
  #[default]
  All,
  Uncategorized,
  Named(String),
}

impl CategoryFilter {
  pub fn matches(&self, category: &Category) -> bool {
    match self {
      Self::All => true,
      Self::Uncategorized => category.is_uncategorized(),
      Self::Named(name) => matches!(category, Category::Named(c) if c == name),
    }
  }
}

pub struct BrowseView<B> {
  backend:        Arc<B>,
  pub namespace:  String,
  pub tables:     Vec<Source>,
  pub categories: Vec<String>,
  pub filter:     CategoryFilter,
  pub loading:    bool,
  pub error:      Option<String>,
}

impl<B: SchemaBackend> BrowseView<B> {
  pub fn new(backend: Arc<B>, namespace: impl Into<String>) -> Self {
    Self {
      backend,
      namespace: namespace.into(),
      tables: Vec::new(),
      categories: Vec::new(),
      filter: CategoryFilter::default(),
      loading: false,
      error: None,
    }
  }

  /// Fetch the namespace's tables and the known categories.
  ///
  /// A failed table listing is an error; a failed category listing only
  /// leaves the category list empty.
  pub async fn load(&mut self) -> Result<()> {
    self.loading = true;
    self.error = None;

    let tables = self
      .backend
      .list_namespace_sources(&self.namespace)
      .await
      .map_err(Error::backend);
    let categories = self.backend.list_categories().await;

    self.categories = categories.unwrap_or_else(|e| {
      warn!(error = %e, "listing categories failed");
      Vec::new()
    });
    self.loading = false;

    match tables {
      Ok(tables) => {
        self.tables = tables;
        Ok(())
      }
      Err(e) => {
        warn!(namespace = %self.namespace, error = %e, "listing tables failed");
        self.error = Some(e.to_string());
        Err(e)
      }
    }
  }

  /// Tables passing the current category filter, in listing order.
  pub fn filtered(&self) -> Vec<&Source> {
    self
      .tables
      .iter()
      .filter(|t| self.filter.matches(&t.category))
      .collect()
  }
}
