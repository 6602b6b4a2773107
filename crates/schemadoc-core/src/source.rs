//! Namespaces and sources.
//!
//! A source is one documented table within a namespace. It is the entry point
//! of every table view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{category::Category, timestamp};

/// A grouping of sources, e.g. a database scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
  #[serde(default)]
  pub namespace_id: i64,
  pub name:         String,
  #[serde(default, deserialize_with = "timestamp::optional")]
  pub created_at:   Option<DateTime<Utc>>,
  #[serde(default, deserialize_with = "timestamp::optional")]
  pub updated_at:   Option<DateTime<Utc>>,
}

/// A documented table (the "table descriptor" of the table view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
  pub source_id:   i64,
  /// Table name. Older backends call this field `source`.
  #[serde(alias = "source")]
  pub name:        String,
  #[serde(default)]
  pub owner_email: Option<String>,
  pub namespace:   Namespace,
  #[serde(default)]
  pub category:    Category,
  #[serde(default, deserialize_with = "timestamp::optional")]
  pub created_at:  Option<DateTime<Utc>>,
  #[serde(deserialize_with = "timestamp::required")]
  pub updated_at:  DateTime<Utc>,
}

/// Body of `POST /v1/sources/{id}/category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBody {
  pub category: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialises_backend_source() {
    let raw = r#"{
      "source_id": 7,
      "name": "business",
      "owner_email": "owner@example.com",
      "namespace": {
        "namespace_id": 1,
        "name": "public_v1",
        "created_at": "2016-01-01T00:00:00",
        "updated_at": "2016-01-01T00:00:00"
      },
      "category": null,
      "created_at": "2016-01-01T00:00:00",
      "updated_at": "2016-02-01T00:00:00"
    }"#;
    let source: Source = serde_json::from_str(raw).unwrap();
    assert_eq!(source.source_id, 7);
    assert_eq!(source.name, "business");
    assert_eq!(source.namespace.name, "public_v1");
    assert!(source.category.is_uncategorized());
  }

  #[test]
  fn accepts_legacy_source_key() {
    let raw = r#"{
      "source_id": 3,
      "source": "review",
      "namespace": { "name": "yelp" },
      "category": "Reviews",
      "updated_at": "2016-02-01T00:00:00Z"
    }"#;
    let source: Source = serde_json::from_str(raw).unwrap();
    assert_eq!(source.name, "review");
    assert_eq!(source.category, Category::Named("Reviews".into()));
  }
}
