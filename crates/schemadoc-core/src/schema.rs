//! Schemas and schema elements.
//!
//! A schema record carries the raw serialized document; its elements are the
//! rows the backend derived from that document (one for the record itself and
//! one per field). Elements are keyed by a `|`-delimited qualified key, e.g.
//! `business|name`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{note::Note, timestamp};

// ─── Schema record ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRecord {
  pub schema_id:    i64,
  /// The raw serialized schema document.
  pub schema:       String,
  #[serde(default)]
  pub status:       Option<String>,
  #[serde(default)]
  pub primary_keys: Vec<String>,
  /// Table-level note, if one has been written.
  #[serde(default)]
  pub note:         Option<Note>,
  #[serde(default, deserialize_with = "timestamp::optional")]
  pub created_at:   Option<DateTime<Utc>>,
  #[serde(default, deserialize_with = "timestamp::optional")]
  pub updated_at:   Option<DateTime<Utc>>,
}

// ─── Parsed document ────────────────────────────────────────────────────────

/// The subset of a serialized schema document the browser cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
  #[serde(default)]
  pub name:   Option<String>,
  #[serde(default)]
  pub doc:    Option<String>,
  #[serde(default)]
  pub fields: Vec<FieldDef>,
}

/// One entry of the document's field list.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
  pub name:   String,
  /// A scalar type name, a union (list) of them, or any nested shape.
  #[serde(rename = "type")]
  pub ty:     serde_json::Value,
  /// Declared maximum length; only meaningful for `string`.
  #[serde(default)]
  pub maxlen: Option<serde_json::Value>,
  #[serde(default)]
  pub doc:    Option<String>,
}

impl SchemaDocument {
  pub fn parse(raw: &str) -> crate::Result<Self> { Ok(serde_json::from_str(raw)?) }
}

// ─── Elements ───────────────────────────────────────────────────────────────

/// The kind of a schema element. Kinds other than record and field (enum,
/// array, map, …) collapse into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
  Record,
  Field,
  #[serde(other)]
  Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaElement {
  pub id:           i64,
  #[serde(default)]
  pub schema_id:    Option<i64>,
  pub element_type: ElementKind,
  /// Qualified key, e.g. `business|name`.
  pub key:          String,
  #[serde(default)]
  pub doc:          Option<String>,
  /// Column-level note, if one has been written.
  #[serde(default)]
  pub note:         Option<Note>,
  #[serde(default, deserialize_with = "timestamp::optional")]
  pub created_at:   Option<DateTime<Utc>>,
  #[serde(deserialize_with = "timestamp::required")]
  pub updated_at:   DateTime<Utc>,
}
