//! Notes — free-text annotations on a schema (table-level) or a schema
//! element (column-level).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::timestamp;

/// What a note is attached to. A note is never attached to both.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReferenceType {
  /// Table-level note.
  Schema,
  /// Column-level note.
  SchemaElement,
}

/// The thing a note is (or will be) attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteTarget {
  pub reference_type: ReferenceType,
  pub reference_id:   i64,
}

impl NoteTarget {
  pub fn schema(schema_id: i64) -> Self {
    Self { reference_type: ReferenceType::Schema, reference_id: schema_id }
  }

  pub fn element(element_id: i64) -> Self {
    Self { reference_type: ReferenceType::SchemaElement, reference_id: element_id }
  }
}

/// A persisted note as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
  pub id:              i64,
  pub reference_type:  ReferenceType,
  pub reference_id:    i64,
  pub note:            String,
  pub last_updated_by: String,
  #[serde(default, deserialize_with = "timestamp::optional")]
  pub created_at:      Option<DateTime<Utc>>,
  #[serde(deserialize_with = "timestamp::required")]
  pub updated_at:      DateTime<Utc>,
}

/// Body of `POST /v1/notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
  pub reference_id:    i64,
  pub reference_type:  ReferenceType,
  pub note:            String,
  pub last_updated_by: String,
}

impl NewNote {
  pub fn new(target: NoteTarget, note: String, last_updated_by: String) -> Self {
    Self {
      reference_id: target.reference_id,
      reference_type: target.reference_type,
      note,
      last_updated_by,
    }
  }
}

/// Body of `POST /v1/notes/{note_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
  pub note:            String,
  pub last_updated_by: String,
}
