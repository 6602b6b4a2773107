//! In-memory [`SchemaBackend`] that records every call, for controller tests.

use std::{
  collections::{HashMap, HashSet},
  sync::{
    Mutex,
    atomic::{AtomicI64, Ordering},
  },
};

use chrono::{DateTime, TimeZone, Utc};
use schemadoc_core::{
  backend::SchemaBackend,
  category::Category,
  note::{NewNote, Note, NoteUpdate},
  schema::{SchemaElement, SchemaRecord},
  source::{Namespace, Source},
  topic::Topic,
};
use thiserror::Error;

/// Text the fake server puts in every note it returns, so tests can tell a
/// server echo apart from the locally saved draft.
pub const SERVER_TEXT: &str = "server copy";

pub const EDITOR: &str = "editor@example.com";

#[derive(Debug, Error)]
#[error("{0} failed")]
pub struct FakeError(pub String);

#[derive(Default)]
pub struct FakeBackend {
  pub namespaces: Vec<String>,
  pub sources:    Vec<Source>,
  /// Topics per source id; the last one is the latest.
  pub topics:     HashMap<i64, Vec<Topic>>,
  /// Schemas per topic name; the last one is the latest.
  pub schemas:    HashMap<String, Vec<SchemaRecord>>,
  pub elements:   HashMap<i64, Vec<SchemaElement>>,
  pub categories: Vec<String>,
  failing:        HashSet<&'static str>,
  calls:          Mutex<Vec<String>>,
  next_note_id:   AtomicI64,
}

impl FakeBackend {
  /// Make every call to `op` fail.
  pub fn failing(mut self, op: &'static str) -> Self {
    self.failing.insert(op);
    self
  }

  /// Calls made so far, as `"<op> <args>"`.
  pub fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }

  /// Just the operation names of [`Self::calls`].
  pub fn ops(&self) -> Vec<String> {
    self
      .calls()
      .into_iter()
      .map(|c| c.split(' ').next().unwrap_or_default().to_owned())
      .collect()
  }

  fn record(&self, op: &'static str, args: String) -> Result<(), FakeError> {
    let entry = if args.is_empty() { op.to_owned() } else { format!("{op} {args}") };
    self.calls.lock().unwrap().push(entry);
    if self.failing.contains(op) {
      return Err(FakeError(op.to_owned()));
    }
    Ok(())
  }

  fn server_note(&self, id: i64, reference: &NewNote) -> Note {
    Note {
      id,
      reference_type: reference.reference_type,
      reference_id: reference.reference_id,
      note: SERVER_TEXT.to_owned(),
      last_updated_by: reference.last_updated_by.clone(),
      created_at: Some(ts(20)),
      updated_at: ts(20),
    }
  }

  fn not_found<T>(what: String) -> Result<T, FakeError> { Err(FakeError(what)) }
}

impl SchemaBackend for FakeBackend {
  type Error = FakeError;

  async fn list_namespaces(&self) -> Result<Vec<String>, FakeError> {
    self.record("list_namespaces", String::new())?;
    Ok(self.namespaces.clone())
  }

  async fn list_namespace_sources(&self, namespace: &str) -> Result<Vec<Source>, FakeError> {
    self.record("list_namespace_sources", namespace.to_owned())?;
    Ok(
      self
        .sources
        .iter()
        .filter(|s| s.namespace.name == namespace)
        .cloned()
        .collect(),
    )
  }

  async fn list_sources(&self) -> Result<Vec<Source>, FakeError> {
    self.record("list_sources", String::new())?;
    Ok(self.sources.clone())
  }

  async fn get_source(&self, source_id: i64) -> Result<Source, FakeError> {
    self.record("get_source", source_id.to_string())?;
    match self.sources.iter().find(|s| s.source_id == source_id) {
      Some(s) => Ok(s.clone()),
      None => Self::not_found(format!("source {source_id}")),
    }
  }

  async fn list_source_topics(&self, source_id: i64) -> Result<Vec<Topic>, FakeError> {
    self.record("list_source_topics", source_id.to_string())?;
    Ok(self.topics.get(&source_id).cloned().unwrap_or_default())
  }

  async fn latest_topic(&self, source_id: i64) -> Result<Topic, FakeError> {
    self.record("latest_topic", source_id.to_string())?;
    match self.topics.get(&source_id).and_then(|t| t.last()) {
      Some(t) => Ok(t.clone()),
      None => Self::not_found(format!("topic of source {source_id}")),
    }
  }

  async fn get_schema(&self, schema_id: i64) -> Result<SchemaRecord, FakeError> {
    self.record("get_schema", schema_id.to_string())?;
    match self.schemas.values().flatten().find(|s| s.schema_id == schema_id) {
      Some(s) => Ok(s.clone()),
      None => Self::not_found(format!("schema {schema_id}")),
    }
  }

  async fn list_topic_schemas(&self, topic_name: &str) -> Result<Vec<SchemaRecord>, FakeError> {
    self.record("list_topic_schemas", topic_name.to_owned())?;
    match self.schemas.get(topic_name) {
      Some(s) => Ok(s.clone()),
      None => Self::not_found(format!("topic {topic_name}")),
    }
  }

  async fn latest_schema(&self, topic_name: &str) -> Result<SchemaRecord, FakeError> {
    self.record("latest_schema", topic_name.to_owned())?;
    match self.schemas.get(topic_name).and_then(|s| s.last()) {
      Some(s) => Ok(s.clone()),
      None => Self::not_found(format!("schema of topic {topic_name}")),
    }
  }

  async fn schema_elements(&self, schema_id: i64) -> Result<Vec<SchemaElement>, FakeError> {
    self.record("schema_elements", schema_id.to_string())?;
    match self.elements.get(&schema_id) {
      Some(e) => Ok(e.clone()),
      None => Self::not_found(format!("elements of schema {schema_id}")),
    }
  }

  async fn create_note(&self, note: NewNote) -> Result<Note, FakeError> {
    self.record(
      "create_note",
      format!("{} {}", note.reference_type, note.reference_id),
    )?;
    let id = 100 + self.next_note_id.fetch_add(1, Ordering::SeqCst);
    Ok(self.server_note(id, &note))
  }

  async fn update_note(&self, note_id: i64, update: NoteUpdate) -> Result<Note, FakeError> {
    self.record("update_note", note_id.to_string())?;
    let mut note = self.server_note(
      note_id,
      &NewNote {
        reference_id:    0,
        reference_type:  schemadoc_core::note::ReferenceType::Schema,
        note:            update.note,
        last_updated_by: update.last_updated_by,
      },
    );
    note.created_at = None;
    Ok(note)
  }

  async fn list_categories(&self) -> Result<Vec<String>, FakeError> {
    self.record("list_categories", String::new())?;
    Ok(self.categories.clone())
  }

  async fn set_category(&self, source_id: i64, category: &str) -> Result<(), FakeError> {
    self.record("set_category", format!("{source_id} {category}"))
  }

  async fn clear_category(&self, source_id: i64) -> Result<(), FakeError> {
    self.record("clear_category", source_id.to_string())
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

/// Midnight UTC on 2016-01-`day`.
pub fn ts(day: u32) -> DateTime<Utc> { Utc.with_ymd_and_hms(2016, 1, day, 0, 0, 0).unwrap() }

pub fn source(source_id: i64, name: &str, namespace: &str) -> Source {
  Source {
    source_id,
    name: name.to_owned(),
    owner_email: None,
    namespace: Namespace {
      namespace_id: 1,
      name:         namespace.to_owned(),
      created_at:   None,
      updated_at:   None,
    },
    category: Category::Uncategorized,
    created_at: None,
    updated_at: ts(1),
  }
}

pub fn topic(name: &str) -> Topic {
  Topic {
    topic_id:     None,
    name:         name.to_owned(),
    contains_pii: false,
    created_at:   None,
    updated_at:   None,
  }
}

pub fn schema_record(schema_id: i64, raw: &str) -> SchemaRecord {
  SchemaRecord {
    schema_id,
    schema: raw.to_owned(),
    status: None,
    primary_keys: Vec::new(),
    note: None,
    created_at: None,
    updated_at: None,
  }
}
