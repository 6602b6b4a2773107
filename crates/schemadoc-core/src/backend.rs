//! The `SchemaBackend` trait — the seam between view state and the REST API.
//!
//! The trait is implemented by `schemadoc-client` over HTTP. View controllers
//! depend on this abstraction, not on any concrete transport.

use std::future::Future;

use crate::{
  note::{NewNote, Note, NoteUpdate},
  schema::{SchemaElement, SchemaRecord},
  source::Source,
  topic::Topic,
};

/// Read and annotate access to the schema registry.
///
/// All methods return `Send` futures so implementations can be driven from a
/// multi-threaded tokio runtime.
pub trait SchemaBackend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Namespaces and sources ────────────────────────────────────────────

  /// `GET /v1/namespaces`
  fn list_namespaces(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// `GET /v1/namespaces/{namespace}/sources`
  fn list_namespace_sources<'a>(
    &'a self,
    namespace: &'a str,
  ) -> impl Future<Output = Result<Vec<Source>, Self::Error>> + Send + 'a;

  /// `GET /v1/sources`
  fn list_sources(
    &self,
  ) -> impl Future<Output = Result<Vec<Source>, Self::Error>> + Send + '_;

  /// `GET /v1/sources/{source_id}`
  fn get_source(
    &self,
    source_id: i64,
  ) -> impl Future<Output = Result<Source, Self::Error>> + Send + '_;

  // ── Topics ────────────────────────────────────────────────────────────

  /// `GET /v1/sources/{source_id}/topics`
  fn list_source_topics(
    &self,
    source_id: i64,
  ) -> impl Future<Output = Result<Vec<Topic>, Self::Error>> + Send + '_;

  /// `GET /v1/sources/{source_id}/topics/latest`
  fn latest_topic(
    &self,
    source_id: i64,
  ) -> impl Future<Output = Result<Topic, Self::Error>> + Send + '_;

  // ── Schemas ───────────────────────────────────────────────────────────

  /// `GET /v1/schemas/{schema_id}`
  fn get_schema(
    &self,
    schema_id: i64,
  ) -> impl Future<Output = Result<SchemaRecord, Self::Error>> + Send + '_;

  /// `GET /v1/topics/{topic_name}/schemas`
  fn list_topic_schemas<'a>(
    &'a self,
    topic_name: &'a str,
  ) -> impl Future<Output = Result<Vec<SchemaRecord>, Self::Error>> + Send + 'a;

  /// `GET /v1/topics/{topic_name}/schemas/latest`
  fn latest_schema<'a>(
    &'a self,
    topic_name: &'a str,
  ) -> impl Future<Output = Result<SchemaRecord, Self::Error>> + Send + 'a;

  /// `GET /v1/schemas/{schema_id}/elements` — ordered as the backend stores
  /// them.
  fn schema_elements(
    &self,
    schema_id: i64,
  ) -> impl Future<Output = Result<Vec<SchemaElement>, Self::Error>> + Send + '_;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// `POST /v1/notes`
  fn create_note(
    &self,
    note: NewNote,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  /// `POST /v1/notes/{note_id}`
  fn update_note(
    &self,
    note_id: i64,
    update: NoteUpdate,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  // ── Categories ────────────────────────────────────────────────────────

  /// `GET /v1/categories`
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// `POST /v1/sources/{source_id}/category`
  fn set_category<'a>(
    &'a self,
    source_id: i64,
    category: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// `DELETE /v1/sources/{source_id}/category`
  fn clear_category(
    &self,
    source_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
