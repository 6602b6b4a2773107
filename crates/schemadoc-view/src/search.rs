//! Lookups behind the schema browser's search box.

use std::str::FromStr;

use schemadoc_core::{
  backend::SchemaBackend,
  schema::SchemaRecord,
  source::Source,
  topic::Topic,
};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::debug;

/// What the search text is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SearchKind {
  /// A numeric schema id.
  #[default]
  Schema,
  /// A topic name; lists its schemas.
  Topic,
  /// A table name, matched case-insensitively.
  Source,
  /// A substring of a namespace name.
  Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults {
  Schema(SchemaRecord),
  TopicSchemas(Vec<SchemaRecord>),
  Sources(Vec<Source>),
  Namespaces(Vec<String>),
  SourceTopics(Vec<Topic>),
  NamespaceSources(Vec<Source>),
}

/// A search that found nothing, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SearchMiss(pub &'static str);

pub type SearchOutcome = Result<SearchResults, SearchMiss>;

const NO_SCHEMA: SearchMiss = SearchMiss("No schema found.");
const NO_TOPIC: SearchMiss = SearchMiss("No topic found.");
const NO_SOURCES: SearchMiss = SearchMiss("No sources found.");
const NO_NAMESPACES: SearchMiss = SearchMiss("No namespaces found.");
const NO_TOPICS: SearchMiss = SearchMiss("No topics found.");

fn miss<E: std::fmt::Display>(what: SearchMiss) -> impl FnOnce(E) -> SearchMiss {
  move |e| {
    debug!(error = %e, "search request failed");
    what
  }
}

/// Run a search of `kind` for `text`.
pub async fn search<B: SchemaBackend>(backend: &B, kind: SearchKind, text: &str) -> SearchOutcome {
  match kind {
    SearchKind::Schema => {
      let schema_id = i64::from_str(text.trim()).map_err(miss(NO_SCHEMA))?;
      let schema = backend.get_schema(schema_id).await.map_err(miss(NO_SCHEMA))?;
      Ok(SearchResults::Schema(schema))
    }
    SearchKind::Topic => {
      let schemas = backend.list_topic_schemas(text).await.map_err(miss(NO_TOPIC))?;
      Ok(SearchResults::TopicSchemas(schemas))
    }
    SearchKind::Source => {
      let wanted = text.to_lowercase();
      let sources: Vec<_> = backend
        .list_sources()
        .await
        .map_err(miss(NO_SOURCES))?
        .into_iter()
        .filter(|s| s.name.to_lowercase() == wanted)
        .collect();
      if sources.is_empty() {
        return Err(NO_SOURCES);
      }
      Ok(SearchResults::Sources(sources))
    }
    SearchKind::Namespace => {
      let namespaces: Vec<_> = backend
        .list_namespaces()
        .await
        .map_err(miss(NO_NAMESPACES))?
        .into_iter()
        .filter(|n| n.contains(text))
        .collect();
      if namespaces.is_empty() {
        return Err(NO_NAMESPACES);
      }
      Ok(SearchResults::Namespaces(namespaces))
    }
  }
}

/// Drill down from a source result to its topics.
pub async fn topics_for_source<B: SchemaBackend>(backend: &B, source_id: i64) -> SearchOutcome {
  let topics = backend
    .list_source_topics(source_id)
    .await
    .map_err(miss(NO_TOPICS))?;
  if topics.is_empty() {
    return Err(NO_TOPICS);
  }
  Ok(SearchResults::SourceTopics(topics))
}

/// Drill down from a namespace result to its sources.
pub async fn sources_for_namespace<B: SchemaBackend>(backend: &B, namespace: &str) -> SearchOutcome {
  let sources = backend
    .list_namespace_sources(namespace)
    .await
    .map_err(miss(NO_SOURCES))?;
  Ok(SearchResults::NamespaceSources(sources))
}
