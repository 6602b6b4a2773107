//! Plain-text rendering of view state.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use schemadoc_core::source::Source;
use schemadoc_view::{search::SearchResults, table::TableView};

fn stamp(ts: DateTime<Utc>) -> String { ts.format("%Y-%m-%d %H:%M").to_string() }

/// Render a loaded table view.
pub fn table(view: &TableView) -> String {
  let mut out = String::new();
  let Some(source) = &view.source else {
    return out;
  };

  let _ = writeln!(out, "{}.{}  [{}]", source.namespace.name, source.name, source.category);
  if let Some(owner) = &source.owner_email {
    let _ = writeln!(out, "owner:        {owner}");
  }
  if let Some(topic) = &view.topic {
    let _ = writeln!(out, "topic:        {topic}");
  }
  if let Some(schema_id) = view.schema_id {
    let _ = writeln!(out, "schema:       {schema_id}");
  }
  if let Some(updated) = view.last_updated {
    let _ = writeln!(out, "last updated: {}", stamp(updated));
  }
  if let Some(description) = &view.description {
    let _ = writeln!(out, "\n{description}");
  }
  if let Some(note) = view.table_note.as_ref().and_then(|slot| slot.note()) {
    let _ = writeln!(out, "\nnote ({}, {}): {}", note.last_updated_by, stamp(note.updated_at), note.note);
  }

  if !view.columns.is_empty() {
    let width = view.columns.iter().map(|c| c.name.len()).max().unwrap_or(0);
    let _ = writeln!(out);
    for column in &view.columns {
      let ty = column.display_type.as_deref().unwrap_or("?");
      let _ = write!(out, "  {:width$}  {}", column.name, ty.trim_end());
      if let Some(text) = column.note.text() {
        let _ = write!(out, "  -- {text}");
      }
      let _ = writeln!(out);
    }
  }
  out
}

/// One line per source.
pub fn sources<'a>(sources: impl IntoIterator<Item = &'a Source>) -> String {
  let mut out = String::new();
  for s in sources {
    let _ = writeln!(out, "{:>6}  {}.{}  [{}]", s.source_id, s.namespace.name, s.name, s.category);
  }
  out
}

pub fn search(results: &SearchResults) -> String {
  let mut out = String::new();
  match results {
    SearchResults::Schema(schema) => {
      let _ = writeln!(out, "schema {}", schema.schema_id);
      let _ = writeln!(out, "{}", schema.schema);
    }
    SearchResults::TopicSchemas(schemas) => {
      for schema in schemas {
        let status = schema.status.as_deref().unwrap_or("-");
        let _ = writeln!(out, "{:>6}  {status}", schema.schema_id);
      }
    }
    SearchResults::Sources(found) | SearchResults::NamespaceSources(found) => {
      out.push_str(&sources(found));
    }
    SearchResults::Namespaces(names) => {
      for name in names {
        let _ = writeln!(out, "{name}");
      }
    }
    SearchResults::SourceTopics(topics) => {
      for topic in topics {
        let pii = if topic.contains_pii { "  (pii)" } else { "" };
        let _ = writeln!(out, "{}{pii}", topic.name);
      }
    }
  }
  out
}
