//! The table view: one table's full display model, assembled from four
//! dependent backend calls, plus the note and category edits made on it.
//!
//! Loading is a linear pipeline over [`Stage`]s. Each stage starts only once
//! the previous one has succeeded; the first failure moves the view to
//! [`LoadState::Failed`] and nothing after it runs.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use schemadoc_core::{
  backend::SchemaBackend,
  category::Category,
  format,
  note::{NoteTarget, ReferenceType},
  schema::{ElementKind, SchemaElement},
  source::Source,
};
use strum::Display;
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  note::{NoteCompletion, NoteSlot, PendingSave},
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Settings supplied by the hosting shell.
#[derive(Debug, Clone, Default)]
pub struct ViewConfig {
  /// Identity recorded as `last_updated_by` on every note this view saves.
  pub editor: String,
}

// ─── State machine ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
  Source,
  Topic,
  Schema,
  Elements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
  #[default]
  Idle,
  Loading(Stage),
  Ready,
  Failed(Stage),
}

impl LoadState {
  pub fn is_loading(&self) -> bool { matches!(self, Self::Loading(_)) }

  pub fn is_ready(&self) -> bool { matches!(self, Self::Ready) }

  pub fn failed_stage(&self) -> Option<Stage> {
    match self {
      Self::Failed(stage) => Some(*stage),
      _ => None,
    }
  }
}

// ─── View model ───────────────────────────────────────────────────────────────

/// One field of the table.
#[derive(Debug, Clone)]
pub struct Column {
  pub element_id:   i64,
  /// Qualified key, e.g. `business|name`.
  pub key:          String,
  /// Second segment of `key`.
  pub name:         String,
  /// Computed from the raw schema document; `None` when the document has no
  /// field of this name.
  pub display_type: Option<String>,
  pub doc:          Option<String>,
  pub updated_at:   DateTime<Utc>,
  pub note:         NoteSlot,
}

/// The denormalised display model of one table.
#[derive(Debug, Clone, Default)]
pub struct TableView {
  pub state:        LoadState,
  pub source:       Option<Source>,
  pub topic:        Option<String>,
  pub schema_id:    Option<i64>,
  pub table_note:   Option<NoteSlot>,
  /// Documentation of the schema's record element.
  pub description:  Option<String>,
  pub columns:      Vec<Column>,
  pub last_updated: Option<DateTime<Utc>>,
  /// Set when the table itself could not be resolved.
  pub table_error:  Option<String>,
  /// Set when the topic, schema or elements could not be loaded.
  pub schema_error: Option<String>,
}

impl TableView {
  pub fn is_loading(&self) -> bool { self.state.is_loading() }

  pub fn category(&self) -> Option<&Category> { self.source.as_ref().map(|s| &s.category) }

  pub fn column(&self, name: &str) -> Option<&Column> {
    self.columns.iter().find(|c| c.name == name)
  }

  fn slot_mut(&mut self, target: NoteTarget) -> Option<&mut NoteSlot> {
    match target.reference_type {
      ReferenceType::Schema => self
        .table_note
        .as_mut()
        .filter(|slot| slot.target() == target),
      ReferenceType::SchemaElement => self
        .columns
        .iter_mut()
        .find(|c| c.element_id == target.reference_id)
        .map(|c| &mut c.note),
    }
  }
}

// ─── Aggregator ───────────────────────────────────────────────────────────────

/// Loads a [`TableView`] and applies edits to it.
pub struct TableViewAggregator<B> {
  backend: Arc<B>,
  config:  ViewConfig,
  view:    TableView,
  /// Bumped on every load; saves begun under an older value are discarded.
  epoch:   u64,
}

impl<B: SchemaBackend> TableViewAggregator<B> {
  pub fn new(backend: Arc<B>, config: ViewConfig) -> Self {
    Self { backend, config, view: TableView::default(), epoch: 0 }
  }

  pub fn view(&self) -> &TableView { &self.view }

  pub fn backend(&self) -> &Arc<B> { &self.backend }

  pub fn config(&self) -> &ViewConfig { &self.config }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Load the table named `table` in `namespace`. The name must match
  /// exactly, case included.
  pub async fn load(&mut self, namespace: &str, table: &str) -> Result<()> {
    self.reset();
    let found = self
      .backend
      .list_namespace_sources(namespace)
      .await
      .map_err(Error::backend)
      .and_then(|sources| {
        sources.into_iter().find(|s| s.name == table).ok_or_else(|| {
          schemadoc_core::Error::SourceNotFound {
            namespace: namespace.to_owned(),
            table:     table.to_owned(),
          }
          .into()
        })
      });
    let source = self.settle(Stage::Source, found)?;
    self.load_from_source(source).await
  }

  /// Load the table with the given source id.
  pub async fn load_by_id(&mut self, source_id: i64) -> Result<()> {
    self.reset();
    let found = self.backend.get_source(source_id).await.map_err(Error::backend);
    let source = self.settle(Stage::Source, found)?;
    self.load_from_source(source).await
  }

  async fn load_from_source(&mut self, source: Source) -> Result<()> {
    let source_id = source.source_id;
    self.view.source = Some(source);

    self.enter(Stage::Topic);
    let topic = self.backend.latest_topic(source_id).await.map_err(Error::backend);
    let topic = self.settle(Stage::Topic, topic)?;
    self.view.topic = Some(topic.name.clone());

    self.enter(Stage::Schema);
    let schema = self
      .backend
      .latest_schema(&topic.name)
      .await
      .map_err(Error::backend)
      .and_then(|schema| {
        let types = format::field_types(&schema.schema)?;
        Ok((schema, types))
      });
    let (schema, types) = self.settle(Stage::Schema, schema)?;
    self.view.schema_id = Some(schema.schema_id);
    self.view.table_note = Some(NoteSlot::new(NoteTarget::schema(schema.schema_id), schema.note));

    self.enter(Stage::Elements);
    let elements = self
      .backend
      .schema_elements(schema.schema_id)
      .await
      .map_err(Error::backend);
    let elements = self.settle(Stage::Elements, elements)?;
    self.assemble(elements, &types);

    self.view.state = LoadState::Ready;
    info!(
      source_id,
      columns = self.view.columns.len(),
      "table view ready"
    );
    Ok(())
  }

  fn assemble(&mut self, elements: Vec<SchemaElement>, types: &HashMap<String, String>) {
    let table_stamps = [
      self.view.source.as_ref().map(|s| s.updated_at),
      self
        .view
        .table_note
        .as_ref()
        .and_then(NoteSlot::note)
        .map(|n| n.updated_at),
    ];
    let element_stamps: Vec<_> = elements
      .iter()
      .flat_map(|e| [Some(e.updated_at), e.note.as_ref().map(|n| n.updated_at)])
      .collect();
    self.view.last_updated = format::latest_update(table_stamps.into_iter().chain(element_stamps));

    for element in elements {
      match element.element_type {
        ElementKind::Record => self.view.description = element.doc,
        ElementKind::Field => {
          let name = format::display_name(&element.key).to_owned();
          self.view.columns.push(Column {
            element_id: element.id,
            display_type: types.get(&name).cloned(),
            name,
            key: element.key,
            doc: element.doc,
            updated_at: element.updated_at,
            note: NoteSlot::new(NoteTarget::element(element.id), element.note),
          });
        }
        ElementKind::Other => debug!(key = %element.key, "skipping schema element"),
      }
    }
  }

  fn reset(&mut self) {
    self.epoch += 1;
    self.view = TableView::default();
    self.enter(Stage::Source);
  }

  fn enter(&mut self, stage: Stage) {
    debug!(%stage, "loading");
    self.view.state = LoadState::Loading(stage);
  }

  /// Record the outcome of `stage`, moving to `Failed` on error.
  fn settle<T>(&mut self, stage: Stage, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
      warn!(%stage, error = %e, "table view load failed");
      let message = Some(e.to_string());
      match stage {
        Stage::Source => self.view.table_error = message,
        Stage::Topic | Stage::Schema | Stage::Elements => self.view.schema_error = message,
      }
      self.view.state = LoadState::Failed(stage);
    }
    result
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  pub fn table_note_mut(&mut self) -> Option<&mut NoteSlot> { self.view.table_note.as_mut() }

  /// The note slot of the column with display name `name`.
  pub fn column_note_mut(&mut self, name: &str) -> Option<&mut NoteSlot> {
    self
      .view
      .columns
      .iter_mut()
      .find(|c| c.name == name)
      .map(|c| &mut c.note)
  }

  /// Leave table-note edit mode and return the request to send, if the note
  /// was being edited.
  pub fn begin_table_note_save(&mut self) -> Option<PendingSave> {
    let editor = &self.config.editor;
    let pending = self.view.table_note.as_mut()?.save(editor)?;
    Some(pending.with_epoch(self.epoch))
  }

  /// As [`Self::begin_table_note_save`] for the column named `name`.
  pub fn begin_column_note_save(&mut self, name: &str) -> Option<PendingSave> {
    let editor = &self.config.editor;
    let pending = self
      .view
      .columns
      .iter_mut()
      .find(|c| c.name == name)?
      .note
      .save(editor)?;
    Some(pending.with_epoch(self.epoch))
  }

  /// Merge a finished save into whichever slot it belongs to. A completion
  /// begun before the last load, or whose slot no longer exists, is
  /// discarded.
  pub fn complete_note_save(&mut self, completion: NoteCompletion) -> Result<bool> {
    if completion.epoch() != self.epoch {
      debug!(
        target_id = completion.target().reference_id,
        "dropping note save from an earlier load"
      );
      return Ok(false);
    }
    match self.view.slot_mut(completion.target()) {
      Some(slot) => slot.apply(completion),
      None => Ok(false),
    }
  }

  /// Save the table note: begin, send, and merge in one step.
  pub async fn save_table_note(&mut self) -> Result<bool> {
    let Some(pending) = self.begin_table_note_save() else {
      return Ok(false);
    };
    let completion = pending.send(self.backend.as_ref()).await;
    self.complete_note_save(completion)
  }

  /// Save the note of the column named `name` in one step.
  pub async fn save_column_note(&mut self, name: &str) -> Result<bool> {
    let Some(pending) = self.begin_column_note_save(name) else {
      return Ok(false);
    };
    let completion = pending.send(self.backend.as_ref()).await;
    self.complete_note_save(completion)
  }

  // ── Category ──────────────────────────────────────────────────────────────

  /// Set the table's category. An empty value or the `Uncategorized`
  /// sentinel clears it.
  ///
  /// Clearing always resets the local category, even when the backend
  /// reports a failure. Any other value is stored locally only once the
  /// backend has accepted it.
  pub async fn set_category(&mut self, value: &str) -> Result<()> {
    let source_id = self.view.source.as_ref().ok_or(Error::NotLoaded)?.source_id;

    let category = match Category::parse(value) {
      Category::Uncategorized => {
        if let Err(e) = self.backend.clear_category(source_id).await {
          warn!(source_id, error = %e, "clearing category failed; resetting locally anyway");
        }
        Category::Uncategorized
      }
      Category::Named(name) => {
        self
          .backend
          .set_category(source_id, &name)
          .await
          .map_err(Error::backend)?;
        Category::Named(name)
      }
    };

    if let Some(source) = self.view.source.as_mut() {
      source.category = category;
    }
    Ok(())
  }
}
