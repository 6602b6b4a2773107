//! The view/edit protocol shared by table-level and column-level notes.
//!
//! A [`NoteSlot`] is either viewing or editing. Entering edit mode copies the
//! current text into a draft; saving leaves edit mode at once and hands back a
//! [`PendingSave`] that the caller sends whenever it likes. The server's answer
//! comes back as a [`NoteCompletion`] and is merged with [`NoteSlot::apply`].
//!
//! Each slot numbers the saves it issues and remembers the highest number it
//! has merged. A successful completion older than that is dropped, so
//! overlapping saves of the same note settle on the latest one that landed.

use schemadoc_core::{
  backend::SchemaBackend,
  note::{NewNote, Note, NoteTarget, NoteUpdate},
};
use tracing::debug;

use crate::{Error, Result};

// ─── Slot ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
  Viewing,
  Editing { draft: String },
}

/// One note (possibly not yet written) attached to a schema or element.
#[derive(Debug, Clone)]
pub struct NoteSlot {
  target: NoteTarget,
  note:   Option<Note>,
  state:   EditState,
  issued:  u64,
  applied: u64,
}

impl NoteSlot {
  pub fn new(target: NoteTarget, note: Option<Note>) -> Self {
    Self { target, note, state: EditState::Viewing, issued: 0, applied: 0 }
  }

  pub fn target(&self) -> NoteTarget { self.target }

  pub fn note(&self) -> Option<&Note> { self.note.as_ref() }

  pub fn text(&self) -> Option<&str> { self.note.as_ref().map(|n| n.note.as_str()) }

  pub fn state(&self) -> &EditState { &self.state }

  pub fn is_editing(&self) -> bool { matches!(self.state, EditState::Editing { .. }) }

  pub fn draft(&self) -> Option<&str> {
    match &self.state {
      EditState::Editing { draft } => Some(draft),
      EditState::Viewing => None,
    }
  }

  /// Enter edit mode with the current text (empty if there is no note).
  pub fn begin_edit(&mut self) {
    let draft = self.text().unwrap_or_default().to_owned();
    self.state = EditState::Editing { draft };
  }

  /// Replace the draft. Returns `false` when the slot is not being edited.
  pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
    match &mut self.state {
      EditState::Editing { draft } => {
        *draft = text.into();
        true
      }
      EditState::Viewing => false,
    }
  }

  /// Leave edit mode and discard the draft. Nothing is sent.
  pub fn cancel(&mut self) { self.state = EditState::Viewing; }

  /// Leave edit mode and build the request for the draft: a create when no
  /// note exists yet, otherwise an update addressed by the note's id.
  ///
  /// Returns `None` when the slot is not being edited.
  pub fn save(&mut self, editor: &str) -> Option<PendingSave> {
    let EditState::Editing { draft } = std::mem::replace(&mut self.state, EditState::Viewing)
    else {
      return None;
    };

    let request = match &self.note {
      None => NoteRequest::Create(NewNote::new(self.target, draft.clone(), editor.to_owned())),
      Some(existing) => NoteRequest::Update {
        note_id: existing.id,
        update:  NoteUpdate { note: draft.clone(), last_updated_by: editor.to_owned() },
      },
    };

    self.issued += 1;
    Some(PendingSave { target: self.target, request, draft, generation: self.issued, epoch: 0 })
  }

  /// Merge a finished save into the slot.
  ///
  /// On success the slot takes the server's note with its text replaced by
  /// the saved draft and `Ok(true)` is returned. A completion for another
  /// target, or one older than a save already merged, is ignored with
  /// `Ok(false)`.
  /// A failed save leaves the slot untouched and returns the error.
  pub fn apply(&mut self, completion: NoteCompletion) -> Result<bool> {
    let NoteCompletion { pending, result } = completion;
    if pending.target != self.target {
      return Ok(false);
    }
    let mut note = result?;
    if pending.generation < self.applied {
      debug!(
        target_id = pending.target.reference_id,
        generation = pending.generation,
        applied = self.applied,
        "dropping superseded note save"
      );
      return Ok(false);
    }
    self.applied = pending.generation;
    note.note = pending.draft;
    self.note = Some(note);
    Ok(true)
  }
}

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteRequest {
  Create(NewNote),
  Update { note_id: i64, update: NoteUpdate },
}

/// A save that has left edit mode but has not been sent yet.
#[derive(Debug, Clone)]
pub struct PendingSave {
  target:     NoteTarget,
  request:    NoteRequest,
  draft:      String,
  generation: u64,
  epoch:      u64,
}

impl PendingSave {
  pub fn target(&self) -> NoteTarget { self.target }

  pub fn request(&self) -> &NoteRequest { &self.request }

  pub fn draft(&self) -> &str { &self.draft }

  pub(crate) fn with_epoch(mut self, epoch: u64) -> Self {
    self.epoch = epoch;
    self
  }

  /// Issue the request. The returned completion must be handed back to the
  /// owning slot; dropping it discards the result.
  pub async fn send<B: SchemaBackend>(self, backend: &B) -> NoteCompletion {
    let result = match &self.request {
      NoteRequest::Create(new_note) => backend.create_note(new_note.clone()).await,
      NoteRequest::Update { note_id, update } => {
        backend.update_note(*note_id, update.clone()).await
      }
    }
    .map_err(Error::backend);
    NoteCompletion { pending: self, result }
  }
}

/// The outcome of a sent [`PendingSave`].
#[derive(Debug)]
pub struct NoteCompletion {
  pending: PendingSave,
  result:  Result<Note>,
}

impl NoteCompletion {
  pub fn target(&self) -> NoteTarget { self.pending.target }

  pub fn is_ok(&self) -> bool { self.result.is_ok() }

  pub(crate) fn epoch(&self) -> u64 { self.pending.epoch }
}
