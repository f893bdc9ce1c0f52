//! NotesRepository — in-memory note storage
//!
//! Holds every note plus the id counter behind a single mutex. Each operation
//! takes the lock for its whole duration, so concurrent handlers see the
//! collection in some sequential order and never half-applied. Callers get
//! cloned snapshots, never references into the map.

use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use notes_types::{Note, NoteCreate, NoteUpdate};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Title given to a note created with neither title nor content.
pub const DEFAULT_TITLE: &str = "Untitled";

struct NotesState {
    notes: HashMap<u64, Note>,
    next_id: u64,
}

pub struct NotesRepository {
    state: Mutex<NotesState>,
    clock: Box<dyn Clock>,
}

impl Default for NotesRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesRepository {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            state: Mutex::new(NotesState {
                notes: HashMap::new(),
                next_id: 1,
            }),
            clock: Box::new(clock),
        }
    }

    /// Truncated to microseconds so stored values match their wire form.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }

    /// List notes, most recently updated first (ties: higher id first).
    ///
    /// Archived notes are dropped unless `include_archived`; a non-empty
    /// `query` then keeps notes whose title or content contains it,
    /// ignoring case.
    pub fn list(&self, query: Option<&str>, include_archived: bool) -> Vec<Note> {
        let needle = query.filter(|q| !q.is_empty()).map(str::to_lowercase);

        let state = self.state.lock();
        let mut notes: Vec<Note> = state
            .notes
            .values()
            .filter(|n| include_archived || !n.archived)
            .filter(|n| match &needle {
                Some(q) => n.title.to_lowercase().contains(q) || n.content.to_lowercase().contains(q),
                None => true,
            })
            .cloned()
            .collect();
        drop(state);

        notes.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        notes
    }

    pub fn get(&self, id: u64) -> Option<Note> {
        self.state.lock().notes.get(&id).cloned()
    }

    /// Create a note with the next id. Ids are never handed out twice.
    pub fn create(&self, fields: NoteCreate) -> Note {
        let mut title = trimmed(fields.title.as_deref());
        let content = trimmed(fields.content.as_deref());
        if title.is_empty() && content.is_empty() {
            title = DEFAULT_TITLE.to_string();
        }

        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;

        let now = self.now();
        let note = Note {
            id,
            title,
            content,
            created_at: now,
            updated_at: now,
            archived: false,
        };
        state.notes.insert(id, note.clone());
        log::debug!("[NOTES] Created note {}", id);
        note
    }

    /// Overwrite the supplied fields and refresh `updated_at`.
    ///
    /// Returns `None` without touching anything when the id is unknown.
    pub fn update(&self, id: u64, fields: NoteUpdate) -> Option<Note> {
        let mut state = self.state.lock();
        let note = state.notes.get_mut(&id)?;

        if let Some(title) = fields.title {
            note.title = title.trim().to_string();
        }
        if let Some(content) = fields.content {
            note.content = content.trim().to_string();
        }
        if let Some(archived) = fields.archived {
            note.archived = archived;
        }
        // Strictly after the previous write, even if the wall clock stalls or steps back.
        note.updated_at = self.now().max(note.updated_at + Duration::microseconds(1));

        log::debug!("[NOTES] Updated note {}", id);
        Some(note.clone())
    }

    /// Remove a note for good. Returns whether anything was removed.
    pub fn delete(&self, id: u64) -> bool {
        let removed = self.state.lock().notes.remove(&id).is_some();
        if removed {
            log::debug!("[NOTES] Deleted note {}", id);
        }
        removed
    }

    pub fn count(&self) -> usize {
        self.state.lock().notes.len()
    }
}

fn trimmed(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}
