//! Event list state.
//!
//! Load cycle: `Loading → Loaded | Errored`, with no way back to `Loading`.
//! Slot changes are optimistic: the local value is updated first and each
//! row carries a [`SyncState`] saying whether the API has confirmed it.
//! A failed update never rolls the value back.

use eventmate_core::{ApiError, Event, JoinRefused};

/// Why the list could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// The API answered, but not with an array of events.
    Malformed,
    /// Transport failure or non-2xx response.
    Failed,
}

impl LoadError {
    pub fn message(self) -> &'static str {
        match self {
            LoadError::Malformed => "Unexpected data format",
            LoadError::Failed => "Failed to fetch events",
        }
    }
}

impl From<&ApiError> for LoadError {
    fn from(err: &ApiError) -> Self {
        if err.is_malformed() {
            LoadError::Malformed
        } else {
            LoadError::Failed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Loaded,
    Errored(LoadError),
}

/// Whether the API has acknowledged a row's current slot value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Value came from the list response.
    #[default]
    Synced,
    /// An update carrying `slot` is in flight.
    Pending { slot: u32 },
    /// The last update succeeded.
    Confirmed,
    /// The last update failed; the local value is kept anyway.
    Unconfirmed { error: String },
}

impl SyncState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SyncState::Pending { .. })
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEvent {
    pub event: Event,
    pub sync: SyncState,
}

#[derive(Debug, Clone)]
pub struct EventListState {
    phase: LoadPhase,
    rows: Vec<ListedEvent>,
    /// Highlighted row index.
    pub cursor: usize,
}

impl Default for EventListState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventListState {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            rows: Vec::new(),
            cursor: 0,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn error(&self) -> Option<LoadError> {
        match self.phase {
            LoadPhase::Errored(err) => Some(err),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[ListedEvent] {
        &self.rows
    }

    pub fn get(&self, event_id: &str) -> Option<&ListedEvent> {
        self.rows.iter().find(|row| row.event.id == event_id)
    }

    pub fn highlighted(&self) -> Option<&ListedEvent> {
        self.rows.get(self.cursor)
    }

    /// Stores a successful load. Only the first completion of a cycle counts.
    pub fn apply_loaded(&mut self, events: Vec<Event>) {
        if !self.is_loading() {
            return;
        }
        self.rows = events
            .into_iter()
            .map(|event| ListedEvent {
                event,
                sync: SyncState::Synced,
            })
            .collect();
        self.cursor = 0;
        self.phase = LoadPhase::Loaded;
    }

    /// Records a failed load. Rows are left as they were.
    pub fn apply_load_error(&mut self, err: LoadError) {
        if !self.is_loading() {
            return;
        }
        self.phase = LoadPhase::Errored(err);
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    /// Applies a join locally: takes one slot and marks the row pending.
    ///
    /// Returns the new slot value to send to the API.
    ///
    /// # Errors
    /// `UnknownEvent` if the id is not listed, `Full` if no slot is left.
    pub fn take_slot(&mut self, event_id: &str) -> Result<u32, JoinRefused> {
        let Some(row) = self.rows.iter_mut().find(|row| row.event.id == event_id) else {
            return Err(JoinRefused::UnknownEvent {
                id: event_id.to_string(),
            });
        };
        let Some(slot) = row.event.take_slot() else {
            return Err(JoinRefused::Full {
                name: row.event.name.clone(),
            });
        };
        row.sync = SyncState::Pending { slot };
        Ok(slot)
    }

    /// Settles the sync marker once an update finishes.
    ///
    /// A result for an older value is ignored while a newer update for the
    /// same row is still pending. The slot value itself is never touched.
    pub fn settle_slot_update(&mut self, event_id: &str, slot: u32, result: Result<(), String>) {
        let Some(row) = self.rows.iter_mut().find(|row| row.event.id == event_id) else {
            return;
        };
        if row.sync != (SyncState::Pending { slot }) {
            return;
        }
        row.sync = match result {
            Ok(()) => SyncState::Confirmed,
            Err(error) => SyncState::Unconfirmed { error },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::events::fixtures::event;

    fn loaded(events: Vec<Event>) -> EventListState {
        let mut state = EventListState::new();
        state.apply_loaded(events);
        state
    }

    #[test]
    fn test_starts_loading() {
        let state = EventListState::new();
        assert!(state.is_loading());
        assert!(state.rows().is_empty());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_apply_loaded_stores_rows() {
        let state = loaded(vec![event("a", 3), event("b", 1)]);
        assert_eq!(state.phase(), LoadPhase::Loaded);
        assert_eq!(state.rows().len(), 2);
        assert!(state.rows().iter().all(|r| r.sync == SyncState::Synced));
    }

    #[test]
    fn test_error_is_terminal_and_keeps_rows() {
        let mut state = EventListState::new();
        state.apply_load_error(LoadError::Malformed);
        assert_eq!(state.error(), Some(LoadError::Malformed));

        // No transition back: a late success does not replace the error.
        state.apply_loaded(vec![event("a", 1)]);
        assert_eq!(state.error(), Some(LoadError::Malformed));
        assert!(state.rows().is_empty());
    }

    #[test]
    fn test_load_error_messages() {
        assert_eq!(LoadError::Malformed.message(), "Unexpected data format");
        assert_eq!(LoadError::Failed.message(), "Failed to fetch events");
    }

    #[test]
    fn test_load_error_from_api_error() {
        let malformed = ApiError::malformed("not an array");
        assert_eq!(LoadError::from(&malformed), LoadError::Malformed);
        let status = ApiError::http_status(502, "");
        assert_eq!(LoadError::from(&status), LoadError::Failed);
    }

    #[test]
    fn test_take_slot_marks_pending() {
        let mut state = loaded(vec![event("a", 3)]);
        assert_eq!(state.take_slot("a"), Ok(2));
        let row = state.get("a").unwrap();
        assert_eq!(row.event.slot, 2);
        assert_eq!(row.sync, SyncState::Pending { slot: 2 });
    }

    #[test]
    fn test_take_slot_only_touches_target_row() {
        let mut state = loaded(vec![event("a", 3), event("b", 5)]);
        state.take_slot("b").unwrap();
        assert_eq!(state.get("a").unwrap().event, event("a", 3));
        assert_eq!(state.get("b").unwrap().event.slot, 4);
    }

    #[test]
    fn test_take_slot_refusals() {
        let mut state = loaded(vec![event("a", 0)]);
        assert!(matches!(
            state.take_slot("a"),
            Err(JoinRefused::Full { .. })
        ));
        assert_eq!(state.get("a").unwrap().sync, SyncState::Synced);
        assert!(matches!(
            state.take_slot("zzz"),
            Err(JoinRefused::UnknownEvent { .. })
        ));
    }

    #[test]
    fn test_failed_update_keeps_optimistic_value() {
        let mut state = loaded(vec![event("a", 3)]);
        let slot = state.take_slot("a").unwrap();
        state.settle_slot_update("a", slot, Err("HTTP 500".to_string()));

        let row = state.get("a").unwrap();
        assert_eq!(row.event.slot, 2);
        assert_eq!(
            row.sync,
            SyncState::Unconfirmed {
                error: "HTTP 500".to_string()
            }
        );
    }

    #[test]
    fn test_stale_result_does_not_settle_newer_update() {
        let mut state = loaded(vec![event("a", 3)]);
        let first = state.take_slot("a").unwrap();
        let second = state.take_slot("a").unwrap();
        assert_eq!((first, second), (2, 1));

        state.settle_slot_update("a", first, Ok(()));
        assert_eq!(state.get("a").unwrap().sync, SyncState::Pending { slot: 1 });

        state.settle_slot_update("a", second, Ok(()));
        assert_eq!(state.get("a").unwrap().sync, SyncState::Confirmed);
        assert_eq!(state.get("a").unwrap().event.slot, 1);
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut state = loaded(vec![event("a", 1), event("b", 1)]);
        state.cursor_up();
        assert_eq!(state.cursor, 0);
        state.cursor_down();
        state.cursor_down();
        assert_eq!(state.cursor, 1);
        assert_eq!(state.highlighted().unwrap().event.id, "b");
    }
}
