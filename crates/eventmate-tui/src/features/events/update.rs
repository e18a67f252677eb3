//! Event list reducer pieces.

use crossterm::event::{KeyCode, KeyEvent};
use eventmate_core::{ApiError, Event, JoinRefused, Route, Session};
use tracing::{info, warn};

use super::state::{EventListState, LoadError};
use crate::effects::UiEffect;
use crate::overlays::OverlayRequest;
use crate::state::TuiState;

/// Applies the list response.
pub fn handle_load_result(list: &mut EventListState, result: Result<Vec<Event>, ApiError>) {
    match result {
        Ok(events) => {
            info!(count = events.len(), "events loaded");
            list.apply_loaded(events);
        }
        Err(err) => {
            let load_error = LoadError::from(&err);
            warn!(error = %err, details = ?err.details, "failed to load events");
            list.apply_load_error(load_error);
        }
    }
}

/// Records the outcome of a slot update.
///
/// Failures are logged and kept on the row's sync marker only. They are not
/// retried and the optimistic value stays in place.
pub fn handle_slot_update(
    list: &mut EventListState,
    event_id: &str,
    slot: u32,
    result: Result<(), ApiError>,
) {
    let result = match result {
        Ok(()) => {
            info!(event_id, slot, "slot update confirmed");
            Ok(())
        }
        Err(err) => {
            warn!(event_id, slot, error = %err, "slot update failed; keeping local value");
            Err(err.to_string())
        }
    };
    list.settle_slot_update(event_id, slot, result);
}

/// Joins an event.
///
/// The decrement is applied before anything is sent, then the update is
/// fired and the view navigates to the enrollment route without waiting.
pub fn join(tui: &mut TuiState, event_id: &str) -> Vec<UiEffect> {
    match tui.events.take_slot(event_id) {
        Ok(slot) => {
            info!(event_id, slot, "joining event");
            tui.status = None;
            tui.route = Route::enroll(event_id);
            vec![UiEffect::UpdateSlot {
                event_id: event_id.to_string(),
                slot,
            }]
        }
        Err(refused @ JoinRefused::Full { .. }) => {
            tui.status = Some(refused.to_string());
            vec![]
        }
        Err(refused @ JoinRefused::UnknownEvent { .. }) => {
            warn!(%refused, "join ignored");
            vec![]
        }
    }
}

/// Logs out: clears the session and navigates to `/`. No server call.
///
/// Does nothing unless the session is authenticated, matching the control
/// only being offered then.
pub fn logout(tui: &mut TuiState) -> Vec<UiEffect> {
    if !tui.session.authenticated {
        return vec![];
    }
    info!("logging out");
    tui.session = Session::anonymous();
    tui.route = Route::Root;
    tui.status = None;
    vec![UiEffect::ClearSession]
}

/// Key handling while the table is showing.
pub fn handle_list_key(
    tui: &mut TuiState,
    key: KeyEvent,
) -> (Vec<UiEffect>, Option<OverlayRequest>) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            tui.events.cursor_up();
            (vec![], None)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            tui.events.cursor_down();
            (vec![], None)
        }
        KeyCode::Enter | KeyCode::Char('i') => {
            let request = tui
                .events
                .highlighted()
                .map(|row| OverlayRequest::Description(row.event.clone()));
            (vec![], request)
        }
        KeyCode::Char('J') => {
            let Some(id) = tui.events.highlighted().map(|row| row.event.id.clone()) else {
                return (vec![], None);
            };
            (join(tui, &id), None)
        }
        KeyCode::Char('L') => (logout(tui), None),
        KeyCode::Char('q') => (vec![UiEffect::Quit], None),
        _ => (vec![], None),
    }
}
