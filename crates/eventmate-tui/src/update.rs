//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use eventmate_core::Route;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::events;
use crate::overlays::{Overlay, OverlayTransition};
use crate::state::AppState;

/// Effects to run once before the first frame.
pub fn on_start() -> Vec<UiEffect> {
    vec![UiEffect::LoadEvents]
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::EventsLoaded { result } => {
            events::handle_load_result(&mut app.tui.events, result);
            vec![]
        }
        UiEvent::SlotUpdateFinished {
            event_id,
            slot,
            result,
        } => {
            events::handle_slot_update(&mut app.tui.events, &event_id, slot, result);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
            app.overlay = None;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(key);
        if matches!(update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return vec![];
    }

    if app.tui.route != Route::Events {
        return handle_route_key(app, key);
    }

    if app.tui.events.is_loading() || app.tui.events.error().is_some() {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
            _ => vec![],
        };
    }

    let (effects, overlay_request) = events::handle_list_key(&mut app.tui, key);
    if let Some(request) = overlay_request {
        app.overlay = Some(Overlay::open(request));
    }
    effects
}

/// Keys while a route other than the list is showing.
fn handle_route_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            app.tui.route = Route::Events;
            vec![]
        }
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => vec![],
    }
}
