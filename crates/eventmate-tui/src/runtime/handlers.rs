//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that perform I/O and return a `UiEvent`.
//! They never touch state; the runtime spawns them with `spawn_effect` and
//! forwards the result to the inbox.

use eventmate_core::ApiClient;

use crate::events::UiEvent;

/// Fetches the event list.
pub async fn load_events(client: ApiClient) -> UiEvent {
    UiEvent::EventsLoaded {
        result: client.list_events().await,
    }
}

/// Sends the new slot count for `event_id`.
pub async fn update_slot(client: ApiClient, event_id: String, slot: u32) -> UiEvent {
    let result = client.update_slot(&event_id, slot).await;
    UiEvent::SlotUpdateFinished {
        event_id,
        slot,
        result,
    }
}
