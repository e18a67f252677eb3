//! UI events consumed by the reducer.
//!
//! Terminal input and the results of spawned API calls all arrive here.
//! Async results come through the runtime inbox, so the reducer observes
//! every outcome even when policy is to ignore it.

use eventmate_core::{ApiError, Event};

#[derive(Debug)]
pub enum UiEvent {
    /// Animation / render cadence.
    Tick,
    /// Raw crossterm input.
    Terminal(crossterm::event::Event),
    /// The list request finished.
    EventsLoaded { result: Result<Vec<Event>, ApiError> },
    /// A slot update request finished.
    SlotUpdateFinished {
        event_id: String,
        /// The value that was sent.
        slot: u32,
        result: Result<(), ApiError>,
    },
}
