//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover I/O and task spawning only; navigation and every other state
//! change happen in the reducer itself.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch the event list.
    LoadEvents,

    /// Send the new slot count for an event.
    ///
    /// Fire-and-forget: the result comes back as `UiEvent::SlotUpdateFinished`
    /// but nothing waits for it.
    UpdateSlot { event_id: String, slot: u32 },

    /// Remove the persisted session flag.
    ClearSession,
}
