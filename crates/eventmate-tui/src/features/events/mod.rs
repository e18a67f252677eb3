//! Event List View: loading, the events table, join and logout.

mod render;
mod state;
mod update;

pub use render::{HEADER_TITLE, LOGOUT_LABEL, render_event_list, render_header, slot_label};
pub use state::{EventListState, ListedEvent, LoadError, LoadPhase, SyncState};
pub use update::{handle_list_key, handle_load_result, handle_slot_update, join, logout};
