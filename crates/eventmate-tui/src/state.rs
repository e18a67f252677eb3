//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── route: Route              (where the view has navigated)
//! │   ├── events: EventListState    (load phase, rows, cursor)
//! │   ├── session: Session          (authentication context)
//! │   └── status: Option<String>    (one-line notice)
//! └── overlay: Option<Overlay>      (description panel = the Selection)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can hold `&mut Overlay` and `&TuiState` at the same time.

use eventmate_core::config::Config;
use eventmate_core::{Event, Route, Session};

use crate::features::events::EventListState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: &Config, session: Session) -> Self {
        Self {
            tui: TuiState::new(config, session),
            overlay: None,
        }
    }

    /// The event whose description is showing, if any.
    pub fn selection(&self) -> Option<&Event> {
        match &self.overlay {
            Some(Overlay::Description(description)) => Some(&description.event),
            None => None,
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Current navigation target.
    pub route: Route,
    /// Event list load phase and rows.
    pub events: EventListState,
    /// Authentication context; decides whether "Log Out" is offered.
    pub session: Session,
    /// strftime pattern for the Date column (validated by `Config`).
    pub date_format: String,
    /// API base URL, shown in the footer.
    pub api_url: String,
    /// Transient notice shown in the footer.
    pub status: Option<String>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(config: &Config, session: Session) -> Self {
        Self {
            should_quit: false,
            route: Route::Events,
            events: EventListState::new(),
            session,
            date_format: config.date_format.clone(),
            api_url: config.api_url.clone(),
            status: None,
            spinner_frame: 0,
        }
    }
}
