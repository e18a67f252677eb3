//! Navigation targets.
//!
//! Routes are opaque identifiers handed to whatever renders them; the event
//! list only decides where to go, never what is shown there.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`, where logout lands.
    Root,
    /// The event list itself.
    #[default]
    Events,
    /// `/enroll/{id}`, where a join lands.
    Enroll { event_id: String },
}

impl Route {
    pub fn enroll(event_id: impl Into<String>) -> Self {
        Route::Enroll {
            event_id: event_id.into(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Events => "/events".to_string(),
            Route::Enroll { event_id } => format!("/enroll/{event_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
