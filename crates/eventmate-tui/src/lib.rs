//! Full-screen TUI for browsing and joining events.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use eventmate_core::config::Config;
use eventmate_core::{ApiClient, Route, Session, SessionStore};
pub use runtime::TuiRuntime;

/// Runs the Event List View until the user quits.
///
/// Returns the route the view ended on (`/` after logout, `/enroll/{id}`
/// after a join, otherwise the list itself).
///
/// # Errors
/// Returns an error if stderr is not a terminal or the terminal fails.
pub async fn run_event_list(
    config: &Config,
    session: Session,
    store: SessionStore,
    client: ApiClient,
) -> Result<Route> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The event list requires a terminal.\n\
             Use `eventmate events list` for non-interactive output."
        );
    }

    let mut runtime = TuiRuntime::new(config, session, store, client)?;
    let route = runtime.run()?;
    drop(runtime);
    Ok(route)
}
