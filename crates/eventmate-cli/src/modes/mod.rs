//! Runtime execution modes.
//!
//! - `tui`: Full-screen event list (optional feature)

#[cfg(feature = "tui")]
pub use eventmate_tui::run_event_list;

#[cfg(not(feature = "tui"))]
pub async fn run_event_list(
    _config: &eventmate_core::config::Config,
    _session: eventmate_core::Session,
    _store: eventmate_core::SessionStore,
    _client: eventmate_core::ApiClient,
) -> anyhow::Result<eventmate_core::Route> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
