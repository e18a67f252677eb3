//! Event command handlers.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use eventmate_core::config::Config;
use eventmate_core::{ApiClient, ApiError, Event, JoinRefused, Route, SessionStore};

use crate::modes;

/// Launches the full-screen event list.
pub async fn browse(config: &Config, store: SessionStore, client: ApiClient) -> Result<()> {
    let session = store
        .load()
        .with_context(|| format!("read session at {}", store.path().display()))?;

    let route = modes::run_event_list(config, session, store, client)
        .await
        .context("event list failed")?;

    if route != Route::Events {
        println!("{}", route.path());
    }
    Ok(())
}

pub async fn list(client: &ApiClient, config: &Config) -> Result<()> {
    let events = fetch_events(client).await?;
    if events.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Date", "Time", "Place", "Slots"]);
    for event in &events {
        table.add_row(vec![
            event.id.clone(),
            event.name.clone(),
            event.date.format_local(&config.date_format),
            event.time.clone(),
            event.place.clone(),
            event.slot.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(client: &ApiClient, id: &str) -> Result<()> {
    let events = fetch_events(client).await?;
    let event = find_event(&events, id)?;

    println!("{}", event.name);
    println!();
    println!("{}", event.description);
    Ok(())
}

/// Takes one slot, sends the new count, and prints the enrollment route.
///
/// A failed update is reported as a warning only; the join still counts.
pub async fn join(client: &ApiClient, id: &str) -> Result<()> {
    let mut events = fetch_events(client).await?;
    let event = events
        .iter_mut()
        .find(|event| event.id == id)
        .ok_or_else(|| JoinRefused::UnknownEvent { id: id.to_string() })?;

    let Some(slot) = event.take_slot() else {
        return Err(JoinRefused::Full {
            name: event.name.clone(),
        }
        .into());
    };
    tracing::info!(event_id = id, slot, "joining event");

    if let Err(err) = client.update_slot(id, slot).await {
        tracing::warn!(event_id = id, slot, error = %err, "slot update failed");
        eprintln!("Warning: slot update was not confirmed: {err}");
    }

    eprintln!("Joined {} ({slot} slots left).", event.name);
    println!("{}", Route::enroll(id).path());
    Ok(())
}

async fn fetch_events(client: &ApiClient) -> Result<Vec<Event>> {
    client.list_events().await.map_err(load_failure)
}

/// Maps a list failure to the same wording the event list view uses.
fn load_failure(err: ApiError) -> anyhow::Error {
    let message = if err.is_malformed() {
        "Unexpected data format"
    } else {
        "Failed to fetch events"
    };
    anyhow::Error::new(err).context(message)
}

fn find_event<'a>(events: &'a [Event], id: &str) -> Result<&'a Event> {
    events
        .iter()
        .find(|event| event.id == id)
        .ok_or_else(|| JoinRefused::UnknownEvent { id: id.to_string() }.into())
}
