//! Session command handlers.

use anyhow::{Context, Result};
use eventmate_core::{Route, SessionStore};

/// Sets the session flag. Stands in for whatever signs the user in.
pub fn login(store: &SessionStore) -> Result<()> {
    store
        .set_authenticated()
        .with_context(|| format!("write session at {}", store.path().display()))?;
    eprintln!("Logged in.");
    Ok(())
}

/// Clears the session flag and prints the route to show next.
pub fn logout(store: &SessionStore) -> Result<()> {
    store
        .clear()
        .with_context(|| format!("clear session at {}", store.path().display()))?;
    tracing::info!("logged out");
    eprintln!("Logged out.");
    println!("{}", Route::Root.path());
    Ok(())
}
