//! Core library for EventMate: event model, API client, session flag,
//! configuration and logging.

pub mod api;
pub mod config;
pub mod events;
pub mod logging;
pub mod route;
pub mod session;

pub use api::{ApiClient, ApiError, ApiErrorKind, ApiResult};
pub use config::Config;
pub use events::{Event, EventDate, JoinRefused};
pub use route::Route;
pub use session::{Session, SessionStore};
