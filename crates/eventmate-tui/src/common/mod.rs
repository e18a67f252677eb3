//! Shared helpers for TUI rendering.

mod text;

pub use text::{truncate_with_ellipsis, wrapped_line_count};
