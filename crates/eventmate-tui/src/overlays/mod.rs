//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay owns its state, key handler, and render function.
//!
//! - `description.rs`: the description panel for one event
//! - `render_utils.rs`: shared rendering helpers for overlays

pub mod description;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use description::DescriptionState;
use eventmate_core::Event;
use ratatui::Frame;
use ratatui::layout::Rect;

/// Requests to open a new overlay.
#[derive(Debug)]
pub enum OverlayRequest {
    Description(Event),
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self { transition }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }
}

#[derive(Debug)]
pub enum Overlay {
    Description(DescriptionState),
}

impl Overlay {
    pub fn open(request: OverlayRequest) -> Self {
        match request {
            OverlayRequest::Description(event) => {
                Overlay::Description(DescriptionState::open(event))
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Description(d) => d.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Description(d) => d.handle_key(key),
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(overlay) = self {
            overlay.render(frame, area);
        }
    }
}
