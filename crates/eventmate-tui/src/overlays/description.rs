use crossterm::event::{KeyCode, KeyEvent};
use eventmate_core::Event;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use crate::common::wrapped_line_count;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};

const PANEL_WIDTH: u16 = 60;
const MIN_PANEL_HEIGHT: u16 = 6;

/// The Selection: one event whose description is showing.
#[derive(Debug, Clone)]
pub struct DescriptionState {
    pub event: Event,
}

impl DescriptionState {
    pub fn open(event: Event) -> Self {
        Self { event }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | 'i') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("Esc", "close")];
        // Matches the clamp in calculate_overlay_area.
        let width = PANEL_WIDTH.min(area.width.saturating_sub(4));
        let body_width = usize::from(width.saturating_sub(2));
        let text_lines = wrapped_line_count(&self.event.description, body_width);
        let height = u16::try_from(text_lines)
            .unwrap_or(u16::MAX)
            .saturating_add(3)
            .max(MIN_PANEL_HEIGHT);

        let body_area = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: &self.event.name,
                border_color: Color::Cyan,
                width,
                height,
                hints: &hints,
            },
        );

        let body = Paragraph::new(Text::from(self.event.description.as_str()))
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });
        frame.render_widget(body, body_area);
    }
}
