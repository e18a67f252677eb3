//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use eventmate_core::Route;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::common::truncate_with_ellipsis;
use crate::features::events::{self, LoadPhase};
use crate::overlays::OverlayExt;
use crate::overlays::render_utils::{InputHint, hints_line};
use crate::state::{AppState, TuiState};

/// Spinner frames for the loading indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
const SPINNER_SPEED_DIVISOR: usize = 6;

pub const LOADING_TEXT: &str = "Loading...";

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    // Loading and errors replace the whole view.
    match state.events.phase() {
        LoadPhase::Loading => {
            render_loading(state, frame, area);
            return;
        }
        LoadPhase::Errored(err) => {
            render_centered(frame, area, err.message(), Style::default().fg(Color::Red));
            return;
        }
        LoadPhase::Loaded => {}
    }

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    events::render_header(state, frame, header_area);
    match &state.route {
        Route::Events => events::render_event_list(state, frame, body_area),
        route => render_route_panel(state, route, frame, body_area),
    }
    render_footer(state, frame, footer_area);

    app.overlay.render(frame, area);
}

fn render_loading(state: &TuiState, frame: &mut Frame, area: Rect) {
    let frame_idx = (state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len();
    let spinner = SPINNER_FRAMES[frame_idx];
    render_centered(
        frame,
        area,
        &format!("{spinner} {LOADING_TEXT}"),
        Style::default().fg(Color::Yellow),
    );
}

fn render_centered(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y, area.width, 1.min(area.height));
    let para = Paragraph::new(Line::from(Span::styled(text.to_string(), style)))
        .alignment(Alignment::Center);
    frame.render_widget(para, line_area);
}

/// Panel standing in for routes owned by the surrounding app.
fn render_route_panel(state: &TuiState, route: &Route, frame: &mut Frame, area: Rect) {
    let message = match route {
        Route::Root => "You have been logged out.".to_string(),
        Route::Enroll { event_id } => match state.events.get(event_id) {
            Some(row) => format!("Enrolling in {}.", row.event.name),
            None => "Enrolling.".to_string(),
        },
        Route::Events => String::new(),
    };

    let lines = vec![
        Line::from(Span::styled(
            message,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Route: {}", route.path()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(para, area);
}

fn render_footer(state: &TuiState, frame: &mut Frame, area: Rect) {
    let hints = if state.route == Route::Events {
        vec![
            InputHint::new("↑↓", "move"),
            InputHint::new("Enter", "info"),
            InputHint::new("J", "join"),
            InputHint::new("q", "quit"),
        ]
    } else {
        vec![InputHint::new("Esc", "back"), InputHint::new("q", "quit")]
    };

    let [hints_area, info_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
    frame.render_widget(Paragraph::new(hints_line(&hints, Color::Cyan)), hints_area);

    let max_width = info_area.width as usize;
    let info = match &state.status {
        Some(status) => Span::styled(
            truncate_with_ellipsis(status, max_width),
            Style::default().fg(Color::Yellow),
        ),
        None => Span::styled(
            truncate_with_ellipsis(&state.api_url, max_width),
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(
        Paragraph::new(Line::from(info)).alignment(Alignment::Right),
        info_area,
    );
}
