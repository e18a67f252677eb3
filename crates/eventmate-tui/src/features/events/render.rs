//! Event list rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use super::state::{ListedEvent, SyncState};
use crate::state::TuiState;

pub const HEADER_TITLE: &str = "EventMate";
pub const LOGOUT_LABEL: &str = "[L] Log Out";

const COLUMN_TITLES: [&str; 6] = ["Name", "Date", "Time", "Place", "Slots", "Join"];
const ROW_ACTIONS: &str = "[Join] [Info]";
/// Marker appended to a slot value whose update has not been answered yet.
const PENDING_MARKER: &str = "~";

/// Title bar with the logout control when a session is present.
pub fn render_header(state: &TuiState, frame: &mut Frame, area: Rect) {
    let [title_area, logout_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(LOGOUT_LABEL.len() as u16 + 1)])
            .areas(area);

    let title = Paragraph::new(Line::from(Span::styled(
        HEADER_TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, title_area);

    if state.session.authenticated {
        let logout = Paragraph::new(Line::from(Span::styled(
            LOGOUT_LABEL,
            Style::default().fg(Color::Red),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(logout, logout_area);
    }
}

/// Text for the Slots column.
pub fn slot_label(row: &ListedEvent) -> String {
    match row.sync {
        SyncState::Pending { .. } => format!("{}{PENDING_MARKER}", row.event.slot),
        _ => row.event.slot.to_string(),
    }
}

/// Renders the events table with the cursor row highlighted.
pub fn render_event_list(state: &TuiState, frame: &mut Frame, area: Rect) {
    let header = Row::new(COLUMN_TITLES.map(Cell::from)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .events
        .rows()
        .iter()
        .map(|row| {
            let slot_style = if row.event.is_full() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Cell::from(row.event.name.clone()),
                Cell::from(row.event.date.format_local(&state.date_format)),
                Cell::from(row.event.time.clone()),
                Cell::from(row.event.place.clone()),
                Cell::from(Span::styled(slot_label(row), slot_style)),
                Cell::from(Span::styled(ROW_ACTIONS, Style::default().fg(Color::DarkGray))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Fill(2),
        Constraint::Length(6),
        Constraint::Length(ROW_ACTIONS.len() as u16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(
        (!state.events.rows().is_empty()).then_some(state.events.cursor),
    );
    frame.render_stateful_widget(table, area, &mut table_state);
}
