use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Paragraph, Row};
use ratatui::Frame;

use super::collection::{header_row, render_collection, CollectionTable};
use crate::app::{App, LoadState};
use crate::domain::Event;
use crate::theme;

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let events = match &app.events {
        Some(LoadState::Loaded(events)) => events,
        Some(LoadState::Error(msg)) => {
            let error = Paragraph::new(format!(" Failed to load events catalog: {}", msg))
                .style(Style::default().fg(theme::RED));
            frame.render_widget(error, area);
            return;
        }
        Some(LoadState::Loading) => {
            let loading =
                Paragraph::new(" Loading events...").style(Style::default().fg(theme::TEXT_MUTED));
            frame.render_widget(loading, area);
            return;
        }
        None => {
            let none = Paragraph::new(" No events catalog configured (--events)")
                .style(Style::default().fg(theme::TEXT_MUTED));
            frame.render_widget(none, area);
            return;
        }
    };

    let table = CollectionTable {
        header: header_row(&["Date", "Type", "Description"]),
        rows: rows(events),
        widths: vec![
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Fill(1),
        ],
        empty_label: " Events catalog is empty",
    };
    render_collection(frame, area, &mut app.event_table_state, table);
}

fn rows(events: &[Event]) -> Vec<Row<'static>> {
    events
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(e.date.format("%Y-%m-%d").to_string())
                    .style(Style::default().fg(theme::GREEN)),
                Cell::from(e.type_label().to_string()).style(Style::default().fg(theme::CYAN)),
                Cell::from(e.description.clone()).style(Style::default().fg(theme::TEXT)),
            ])
        })
        .collect()
}
