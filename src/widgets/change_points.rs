use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Wrap};
use ratatui::Frame;

use super::collection::{header_row, render_collection, CollectionTable};
use super::{plot_panel, price_chart};
use crate::app::{App, LoadState};
use crate::domain::{ChangePoint, CHANGE_POINT_HEADER};
use crate::theme;

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    match &app.change_points {
        LoadState::Loading => {
            let loading = Paragraph::new(" Loading change points...")
                .style(Style::default().fg(theme::TEXT_MUTED));
            frame.render_widget(loading, area);
        }
        LoadState::Error(message) => render_error(message, frame, area),
        LoadState::Loaded(points) => {
            let layout = Layout::vertical([
                Constraint::Length(plot_panel::HEIGHT),
                Constraint::Percentage(40),
                Constraint::Fill(1),
            ])
            .split(area);

            plot_panel::render(&app.plot, frame, layout[0]);

            let events = app
                .events
                .as_ref()
                .and_then(|e| e.data())
                .map(Vec::as_slice)
                .unwrap_or_default();
            price_chart::render(&app.prices, points, events, frame, layout[1]);

            let table = CollectionTable {
                header: header_row(&CHANGE_POINT_HEADER),
                rows: rows(points),
                widths: vec![
                    Constraint::Length(19),
                    Constraint::Length(12),
                    Constraint::Fill(1),
                ],
                empty_label: " No change points detected",
            };
            render_collection(frame, layout[2], &mut app.change_point_table_state, table);
        }
    }
}

pub fn rows(points: &[ChangePoint]) -> Vec<Row<'static>> {
    points
        .iter()
        .map(|cp| {
            let [date, event_date, description] = cp.cells();
            Row::new(vec![
                Cell::from(date.to_string()).style(Style::default().fg(theme::AMBER)),
                placeholder_cell(event_date, !cp.has_event_date()),
                placeholder_cell(description, !cp.has_description()),
            ])
        })
        .collect()
}

fn placeholder_cell(text: &str, is_placeholder: bool) -> Cell<'static> {
    let style = if is_placeholder {
        Style::default().fg(theme::TEXT_MUTED)
    } else {
        Style::default().fg(theme::TEXT)
    };
    Cell::from(text.to_string()).style(style)
}

fn render_error(message: &str, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Failed to load change points",
            Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", message), Style::default().fg(theme::TEXT))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  r", Style::default().fg(theme::AMBER)),
            Span::styled(" reload", Style::default().fg(theme::TEXT_DIM)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::RED))
        .title(" Error ");

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
