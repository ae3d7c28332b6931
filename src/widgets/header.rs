use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Tab;
use crate::app::{App, LoadState};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let mut left_spans: Vec<Span> = vec![
        Span::styled(
            " cpview ",
            Style::default()
                .fg(theme::AMBER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(theme::TEXT_MUTED)),
    ];

    let mut tabs = vec![Tab::ChangePoints];
    if app.events.is_some() {
        tabs.push(Tab::Events);
    }
    for tab in tabs {
        let style = if tab == app.tab {
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        left_spans.push(Span::styled(tab.label(), style));
        left_spans.push(Span::raw("  "));
    }

    let status = match &app.change_points {
        LoadState::Loading => Span::styled("◌ loading", Style::default().fg(theme::YELLOW)),
        LoadState::Error(_) => Span::styled("✗ error", Style::default().fg(theme::RED)),
        LoadState::Loaded(points) => Span::styled(
            format!("● {} change points", points.len()),
            Style::default().fg(theme::GREEN),
        ),
    };
    let right = Line::from(vec![
        status,
        Span::styled(format!("  {} ", app.base_url), Style::default().fg(theme::TEXT_MUTED)),
    ]);

    let right_width = right.width() as u16;
    let layout = Layout::horizontal([Constraint::Fill(1), Constraint::Length(right_width)]).split(area);

    let style = Style::default().bg(theme::BG_SURFACE);
    frame.render_widget(Paragraph::new(Line::from(left_spans)).style(style), layout[0]);
    frame.render_widget(Paragraph::new(right).style(style), layout[1]);
}
