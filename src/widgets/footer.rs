use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Tab;
use crate::app::{App, LoadState, Overlay};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = hints(app);

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme::AMBER)));
        spans.push(Span::styled(
            format!(":{}", desc),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}

fn hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.overlay == Overlay::Help {
        return vec![("Esc", "close"), ("q", "quit")];
    }

    let mut hints = vec![];
    match app.tab {
        Tab::ChangePoints => match app.change_points {
            LoadState::Loading => {}
            LoadState::Error(_) => hints.push(("r", "reload")),
            LoadState::Loaded(_) => {
                hints.push(("j/k", "nav"));
                if app.plot.data().is_some_and(|p| p.path.is_some()) {
                    hints.push(("o", "open plot"));
                }
            }
        },
        Tab::Events => hints.push(("j/k", "nav")),
    }
    if app.events.is_some() {
        hints.push(("Tab", "switch"));
    }
    hints.push(("?", "help"));
    hints.push(("q", "quit"));
    hints
}
