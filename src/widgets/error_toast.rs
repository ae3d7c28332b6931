use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;

/// Takes over the footer row while a transient error is showing.
pub fn render(message: &str, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " ERROR ",
            Style::default()
                .fg(theme::BG_DARK)
                .bg(theme::RED)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", message), Style::default().fg(theme::RED)),
        Span::styled("  Esc", Style::default().fg(theme::AMBER)),
        Span::styled(":dismiss", Style::default().fg(theme::TEXT_MUTED)),
    ]);

    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}
