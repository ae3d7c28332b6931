use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;

pub fn render(has_events: bool, frame: &mut Frame, area: Rect) {
    let mut lines = vec![];

    lines.push(Line::from(""));
    lines.push(section("Navigation"));
    lines.push(binding("j / k / Up / Down", "Move row cursor"));
    lines.push(binding("g / G", "Go to top / bottom"));
    lines.push(binding("Ctrl+D / Ctrl+U", "Page down / up"));
    if has_events {
        lines.push(binding("Tab / Shift+Tab", "Switch tab"));
    }

    lines.push(Line::from(""));
    lines.push(section("Change Points"));
    lines.push(binding("r", "Reload after an error"));
    lines.push(binding("o", "Open plot in image viewer"));

    lines.push(Line::from(""));
    lines.push(section("General"));
    lines.push(binding("?", "Toggle this help"));
    lines.push(binding("Esc", "Dismiss error"));
    lines.push(binding("q / Ctrl+C", "Quit"));

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));
    let modal_area = centered_rect(60, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::AMBER))
        .title(" Help (? to close) ");

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal_area);
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(theme::AMBER)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<22}", key), Style::default().fg(theme::YELLOW)),
        Span::styled(desc, Style::default().fg(theme::TEXT)),
    ])
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}
