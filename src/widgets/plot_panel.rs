use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::LoadState;
use crate::domain::PlotImage;
use crate::theme;

pub const HEIGHT: u16 = 5;

pub fn render(plot: &LoadState<PlotImage>, frame: &mut Frame, area: Rect) {
    let lines = match plot {
        LoadState::Loading => vec![Line::from(Span::styled(
            " Fetching plot...",
            Style::default().fg(theme::TEXT_MUTED),
        ))],
        LoadState::Error(msg) => vec![Line::from(Span::styled(
            format!(" Plot unavailable: {}", msg),
            Style::default().fg(theme::RED),
        ))],
        LoadState::Loaded(image) => loaded_lines(image),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::TEXT_MUTED))
        .title(" Plot image ");

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn loaded_lines(image: &PlotImage) -> Vec<Line<'static>> {
    let mut summary = format!(" {}", image.format);
    if let Some((w, h)) = image.dimensions {
        summary.push_str(&format!("  {}x{}", w, h));
    }
    summary.push_str(&format!("  {}", image.size_label()));

    let location = match &image.path {
        Some(path) => Line::from(vec![
            Span::styled(format!(" {}", path.display()), Style::default().fg(theme::TEXT_DIM)),
            Span::styled("  o", Style::default().fg(theme::AMBER)),
            Span::styled(" open", Style::default().fg(theme::TEXT_MUTED)),
        ]),
        None => Line::from(Span::styled(
            " not saved to disk",
            Style::default().fg(theme::TEXT_MUTED),
        )),
    };

    vec![
        Line::from(Span::styled(summary, Style::default().fg(theme::TEXT))),
        location,
    ]
}
