use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::theme;

pub struct CollectionTable {
    pub header: Row<'static>,
    pub rows: Vec<Row<'static>>,
    pub widths: Vec<Constraint>,
    pub empty_label: &'static str,
}

pub fn render_collection(
    frame: &mut Frame,
    area: Rect,
    state: &mut TableState,
    table: CollectionTable,
) {
    if table.rows.is_empty() {
        let empty = Paragraph::new(table.empty_label).style(Style::default().fg(theme::TEXT_MUTED));
        frame.render_widget(empty, area);
        return;
    }

    let table = Table::new(table.rows, table.widths)
        .header(table.header)
        .block(Block::default().borders(Borders::NONE))
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, area, state);
}

pub fn header_row(labels: &[&'static str]) -> Row<'static> {
    Row::new(
        labels
            .iter()
            .map(|label| Cell::from(*label))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(theme::TEXT_DIM)
            .add_modifier(Modifier::BOLD),
    )
    .height(1)
}
