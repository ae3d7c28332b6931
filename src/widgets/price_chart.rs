use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Wrap,
};
use ratatui::Frame;

use crate::app::LoadState;
use crate::domain::{ChangePoint, Event, PriceSeries};
use crate::theme;

/// Dots per event marker; gaps between them read as a dashed line.
const EVENT_DOTS: usize = 12;

pub fn render(
    prices: &LoadState<PriceSeries>,
    points: &[ChangePoint],
    events: &[Event],
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::TEXT_MUTED))
        .title(" Brent price (USD) ");

    let loaded = prices
        .data()
        .and_then(|series| Some((series, series.price_bounds()?)));
    let Some((series, (low, high))) = loaded else {
        let line = match prices {
            LoadState::Error(msg) => Line::from(Span::styled(
                format!(" Prices unavailable: {}", msg),
                Style::default().fg(theme::RED),
            )),
            LoadState::Loading => Line::from(Span::styled(
                " Fetching prices...",
                Style::default().fg(theme::TEXT_MUTED),
            )),
            LoadState::Loaded(_) => Line::from(Span::styled(
                " No price data",
                Style::default().fg(theme::TEXT_MUTED),
            )),
        };
        frame.render_widget(
            Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
            area,
        );
        return;
    };

    let (low, high) = if high - low < f64::EPSILON {
        (low - 1.0, high + 1.0)
    } else {
        (low, high)
    };

    let price_points = series.points();
    let markers = Markers::place(series, points, events);
    let change_lines: Vec<Vec<(f64, f64)>> = markers
        .change_points
        .iter()
        .map(|x| vec![(*x, low), (*x, high)])
        .collect();
    let event_lines: Vec<Vec<(f64, f64)>> = markers
        .events
        .iter()
        .map(|x| dotted(*x, low, high))
        .collect();

    // Later datasets draw over earlier ones: events, then change points, then price.
    let mut datasets = Vec::with_capacity(event_lines.len() + change_lines.len() + 1);
    for (i, line) in event_lines.iter().enumerate() {
        let mut dataset = Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(theme::GREEN))
            .data(line);
        if i == 0 {
            dataset = dataset.name("Events");
        }
        datasets.push(dataset);
    }
    for (i, line) in change_lines.iter().enumerate() {
        let mut dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::RED))
            .data(line);
        if i == 0 {
            dataset = dataset.name("Change points");
        }
        datasets.push(dataset);
    }
    datasets.push(
        Dataset::default()
            .name("Price (USD)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::AMBER))
            .data(&price_points),
    );

    let first = series.first_date().unwrap_or_default().to_string();
    let last = series.last_date().unwrap_or_default().to_string();
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme::TEXT_MUTED))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme::TEXT_MUTED))
                .bounds([low, high])
                .labels(vec![
                    Span::raw(format!("{:.0}", low)),
                    Span::raw(format!("{:.0}", high)),
                ]),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(1, 1)));

    frame.render_widget(chart, area);
}

/// x positions of the vertical markers drawn over the price line. Dates
/// outside the price history are left out.
#[derive(Debug, Default, PartialEq)]
pub struct Markers {
    pub change_points: Vec<f64>,
    pub events: Vec<f64>,
}

impl Markers {
    pub fn place(series: &PriceSeries, points: &[ChangePoint], events: &[Event]) -> Self {
        Self {
            change_points: points
                .iter()
                .filter_map(|cp| series.position_of(&cp.change_point_date))
                .collect(),
            events: events
                .iter()
                .filter_map(|e| series.position_of(&e.date.format("%Y-%m-%d").to_string()))
                .collect(),
        }
    }
}

fn dotted(x: f64, low: f64, high: f64) -> Vec<(f64, f64)> {
    (0..=EVENT_DOTS)
        .map(|i| (x, low + (high - low) * i as f64 / EVENT_DOTS as f64))
        .collect()
}
