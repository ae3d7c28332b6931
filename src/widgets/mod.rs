pub mod change_points;
pub mod collection;
pub mod error_toast;
pub mod events_table;
pub mod footer;
pub mod header;
pub mod help_overlay;
pub mod plot_panel;
pub mod price_chart;

use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::action::Tab;
use crate::app::{App, Overlay};
use crate::theme;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme::BG_DARK)), area);

    let layout = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Fill(1),   // Content
        Constraint::Length(1), // Footer
    ])
    .split(area);

    header::render(app, frame, layout[0]);

    match app.tab {
        Tab::ChangePoints => change_points::render(app, frame, layout[1]),
        Tab::Events => events_table::render(app, frame, layout[1]),
    }

    match &app.last_error {
        Some((message, _)) => error_toast::render(message, frame, layout[2]),
        None => footer::render(app, frame, layout[2]),
    }

    if app.overlay == Overlay::Help {
        help_overlay::render(app.events.is_some(), frame, area);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    use super::*;
    use crate::action::Action;
    use crate::app::LoadState;
    use crate::domain::{ChangePoint, Event, PlotImage, PriceSeries};

    fn draw(app: &mut App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn loaded_app(body: &str) -> App {
        let points: Vec<ChangePoint> = serde_json::from_str(body).unwrap();
        let mut app = App::new("http://localhost:8080".to_string(), None);
        app.mount();
        app.update(Action::ChangePointsLoaded {
            generation: app.generation,
            points,
        });
        app
    }

    fn row_lines<'a>(lines: &'a [String], date_prefix: &str) -> Vec<&'a String> {
        lines.iter().filter(|l| l.contains(date_prefix)).collect()
    }

    #[test]
    fn loading_state_shows_no_table() {
        let mut app = App::new("http://localhost:8080".to_string(), None);
        app.mount();
        let lines = draw(&mut app);
        assert!(lines.iter().any(|l| l.contains("Loading change points")));
        assert!(!lines.iter().any(|l| l.contains("Change Point Date")));
    }

    #[test]
    fn renders_full_and_placeholder_rows() {
        let mut app = loaded_app(
            r#"[{"Change_Point_Date":"2016-03-01","Event_Date":"2016-02-28","Event_Description":"OPEC freeze talks"},
                {"Change_Point_Date":"2020-04-01"}]"#,
        );
        let lines = draw(&mut app);

        assert!(lines.iter().any(|l| l.contains("Change Point Date")
            && l.contains("Event Date")
            && l.contains("Event Description")));

        let first = row_lines(&lines, "2016-03-01");
        assert_eq!(first.len(), 1);
        assert!(first[0].contains("2016-02-28"));
        assert!(first[0].contains("OPEC freeze talks"));

        let second = row_lines(&lines, "2020-04-01");
        assert_eq!(second.len(), 1);
        assert!(second[0].contains("N/A"));
        assert!(second[0].contains("No description available"));
    }

    #[test]
    fn rows_follow_response_order() {
        let mut app = loaded_app(
            r#"[{"Change_Point_Date":"2020-04-01"},{"Change_Point_Date":"2008-09-15"},{"Change_Point_Date":"2014-11-27"}]"#,
        );
        let lines = draw(&mut app);
        let position = |date: &str| lines.iter().position(|l| l.contains(date)).unwrap();
        assert!(position("2020-04-01") < position("2008-09-15"));
        assert!(position("2008-09-15") < position("2014-11-27"));
        let row_count = lines
            .iter()
            .filter(|l| l.contains("No description available"))
            .count();
        assert_eq!(row_count, 3);
    }

    #[test]
    fn error_state_shows_message_and_no_rows() {
        let mut app = App::new("http://localhost:8080".to_string(), None);
        app.mount();
        app.update(Action::ChangePointsFailed {
            generation: app.generation,
            message: "request failed: GET /api/change_points returned 500 Internal Server Error"
                .to_string(),
        });
        let lines = draw(&mut app);
        assert!(lines.iter().any(|l| l.contains("returned 500")));
        assert!(!lines.iter().any(|l| l.contains("Change Point Date")));
        assert!(lines.iter().any(|l| l.contains("reload")));
    }

    #[test]
    fn plot_panel_sits_above_table() {
        let mut app = loaded_app(r#"[{"Change_Point_Date":"2016-03-01"}]"#);
        let mut plot = PlotImage::from_bytes(b"<svg></svg>".to_vec());
        plot.path = Some("/tmp/cpview/plot.svg".into());
        app.update(Action::PlotLoaded {
            generation: app.generation,
            plot: Box::new(plot),
        });
        let lines = draw(&mut app);
        let plot_line = lines.iter().position(|l| l.contains("SVG")).unwrap();
        let header_line = lines.iter().position(|l| l.contains("Change Point Date")).unwrap();
        assert!(plot_line < header_line);
        assert!(lines.iter().any(|l| l.contains("/tmp/cpview/plot.svg")));
    }

    #[test]
    fn plot_failure_does_not_hide_table() {
        let mut app = loaded_app(r#"[{"Change_Point_Date":"2016-03-01"}]"#);
        app.update(Action::PlotFailed {
            generation: app.generation,
            message: "timeout".to_string(),
        });
        let lines = draw(&mut app);
        assert!(lines.iter().any(|l| l.contains("Plot unavailable: timeout")));
        assert_eq!(row_lines(&lines, "2016-03-01").len(), 1);
    }

    #[test]
    fn empty_response_renders_empty_label() {
        let mut app = loaded_app("[]");
        let lines = draw(&mut app);
        assert!(lines.iter().any(|l| l.contains("No change points detected")));
    }

    #[test]
    fn events_tab_lists_catalog() {
        let events = vec![Event {
            date: NaiveDate::from_ymd_opt(2022, 2, 24).unwrap(),
            description: "Russia-Ukraine Conflict Begins".to_string(),
            event_type: Some("Geopolitical".to_string()),
        }];
        let mut app = App::new("http://localhost:8080".to_string(), Some(LoadState::Loaded(events)));
        app.mount();
        app.update(Action::NextTab);
        let lines = draw(&mut app);
        let row = row_lines(&lines, "2022-02-24");
        assert_eq!(row.len(), 1);
        assert!(row[0].contains("Geopolitical"));
        assert!(row[0].contains("Russia-Ukraine Conflict Begins"));
    }

    #[test]
    fn blank_event_date_renders_placeholder() {
        let mut app = loaded_app(
            r#"[{"Change_Point_Date":"2020-04-01","Event_Date":"","Event_Description":"   "}]"#,
        );
        let lines = draw(&mut app);
        let row = row_lines(&lines, "2020-04-01");
        assert_eq!(row.len(), 1);
        assert!(row[0].contains("N/A"));
        assert!(row[0].contains("No description available"));
    }

    #[test]
    fn events_load_failure_stays_in_events_tab() {
        let mut app = App::new(
            "http://localhost:8080".to_string(),
            Some(LoadState::Error("events.csv line 3: invalid Event_Date".to_string())),
        );
        app.mount();
        app.update(Action::ChangePointsLoaded {
            generation: app.generation,
            points: vec![ChangePoint {
                change_point_date: "2016-03-01".to_string(),
                event_date: None,
                event_description: None,
            }],
        });

        let lines = draw(&mut app);
        assert!(!lines.iter().any(|l| l.contains("events catalog")));
        assert_eq!(row_lines(&lines, "2016-03-01").len(), 1);
        assert!(app.change_points.data().is_some());

        app.update(Action::NextTab);
        let lines = draw(&mut app);
        assert!(lines
            .iter()
            .any(|l| l.contains("Failed to load events catalog: events.csv line 3")));
        assert!(row_lines(&lines, "2016-03-01").is_empty());
    }

    #[test]
    fn price_chart_sits_between_plot_and_table() {
        let mut app = loaded_app(r#"[{"Change_Point_Date":"2016-03-01"}]"#);
        let series = PriceSeries::new(
            ["2016-02-26", "2016-02-29", "2016-03-01", "2016-03-02"]
                .map(String::from)
                .to_vec(),
            vec![35.1, 35.9, 36.8, 36.9],
        )
        .unwrap();
        app.update(Action::PricesLoaded {
            generation: app.generation,
            series,
        });
        let lines = draw(&mut app);

        let chart_top = lines.iter().position(|l| l.contains("Brent price (USD)")).unwrap();
        let plot_top = lines.iter().position(|l| l.contains("Plot image")).unwrap();
        let header = lines.iter().position(|l| l.contains("Change Point Date")).unwrap();
        assert!(plot_top < chart_top && chart_top < header);
        assert!(lines.iter().any(|l| l.contains("2016-02-26") && l.contains("2016-03-02")));
        assert!(!lines.iter().any(|l| l.contains("Prices unavailable")));
    }

    #[test]
    fn price_failure_does_not_hide_table() {
        let mut app = loaded_app(r#"[{"Change_Point_Date":"2016-03-01"}]"#);
        app.update(Action::PricesFailed {
            generation: app.generation,
            message: "request failed: GET /api/prices returned 404 Not Found".to_string(),
        });
        let lines = draw(&mut app);
        assert!(lines.iter().any(|l| l.contains("Prices unavailable: request failed")));
        assert_eq!(row_lines(&lines, "2016-03-01").len(), 1);
    }

    #[test]
    fn error_toast_replaces_footer_only() {
        let mut app = loaded_app(r#"[{"Change_Point_Date":"2016-03-01"}]"#);
        app.update(Action::OpenPlot);
        let lines = draw(&mut app);

        let last = lines.last().unwrap();
        assert!(last.contains("ERROR") && last.contains("plot is not available"));
        assert!(!last.contains("help"));
        assert_eq!(row_lines(&lines, "2016-03-01").len(), 1);

        app.update(Action::ClearError);
        let lines = draw(&mut app);
        assert!(lines.last().unwrap().contains("help"));
    }

    #[test]
    fn help_overlay_renders() {
        let mut app = loaded_app("[]");
        app.update(Action::ToggleHelp);
        let lines = draw(&mut app);
        assert!(lines.iter().any(|l| l.contains("Reload after an error")));
    }
}
