use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::widgets::TableState;

use crate::action::{Action, Tab};
use crate::domain::*;

/// Outcome of one asynchronous load. There is no idle variant: a load exists
/// only once it has been started.
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchChangePoints(u64),
    FetchPlot(u64),
    FetchPrices(u64),
    OpenPlot(PathBuf),
    Quit,
}

pub struct App {
    pub tab: Tab,
    pub overlay: Overlay,

    // Change-point viewer
    pub change_points: LoadState<Vec<ChangePoint>>,
    pub plot: LoadState<PlotImage>,
    pub prices: LoadState<PriceSeries>,
    pub change_point_table_state: TableState,
    pub generation: u64,
    pub mounted: bool,

    // Events catalog, absent when no catalog path is configured
    pub events: Option<LoadState<Vec<Event>>>,
    pub event_table_state: TableState,

    pub base_url: String,
    pub should_quit: bool,
    pub last_error: Option<(String, Instant)>,
}

impl App {
    pub fn new(base_url: String, events: Option<LoadState<Vec<Event>>>) -> Self {
        let mut event_table_state = TableState::default();
        if events
            .as_ref()
            .and_then(|e| e.data())
            .is_some_and(|e| !e.is_empty())
        {
            event_table_state.select_first();
        }

        Self {
            tab: Tab::ChangePoints,
            overlay: Overlay::None,

            change_points: LoadState::Loading,
            plot: LoadState::Loading,
            prices: LoadState::Loading,
            change_point_table_state: TableState::default(),
            generation: 0,
            mounted: false,

            events,
            event_table_state,

            base_url,
            should_quit: false,
            last_error: None,
        }
    }

    /// Starts a fresh mount: discards any previous records and requests the
    /// change points, the plot and the price history exactly once each.
    pub fn mount(&mut self) -> Vec<Effect> {
        self.generation += 1;
        self.mounted = true;
        self.change_points = LoadState::Loading;
        self.plot = LoadState::Loading;
        self.prices = LoadState::Loading;
        self.change_point_table_state = TableState::default();
        tracing::debug!(generation = self.generation, "viewer mounted");
        vec![
            Effect::FetchChangePoints(self.generation),
            Effect::FetchPlot(self.generation),
            Effect::FetchPrices(self.generation),
        ]
    }

    /// Tears the viewer down; responses still in flight become stale.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }

    fn is_current(&self, generation: u64) -> bool {
        let current = self.mounted && generation == self.generation;
        if !current {
            tracing::debug!(
                generation,
                current = self.generation,
                mounted = self.mounted,
                "dropping stale response"
            );
        }
        current
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        // Clear stale error toasts
        if let Some((_, at)) = &self.last_error {
            if at.elapsed() > Duration::from_secs(5) {
                self.last_error = None;
            }
        }

        match action {
            // Navigation
            Action::NavigateUp => {
                if self.active_len() > 0 {
                    if let Some(state) = self.active_table() {
                        state.select_previous();
                    }
                }
                vec![]
            }
            Action::NavigateDown => {
                if self.active_len() > 0 {
                    if let Some(state) = self.active_table() {
                        state.select_next();
                    }
                }
                vec![]
            }
            Action::NavigateTop => {
                if self.active_len() > 0 {
                    if let Some(state) = self.active_table() {
                        state.select_first();
                    }
                }
                vec![]
            }
            Action::NavigateBottom => {
                if self.active_len() > 0 {
                    if let Some(state) = self.active_table() {
                        state.select_last();
                    }
                }
                vec![]
            }
            Action::PageUp => {
                self.move_selection(-(page_height() as isize));
                vec![]
            }
            Action::PageDown => {
                self.move_selection(page_height() as isize);
                vec![]
            }

            // Tabs
            Action::NextTab | Action::PrevTab => {
                if self.events.is_some() {
                    self.tab = match self.tab {
                        Tab::ChangePoints => Tab::Events,
                        Tab::Events => Tab::ChangePoints,
                    };
                }
                vec![]
            }

            // Viewer
            Action::Reload => {
                // Only the error state can be reset; loaded is terminal.
                if self.tab == Tab::ChangePoints && matches!(self.change_points, LoadState::Error(_)) {
                    tracing::info!("reloading change point viewer");
                    self.mount()
                } else {
                    vec![]
                }
            }
            Action::OpenPlot => match self.plot.data().and_then(|p| p.path.clone()) {
                Some(path) => vec![Effect::OpenPlot(path)],
                None => {
                    self.last_error = Some(("plot is not available".to_string(), Instant::now()));
                    vec![]
                }
            },

            // UI
            Action::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
                vec![]
            }
            Action::CloseOverlay => {
                self.overlay = Overlay::None;
                vec![]
            }

            // Data responses
            Action::ChangePointsLoaded { generation, points } => {
                if self.is_current(generation) && self.change_points.is_loading() {
                    if !points.is_empty() {
                        self.change_point_table_state.select_first();
                    }
                    self.change_points = LoadState::Loaded(points);
                }
                vec![]
            }
            Action::ChangePointsFailed {
                generation,
                message,
            } => {
                if self.is_current(generation) && self.change_points.is_loading() {
                    let message = if message.trim().is_empty() {
                        "failed to load change points".to_string()
                    } else {
                        message
                    };
                    self.change_points = LoadState::Error(message);
                }
                vec![]
            }
            Action::PlotLoaded { generation, plot } => {
                if self.is_current(generation) {
                    self.plot = LoadState::Loaded(*plot);
                }
                vec![]
            }
            Action::PlotFailed {
                generation,
                message,
            } => {
                if self.is_current(generation) {
                    self.plot = LoadState::Error(message);
                }
                vec![]
            }

            Action::PricesLoaded { generation, series } => {
                if self.is_current(generation) {
                    self.prices = LoadState::Loaded(series);
                }
                vec![]
            }
            Action::PricesFailed {
                generation,
                message,
            } => {
                if self.is_current(generation) {
                    self.prices = LoadState::Error(message);
                }
                vec![]
            }

            // App control
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            Action::Tick => vec![],
            Action::Error(msg) => {
                self.last_error = Some((msg, Instant::now()));
                vec![]
            }
            Action::ClearError => {
                self.last_error = None;
                vec![]
            }
        }
    }

    fn active_table(&mut self) -> Option<&mut TableState> {
        match self.tab {
            Tab::ChangePoints => Some(&mut self.change_point_table_state),
            Tab::Events => self
                .events
                .is_some()
                .then_some(&mut self.event_table_state),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        if let Some(state) = self.active_table() {
            let current = state.selected().unwrap_or(0).min(len - 1);
            let next = current.saturating_add_signed(delta).min(len - 1);
            state.select(Some(next));
        }
    }

    fn active_len(&self) -> usize {
        match self.tab {
            Tab::ChangePoints => self.change_points.data().map(|p| p.len()).unwrap_or(0),
            Tab::Events => self
                .events
                .as_ref()
                .and_then(|e| e.data())
                .map(|e| e.len())
                .unwrap_or(0),
        }
    }
}

fn page_height() -> usize {
    20 // approximate; the table height is only known at render time
}
