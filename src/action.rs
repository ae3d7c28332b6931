use crate::domain::*;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateUp,
    NavigateDown,
    NavigateTop,
    NavigateBottom,
    PageUp,
    PageDown,

    // Tabs
    NextTab,
    PrevTab,

    // Viewer
    Reload,
    OpenPlot,

    // UI
    ToggleHelp,
    CloseOverlay,

    // Data responses, tagged with the mount generation that requested them
    ChangePointsLoaded {
        generation: u64,
        points: Vec<ChangePoint>,
    },
    ChangePointsFailed {
        generation: u64,
        message: String,
    },
    PlotLoaded {
        generation: u64,
        plot: Box<PlotImage>,
    },
    PlotFailed {
        generation: u64,
        message: String,
    },
    PricesLoaded {
        generation: u64,
        series: PriceSeries,
    },
    PricesFailed {
        generation: u64,
        message: String,
    },

    // App control
    Quit,
    Tick,
    Error(String),
    ClearError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    ChangePoints,
    Events,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ChangePoints => "Change Points",
            Self::Events => "Events",
        }
    }
}
