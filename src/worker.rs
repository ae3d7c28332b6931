use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::action::Action;
use crate::client::AnalysisClient;
use crate::domain::PlotImage;

#[derive(Debug)]
pub enum Request {
    FetchChangePoints { generation: u64 },
    FetchPlot { generation: u64 },
    FetchPrices { generation: u64 },
    OpenPlot { path: PathBuf },
}

#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::UnboundedSender<Request>,
}

impl WorkerHandle {
    pub fn send(&self, request: Request) {
        let _ = self.tx.send(request);
    }
}

/// Runs backend requests off the UI loop. Each request is processed on its
/// own task so the data and plot fetches settle independently.
pub struct Worker {
    client: Arc<dyn AnalysisClient>,
    plot_dir: Option<PathBuf>,
    rx: mpsc::UnboundedReceiver<Request>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Worker {
    pub fn new(
        client: Arc<dyn AnalysisClient>,
        plot_dir: Option<PathBuf>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, WorkerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = WorkerHandle { tx };
        let worker = Self {
            client,
            plot_dir,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            if self.action_tx.is_closed() {
                break;
            }
            let client = self.client.clone();
            let plot_dir = self.plot_dir.clone();
            let action_tx = self.action_tx.clone();
            tokio::spawn(async move {
                if let Some(action) = process(client.as_ref(), plot_dir, request).await {
                    let _ = action_tx.send(action);
                }
            });
        }
    }
}

pub async fn process(
    client: &dyn AnalysisClient,
    plot_dir: Option<PathBuf>,
    request: Request,
) -> Option<Action> {
    match request {
        Request::FetchChangePoints { generation } => Some(match client.change_points().await {
            Ok(points) => Action::ChangePointsLoaded { generation, points },
            Err(e) => Action::ChangePointsFailed {
                generation,
                message: e.to_string(),
            },
        }),
        Request::FetchPlot { generation } => Some(match client.plot().await {
            Ok(bytes) => {
                let mut plot = PlotImage::from_bytes(bytes);
                if let Some(dir) = plot_dir {
                    match plot.save_to(&dir) {
                        Ok(path) => tracing::info!(path = %path.display(), "plot saved"),
                        Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "failed to save plot"),
                    }
                }
                Action::PlotLoaded {
                    generation,
                    plot: Box::new(plot),
                }
            }
            Err(e) => Action::PlotFailed {
                generation,
                message: e.to_string(),
            },
        }),
        Request::FetchPrices { generation } => Some(match client.prices().await {
            Ok(series) => Action::PricesLoaded { generation, series },
            Err(e) => Action::PricesFailed {
                generation,
                message: e.to_string(),
            },
        }),
        Request::OpenPlot { path } => match open_with_system_viewer(&path).await {
            Ok(()) => None,
            Err(e) => Some(Action::Error(format!(
                "failed to open {}: {}",
                path.display(),
                e
            ))),
        },
    }
}

async fn open_with_system_viewer(path: &std::path::Path) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        tokio::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = tokio::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        tokio::process::Command::new("xdg-open")
    };
    command
        .arg(path)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null());

    tracing::info!(path = %path.display(), "opening plot");
    let status = command.status().await?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("viewer exited with {}", status)))
    }
}
