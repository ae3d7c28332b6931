use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc;

use cpview::action::Action;
use cpview::app::{App, Effect, LoadState};
use cpview::client::{AnalysisClient, HttpAnalysisClient};
use cpview::config::{Cli, ConfigFile, Settings};
use cpview::domain::load_events;
use cpview::event::{key_to_action, AppEvent, RawEventHandler};
use cpview::widgets;
use cpview::worker::{Request, Worker, WorkerHandle};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.clone().or_else(ConfigFile::default_path);
    let file = match config_path {
        Some(ref path) => ConfigFile::load(path)?,
        None => None,
    };
    let settings = Settings::resolve(cli, file)?;

    // Set up logging; the guard flushes the writer on exit
    let _log_guard = match settings.log_file {
        Some(ref log_file) => Some(init_logging(log_file)?),
        None => None,
    };

    let client = HttpAnalysisClient::new(&settings.base_url, settings.timeout)?;

    if settings.once {
        return print_once(&client).await;
    }

    run_tui(settings, Arc::new(client)).await
}

fn init_logging(log_file: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let dir = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .ok_or_else(|| color_eyre::eyre::eyre!("invalid log file path: {}", log_file.display()))?;
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    Ok(guard)
}

async fn print_once(client: &HttpAnalysisClient) -> Result<()> {
    let table = cpview::plain::fetch_table(client)
        .await
        .wrap_err_with(|| format!("failed to load change points from {}", client.base_url()))?;
    print!("{}", table);
    Ok(())
}

async fn run_tui(settings: Settings, client: Arc<dyn AnalysisClient>) -> Result<()> {
    let events = settings.events_path.as_deref().map(|path| match load_events(path) {
        Ok(events) => LoadState::Loaded(events),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load events catalog");
            LoadState::Error(e.to_string())
        }
    });

    let mut app = App::new(settings.base_url.clone(), events);

    // Set up channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create worker
    let (worker, handle) = Worker::new(client, settings.plot_dir.clone(), action_tx);
    tokio::spawn(worker.run());

    // Mount the viewer
    let effects = app.mount();
    handle_effects(effects, &handle);

    let mut session = cpview::tui::Session::start()?;
    let mut events = RawEventHandler::new(Duration::from_millis(250));

    loop {
        session.terminal.draw(|frame| widgets::render(&mut app, frame))?;

        tokio::select! {
            Some(event) = events.next() => {
                let action = match event {
                    AppEvent::Key(key) => key_to_action(key, app.overlay),
                    AppEvent::Resize => None,
                    AppEvent::Tick => Some(Action::Tick),
                };
                if let Some(action) = action {
                    let effects = app.update(action);
                    handle_effects(effects, &handle);
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(effects, &handle);
            }
        }

        if app.should_quit {
            break;
        }
    }

    app.unmount();
    drop(session);

    Ok(())
}

fn handle_effects(effects: Vec<Effect>, handle: &WorkerHandle) {
    for effect in effects {
        match effect {
            Effect::FetchChangePoints(generation) => {
                handle.send(Request::FetchChangePoints { generation });
            }
            Effect::FetchPlot(generation) => {
                handle.send(Request::FetchPlot { generation });
            }
            Effect::FetchPrices(generation) => {
                handle.send(Request::FetchPrices { generation });
            }
            Effect::OpenPlot(path) => {
                handle.send(Request::OpenPlot { path });
            }
            Effect::Quit => {}
        }
    }
}
