mod app;
mod config;
mod event;
mod fetch;
mod logging;
mod routes;
mod session;
mod ui;
mod views;

use app::App;
use clap::Parser;
use config::Settings;
use fetch::DataMsg;
use ratatui::DefaultTerminal;
use routes::Route;
use std::path::PathBuf;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

#[derive(Parser)]
#[command(name = "clubdesk")]
#[command(about = "Club admin console: players, attendance, fees and the training calendar")]
struct Cli {
    /// Settings file (TOML); defaults to config/settings.toml
    #[arg(long, env = "CLUBDESK_CONFIG")]
    config: Option<String>,

    /// Route to open at startup, e.g. /asistencia
    #[arg(long, default_value = "/")]
    open: String,

    /// Override the session file location
    #[arg(long, env = "CLUBDESK_SESSION_FILE")]
    session_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    color_eyre::install().ok();
    let cli = Cli::parse();

    logging::init()?;
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(path) = cli.session_file {
        settings.session.file = path;
    }
    info!(endpoint = %settings.endpoint.url, "starting clubdesk");

    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(&settings, tx);
    app.bootstrap(Route::from_path(&cli.open));

    // ratatui::init handles raw mode + alternate screen; restore always
    // runs, even when the loop errors out.
    let terminal = ratatui::init();
    let result = run_app(terminal, app, rx).await;
    ratatui::restore();
    result
}

async fn run_app(
    mut terminal: DefaultTerminal,
    mut app: App,
    mut rx: UnboundedReceiver<DataMsg>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if app.should_quit {
            break;
        }

        // Drain completed fetches before blocking on input again.
        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        // Poll events (non-blocking with 100ms timeout)
        if let Some(evt) = event::poll_event(100)? {
            event::handle_event(&mut app, evt);
        }
    }
    Ok(())
}
