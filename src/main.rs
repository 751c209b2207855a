use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod catalog;
mod history;
mod model;
mod persistence;
mod settings;
mod snap;
mod store;

use persistence::{JsonFileRepository, LayoutRepository, VenueId};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Persist(#[from] persistence::PersistError),
    #[error(transparent)]
    Settings(#[from] settings::SettingsError),
    #[error("ui failed: {0}")]
    Ui(#[from] eframe::Error),
}

#[derive(Parser, Debug)]
#[command(name = "seatplan", about = "Venue seating layout editor")]
struct Cli {
    /// Venue whose layout is edited.
    #[arg(long, env = "SEATPLAN_VENUE", default_value = "default")]
    venue: String,

    /// Directory of stored venue layouts (overrides the settings file).
    #[arg(long, env = "SEATPLAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Settings file (TOML or JSON).
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), StartupError> {
    let settings_path = settings::settings_path(cli.settings.as_deref());
    let mut app_settings = settings::load_settings(&settings_path)?.unwrap_or_default();
    if let Some(dir) = cli.data_dir {
        app_settings.data_dir = dir;
    }

    let venue = VenueId::new(cli.venue)?;
    let repository = JsonFileRepository::new(&app_settings.data_dir);
    let saved = repository.fetch(&venue)?;
    info!(
        venue = %venue,
        path = %repository.path_for(&venue).display(),
        elements = saved.as_ref().map_or(0, |s| s.elements.len()),
        "starting editor"
    );

    let startup = app::Startup {
        venue,
        repository: Box::new(repository),
        settings: app_settings,
        settings_path,
        saved,
    };
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Seatplan",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::EditorApp::new(cc, startup)))),
    )?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("seatplan=info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "seatplan failed");
            ExitCode::FAILURE
        }
    }
}
