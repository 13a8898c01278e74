use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context as _;
use bookcase_application::{BrowserSession, Catalogue};
use bookcase_core::{Settings, Theme};
use bookcase_storage::Storage;
use bookcase_ui::Ui;
use directories::ProjectDirs;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    if let Err(err) = run() {
        error!("{err:?}");
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let project_dirs =
        ProjectDirs::from("dev", "bookcase", "bookcase").context("resolve project dirs")?;

    let storage = Storage::open(project_dirs.config_dir())?;
    init_tracing(&storage.config_dir().join("bookcase.log"))?;

    let settings = storage.load_settings()?;
    if !storage.settings_path().exists() {
        storage.save_settings(&settings)?;
    }

    let catalogue = load_catalogue(&settings)?;
    let prefers_dark = prefers_dark_from(
        std::env::var("BOOKCASE_THEME").ok().as_deref(),
        std::env::var("COLORFGBG").ok().as_deref(),
    );
    info!(
        books = catalogue.len(),
        page_size = settings.page_size,
        prefers_dark,
        "starting browser"
    );

    let session = BrowserSession::new(catalogue, settings.page_size, prefers_dark);
    let mut ui = Ui::new(session);
    ui.run()
}

fn load_catalogue(settings: &Settings) -> anyhow::Result<Catalogue> {
    let path = catalogue_path_from(
        std::env::args().nth(1),
        std::env::var("BOOKCASE_CATALOGUE").ok(),
        settings,
    );
    match path {
        Some(path) => bookcase_storage::load_catalogue(&path),
        None => {
            info!("no catalogue configured, using bundled sample");
            bookcase_storage::bundled_catalogue()
        }
    }
}

/// First CLI argument, then `BOOKCASE_CATALOGUE`, then the settings file.
/// Blank values fall through to the next source.
fn catalogue_path_from(
    arg: Option<String>,
    env: Option<String>,
    settings: &Settings,
) -> Option<PathBuf> {
    [arg, env, settings.catalogue_path.clone()]
        .into_iter()
        .flatten()
        .map(|path| path.trim().to_string())
        .find(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Host colour-scheme preference. An explicit `BOOKCASE_THEME` wins;
/// otherwise the terminal's `COLORFGBG` background index decides.
fn prefers_dark_from(theme_var: Option<&str>, colorfgbg: Option<&str>) -> bool {
    if let Some(theme) = theme_var.and_then(|value| value.parse::<Theme>().ok()) {
        return theme == Theme::Night;
    }

    colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

fn init_tracing(log_path: &Path) -> anyhow::Result<()> {
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}
