use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use itinerary_viewer::config::PhotoSource;
use itinerary_viewer::itinerary::Itinerary;
use itinerary_viewer::photo_library::PhotoLibrary;
use itinerary_viewer::server::{start_server, AppState};
use itinerary_viewer::session::ViewerSession;
use itinerary_viewer::settings::Settings;
use itinerary_viewer::viewer::Viewer;

fn load_itinerary(settings: &Settings) -> Result<Itinerary> {
    match settings.itinerary_file {
        Some(ref file) => Itinerary::load(file)
            .with_context(|| format!("Failed to load itinerary from {}", file)),
        None => Itinerary::builtin().context("Built-in itinerary is invalid"),
    }
}

fn open_photo_library(settings: &Settings, itinerary: &Itinerary) -> Option<Arc<PhotoLibrary>> {
    let dir = settings.photos_dir.as_ref()?;
    match PhotoLibrary::scan(dir) {
        Ok(library) => {
            if library.is_empty() {
                warn!(dir = %dir, "No supported photos found in photos_dir");
            }
            let missing = library.missing_references(itinerary);
            if !missing.is_empty() {
                warn!(
                    count = missing.len(),
                    indexed = library.len(),
                    "Local photos referenced by the itinerary are missing"
                );
                for path in &missing {
                    warn!("   missing: {}", path);
                }
            }
            Some(Arc::new(library))
        }
        Err(e) => {
            warn!("Local photos unavailable: {:#}", e);
            None
        }
    }
}

fn open_browser(url: &str) {
    use std::process::Command;

    let result = {
        #[cfg(target_os = "windows")]
        {
            Command::new("cmd").args(["/C", "start", "", url]).spawn()
        }
        #[cfg(target_os = "macos")]
        {
            Command::new("open").arg(url).spawn()
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            Command::new("xdg-open").arg(url).spawn()
        }
    };

    if let Err(e) = result {
        warn!("Failed to open browser: {}", e);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Itinerary Viewer v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load()?;
    if !Settings::config_path().exists() {
        // Leave an editable file with the defaults next to the executable
        match settings.save() {
            Ok(()) => info!("Wrote default settings to {}", Settings::config_path().display()),
            Err(e) => warn!("Could not write default settings: {:#}", e),
        }
    }
    info!(
        config = %Settings::config_path().display(),
        photo_source = %settings.photo_source,
        map_strategy = %settings.map_strategy,
        theme = %settings.theme,
        "Settings loaded"
    );

    let itinerary = Arc::new(load_itinerary(&settings)?);
    let library = open_photo_library(&settings, &itinerary);
    let mut config = settings.viewer_config();
    if config.photo_source == PhotoSource::Local && library.is_none() {
        warn!("photo_source = local but no usable photos_dir; falling back to remote images");
        config.photo_source = PhotoSource::Remote;
    }

    let viewer = Viewer::new(itinerary.clone(), config)
        .with_interval(settings.autoplay_interval_ms);
    let session = ViewerSession::new(viewer);

    let port = settings.port;
    let auto_open = settings.auto_open_browser;
    let state = AppState {
        itinerary,
        session: session.clone(),
        settings: Arc::new(settings),
        library,
    };

    if auto_open {
        open_browser(&format!("http://127.0.0.1:{}", port));
    }

    let shutdown = async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
        }
        session.stop();
    };

    start_server(state, port, shutdown).await?;
    info!("Server stopped");
    Ok(())
}
