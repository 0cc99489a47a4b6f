use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir};
use tracing::info;

pub mod events;
pub mod handlers;
pub mod state;

pub use self::state::AppState;
use handlers::{
    get_itinerary, get_settings, get_state, get_thumbnail_image, index_html, post_command,
    script_js, style_css, viewer_events_stream,
};

// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(index_html))
        .route("/style.css", get(style_css))
        .route("/script.js", get(script_js))
        .route("/api/itinerary", get(get_itinerary))
        .route("/api/state", get(get_state))
        .route("/api/command", post(post_command))
        .route("/api/events", get(viewer_events_stream))
        .route("/api/settings", get(get_settings))
        .route("/api/thumbnail/*filename", get(get_thumbnail_image));

    if let Some(library) = &state.library {
        router = router.nest_service("/photos", ServeDir::new(library.root()));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new().gzip(true)),
        )
        .with_state(state)
}

/// Serve on 127.0.0.1:`port` until `shutdown` resolves.
pub async fn start_server<F>(state: AppState, port: u16, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_app(state);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server started at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;
    Ok(())
}
