use axum::{
    extract::{Path as AxumPath, State},
    http::{header, StatusCode},
    response::{
        sse::{Event as SseEvent, KeepAlive},
        Html, IntoResponse, Json, Response, Sse,
    },
};
use rust_embed::RustEmbed;
use serde::Serialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;
use tracing::{debug, error, warn};

use super::events::ViewerEvent;
use super::state::AppState;
use crate::constants::HEARTBEAT_SECS;
use crate::error::ItineraryError;
use crate::html_template::render_index;
use crate::itinerary::{DayRecord, Itinerary, PhotoRef};
use crate::settings::Settings;
use crate::viewer::{ViewerCommand, ViewerSnapshot};

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

fn embedded(name: &str) -> Result<Vec<u8>, StatusCode> {
    Asset::get(name)
        .map(|file| file.data.into_owned())
        .ok_or_else(|| {
            error!(asset = name, "Embedded asset missing");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

fn asset_response(name: &str, content_type: &'static str) -> Result<Response, StatusCode> {
    let body = embedded(name)?;
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

pub async fn index_html(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let template = String::from_utf8(embedded("index.html")?).map_err(|e| {
        error!("index.html is not UTF-8: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let config = state.session.config();
    Ok(Html(render_index(&template, &state.itinerary, &config)))
}

pub async fn style_css() -> Result<Response, StatusCode> {
    asset_response("style.css", "text/css")
}

pub async fn script_js() -> Result<Response, StatusCode> {
    asset_response("script.js", "application/javascript")
}

/// Whole dataset as served to clients.
#[derive(Serialize)]
pub struct ItineraryResponse<'a> {
    pub title: &'a str,
    pub tagline: &'a str,
    pub summary: &'a str,
    pub hero: Option<&'a PhotoRef>,
    pub credits: &'a str,
    pub days: &'a [DayRecord],
    pub total_cost: f64,
}

impl<'a> From<&'a Itinerary> for ItineraryResponse<'a> {
    fn from(itinerary: &'a Itinerary) -> Self {
        Self {
            title: &itinerary.title,
            tagline: &itinerary.tagline,
            summary: &itinerary.summary,
            hero: itinerary.hero.as_ref(),
            credits: &itinerary.credits,
            days: itinerary.days(),
            total_cost: itinerary.total_cost(),
        }
    }
}

pub async fn get_itinerary(State(state): State<AppState>) -> Response {
    Json(ItineraryResponse::from(state.itinerary.as_ref())).into_response()
}

pub async fn get_state(State(state): State<AppState>) -> Json<ViewerSnapshot> {
    Json(state.session.snapshot())
}

pub async fn post_command(
    State(state): State<AppState>,
    Json(command): Json<ViewerCommand>,
) -> Result<Json<ViewerSnapshot>, StatusCode> {
    match state.session.apply(command) {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(ItineraryError::UnknownDay(day)) => {
            warn!(day, "Navigation to unknown day rejected");
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.as_ref().clone())
}

pub async fn get_thumbnail_image(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<Response, StatusCode> {
    let library = state.library.clone().ok_or(StatusCode::NOT_FOUND)?;
    if !library.contains(&filename) {
        return Err(StatusCode::NOT_FOUND);
    }

    let jpeg_data = tokio::task::spawn_blocking(move || library.thumbnail(&filename))
        .await
        .map_err(|e| {
            error!("Thumbnail task join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("Failed to create thumbnail: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        jpeg_data,
    )
        .into_response())
}

// SSE endpoint for state updates (manual commands and autoplay ticks)
pub async fn viewer_events_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let (tx, rx) = mpsc::channel(32);
    let mut event_receiver = state.session.subscribe();

    // Forward session events to this client
    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                received = event_receiver.recv() => match received {
                    Ok(event) => event,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, "SSE client lagged behind");
                        continue;
                    }
                    Err(_) => break, // Channel closed
                },
                _ = tokio::time::sleep(Duration::from_secs(HEARTBEAT_SECS)) => ViewerEvent::heartbeat(),
            };

            let sse_event = SseEvent::default()
                .json_data(&event)
                .unwrap_or_else(|_| SseEvent::default().data("Error serializing event"));

            if tx.send(Ok(sse_event)).await.is_err() {
                break; // Client disconnected
            }
        }
    });

    Sse::new(ReceiverStream::new(rx)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive-message"),
    )
}
