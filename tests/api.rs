use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;
use tower::ServiceExt;

use itinerary_viewer::config::{MapStrategy, ViewerConfig};
use itinerary_viewer::itinerary::Itinerary;
use itinerary_viewer::photo_library::PhotoLibrary;
use itinerary_viewer::server::{create_app, AppState};
use itinerary_viewer::session::ViewerSession;
use itinerary_viewer::settings::Settings;
use itinerary_viewer::viewer::Viewer;

fn app_with(config: ViewerConfig) -> Router {
    build_app(config, None)
}

fn build_app(config: ViewerConfig, library: Option<PhotoLibrary>) -> Router {
    let itinerary = Arc::new(Itinerary::builtin().unwrap());
    let session = ViewerSession::new(Viewer::new(itinerary.clone(), config));
    create_app(AppState {
        itinerary,
        session,
        settings: Arc::new(Settings::default()),
        library: library.map(Arc::new),
    })
}

fn photo_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("itinerary_viewer_api_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("kyoto")).unwrap();
    image::RgbImage::from_fn(640, 480, |x, y| image::Rgb([(x % 256) as u8, (y % 256) as u8, 120]))
        .save(dir.join("kyoto/gion.png"))
        .unwrap();
    dir
}

fn app() -> Router {
    app_with(ViewerConfig::default())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn command(app: &Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/command")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn itinerary_endpoint_lists_all_days() {
    let app = app();
    let (status, body) = get_json(&app, "/api/itinerary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"].as_array().unwrap().len(), 15);
    assert_eq!(body["total_cost"], json!(715.0));
    assert_eq!(body["days"][0]["day_number"], json!(1));
}

#[tokio::test]
async fn initial_state_is_first_day() {
    let app = app();
    let (status, body) = get_json(&app, "/api/state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["navigation"]["current_index"], json!(0));
    assert_eq!(body["navigation"]["autoplay_enabled"], json!(false));
    assert_eq!(body["position"], json!("1 / 15"));
    assert_eq!(body["lightbox"]["is_open"], json!(false));
}

#[tokio::test]
async fn next_and_previous_wrap() {
    let app = app();
    let (_, body) = command(&app, json!({"action": "previous"})).await;
    assert_eq!(body["day"]["day_number"], json!(15));

    let (_, body) = command(&app, json!({"action": "next"})).await;
    assert_eq!(body["day"]["day_number"], json!(1));

    // State persists across requests.
    let (_, body) = get_json(&app, "/api/state").await;
    assert_eq!(body["navigation"]["current_index"], json!(0));
}

#[tokio::test]
async fn timeline_jump_to_day_nine() {
    let app = app();
    let (status, body) = command(&app, json!({"action": "go_to", "index": 8})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["day"]["day_number"], json!(9));
    assert_eq!(body["timeline"][8]["active"], json!(true));
    assert_eq!(body["timeline"][0]["active"], json!(false));
}

#[tokio::test]
async fn unknown_day_is_not_found() {
    let app = app();
    let (status, _) = command(&app, json!({"action": "go_to_day", "day": 99})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_action_is_rejected() {
    let app = app();
    let (status, _) = command(&app, json!({"action": "rewind"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn speed_is_clamped_over_http() {
    let app = app();
    let (_, body) = command(&app, json!({"action": "set_speed", "ms": 100})).await;
    assert_eq!(body["navigation"]["autoplay_interval_ms"], json!(2500));
}

#[tokio::test]
async fn lightbox_opens_and_closes() {
    let app = app();
    command(&app, json!({"action": "go_to", "index": 1})).await;

    let (_, body) = command(&app, json!({"action": "open_photo", "index": 1})).await;
    assert_eq!(body["lightbox"]["is_open"], json!(true));
    assert_eq!(body["lightbox"]["active_image"], body["gallery"][1]["url"]);

    let (_, body) = command(&app, json!({"action": "close_photo"})).await;
    assert_eq!(body["lightbox"]["is_open"], json!(false));
}

#[tokio::test]
async fn region_scoped_map_uses_region() {
    let app = app_with(ViewerConfig {
        map_strategy: MapStrategy::RegionScoped,
        ..ViewerConfig::default()
    });
    let (_, body) = command(&app, json!({"action": "go_to_day", "day": 4})).await;

    assert_eq!(body["map"]["region"], json!("kansai"));
    assert_eq!(body["map"]["framing"]["mode"], json!("center_zoom"));
    assert_eq!(body["map"]["zoom"], json!(9));
}

#[tokio::test]
async fn index_page_is_themed() {
    let app = app();
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("theme-dark"));
    assert!(html.contains("¡Nos vamos a Japón!"));
    assert!(!html.contains("{{TITLE}}"));
}

#[tokio::test]
async fn thumbnails_need_a_photo_library() {
    let app = app();
    let response = app
        .oneshot(
            Request::get("/api/thumbnail/kyoto/gion.jpg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn events_stream_pushes_state_changes() {
    let app = app();
    let response = app
        .clone()
        .oneshot(Request::get("/api/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let (status, _) = command(&app, json!({"action": "next"})).await;
    assert_eq!(status, StatusCode::OK);

    let mut stream = response.into_body().into_data_stream();
    let mut buffer = String::new();
    let frame = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let chunk = stream.next().await.unwrap().unwrap();
            buffer.push_str(std::str::from_utf8(&chunk).unwrap());
            if let Some(end) = buffer.find("\n\n") {
                return buffer[..end].to_string();
            }
        }
    })
    .await
    .unwrap();

    let data = frame
        .lines()
        .find_map(|line| line.strip_prefix("data:"))
        .unwrap();
    let event: Value = serde_json::from_str(data.trim()).unwrap();
    assert_eq!(event["event_type"], json!("state_changed"));
    assert_eq!(event["snapshot"]["navigation"]["current_index"], json!(1));
}

#[tokio::test]
async fn local_photos_and_thumbnails_are_served() {
    let dir = photo_dir("serve");
    let library = PhotoLibrary::scan(&dir).unwrap();
    let app = build_app(ViewerConfig::default(), Some(library));

    let response = app
        .clone()
        .oneshot(Request::get("/photos/kyoto/gion.png").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/thumbnail/kyoto/gion.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let thumb = image::load_from_memory(&bytes).unwrap();
    assert!(thumb.width() <= 320 && thumb.height() <= 320);

    let response = app
        .oneshot(
            Request::get("/api/thumbnail/kyoto/missing.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let _ = std::fs::remove_dir_all(&dir);
}
