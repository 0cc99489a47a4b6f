use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::viewer::ViewerSnapshot;

// SSE event types
pub const EVENT_STATE_CHANGED: &str = "state_changed";
pub const EVENT_AUTOPLAY_TICK: &str = "autoplay_tick";
pub const EVENT_HEARTBEAT: &str = "heartbeat";

#[derive(Debug, Clone, Serialize)]
pub struct ViewerEvent {
    pub event_type: String,
    pub emitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<ViewerSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ViewerEvent {
    pub fn state(event_type: &str, snapshot: ViewerSnapshot) -> Self {
        Self {
            event_type: event_type.to_string(),
            emitted_at: Utc::now(),
            snapshot: Some(snapshot),
            message: None,
        }
    }

    pub fn heartbeat() -> Self {
        Self {
            event_type: EVENT_HEARTBEAT.to_string(),
            emitted_at: Utc::now(),
            snapshot: None,
            message: Some("SSE connection alive".to_string()),
        }
    }
}
