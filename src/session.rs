use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::autoplay::AutoplayTimer;
use crate::config::ViewerConfig;
use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::error::Result;
use crate::server::events::{ViewerEvent, EVENT_AUTOPLAY_TICK, EVENT_STATE_CHANGED};
use crate::viewer::{Viewer, ViewerCommand, ViewerSnapshot};

struct SessionInner {
    viewer: Viewer,
    timer: AutoplayTimer,
}

/// Owns the viewer state and its autoplay timer.
///
/// Commands and timer ticks both go through the same lock; every state change
/// is broadcast as a snapshot to subscribers.
#[derive(Clone)]
pub struct ViewerSession {
    inner: Arc<Mutex<SessionInner>>,
    events: broadcast::Sender<ViewerEvent>,
}

impl ViewerSession {
    pub fn new(viewer: Viewer) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                viewer,
                timer: AutoplayTimer::new(),
            })),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewerEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        self.lock().viewer.snapshot()
    }

    pub fn config(&self) -> ViewerConfig {
        self.lock().viewer.config()
    }

    pub fn current_index(&self) -> usize {
        self.lock().viewer.current_index()
    }

    pub fn is_timer_armed(&self) -> bool {
        self.lock().timer.is_armed()
    }

    /// Apply a command, resynchronise the timer and publish the new state.
    ///
    /// Must be called from within a tokio runtime when autoplay may be armed.
    pub fn apply(&self, command: ViewerCommand) -> Result<ViewerSnapshot> {
        let snapshot = {
            let mut inner = self.lock();
            inner.viewer.apply(&command)?;
            if command.resets_timer() {
                Self::sync_timer(&self.inner, &self.events, &mut inner);
            }
            inner.viewer.snapshot()
        };

        self.publish(ViewerEvent::state(EVENT_STATE_CHANGED, snapshot.clone()));
        Ok(snapshot)
    }

    /// Stop autoplay, e.g. on shutdown.
    pub fn stop(&self) {
        let mut inner = self.lock();
        inner.timer.cancel();
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: ViewerEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    // Cancel first, then re-arm with the current interval if autoplay is on.
    fn sync_timer(
        shared: &Arc<Mutex<SessionInner>>,
        events: &broadcast::Sender<ViewerEvent>,
        inner: &mut SessionInner,
    ) {
        inner.timer.cancel();

        let nav = inner.viewer.navigation();
        if !nav.autoplay_enabled {
            return;
        }

        let delay = Duration::from_millis(nav.autoplay_interval_ms);
        let weak = Arc::downgrade(shared);
        let events = events.clone();
        inner
            .timer
            .arm(delay, move |generation| on_tick(weak, events, generation));
    }
}

fn on_tick(weak: Weak<Mutex<SessionInner>>, events: broadcast::Sender<ViewerEvent>, generation: u64) {
    let Some(shared) = weak.upgrade() else {
        return;
    };

    let snapshot = {
        let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
        if !inner.timer.claim(generation) {
            debug!(generation, "Ignoring stale autoplay tick");
            return;
        }

        inner.viewer.next();
        info!(
            day = inner.viewer.active_day().day_number,
            "Autoplay advanced"
        );
        ViewerSession::sync_timer(&shared, &events, &mut inner);
        inner.viewer.snapshot()
    };

    let _ = events.send(ViewerEvent::state(EVENT_AUTOPLAY_TICK, snapshot));
}
