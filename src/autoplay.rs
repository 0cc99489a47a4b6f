use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Single-shot, cancellable autoplay tick.
///
/// At most one tick is pending at any time: arming always cancels the
/// previous one first. Each arming gets a new generation; a tick whose
/// generation is no longer current must be ignored by the caller, which
/// covers a task that had already woken up when it was aborted.
#[derive(Debug, Default)]
pub struct AutoplayTimer {
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl AutoplayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `on_fire` after `delay`, replacing any pending tick.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&mut self, delay: Duration, on_fire: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        debug!(generation, delay_ms = delay.as_millis() as u64, "Arming autoplay tick");

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(generation);
        }));
        generation
    }

    /// Drop the pending tick, if any. Invalidates its generation.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            debug!(generation = self.generation, "Cancelled autoplay tick");
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Claim a fired tick. Returns false for stale generations.
    pub fn claim(&mut self, generation: u64) -> bool {
        if self.pending.is_some() && self.generation == generation {
            // The handle belongs to the task that is running right now.
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
