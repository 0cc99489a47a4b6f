use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AUTOPLAY_INTERVAL_MS, MAX_AUTOPLAY_INTERVAL_MS, MIN_AUTOPLAY_INTERVAL_MS,
};

/// Which day is selected and how autoplay is configured.
///
/// Indices always stay in `[0, day_count)`: every movement wraps modulo the
/// day count instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub current_index: usize,
    pub autoplay_enabled: bool,
    pub autoplay_interval_ms: u64,
    pub day_count: usize,
}

impl NavigationState {
    /// Starts at the first day with autoplay off.
    ///
    /// `day_count` must be non-zero; a validated itinerary guarantees it.
    pub fn new(day_count: usize) -> Self {
        assert!(day_count > 0, "navigation requires at least one day");
        Self {
            current_index: 0,
            autoplay_enabled: false,
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            day_count,
        }
    }

    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.set_speed(interval_ms);
        self
    }

    /// Jump to `index`, wrapped into range. Returns true if the day changed.
    pub fn go_to(&mut self, index: usize) -> bool {
        let target = index % self.day_count;
        let changed = target != self.current_index;
        self.current_index = target;
        changed
    }

    pub fn next(&mut self) -> bool {
        self.go_to((self.current_index + 1) % self.day_count)
    }

    pub fn previous(&mut self) -> bool {
        self.go_to((self.current_index + self.day_count - 1) % self.day_count)
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay_enabled = enabled;
    }

    pub fn toggle_autoplay(&mut self) -> bool {
        self.autoplay_enabled = !self.autoplay_enabled;
        self.autoplay_enabled
    }

    /// Set the autoplay interval, clamped to the supported range. Returns the applied value.
    pub fn set_speed(&mut self, interval_ms: u64) -> u64 {
        self.autoplay_interval_ms =
            interval_ms.clamp(MIN_AUTOPLAY_INTERVAL_MS, MAX_AUTOPLAY_INTERVAL_MS);
        self.autoplay_interval_ms
    }

    /// Human position label such as `"3 / 15"`.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.day_count)
    }
}
