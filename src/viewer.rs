use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::ViewerConfig;
use crate::currency::format_eur;
use crate::error::Result;
use crate::gallery::{gallery_for_day, photo_urls, GalleryItem};
use crate::itinerary::{DayRecord, Itinerary};
use crate::lightbox::LightboxState;
use crate::map_view::MapView;
use crate::navigator::NavigationState;
use crate::timeline::{timeline, TimelineEntry};

/// A user (or timer) action on the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewerCommand {
    Next,
    Previous,
    GoTo { index: usize },
    GoToDay { day: u32 },
    SetAutoplay { enabled: bool },
    ToggleAutoplay,
    SetSpeed { ms: u64 },
    OpenPhoto { index: usize },
    ClosePhoto,
}

impl ViewerCommand {
    /// Whether applying this command must cancel and possibly re-arm the autoplay timer.
    pub fn resets_timer(&self) -> bool {
        !matches!(self, ViewerCommand::OpenPhoto { .. } | ViewerCommand::ClosePhoto)
    }
}

/// Everything the page renders for the current state.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerSnapshot {
    pub config: ViewerConfig,
    pub navigation: NavigationState,
    pub position: String,
    pub day: DayRecord,
    pub map: MapView,
    pub gallery: Vec<GalleryItem>,
    pub lightbox: LightboxState,
    pub timeline: Vec<TimelineEntry>,
    pub day_cost: String,
    pub total_cost: String,
}

/// The single state object behind the page: navigation plus lightbox.
#[derive(Debug, Clone)]
pub struct Viewer {
    itinerary: Arc<Itinerary>,
    config: ViewerConfig,
    navigation: NavigationState,
    lightbox: LightboxState,
}

impl Viewer {
    pub fn new(itinerary: Arc<Itinerary>, config: ViewerConfig) -> Self {
        let navigation = NavigationState::new(itinerary.len());
        Self {
            itinerary,
            config,
            navigation,
            lightbox: LightboxState::default(),
        }
    }

    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.navigation.set_speed(interval_ms);
        self
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    pub fn config(&self) -> ViewerConfig {
        self.config
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn lightbox(&self) -> &LightboxState {
        &self.lightbox
    }

    pub fn current_index(&self) -> usize {
        self.navigation.current_index
    }

    pub fn active_day(&self) -> &DayRecord {
        // current_index is kept in range by NavigationState
        &self.itinerary.days()[self.navigation.current_index]
    }

    pub fn apply(&mut self, command: &ViewerCommand) -> Result<()> {
        debug!(?command, index = self.current_index(), "Applying viewer command");
        match *command {
            ViewerCommand::Next => self.next(),
            ViewerCommand::Previous => self.previous(),
            ViewerCommand::GoTo { index } => self.go_to(index),
            ViewerCommand::GoToDay { day } => self.go_to_day(day)?,
            ViewerCommand::SetAutoplay { enabled } => self.navigation.set_autoplay(enabled),
            ViewerCommand::ToggleAutoplay => {
                self.navigation.toggle_autoplay();
            }
            ViewerCommand::SetSpeed { ms } => {
                self.navigation.set_speed(ms);
            }
            ViewerCommand::OpenPhoto { index } => {
                self.open_photo(index);
            }
            ViewerCommand::ClosePhoto => self.lightbox.close(),
        }
        Ok(())
    }

    pub fn next(&mut self) {
        let changed = self.navigation.next();
        self.on_day_changed(changed);
    }

    pub fn previous(&mut self) {
        let changed = self.navigation.previous();
        self.on_day_changed(changed);
    }

    pub fn go_to(&mut self, index: usize) {
        let changed = self.navigation.go_to(index);
        self.on_day_changed(changed);
    }

    pub fn go_to_day(&mut self, day_number: u32) -> Result<()> {
        let index = self.itinerary.index_of_day(day_number)?;
        self.go_to(index);
        Ok(())
    }

    pub fn open_photo(&mut self, index: usize) -> bool {
        let urls = photo_urls(self.active_day(), self.config.photo_source);
        self.lightbox.open(index, &urls)
    }

    // The overlay belongs to the day it was opened on.
    fn on_day_changed(&mut self, changed: bool) {
        if changed && self.lightbox.is_open {
            self.lightbox.close();
        }
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        let day = self.active_day();
        ViewerSnapshot {
            config: self.config,
            navigation: self.navigation,
            position: self.navigation.position_label(),
            day: day.clone(),
            map: MapView::for_day(day, self.config.map_strategy),
            gallery: gallery_for_day(day, self.config.photo_source),
            lightbox: self.lightbox.clone(),
            timeline: timeline(&self.itinerary, self.navigation.current_index),
            day_cost: format_eur(day.cost_per_person),
            total_cost: format_eur(self.itinerary.total_cost()),
        }
    }
}
