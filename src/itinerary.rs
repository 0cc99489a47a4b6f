use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ItineraryError, Result};
use crate::geo::LatLng;

/// Dataset compiled into the binary; replaced at startup when settings name a file.
const BUILTIN_ITINERARY: &str = include_str!("../data/itinerary.json");

/// Coarse geographic grouping used by the region-scoped map strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    LongHaul,
    Kansai,
    FujiHakone,
    MetroTokyo,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::LongHaul => "Long haul",
            Region::Kansai => "Kansai",
            Region::FujiHakone => "Fuji & Hakone",
            Region::MetroTokyo => "Metro Tokyo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: LatLng,
    pub label: String,
}

/// Where a photo can be loaded from. At least one source is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PhotoRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// Path relative to the configured photos directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl PhotoRef {
    pub fn has_source(&self) -> bool {
        self.remote.is_some() || self.local.is_some()
    }

    /// Local paths are placed into `/photos/...` URLs verbatim, so they may not
    /// carry a query, fragment or escape character.
    pub fn local_path_is_url_safe(&self) -> bool {
        self.local
            .as_deref()
            .map_or(true, |p| !p.contains(['#', '?', '%']))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub day_number: u32,
    pub date: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub points: Vec<LatLng>,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    pub cost_per_person: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

// On-disk layout of the dataset
#[derive(Debug, Deserialize)]
struct ItineraryFile {
    title: String,
    #[serde(default)]
    tagline: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    hero: Option<PhotoRef>,
    #[serde(default)]
    credits: String,
    days: Vec<DayRecord>,
}

/// The fixed, validated trip plan. Immutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    pub title: String,
    pub tagline: String,
    pub summary: String,
    pub hero: Option<PhotoRef>,
    pub credits: String,
    days: Vec<DayRecord>,
    total_cost: f64,
}

impl Itinerary {
    /// Build from day records, validating them and summing the trip cost once.
    pub fn new(title: impl Into<String>, days: Vec<DayRecord>) -> Result<Self> {
        Self::from_parts(ItineraryFile {
            title: title.into(),
            tagline: String::new(),
            summary: String::new(),
            hero: None,
            credits: String::new(),
            days,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_ITINERARY)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: ItineraryFile = serde_json::from_str(json)?;
        Self::from_parts(file)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading itinerary file");
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn from_parts(file: ItineraryFile) -> Result<Self> {
        validate_days(&file.days)?;
        let total_cost = file.days.iter().map(|d| d.cost_per_person).sum();

        info!(
            days = file.days.len(),
            total_cost,
            "Itinerary loaded: {}",
            file.title
        );

        Ok(Itinerary {
            title: file.title,
            tagline: file.tagline,
            summary: file.summary,
            hero: file.hero,
            credits: file.credits,
            days: file.days,
            total_cost,
        })
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false for a validated itinerary.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Index of the day with the given number.
    pub fn index_of_day(&self, day_number: u32) -> Result<usize> {
        // Day numbers are contiguous from 1, so the lookup is positional.
        let index = (day_number as usize)
            .checked_sub(1)
            .filter(|i| *i < self.days.len())
            .ok_or(ItineraryError::UnknownDay(day_number))?;
        Ok(index)
    }

    /// Sum of every day's cost per person, fixed at load time.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

fn validate_days(days: &[DayRecord]) -> Result<()> {
    if days.is_empty() {
        return Err(ItineraryError::Empty);
    }

    for (position, day) in days.iter().enumerate() {
        let expected = position as u32 + 1;
        if day.day_number != expected {
            return Err(ItineraryError::NonSequentialDay {
                position,
                expected,
                found: day.day_number,
            });
        }

        if !day.cost_per_person.is_finite() || day.cost_per_person < 0.0 {
            return Err(ItineraryError::InvalidCost {
                day: day.day_number,
                cost: day.cost_per_person,
            });
        }

        let mut positions = day
            .points
            .iter()
            .chain(day.markers.iter().map(|m| &m.position));
        if let Some(bad) = positions.find(|p| !p.is_valid()) {
            return Err(ItineraryError::InvalidCoordinate {
                day: day.day_number,
                lat: bad.lat(),
                lng: bad.lng(),
            });
        }

        if let Some(index) = day.markers.iter().position(|m| m.label.trim().is_empty()) {
            return Err(ItineraryError::UnlabelledMarker {
                day: day.day_number,
                index,
            });
        }

        if let Some(index) = day.photos.iter().position(|p| !p.has_source()) {
            return Err(ItineraryError::PhotoWithoutSource {
                day: day.day_number,
                index,
            });
        }

        if let Some(index) = day.photos.iter().position(|p| !p.local_path_is_url_safe()) {
            return Err(ItineraryError::UnsafeLocalPath {
                day: day.day_number,
                index,
                path: day.photos[index].local.clone().unwrap_or_default(),
            });
        }
    }

    Ok(())
}
