use thiserror::Error;

/// Errors raised while loading or validating an itinerary dataset.
#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("itinerary has no days")]
    Empty,

    #[error("day at position {position} is numbered {found}, expected {expected}")]
    NonSequentialDay {
        position: usize,
        expected: u32,
        found: u32,
    },

    #[error("day {day}: cost per person must be finite and non-negative, got {cost}")]
    InvalidCost { day: u32, cost: f64 },

    #[error("day {day}: coordinate ({lat}, {lng}) is out of range")]
    InvalidCoordinate { day: u32, lat: f64, lng: f64 },

    #[error("day {day}: photo {index} has neither a remote nor a local source")]
    PhotoWithoutSource { day: u32, index: usize },

    #[error("day {day}: photo {index} has a local path that cannot be used in a URL: {path}")]
    UnsafeLocalPath { day: u32, index: usize, path: String },

    #[error("day {day}: marker {index} has an empty label")]
    UnlabelledMarker { day: u32, index: usize },

    #[error("no day numbered {0}")]
    UnknownDay(u32),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ItineraryError>;
