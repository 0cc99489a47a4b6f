//! Day-by-day trip itinerary viewer.
//!
//! A fixed itinerary is navigated one day at a time (manually or by an
//! autoplay timer); each day is rendered as a route map, a photo gallery
//! with a lightbox and a timeline strip. The state lives in a single
//! [`session::ViewerSession`] and is served to a thin Leaflet page.

pub mod autoplay;
pub mod config;
pub mod constants;
pub mod currency;
pub mod error;
pub mod gallery;
pub mod geo;
pub mod html_template;
pub mod itinerary;
pub mod lightbox;
pub mod map_view;
pub mod navigator;
pub mod photo_library;
pub mod server;
pub mod session;
pub mod settings;
pub mod timeline;
pub mod viewer;

pub use config::{MapStrategy, PhotoSource, Theme, ViewerConfig};
pub use error::ItineraryError;
pub use geo::{bounds_from_points, BoundingBox, LatLng};
pub use itinerary::{DayRecord, Itinerary};
pub use session::ViewerSession;
pub use viewer::{Viewer, ViewerCommand, ViewerSnapshot};
