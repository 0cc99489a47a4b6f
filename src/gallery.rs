use serde::Serialize;

use crate::config::PhotoSource;
use crate::itinerary::{DayRecord, PhotoRef};

/// One thumbnail in the day's gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    pub index: usize,
    pub url: String,
    pub thumbnail_url: String,
    pub alt: String,
}

/// Full-size URL for a photo, preferring the configured source.
pub fn resolve_photo(photo: &PhotoRef, source: PhotoSource) -> Option<String> {
    let local = photo.local.as_deref().map(local_url);
    let remote = photo.remote.clone();
    match source {
        PhotoSource::Remote => remote.or(local),
        PhotoSource::Local => local.or(remote),
    }
}

/// Thumbnail URL. Local photos are scaled by the server; remote ones are used as-is.
pub fn resolve_thumbnail(photo: &PhotoRef, source: PhotoSource) -> Option<String> {
    let local = photo
        .local
        .as_deref()
        .map(|p| format!("/api/thumbnail/{}", p.trim_start_matches('/')));
    let remote = photo.remote.clone();
    match source {
        PhotoSource::Remote => remote.or(local),
        PhotoSource::Local => local.or(remote),
    }
}

fn local_url(relative: &str) -> String {
    format!("/photos/{}", relative.trim_start_matches('/'))
}

/// Full-size URLs of a day's photos, in dataset order.
pub fn photo_urls(day: &DayRecord, source: PhotoSource) -> Vec<String> {
    day.photos
        .iter()
        .filter_map(|p| resolve_photo(p, source))
        .collect()
}

pub fn gallery_for_day(day: &DayRecord, source: PhotoSource) -> Vec<GalleryItem> {
    day.photos
        .iter()
        .filter_map(|photo| {
            let url = resolve_photo(photo, source)?;
            let thumbnail_url = resolve_thumbnail(photo, source)?;
            Some((photo, url, thumbnail_url))
        })
        .enumerate()
        .map(|(index, (photo, url, thumbnail_url))| GalleryItem {
            index,
            url,
            thumbnail_url,
            alt: photo
                .caption
                .clone()
                .unwrap_or_else(|| format!("Foto {} día {}", index + 1, day.day_number)),
        })
        .collect()
}
